//! Request State
//!
//! The request lifecycle as a single value. Exactly one variant holds at a
//! time, so "loading" and "error" and "answer" can never be set together.

use crate::answer::Answer;
use crate::error::QueryError;

/// Message shown for every kind of query failure
pub const SERVICE_UNAVAILABLE: &str =
    "Failed to get a response from the server. Please ensure the backend is running.";

/// User-facing failure text
///
/// Carries no technical detail about the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    /// The generic "could not reach the service" message
    #[must_use]
    pub fn service_unavailable() -> Self {
        Self(SERVICE_UNAVAILABLE.to_string())
    }

    /// The text to display
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the current query
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The last request produced an answer
    Succeeded(Answer),
    /// The last request failed
    Failed(ErrorMessage),
}

impl RequestState {
    /// Whether a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The answer, if the last request succeeded
    #[must_use]
    pub fn answer(&self) -> Option<&Answer> {
        match self {
            Self::Succeeded(answer) => Some(answer),
            _ => None,
        }
    }

    /// The error message, if the last request failed
    #[must_use]
    pub fn error(&self) -> Option<&ErrorMessage> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs and the status bar
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Pending => "Thinking...",
            Self::Succeeded(_) => "Answered",
            Self::Failed(_) => "Error",
        }
    }
}

/// Identifier of one submitted request
///
/// Monotonically increasing per panel. Completions carry it back so that a
/// future cancellation feature can discard superseded responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A query snapshot taken at submit time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    /// Request identifier
    pub id: RequestId,
    /// Query text as it was when submitted
    pub query: String,
}

/// The outcome of a dispatched request
#[derive(Debug)]
pub struct Completion {
    /// Identifier of the request this completes
    pub id: RequestId,
    /// Answer or failure
    pub outcome: Result<Answer, QueryError>,
}

impl Completion {
    /// A successful completion
    #[must_use]
    pub fn success(id: RequestId, answer: Answer) -> Self {
        Self {
            id,
            outcome: Ok(answer),
        }
    }

    /// A failed completion
    #[must_use]
    pub fn failure(id: RequestId, error: QueryError) -> Self {
        Self {
            id,
            outcome: Err(error),
        }
    }
}
