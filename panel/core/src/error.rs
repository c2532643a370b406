//! Query Errors
//!
//! Every way a query can fail. The distinction between causes is kept for
//! diagnostics only; the panel collapses all of them into one user-facing
//! [`ErrorMessage`](crate::state::ErrorMessage).

use thiserror::Error;

/// Broad category of a query failure, used as a structured log field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Service unreachable, connection refused, body read interrupted
    Transport,
    /// Service answered with a non-success status
    Protocol,
    /// Body was not JSON or did not match the answer contract
    Decode,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Protocol => write!(f, "protocol"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// Errors returned by a [`QueryService`](crate::service::QueryService)
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service responded with a non-2xx status
    #[error("Service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated for logging
        body: String,
    },

    /// The body did not decode into an answer
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl QueryError {
    /// Category of this failure
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Status { .. } => FailureKind::Protocol,
            Self::Decode(_) => FailureKind::Decode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        let status = QueryError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(status.kind(), FailureKind::Protocol);
        assert_eq!(
            status.to_string(),
            "Service returned HTTP 500: Internal Server Error"
        );

        let decode = QueryError::Decode("expected value".to_string());
        assert_eq!(decode.kind(), FailureKind::Decode);
        assert_eq!(decode.kind().to_string(), "decode");
    }
}
