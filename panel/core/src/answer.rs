//! Answer Model and Wire Contract
//!
//! The query service replies with `{"response": ...}`. Two shapes of
//! `response` exist in the wild:
//!
//! - **Structured** (canonical): `{ "intro", "candidates", "closing" }`
//! - **Legacy**: a single preformatted string
//!
//! Both are decoded here, at the boundary, through [`ReplyBody`]. Everything
//! past this module only ever sees an [`Answer`].

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A structured answer to a query
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Introductory line shown above the candidates
    pub intro: String,
    /// Candidate items, each one formatted text, in service order
    pub candidates: Vec<String>,
    /// Closing line shown below the candidates
    pub closing: String,
}

impl Answer {
    /// Create an answer from its three parts
    pub fn new(
        intro: impl Into<String>,
        candidates: impl IntoIterator<Item = impl Into<String>>,
        closing: impl Into<String>,
    ) -> Self {
        Self {
            intro: intro.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            closing: closing.into(),
        }
    }

    /// Wrap a legacy plain-text reply so it displays verbatim as the intro
    pub fn from_legacy_text(text: impl Into<String>) -> Self {
        Self {
            intro: text.into(),
            candidates: Vec::new(),
            closing: String::new(),
        }
    }

    /// Number of candidate items
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
}

/// Request body sent to the query service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// The user's query, sent as typed
    pub query: String,
}

impl QueryPayload {
    /// Create a payload for a query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// The `response` value of a successful reply
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReplyBody {
    /// Canonical structured answer
    Structured(Answer),
    /// Deprecated plain-string answer
    Legacy(String),
}

impl ReplyBody {
    /// Normalize either shape into an [`Answer`]
    #[must_use]
    pub fn into_answer(self) -> Answer {
        match self {
            Self::Structured(answer) => answer,
            Self::Legacy(text) => {
                tracing::debug!(len = text.len(), "Service replied with legacy plain-text shape");
                Answer::from_legacy_text(text)
            }
        }
    }
}

/// Envelope of a successful reply
#[derive(Clone, Debug, Deserialize)]
pub struct QueryReply {
    /// The answer in either shape
    pub response: ReplyBody,
}

/// Decode a raw response body into an [`Answer`]
///
/// # Errors
///
/// Returns [`QueryError::Decode`] when the body is not JSON, lacks `response`,
/// or `response` matches neither known shape.
pub fn decode_answer(body: &[u8]) -> Result<Answer, QueryError> {
    let reply: QueryReply =
        serde_json::from_slice(body).map_err(|e| QueryError::Decode(e.to_string()))?;
    Ok(reply.response.into_answer())
}
