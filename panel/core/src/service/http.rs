//! HTTP Query Service
//!
//! Talks to the retrieval service over JSON/HTTP.
//!
//! # Endpoints
//!
//! - `POST /chat` with `{"query": "..."}` - answer a query
//! - `GET /` - welcome message, used as a reachability probe
//!
//! The client is built without a total request timeout: a hung service keeps
//! the panel pending until it answers.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::traits::QueryService;
use crate::answer::{decode_answer, Answer, QueryPayload};
use crate::config::ServiceConfig;
use crate::error::QueryError;

/// Longest error body kept for logs
const MAX_ERROR_BODY: usize = 256;

/// Query service reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpQueryService {
    /// Base URL without trailing slash
    base_url: String,
    /// Path of the query endpoint
    chat_path: String,
    /// Path of the reachability probe
    health_path: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpQueryService {
    /// Create a service for a base URL with default endpoint paths
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Self::from_config(&ServiceConfig {
            base_url: base_url.into(),
            ..ServiceConfig::default()
        })
    }

    /// Create from [`ServiceConfig`]
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn from_config(config: &ServiceConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_path: config.chat_path.clone(),
            health_path: config.health_path.clone(),
            http_client: builder.build()?,
        })
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the query endpoint URL
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Get the reachability probe URL
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }
}

/// Cut a body down for logging without splitting a character
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[async_trait]
impl QueryService for HttpQueryService {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn query(&self, query: &str) -> Result<Answer, QueryError> {
        let url = self.chat_url();
        debug!(url = %url, query_len = query.len(), "Sending query");

        let response = self
            .http_client
            .post(&url)
            .json(&QueryPayload::new(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Query response received");
        decode_answer(&body)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }
}
