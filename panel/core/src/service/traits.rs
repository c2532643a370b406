//! Query Service Trait
//!
//! The boundary between the panel and whatever answers queries. One call,
//! one reply: no streaming, no partial results.

use std::sync::Arc;

use async_trait::async_trait;

use crate::answer::Answer;
use crate::error::QueryError;

/// A service that maps a query string to an [`Answer`]
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Service name for logs (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Answer a query
    ///
    /// Called exactly once per submitted request. Any failure, whether
    /// transport, status, or decoding, is reported as a [`QueryError`].
    async fn query(&self, query: &str) -> Result<Answer, QueryError>;

    /// Check if the service is reachable
    async fn health_check(&self) -> bool;
}

#[async_trait]
impl<S: QueryService + ?Sized> QueryService for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn query(&self, query: &str) -> Result<Answer, QueryError> {
        (**self).query(query).await
    }

    async fn health_check(&self) -> bool {
        (**self).health_check().await
    }
}
