//! Query Service Integration
//!
//! Access to the query-answering service through a common trait, so the
//! panel and its tests can run against HTTP or an in-memory double.
//!
//! # Usage
//!
//! ```ignore
//! use panel_core::service::{HttpQueryService, QueryService};
//!
//! let service = HttpQueryService::from_config(&config.service)?;
//! let answer = service.query("Find Python developers").await?;
//! ```

mod http;
mod traits;

pub use http::HttpQueryService;
pub use traits::QueryService;
