//! Panel Core - Headless Query Panel for hrquery
//!
//! This crate holds everything about asking the employee-search service a
//! question that does not depend on how the question is displayed. It can
//! drive the terminal UI, a future web surface, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Surface (TUI)                       │
//! │   keystrokes ──► QueryPanel ◄── Completion ◄──┐            │
//! │                     │  view()                 │            │
//! │                     ▼                         │            │
//! │                 PanelView ──► TextRenderer    │            │
//! └─────────────────────┼─────────────────────────┼────────────┘
//!                       │ QueryRequest            │
//! ┌─────────────────────▼─────────────────────────┴────────────┐
//! │                   QueryDispatcher                           │
//! │            (spawned call, mpsc completion)                  │
//! │                         │                                   │
//! │                 QueryService (trait)                        │
//! │                 └── HttpQueryService ──► POST /chat         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`QueryPanel`]: owns the query text and the request state machine
//! - [`RequestState`]: `Idle`, `Pending`, `Succeeded`, or `Failed`
//! - [`Answer`]: intro, ordered candidates, closing
//! - [`QueryService`]: the service boundary; [`HttpQueryService`] implements it
//! - [`QueryDispatcher`]: runs requests and returns [`Completion`]s
//! - [`TextRenderer`]: how a surface turns candidate markup into content
//!
//! # Quick Start
//!
//! ```ignore
//! use panel_core::{HttpQueryService, PlainText, QueryDispatcher, QueryPanel};
//!
//! let mut panel = QueryPanel::new();
//! let mut dispatcher = QueryDispatcher::new(HttpQueryService::new("http://127.0.0.1:8000")?);
//!
//! panel.edit("Find Python developers with 3+ years experience");
//! if let Some(request) = panel.submit() {
//!     dispatcher.dispatch(request);
//! }
//!
//! if let Some(completion) = dispatcher.recv().await {
//!     panel.resolve(completion);
//! }
//! let view = panel.view(&PlainText);
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod answer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod panel;
pub mod service;
pub mod state;
pub mod view;

// Re-exports for convenience
pub use answer::{decode_answer, Answer, QueryPayload, QueryReply, ReplyBody};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, PanelConfig, ServiceConfig, UiConfig,
};
pub use dispatch::QueryDispatcher;
pub use error::{FailureKind, QueryError};
pub use panel::QueryPanel;
pub use service::{HttpQueryService, QueryService};
pub use state::{
    Completion, ErrorMessage, QueryRequest, RequestId, RequestState, SERVICE_UNAVAILABLE,
};
pub use view::{
    PanelView, PlainText, ResultView, SubmitControl, TextRenderer, BUSY_LABEL, SUBMIT_LABEL,
};
