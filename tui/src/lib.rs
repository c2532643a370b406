//! hrquery TUI - Terminal surface for the employee search panel
//!
//! This crate draws a [`panel_core::QueryPanel`] in a full-screen terminal
//! UI: a header, a scrollable result region, an input box with the submit
//! control, and a status bar.
//!
//! # Architecture
//!
//! - **App**: event loop, key handling, layout
//! - **Widgets**: markdown renderer, result layout, scrollable text block
//! - **Theme**: colors and styles

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::{App, ServiceStatus};
