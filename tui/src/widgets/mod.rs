//! Custom widgets for the query panel

pub mod markdown;
pub mod result_panel;
pub mod text_block;

pub use markdown::{line_text, wrap_line, MarkdownRenderer};
pub use result_panel::result_lines;
pub use text_block::{TextBlock, TextBlockState};
