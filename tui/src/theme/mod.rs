//! Theme and Colors
//!
//! Palette for the query panel. Blue accents for the form, soft grays for
//! chrome, red reserved for the error block.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Form Colors
// ============================================================================

/// Accent blue (title, enabled submit control)
pub const ACCENT_BLUE: Color = Color::Rgb(37, 99, 235);

/// Typed query text
pub const INPUT_TEXT: Color = Color::Rgb(230, 230, 230);

/// Placeholder text in the empty input
pub const PLACEHOLDER_GRAY: Color = Color::Rgb(110, 110, 110);

/// Disabled submit control
pub const DISABLED_GRAY: Color = Color::Rgb(90, 90, 90);

// ============================================================================
// Result Colors
// ============================================================================

/// Intro and closing lines
pub const ANSWER_TEXT: Color = Color::Rgb(210, 210, 210);

/// Candidate box border
pub const CANDIDATE_BORDER: Color = Color::Rgb(96, 125, 180);

/// Error block border and text
pub const ERROR_RED: Color = Color::Rgb(220, 60, 60);

/// Error block background tint
pub const ERROR_BG: Color = Color::Rgb(60, 20, 20);

/// Headings inside candidate markup
pub const HEADING_CYAN: Color = Color::Cyan;

/// Inline code inside candidate markup
pub const CODE_YELLOW: Color = Color::Rgb(230, 200, 100);

// ============================================================================
// Chrome
// ============================================================================

/// Separators and status bar
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Service reachable marker
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Header title style
pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_BLUE)
        .add_modifier(Modifier::BOLD)
}

/// Submit control style for its enabled state
pub fn submit_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DISABLED_GRAY).add_modifier(Modifier::DIM)
    }
}
