//! View Model
//!
//! What a surface should draw, derived purely from panel state. Surfaces
//! plug in their own [`TextRenderer`] to turn candidate markup into whatever
//! they can display (styled terminal lines, HTML, plain text).

/// Label of the submit control when it accepts input
pub const SUBMIT_LABEL: &str = "Ask";

/// Label of the submit control while a request is in flight
pub const BUSY_LABEL: &str = "Thinking...";

/// Converts a formatted-text string into displayable content
pub trait TextRenderer {
    /// Rendered form of one text item
    type Output;

    /// Render formatted text
    fn render(&self, text: &str) -> Self::Output;
}

/// Renderer that passes text through untouched
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

impl TextRenderer for PlainText {
    type Output = String;

    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

/// State of the submit control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitControl {
    /// Text on the control
    pub label: &'static str,
    /// Whether activating it submits
    pub enabled: bool,
}

impl SubmitControl {
    /// Control for the given pending flag
    #[must_use]
    pub fn for_pending(pending: bool) -> Self {
        if pending {
            Self {
                label: BUSY_LABEL,
                enabled: false,
            }
        } else {
            Self {
                label: SUBMIT_LABEL,
                enabled: true,
            }
        }
    }
}

/// The result region
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultView<T> {
    /// No result block (idle or pending)
    Hidden,
    /// A successful answer
    Answer {
        /// Introductory line
        intro: String,
        /// One rendered item per candidate, in order
        candidates: Vec<T>,
        /// Closing line
        closing: String,
    },
    /// An error block
    Error {
        /// User-facing failure text
        message: String,
    },
}

impl<T> ResultView<T> {
    /// Whether any result block is shown
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Rendered candidate items (empty unless this is an answer)
    #[must_use]
    pub fn candidates(&self) -> &[T] {
        match self {
            Self::Answer { candidates, .. } => candidates,
            _ => &[],
        }
    }
}

/// Everything a surface needs to draw the panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView<T> {
    /// Current query text
    pub query: String,
    /// Submit control state
    pub submit: SubmitControl,
    /// Result region
    pub result: ResultView<T>,
}
