//! Markdown Renderer
//!
//! Turns the lightweight markup in candidate text (`**name**`, `*emphasis*`,
//! inline code, lists) into styled terminal lines. Raw HTML is shown as
//! written, since candidate text is not trusted markup.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::core::{Fragment, Word};
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::WordSeparator;

use panel_core::TextRenderer;

use crate::theme::{CODE_YELLOW, HEADING_CYAN};

/// Renders markdown into unwrapped styled lines
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer {
    /// Base style applied under all markup
    base: Style,
}

impl MarkdownRenderer {
    /// Create a renderer with the default base style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base style
    pub fn base_style(mut self, style: Style) -> Self {
        self.base = style;
        self
    }
}

/// Accumulates spans into lines while walking parser events
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// One entry per open list: the next item number, or `None` for bullets
    lists: Vec<Option<u64>>,
}

impl LineBuilder {
    fn new(base: Style) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![base],
            lists: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn text(&mut self, text: &str) {
        let style = self.style();
        self.current.push(Span::styled(text.to_string(), style));
    }

    /// Push text that may span several source lines
    fn multiline(&mut self, text: &str) {
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                self.text(part);
            }
            if parts.peek().is_some() {
                self.flush();
            }
        }
    }

    /// Marker for the next item of the innermost list
    fn item_marker(&mut self) -> String {
        let indent = "  ".repeat(self.lists.len().saturating_sub(1));
        match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{indent}{n}. ");
                *n += 1;
                marker
            }
            _ => format!("{indent}• "),
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    /// Close the current line and leave one blank line before the next block
    fn end_block(&mut self) {
        self.flush();
        if self.lists.is_empty() && self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

impl TextRenderer for MarkdownRenderer {
    type Output = Vec<Line<'static>>;

    fn render(&self, text: &str) -> Vec<Line<'static>> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut out = LineBuilder::new(self.base);

        for event in Parser::new_ext(text, options) {
            match event {
                Event::Start(Tag::Strong) => {
                    out.push_style(Style::default().add_modifier(Modifier::BOLD));
                }
                Event::Start(Tag::Emphasis) => {
                    out.push_style(Style::default().add_modifier(Modifier::ITALIC));
                }
                Event::Start(Tag::Strikethrough) => {
                    out.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT));
                }
                Event::Start(Tag::Heading(level, ..)) => {
                    let mut style = Style::default().add_modifier(Modifier::BOLD);
                    if level == HeadingLevel::H1 || level == HeadingLevel::H2 {
                        style = style.fg(HEADING_CYAN);
                    }
                    out.push_style(style);
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    out.flush();
                    out.push_style(Style::default().fg(CODE_YELLOW));
                }
                Event::Start(Tag::List(start)) => {
                    out.flush();
                    out.lists.push(start);
                }
                Event::Start(Tag::Item) => {
                    out.flush();
                    let marker = out.item_marker();
                    out.text(&marker);
                }
                Event::End(Tag::Strong | Tag::Emphasis | Tag::Strikethrough) => out.pop_style(),
                Event::End(Tag::Heading(..)) => {
                    out.pop_style();
                    out.end_block();
                }
                Event::End(Tag::CodeBlock(_)) => {
                    out.pop_style();
                    out.end_block();
                }
                Event::End(Tag::Paragraph) => out.end_block(),
                Event::End(Tag::Item) => out.flush(),
                Event::End(Tag::List(_)) => {
                    out.lists.pop();
                    out.end_block();
                }
                // Code blocks and HTML blocks arrive as multi-line text
                Event::Text(text) | Event::Html(text) => out.multiline(&text),
                Event::Code(code) => {
                    let style = out.style().fg(CODE_YELLOW);
                    out.current.push(Span::styled(code.to_string(), style));
                }
                Event::SoftBreak => out.text(" "),
                Event::HardBreak => out.flush(),
                Event::Rule => {
                    out.flush();
                    out.text("────────");
                    out.end_block();
                }
                _ => {}
            }
        }

        out.finish()
    }
}

/// One word of a styled line, laid out by textwrap
#[derive(Debug)]
struct StyledWord<'a> {
    word: Word<'a>,
    style: Style,
}

impl Fragment for StyledWord<'_> {
    fn width(&self) -> f64 {
        self.word.width()
    }

    fn whitespace_width(&self) -> f64 {
        self.word.whitespace_width()
    }

    fn penalty_width(&self) -> f64 {
        self.word.penalty_width()
    }
}

/// Append `text` to the last span when the style matches
fn push_merged(spans: &mut Vec<Span<'static>>, text: String, style: Style) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(&text),
        _ => spans.push(Span::styled(text, style)),
    }
}

/// Word-wrap a styled line to `width` columns, keeping span styles
///
/// Words longer than the width are split by character. Whitespace at a
/// break is dropped.
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut words = Vec::new();
    for span in &line.spans {
        for word in WordSeparator::AsciiSpace.find_words(&span.content) {
            if word.width() > width as f64 {
                words.extend(word.break_apart(width).map(|word| StyledWord {
                    word,
                    style: span.style,
                }));
            } else {
                words.push(StyledWord {
                    word,
                    style: span.style,
                });
            }
        }
    }

    let mut lines: Vec<Line<'static>> = wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(|fragments| {
            let mut spans = Vec::new();
            for (i, fragment) in fragments.iter().enumerate() {
                let mut text = fragment.word.word.to_string();
                if i + 1 < fragments.len() {
                    text.push_str(fragment.word.whitespace);
                }
                push_merged(&mut spans, text, fragment.style);
            }
            Line::from(spans)
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

/// Plain text of a line, for tests and accessibility output
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
