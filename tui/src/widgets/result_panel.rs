//! Result Panel
//!
//! Lays out a [`ResultView`] as terminal lines: the intro paragraph, one
//! numbered box per candidate, and the closing paragraph. Failures become a
//! single red box.
//!
//! Output is already wrapped to the requested width so a [`TextBlock`] can
//! scroll it without reflowing.
//!
//! [`TextBlock`]: super::TextBlock

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use panel_core::ResultView;

use super::markdown::wrap_line;
use crate::theme::{ANSWER_TEXT, CANDIDATE_BORDER, ERROR_BG, ERROR_RED};

/// Narrowest width that still fits a box with one column of content
const MIN_BOX_WIDTH: usize = 5;

/// Build the lines for a result view at `width` columns
pub fn result_lines(result: &ResultView<Vec<Line<'static>>>, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    match result {
        ResultView::Hidden => {}
        ResultView::Answer {
            intro,
            candidates,
            closing,
        } => {
            let text_style = Style::default().fg(ANSWER_TEXT);
            let border = Style::default().fg(CANDIDATE_BORDER);

            push_paragraph(&mut lines, intro, text_style, width);

            for (i, candidate) in candidates.iter().enumerate() {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                let title = format!(" {} ", i + 1);
                boxed(&mut lines, &title, candidate, border, Style::default(), width);
            }

            if !closing.trim().is_empty() {
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                push_paragraph(&mut lines, closing, text_style, width);
            }
        }
        ResultView::Error { message } => {
            let border = Style::default().fg(ERROR_RED).bg(ERROR_BG);
            let body = Style::default()
                .fg(ERROR_RED)
                .bg(ERROR_BG)
                .add_modifier(Modifier::BOLD);
            let content = vec![Line::from(Span::styled(message.clone(), body))];
            boxed(&mut lines, " Error ", &content, border, body, width);
        }
    }

    lines
}

/// Push plain text, one line per source line, wrapped to `width`
///
/// Empty text adds nothing.
fn push_paragraph(lines: &mut Vec<Line<'static>>, text: &str, style: Style, width: usize) {
    if text.trim().is_empty() {
        return;
    }
    for raw in text.lines() {
        let line = Line::from(Span::styled(raw.to_string(), style));
        lines.extend(wrap_line(&line, width));
    }
}

/// Draw `content` inside a rounded box with `title` set into the top border
fn boxed(
    lines: &mut Vec<Line<'static>>,
    title: &str,
    content: &[Line<'static>],
    border: Style,
    fill: Style,
    width: usize,
) {
    if width < MIN_BOX_WIDTH {
        for line in content {
            lines.extend(wrap_line(line, width));
        }
        return;
    }

    let inner = width - 4;
    let title: String = title.chars().take(width - 3).collect();
    let title_width = title.chars().count();

    lines.push(Line::from(vec![
        Span::styled("╭─", border),
        Span::styled(title, border.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}╮", "─".repeat(width.saturating_sub(3 + title_width))),
            border,
        ),
    ]));

    let body: Vec<Line<'static>> = if content.is_empty() {
        vec![Line::default()]
    } else {
        content.iter().flat_map(|l| wrap_line(l, inner)).collect()
    };

    for line in body {
        let used = line.width();
        let mut spans = vec![Span::styled("│ ", border)];
        spans.extend(line.spans.into_iter().map(|s| {
            let style = fill.patch(s.style);
            Span::styled(s.content, style)
        }));
        spans.push(Span::styled(" ".repeat(inner.saturating_sub(used)), fill));
        spans.push(Span::styled(" │", border));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("╰{}╯", "─".repeat(width - 2)),
        border,
    )));
}
