//! TextBlock Widget
//!
//! A borderless, scrollable region of styled lines.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::StatefulWidget;

use super::markdown::wrap_line;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines after wrapping
    pub total_lines: usize,
    /// Height of the last rendered viewport
    pub viewport_height: usize,
}

impl TextBlockState {
    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: i32) {
        let new_offset = self.scroll_offset as i64 + i64::from(delta);
        self.scroll_offset = usize::try_from(new_offset.max(0)).unwrap_or(0);
        self.clamp();
    }

    /// Scroll one viewport up or down
    pub fn page(&mut self, down: bool) {
        let page = i32::try_from(self.viewport_height.max(1)).unwrap_or(i32::MAX);
        self.scroll(if down { page } else { -page });
    }

    /// Scroll to top
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Whether lines are hidden below the viewport
    pub fn has_more_below(&self) -> bool {
        self.scroll_offset < self.max_scroll()
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    fn clamp(&mut self) {
        if self.viewport_height > 0 {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }
}

/// A borderless, scrollable block of styled lines
///
/// Lines wider than the area are word-wrapped.
pub struct TextBlock<'a> {
    content: &'a [Line<'a>],
}

impl<'a> TextBlock<'a> {
    pub fn new(content: &'a [Line<'a>]) -> Self {
        Self { content }
    }
}

impl<'a> StatefulWidget for TextBlock<'a> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let wrapped: Vec<Line<'static>> = self
            .content
            .iter()
            .flat_map(|line| wrap_line(line, area.width as usize))
            .collect();

        state.total_lines = wrapped.len();
        state.viewport_height = area.height as usize;
        state.clamp();

        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
