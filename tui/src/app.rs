//! Main Application
//!
//! The App struct owns the terminal lifecycle for one query panel:
//! - Event loop (keyboard, resize, completions, health check, tick)
//! - QueryPanel for the request state machine
//! - QueryDispatcher for the background service call
//!
//! All state changes happen on the event loop task. Service calls run on a
//! spawned task and come back as [`Completion`]s through the dispatcher.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::{Frame, Terminal};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use panel_core::{Completion, QueryDispatcher, QueryPanel, QueryService, RequestState, UiConfig};

use crate::theme::{
    self, ANSWER_TEXT, DIM_GRAY, ERROR_RED, INPUT_TEXT, PLACEHOLDER_GRAY, SUCCESS_GREEN,
};
use crate::widgets::{result_lines, MarkdownRenderer, TextBlock, TextBlockState};

/// Input box height (separator + text lines)
const INPUT_HEIGHT: u16 = 4;

/// Header height (title, subtitle, separator)
const HEADER_HEIGHT: u16 = 3;

/// UI tick for the spinner
const TICK: Duration = Duration::from_millis(100);

/// Spinner frames shown while a request is pending
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Reachability of the query service, from the startup health check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceStatus {
    /// Health check still running
    Checking,
    /// Service answered with a 2xx status
    Reachable,
    /// No answer, or a non-2xx status
    Unreachable,
}

impl ServiceStatus {
    fn label(self) -> &'static str {
        match self {
            Self::Checking => "checking service",
            Self::Reachable => "service reachable",
            Self::Unreachable => "service unreachable",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Checking => Style::default().fg(DIM_GRAY),
            Self::Reachable => Style::default().fg(SUCCESS_GREEN),
            Self::Unreachable => Style::default().fg(ERROR_RED),
        }
    }
}

/// Main application state
pub struct App<S: QueryService + 'static> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Query text and request state
    panel: QueryPanel,
    /// Runs service calls off the event loop
    dispatcher: QueryDispatcher<S>,

    // === Rendering ===
    /// Candidate markup renderer
    renderer: MarkdownRenderer,
    /// Surface text
    ui: UiConfig,
    /// Result region scroll state
    results: TextBlockState,

    // === Status ===
    service_status: ServiceStatus,
    spinner_frame: usize,
}

impl<S: QueryService + 'static> App<S> {
    /// Create a new App instance
    pub fn new(service: S, ui: UiConfig) -> Self {
        Self {
            running: true,
            panel: QueryPanel::new(),
            dispatcher: QueryDispatcher::new(service),
            renderer: MarkdownRenderer::new().base_style(Style::default().fg(ANSWER_TEXT)),
            ui,
            results: TextBlockState::default(),
            service_status: ServiceStatus::Checking,
            spinner_frame: 0,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(TICK);

        let service = self.dispatcher.service();
        let health = async move { service.health_check().await };
        tokio::pin!(health);
        let mut health_done = false;

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => self.handle_paste(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                Some(completion) = self.dispatcher.recv() => {
                    self.apply_completion(completion);
                }

                reachable = &mut health, if !health_done => {
                    health_done = true;
                    self.set_service_status(if reachable {
                        ServiceStatus::Reachable
                    } else {
                        ServiceStatus::Unreachable
                    });
                }

                _ = ticker.tick() => self.tick(),
            }

            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            // Editing
            KeyCode::Char('u') if ctrl => self.panel.clear_query(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.panel.push_char(c);
            }
            KeyCode::Backspace => self.panel.pop_char(),

            KeyCode::Enter => self.submit(),

            // Result scrolling
            KeyCode::PageUp => self.results.page(false),
            KeyCode::PageDown => self.results.page(true),
            KeyCode::Home if ctrl => self.results.scroll_to_top(),
            KeyCode::End if ctrl => self.results.scroll_to_bottom(),

            _ => {}
        }
    }

    /// Handle bracketed paste
    ///
    /// Line breaks and tabs become single spaces so a pasted block never
    /// submits. Other control characters are dropped.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        for c in text.chars() {
            match c {
                '\n' | '\r' | '\t' => self.panel.push_char(' '),
                c if c.is_control() => {}
                c => self.panel.push_char(c),
            }
        }
        debug!(chars = text.chars().count(), "Pasted into query");
    }

    /// Submit the current query if the panel accepts it
    fn submit(&mut self) {
        match self.panel.submit() {
            Some(request) => self.dispatcher.dispatch(request),
            None => debug!("Enter ignored, a request is already in flight"),
        }
    }

    /// Apply a finished service call
    pub fn apply_completion(&mut self, completion: Completion) {
        self.panel.resolve(completion);
        self.results.scroll_to_top();
    }

    /// Record the health check result
    pub fn set_service_status(&mut self, status: ServiceStatus) {
        info!(status = status.label(), "Service health check finished");
        self.service_status = status;
    }

    fn tick(&mut self) {
        if self.panel.is_pending() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The query panel
    pub fn panel(&self) -> &QueryPanel {
        &self.panel
    }

    /// The completion source, for driving the app without a terminal
    pub fn dispatcher_mut(&mut self) -> &mut QueryDispatcher<S> {
        &mut self.dispatcher
    }

    /// Current health check status
    pub fn service_status(&self) -> ServiceStatus {
        self.service_status
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draw the whole panel into a frame
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.width < 10 || area.height < HEADER_HEIGHT + INPUT_HEIGHT + 2 {
            frame
                .buffer_mut()
                .set_string(area.x, area.y, "Terminal too small", Style::default().fg(DIM_GRAY));
            return;
        }

        let status_y = area.bottom() - 1;
        let input_y = status_y - INPUT_HEIGHT;
        let header = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT);
        let results = Rect::new(
            area.x + 1,
            area.y + HEADER_HEIGHT,
            area.width.saturating_sub(2),
            input_y - (area.y + HEADER_HEIGHT),
        );
        let input = Rect::new(area.x, input_y, area.width, INPUT_HEIGHT);
        let status = Rect::new(area.x, status_y, area.width, 1);

        self.render_header(frame, header);
        self.render_results(frame, results);
        self.render_input(frame, input);
        self.render_status(frame, status);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let buf = frame.buffer_mut();
        let width = area.width as usize;

        buf.set_stringn(area.x + 1, area.y, &self.ui.title, width - 1, theme::title_style());
        buf.set_stringn(
            area.x + 1,
            area.y + 1,
            &self.ui.subtitle,
            width - 1,
            Style::default().fg(DIM_GRAY),
        );
        buf.set_string(
            area.x,
            area.y + 2,
            "─".repeat(width),
            Style::default().fg(DIM_GRAY),
        );
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let view = self.panel.view(&self.renderer);
        let lines = result_lines(&view.result, area.width as usize);
        frame.render_stateful_widget(TextBlock::new(&lines), area, &mut self.results);

        if self.results.has_more_below() {
            let hint = "▼ PgDn";
            let x = area.right().saturating_sub(hint.width() as u16);
            frame
                .buffer_mut()
                .set_string(x, area.bottom() - 1, hint, Style::default().fg(DIM_GRAY));
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let buf = frame.buffer_mut();

        buf.set_string(
            area.x,
            area.y,
            "─".repeat(area.width as usize),
            Style::default().fg(DIM_GRAY),
        );

        let control = self.panel.submit_control();
        let label = format!(" {} ", control.label);
        let label_width = label.width() as u16;
        let text_x = area.x + 2;
        let text_width = area.width.saturating_sub(label_width + 4) as usize;
        let text_height = area.height.saturating_sub(1) as usize;

        buf.set_string(
            area.right().saturating_sub(label_width + 1),
            area.y + 1,
            &label,
            theme::submit_style(control.enabled),
        );

        if text_width < 5 || text_height < 1 {
            return;
        }

        buf.set_string(area.x, area.y + 1, ">", Style::default().fg(theme::ACCENT_BLUE));

        let query = self.panel.query();
        if query.is_empty() {
            buf.set_stringn(
                text_x,
                area.y + 1,
                &self.ui.placeholder,
                text_width,
                Style::default()
                    .fg(PLACEHOLDER_GRAY)
                    .add_modifier(Modifier::ITALIC),
            );
            return;
        }

        let full_input = format!("{query}_");
        let wrapped: Vec<String> = textwrap::wrap(&full_input, text_width)
            .iter()
            .map(ToString::to_string)
            .collect();

        // Keep the end of the query (where the cursor is) visible
        let skip = wrapped.len().saturating_sub(text_height);
        for (i, line) in wrapped.iter().skip(skip).enumerate() {
            buf.set_string(
                text_x,
                area.y + 1 + i as u16,
                line,
                Style::default().fg(INPUT_TEXT),
            );
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.panel.state();
        let state_span = match state {
            RequestState::Pending => Span::styled(
                format!("{} {}", SPINNER[self.spinner_frame], state.description()),
                Style::default().fg(theme::ACCENT_BLUE),
            ),
            RequestState::Failed(_) => {
                Span::styled(state.description(), Style::default().fg(ERROR_RED))
            }
            _ => Span::styled(state.description(), Style::default().fg(DIM_GRAY)),
        };

        let dim = Style::default().fg(DIM_GRAY);
        let line = Line::from(vec![
            Span::styled(" ● ", self.service_status.style()),
            Span::styled(self.service_status.label(), dim),
            Span::styled(" | ", dim),
            state_span,
            Span::styled(
                " | Enter ask | Ctrl+U clear | PgUp/PgDn scroll | Esc quit",
                dim,
            ),
        ]);

        frame.buffer_mut().set_line(area.x, area.y, &line, area.width);
    }
}
