//! Query Panel
//!
//! The controller behind the query form. It owns the query text and the
//! request state, hands out at most one [`QueryRequest`] at a time, and
//! applies [`Completion`]s as they come back.
//!
//! # Transitions
//!
//! ```text
//!            submit                 Ok(answer)
//!   Idle ───────────► Pending ─────────────────► Succeeded ──┐
//!    ▲                  │  ▲                                  │
//!    │                  │  └────────────── submit ────────────┤
//!    │                  │ Err(_)                              │
//!    │                  └────────────────► Failed ────────────┘
//! ```
//!
//! Submitting while `Pending` is refused, which is what keeps a single
//! request in flight. There is no cancellation: a completion is applied
//! whenever it arrives, even if the query text was edited in the meantime.

use tracing::{debug, info, warn};

use crate::state::{Completion, ErrorMessage, QueryRequest, RequestId, RequestState};
use crate::view::{PanelView, ResultView, SubmitControl, TextRenderer};

/// Stateful controller for one query form
#[derive(Debug, Default)]
pub struct QueryPanel {
    /// Text currently in the input
    query: String,
    /// Request lifecycle
    state: RequestState,
    /// Last issued request id (0 = none yet)
    last_id: u64,
    /// Id of the request currently in flight
    in_flight: Option<RequestId>,
}

impl QueryPanel {
    /// Create an idle panel with an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Query text
    // ------------------------------------------------------------------

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text
    pub fn edit(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Append a typed character
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Delete the last character
    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    /// Empty the query text
    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    // ------------------------------------------------------------------
    // Request lifecycle
    // ------------------------------------------------------------------

    /// Current request state
    #[must_use]
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Whether [`submit`](Self::submit) would issue a request
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    /// Id of the request currently in flight
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Start a request for the current query text
    ///
    /// Returns `None` without touching state while a request is already
    /// pending. Empty queries are sent as-is.
    pub fn submit(&mut self) -> Option<QueryRequest> {
        if self.is_pending() {
            debug!(in_flight = ?self.in_flight, "Submit ignored while a request is pending");
            return None;
        }

        self.last_id += 1;
        let id = RequestId(self.last_id);
        self.in_flight = Some(id);
        self.state = RequestState::Pending;

        info!(request_id = %id, query_len = self.query.len(), "Query submitted");

        Some(QueryRequest {
            id,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a dispatched request
    pub fn resolve(&mut self, completion: Completion) {
        let Completion { id, outcome } = completion;

        if !self.is_pending() {
            warn!(request_id = %id, state = self.state.description(), "Completion arrived with no request pending, ignoring");
            return;
        }

        if self.in_flight != Some(id) {
            debug!(request_id = %id, in_flight = ?self.in_flight, "Completion id differs from in-flight request");
        }
        self.in_flight = None;

        match outcome {
            Ok(answer) => {
                info!(
                    request_id = %id,
                    candidates = answer.candidate_count(),
                    "Query answered"
                );
                self.state = RequestState::Succeeded(answer);
                self.query.clear();
            }
            Err(error) => {
                warn!(request_id = %id, kind = %error.kind(), error = %error, "Query failed");
                self.state = RequestState::Failed(ErrorMessage::service_unavailable());
            }
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// State of the submit control
    #[must_use]
    pub fn submit_control(&self) -> SubmitControl {
        SubmitControl::for_pending(self.is_pending())
    }

    /// Build the view for the current state
    ///
    /// Pure: calling it twice on the same state yields equal views.
    pub fn view<R: TextRenderer>(&self, renderer: &R) -> PanelView<R::Output> {
        let result = match &self.state {
            RequestState::Idle | RequestState::Pending => ResultView::Hidden,
            RequestState::Succeeded(answer) => ResultView::Answer {
                intro: answer.intro.clone(),
                candidates: answer
                    .candidates
                    .iter()
                    .map(|c| renderer.render(c))
                    .collect(),
                closing: answer.closing.clone(),
            },
            RequestState::Failed(message) => ResultView::Error {
                message: message.as_str().to_string(),
            },
        };

        PanelView {
            query: self.query.clone(),
            submit: self.submit_control(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use crate::error::QueryError;
    use crate::state::SERVICE_UNAVAILABLE;
    use crate::view::PlainText;
    use pretty_assertions::assert_eq;

    fn scenario_a_answer() -> Answer {
        Answer::new(
            "Found 2 matches",
            ["Alice — 5y Python", "Bob — 4y Python"],
            "Let me know if you need more.",
        )
    }

    fn server_error() -> QueryError {
        QueryError::Status {
            status: 500,
            body: String::new(),
        }
    }

    #[test]
    fn test_new_panel_is_idle() {
        let panel = QueryPanel::new();
        assert_eq!(panel.state(), &RequestState::Idle);
        assert_eq!(panel.query(), "");
        assert!(panel.can_submit());
        assert_eq!(panel.in_flight(), None);
    }

    #[test]
    fn test_submit_issues_one_request_with_query() {
        for query in ["", "anything", "Find Python developers with 3+ years experience"] {
            let mut panel = QueryPanel::new();
            panel.edit(query);

            let request = panel.submit().expect("idle panel should submit");
            assert_eq!(request.query, query);
            assert!(panel.is_pending());
            assert_eq!(panel.in_flight(), Some(request.id));
            // Query text is kept until the answer arrives
            assert_eq!(panel.query(), query);
        }
    }

    #[test]
    fn test_submit_refused_while_pending() {
        let mut panel = QueryPanel::new();
        panel.edit("first");
        let first = panel.submit().unwrap();

        panel.edit("second");
        assert!(panel.submit().is_none());
        assert!(panel.submit().is_none());
        assert_eq!(panel.in_flight(), Some(first.id));
    }

    #[test]
    fn test_submit_control_disabled_iff_pending() {
        let mut panel = QueryPanel::new();
        assert!(panel.submit_control().enabled);

        let request = panel.submit().unwrap();
        assert!(!panel.submit_control().enabled);
        assert_eq!(panel.submit_control().label, "Thinking...");

        panel.resolve(Completion::success(request.id, scenario_a_answer()));
        assert!(panel.submit_control().enabled);

        let request = panel.submit().unwrap();
        assert!(!panel.submit_control().enabled);

        panel.resolve(Completion::failure(request.id, server_error()));
        assert!(panel.submit_control().enabled);
        assert_eq!(panel.submit_control().label, "Ask");
    }

    #[test]
    fn test_success_stores_answer_and_clears_query() {
        let mut panel = QueryPanel::new();
        panel.edit("Find Python developers with 3+ years experience");
        let request = panel.submit().unwrap();

        panel.resolve(Completion::success(request.id, scenario_a_answer()));

        assert_eq!(panel.state(), &RequestState::Succeeded(scenario_a_answer()));
        assert_eq!(panel.query(), "");
        assert_eq!(panel.in_flight(), None);
    }

    #[test]
    fn test_failure_keeps_query_and_uses_generic_message() {
        let mut panel = QueryPanel::new();
        panel.edit("anything");
        let request = panel.submit().unwrap();

        panel.resolve(Completion::failure(request.id, server_error()));

        assert_eq!(panel.query(), "anything");
        let message = panel.state().error().expect("should be failed");
        assert_eq!(message.as_str(), SERVICE_UNAVAILABLE);
        assert!(!message.as_str().contains("500"));
    }

    #[test]
    fn test_every_failure_kind_collapses_to_same_state() {
        let errors = [
            server_error(),
            QueryError::Decode("expected value at line 1".to_string()),
        ];

        for error in errors {
            let mut panel = QueryPanel::new();
            let request = panel.submit().unwrap();
            panel.resolve(Completion::failure(request.id, error));
            assert_eq!(
                panel.state(),
                &RequestState::Failed(ErrorMessage::service_unavailable())
            );
        }
    }

    #[test]
    fn test_new_submit_clears_previous_result() {
        let mut panel = QueryPanel::new();
        let request = panel.submit().unwrap();
        panel.resolve(Completion::failure(request.id, server_error()));
        assert!(panel.view(&PlainText).result.is_visible());

        panel.submit().unwrap();
        assert_eq!(panel.state(), &RequestState::Pending);
        assert_eq!(panel.view(&PlainText).result, ResultView::Hidden);
    }

    #[test]
    fn test_edits_while_pending_do_not_change_request() {
        let mut panel = QueryPanel::new();
        panel.edit("original");
        let request = panel.submit().unwrap();

        panel.push_char('!');
        panel.pop_char();
        panel.pop_char();
        assert_eq!(panel.query(), "origina");
        assert_eq!(request.query, "original");
    }

    #[test]
    fn test_late_failure_leaves_edited_text() {
        let mut panel = QueryPanel::new();
        panel.edit("retry me");
        let request = panel.submit().unwrap();
        panel.edit("retry me please");

        panel.resolve(Completion::failure(request.id, server_error()));
        assert_eq!(panel.query(), "retry me please");
    }

    #[test]
    fn test_completion_without_pending_is_ignored() {
        let mut panel = QueryPanel::new();
        panel.resolve(Completion::success(RequestId(42), scenario_a_answer()));
        assert_eq!(panel.state(), &RequestState::Idle);
    }

    #[test]
    fn test_mismatched_id_is_still_applied() {
        let mut panel = QueryPanel::new();
        panel.submit().unwrap();
        panel.resolve(Completion::success(RequestId(99), scenario_a_answer()));
        assert!(panel.state().answer().is_some());
    }

    #[test]
    fn test_request_ids_increase() {
        let mut panel = QueryPanel::new();
        let first = panel.submit().unwrap();
        panel.resolve(Completion::success(first.id, Answer::default()));
        let second = panel.submit().unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_view_scenario_a() {
        let mut panel = QueryPanel::new();
        panel.edit("Find Python developers with 3+ years experience");
        let request = panel.submit().unwrap();
        panel.resolve(Completion::success(request.id, scenario_a_answer()));

        let view = panel.view(&PlainText);
        assert_eq!(view.query, "");
        assert_eq!(
            view.result,
            ResultView::Answer {
                intro: "Found 2 matches".to_string(),
                candidates: vec![
                    "Alice — 5y Python".to_string(),
                    "Bob — 4y Python".to_string()
                ],
                closing: "Let me know if you need more.".to_string(),
            }
        );
    }

    #[test]
    fn test_view_scenario_c_empty_candidates() {
        let mut panel = QueryPanel::new();
        let request = panel.submit().unwrap();
        assert_eq!(request.query, "");
        panel.resolve(Completion::success(
            request.id,
            Answer::new("No one matched", Vec::<String>::new(), "Try a broader query."),
        ));

        let view = panel.view(&PlainText);
        assert!(view.result.is_visible());
        assert!(view.result.candidates().is_empty());
    }

    #[test]
    fn test_view_hidden_while_idle_and_pending() {
        let mut panel = QueryPanel::new();
        assert_eq!(panel.view(&PlainText).result, ResultView::Hidden);
        panel.submit().unwrap();
        assert_eq!(panel.view(&PlainText).result, ResultView::Hidden);
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut panel = QueryPanel::new();
        let request = panel.submit().unwrap();
        panel.resolve(Completion::success(request.id, scenario_a_answer()));

        assert_eq!(panel.view(&PlainText), panel.view(&PlainText));

        let request = panel.submit().unwrap();
        panel.resolve(Completion::failure(request.id, server_error()));
        assert_eq!(panel.view(&PlainText), panel.view(&PlainText));
    }

    #[test]
    fn test_view_uses_renderer_per_candidate() {
        struct Counting;
        impl TextRenderer for Counting {
            type Output = usize;
            fn render(&self, text: &str) -> usize {
                text.chars().count()
            }
        }

        let mut panel = QueryPanel::new();
        let request = panel.submit().unwrap();
        panel.resolve(Completion::success(
            request.id,
            Answer::new("", ["abc", "a", "abcde"], ""),
        ));

        assert_eq!(panel.view(&Counting).result.candidates(), &[3, 1, 5]);
    }
}
