//! Application state and core logic

use crate::config::AppConfig;
use crate::question_bank::{QuestionBank, QuestionBankClient};
use crate::state::{
    AppState, EnrichmentOutcome, EnrichmentRequest, FieldKind, FormId, Focus, Receipt, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Source of survey follow-up questions
    question_bank: Arc<dyn QuestionBank>,
    enrichment_tx: UnboundedSender<EnrichmentOutcome>,
    enrichment_rx: UnboundedReceiver<EnrichmentOutcome>,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &AppConfig) -> Self {
        let client = QuestionBankClient::new(config.question_bank_url(), config.question_amount());
        tracing::info!(url = client.base_url(), "Using question bank");
        Self::with_question_bank(Arc::new(client))
    }

    pub fn with_question_bank(question_bank: Arc<dyn QuestionBank>) -> Self {
        let (enrichment_tx, enrichment_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            question_bank,
            enrichment_tx,
            enrichment_rx,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press for the current view
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::Picker => self.handle_picker_key(key),
            View::Form => self.handle_form_key(key),
            View::Success => self.handle_success_key(key)?,
        }

        self.spawn_pending_enrichment();
        Ok(())
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let count = FormId::ALL.len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.state.picker_index = (self.state.picker_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.state.picker_index = (self.state.picker_index + 1) % count;
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = (c as usize) - ('1' as usize);
                self.state.picker_index = index;
                self.state.open_form(FormId::ALL[index]);
            }
            KeyCode::Enter => {
                let form = self.state.selected_form();
                self.state.open_form(form);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.close_form();
            self.state.status_message = None;
            return;
        }
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_form();
            return;
        }

        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => session.focus_next(),
            KeyCode::BackTab | KeyCode::Up => session.focus_prev(),
            KeyCode::End => session.focus_submit(),
            KeyCode::Left => session.cycle(false),
            KeyCode::Right => session.cycle(true),
            KeyCode::Backspace => session.backspace(),
            KeyCode::Enter => {
                // A disabled Submit button ignores Enter; Ctrl+S always validates
                if session.focus() == Focus::Submit {
                    if session.can_submit() {
                        self.submit_form();
                    }
                } else {
                    session.focus_next();
                }
            }
            KeyCode::Char(' ') => match session.focus() {
                Focus::Field(spec)
                    if matches!(spec.kind, FieldKind::Toggle | FieldKind::MultiSelect(_)) =>
                {
                    session.toggle()
                }
                _ => session.insert_char(' '),
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                session.insert_char(c)
            }
            _ => {}
        }
    }

    fn handle_success_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') => {
                if let Some(receipt) = &self.state.receipt {
                    let text = receipt.to_text();
                    self.copy_message = Some(match self.copy_to_clipboard(&text) {
                        Ok(()) => "Copied confirmation to clipboard".to_string(),
                        Err(e) => format!("Copy failed: {e}"),
                    });
                }
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.state.close_form();
                self.state.status_message = None;
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Validate the whole form and move to the confirmation on success
    fn submit_form(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if !session.submit() {
            let count = session.store.errors().len();
            self.state.status_message = Some(if count == 1 {
                "1 field needs attention".to_string()
            } else {
                format!("{count} fields need attention")
            });
            return;
        }
        match Receipt::from_session(session) {
            Some(receipt) => {
                tracing::debug!(
                    reference = %receipt.reference,
                    form = receipt.title,
                    "Form submitted"
                );
                self.state.receipt = Some(receipt);
                self.state.status_message = None;
                self.state.current_view = View::Success;
            }
            None => {
                self.state.status_message = Some("Submission is incomplete".to_string());
            }
        }
    }

    fn spawn_pending_enrichment(&mut self) {
        let Some(request) = self
            .state
            .session
            .as_mut()
            .and_then(|s| s.take_pending_enrichment())
        else {
            return;
        };
        self.spawn_enrichment(request);
    }

    /// Fetch follow-up questions in the background. The outcome is applied
    /// by [`App::poll_enrichment`].
    fn spawn_enrichment(&self, request: EnrichmentRequest) {
        let question_bank = Arc::clone(&self.question_bank);
        let tx = self.enrichment_tx.clone();
        tokio::spawn(async move {
            let result = question_bank.fetch_questions(request.category).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(EnrichmentOutcome {
                session: request.session,
                request_id: request.request_id,
                result,
            });
        });
    }

    /// Apply finished fetches to the open form. Returns true if any were applied.
    pub fn poll_enrichment(&mut self) -> bool {
        let mut applied = false;
        while let Ok(outcome) = self.enrichment_rx.try_recv() {
            applied |= self.apply_enrichment(outcome);
        }
        applied
    }

    fn apply_enrichment(&mut self, outcome: EnrichmentOutcome) -> bool {
        match self.state.session.as_mut() {
            Some(session) if self.state.current_view == View::Form => {
                session.apply_enrichment(outcome)
            }
            _ => {
                tracing::debug!(
                    request_id = outcome.request_id,
                    "Dropping additional questions for a closed form"
                );
                false
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_bank::{AdditionalQuestion, MockQuestionBank, QuestionBankError};
    use crate::state::{event, survey, ValuesExt};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app_without_network() -> App {
        let mut bank = MockQuestionBank::new();
        bank.expect_fetch_questions().never();
        App::with_question_bank(Arc::new(bank))
    }

    fn questions(n: usize) -> Vec<AdditionalQuestion> {
        (1..=n)
            .map(|i| AdditionalQuestion {
                question: format!("Question {i}: ?"),
                answer: String::new(),
            })
            .collect()
    }

    /// Wait for the next background fetch and apply it
    async fn settle(app: &mut App) -> bool {
        let outcome = app.enrichment_rx.recv().await.unwrap();
        app.apply_enrichment(outcome)
    }

    mod picker {
        use super::*;

        #[test]
        fn test_number_keys_open_forms() {
            let mut app = app_without_network();
            app.handle_key(key(KeyCode::Char('2'))).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(
                app.state.session.as_ref().map(|s| s.form),
                Some(FormId::JobApplication)
            );
        }

        #[test]
        fn test_arrow_and_enter_open_selected_form() {
            let mut app = app_without_network();
            app.handle_key(key(KeyCode::Up)).unwrap();
            assert_eq!(app.state.selected_form(), FormId::Survey);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(
                app.state.session.as_ref().map(|s| s.form),
                Some(FormId::Survey)
            );
        }

        #[test]
        fn test_q_quits() {
            let mut app = app_without_network();
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod forms {
        use super::*;

        fn fill_event(app: &mut App) {
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            type_text(app, "Ada Lovelace");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(app, "ada@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(app, "36");
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }

        #[test]
        fn test_escape_discards_form() {
            let mut app = app_without_network();
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Picker);
            assert!(app.state.session.is_none());

            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            let session = app.state.session.as_ref().unwrap();
            assert_eq!(session.store.values().text(event::NAME), "");
        }

        #[test]
        fn test_rejected_submit_reports_errors() {
            let mut app = app_without_network();
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("3 fields need attention")
            );
        }

        #[test]
        fn test_enter_on_disabled_submit_does_nothing() {
            let mut app = app_without_network();
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            app.handle_key(key(KeyCode::End)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.status_message.is_none());
            let session = app.state.session.as_ref().unwrap();
            assert!(!session.store.is_submitting());
        }

        #[test]
        fn test_space_toggles_guest_and_types_in_text() {
            let mut app = app_without_network();
            fill_event(&mut app);
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "Charles Babbage");
            let values = app.state.session.as_ref().unwrap().store.values();
            assert!(values.flag(event::HAS_GUEST));
            assert_eq!(values.text(event::GUEST_NAME), "Charles Babbage");
        }

        #[test]
        fn test_accepted_submit_shows_receipt() {
            let mut app = app_without_network();
            fill_event(&mut app);
            // hasGuest -> Submit
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.state.session.as_ref().unwrap().can_submit());
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.current_view, View::Success);
            let receipt = app.state.receipt.as_ref().unwrap();
            assert_eq!(receipt.title, "Registration Successful!");
            assert_eq!(receipt.lines[0].value, "Ada Lovelace");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Picker);
            assert!(app.state.receipt.is_none());
        }
    }

    mod enrichment {
        use super::*;

        fn open_survey_topic(app: &mut App) {
            app.handle_key(key(KeyCode::Char('3'))).unwrap();
            // fullName -> email -> surveyTopic
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }

        #[tokio::test]
        async fn test_topic_change_fetches_questions() {
            let mut bank = MockQuestionBank::new();
            bank.expect_fetch_questions()
                .withf(|category| *category == 18)
                .times(1)
                .returning(|_| Ok(questions(5)));
            let mut app = App::with_question_bank(Arc::new(bank));

            open_survey_topic(&mut app);
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert!(settle(&mut app).await);

            let session = app.state.session.as_ref().unwrap();
            assert_eq!(session.store.values().text(survey::SURVEY_TOPIC), "Technology");
            assert_eq!(session.additional_questions, questions(5));
        }

        #[tokio::test]
        async fn test_failed_fetch_keeps_questions() {
            let mut bank = MockQuestionBank::new();
            bank.expect_fetch_questions()
                .withf(|category| *category == 18)
                .returning(|_| Ok(questions(2)));
            bank.expect_fetch_questions()
                .withf(|category| *category == 17)
                .returning(|_| Err(QuestionBankError::Http { status: 503 }));
            let mut app = App::with_question_bank(Arc::new(bank));

            open_survey_topic(&mut app);
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert!(settle(&mut app).await);
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert!(!settle(&mut app).await);

            let session = app.state.session.as_ref().unwrap();
            assert_eq!(session.store.values().text(survey::SURVEY_TOPIC), "Health");
            assert_eq!(session.additional_questions, questions(2));
        }

        #[tokio::test]
        async fn test_stale_response_is_dropped() {
            let mut bank = MockQuestionBank::new();
            bank.expect_fetch_questions()
                .returning(|category| Ok(questions(category as usize - 15)));
            let mut app = App::with_question_bank(Arc::new(bank));

            open_survey_topic(&mut app);
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();

            let mut outcomes = vec![
                app.enrichment_rx.recv().await.unwrap(),
                app.enrichment_rx.recv().await.unwrap(),
            ];
            outcomes.sort_by_key(|o| o.request_id);
            let latest = outcomes.pop().unwrap();
            let stale = outcomes.pop().unwrap();
            assert!(app.apply_enrichment(latest));
            assert!(!app.apply_enrichment(stale));

            // Health maps to category 17
            let session = app.state.session.as_ref().unwrap();
            assert_eq!(session.additional_questions, questions(2));
        }

        #[tokio::test]
        async fn test_response_after_closing_form_is_ignored() {
            let mut bank = MockQuestionBank::new();
            bank.expect_fetch_questions()
                .returning(|_| Ok(questions(5)));
            let mut app = App::with_question_bank(Arc::new(bank));

            open_survey_topic(&mut app);
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!settle(&mut app).await);
            assert!(app.state.session.is_none());
        }

        #[test]
        fn test_poll_without_results_is_noop() {
            let mut app = app_without_network();
            assert!(!app.poll_enrichment());
        }
    }
}
