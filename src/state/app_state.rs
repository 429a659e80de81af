//! Application state definitions

use super::forms::{FormId, SummaryLine};
use super::session::FormSession;
use crate::question_bank::AdditionalQuestion;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Choose which form to fill in
    #[default]
    Picker,
    Form,
    /// Confirmation after an accepted submission
    Success,
}

/// Confirmation of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub title: &'static str,
    pub lines: Vec<SummaryLine>,
    pub additional_questions: Vec<AdditionalQuestion>,
}

impl Receipt {
    /// Build the receipt for an accepted session. `None` if the record does
    /// not form a complete submission.
    pub fn from_session(session: &FormSession) -> Option<Self> {
        let schema = session.schema();
        let lines = schema.summarize(session.store.values())?;
        Some(Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            title: schema.success_title(),
            lines,
            additional_questions: session.additional_questions.clone(),
        })
    }

    /// Plain-text rendering used for the clipboard
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{}\nReference: {}\nSubmitted: {}\n",
            self.title,
            self.reference,
            self.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        for line in &self.lines {
            out.push_str(&format!("{}: {}\n", line.label, line.value));
        }
        if !self.additional_questions.is_empty() {
            out.push_str("Additional Questions [Optional]\n");
            for question in &self.additional_questions {
                out.push_str(&format!("{}\nAnswer: {}\n", question.question, question.answer));
            }
        }
        out
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Highlighted entry of the form picker
    pub picker_index: usize,
    pub session: Option<FormSession>,
    pub receipt: Option<Receipt>,
    /// Status bar message
    pub status_message: Option<String>,
}

impl AppState {
    pub fn selected_form(&self) -> FormId {
        FormId::ALL[self.picker_index.min(FormId::ALL.len() - 1)]
    }

    /// Mount a fresh form, discarding any previous one
    pub fn open_form(&mut self, form: FormId) {
        self.session = Some(FormSession::new(form));
        self.receipt = None;
        self.current_view = View::Form;
    }

    /// Unmount the current form and go back to the picker
    pub fn close_form(&mut self) {
        self.session = None;
        self.receipt = None;
        self.current_view = View::Picker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{event, FieldValue};

    #[test]
    fn test_default_state_is_picker() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Picker);
        assert!(state.session.is_none());
        assert_eq!(state.selected_form(), FormId::EventRegistration);
    }

    #[test]
    fn test_open_and_close_form() {
        let mut state = AppState::default();
        state.open_form(FormId::Survey);
        assert_eq!(state.current_view, View::Form);
        assert_eq!(state.session.as_ref().map(|s| s.form), Some(FormId::Survey));
        state.close_form();
        assert_eq!(state.current_view, View::Picker);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_receipt_requires_complete_submission() {
        let mut session = FormSession::new(FormId::EventRegistration);
        assert!(Receipt::from_session(&session).is_none());

        session.store.set_field(event::NAME, FieldValue::text("Ada"));
        session
            .store
            .set_field(event::EMAIL, FieldValue::text("ada@example.com"));
        session.store.set_field(event::AGE, FieldValue::text("36"));
        let receipt = Receipt::from_session(&session).unwrap();
        assert_eq!(receipt.title, "Registration Successful!");

        let text = receipt.to_text();
        assert!(text.starts_with("Registration Successful!\n"));
        assert!(text.contains("Name: Ada\n"));
        assert!(text.contains("Attending with guest: No\n"));
        assert!(text.contains(&receipt.reference.to_string()));
        assert!(!text.contains("Additional Questions"));
    }

    #[test]
    fn test_receipt_lists_additional_questions() {
        let receipt = Receipt {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            title: "Survey Submitted Successfully!",
            lines: vec![SummaryLine::new("Full Name", "Alan")],
            additional_questions: vec![AdditionalQuestion {
                question: "Question 1: Why?".to_string(),
                answer: "Because".to_string(),
            }],
        };
        let text = receipt.to_text();
        assert!(
            text.contains("Additional Questions [Optional]\nQuestion 1: Why?\nAnswer: Because\n")
        );
    }
}
