//! One open form: its store, keyboard focus and survey follow-up questions

use crate::question_bank::{AdditionalQuestion, QuestionBankError};
use crate::state::forms::{
    survey, switch_branch, FieldKind, FieldSpec, FieldValue, FormId, FormSchema, FormStore,
    ValuesExt,
};
use uuid::Uuid;

/// Focusable element of a form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(&'static FieldSpec),
    Question(usize),
    Submit,
}

/// Follow-up question fetch the app should start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentRequest {
    pub session: Uuid,
    pub request_id: u64,
    pub category: u32,
}

/// Result of a follow-up question fetch, tagged with the request it answers
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub session: Uuid,
    pub request_id: u64,
    pub result: Result<Vec<AdditionalQuestion>, QuestionBankError>,
}

#[derive(Debug)]
pub struct FormSession {
    pub id: Uuid,
    pub form: FormId,
    pub store: FormStore,
    pub focus_index: usize,
    /// Highlighted option of the focused multi-select field
    pub option_cursor: usize,
    pub additional_questions: Vec<AdditionalQuestion>,
    latest_request: u64,
    pending_enrichment: Option<EnrichmentRequest>,
}

impl FormSession {
    pub fn new(form: FormId) -> Self {
        let schema = form.schema();
        let mut store = FormStore::new(schema.validator());
        let title = schema.title();
        store.subscribe(move |change, snapshot| {
            tracing::debug!(
                form = title,
                ?change,
                fields = snapshot.values.len(),
                errors = snapshot.errors.len(),
                submitting = snapshot.submitting,
                "Form store changed"
            );
        });
        store.initialize(schema.defaults());
        Self {
            id: Uuid::new_v4(),
            form,
            store,
            focus_index: 0,
            option_cursor: 0,
            additional_questions: Vec::new(),
            latest_request: 0,
            pending_enrichment: None,
        }
    }

    pub fn schema(&self) -> &'static dyn FormSchema {
        self.form.schema()
    }

    /// Fields, then follow-up questions, then the submit button
    pub fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = self
            .schema()
            .layout(self.store.values())
            .into_iter()
            .map(Focus::Field)
            .collect();
        targets.extend((0..self.additional_questions.len()).map(Focus::Question));
        targets.push(Focus::Submit);
        targets
    }

    pub fn focus(&self) -> Focus {
        let targets = self.focus_targets();
        let index = self.focus_index.min(targets.len() - 1);
        targets[index]
    }

    /// Submit button enablement: a pure function of the current store.
    /// Disabled while a submission is in flight.
    pub fn can_submit(&self) -> bool {
        let present = self.schema().required_fields_present(self.store.values());
        self.store.is_valid(present) && !self.store.is_submitting()
    }

    fn blur(&mut self) {
        if let Focus::Field(spec) = self.focus() {
            self.store.validate_one_field(spec.name);
        }
        self.option_cursor = 0;
    }

    pub fn focus_next(&mut self) {
        self.blur();
        let count = self.focus_targets().len();
        self.focus_index = (self.focus_index.min(count - 1) + 1) % count;
    }

    pub fn focus_prev(&mut self) {
        self.blur();
        let count = self.focus_targets().len();
        let current = self.focus_index.min(count - 1);
        self.focus_index = if current == 0 { count - 1 } else { current - 1 };
    }

    pub fn focus_submit(&mut self) {
        self.blur();
        self.focus_index = self.focus_targets().len() - 1;
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus() {
            Focus::Field(spec) if matches!(spec.kind, FieldKind::Text | FieldKind::Multiline) => {
                let mut text = self.store.values().text(spec.name).to_string();
                text.push(c);
                self.store.set_field(spec.name, FieldValue::Text(text));
            }
            Focus::Question(index) => {
                if let Some(question) = self.additional_questions.get_mut(index) {
                    question.answer.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus() {
            Focus::Field(spec) if matches!(spec.kind, FieldKind::Text | FieldKind::Multiline) => {
                let mut text = self.store.values().text(spec.name).to_string();
                if text.pop().is_some() {
                    self.store.set_field(spec.name, FieldValue::Text(text));
                }
            }
            Focus::Question(index) => {
                if let Some(question) = self.additional_questions.get_mut(index) {
                    question.answer.pop();
                }
            }
            _ => {}
        }
    }

    /// Left/Right: cycle a select field, or move along multi-select options
    pub fn cycle(&mut self, forward: bool) {
        let Focus::Field(spec) = self.focus() else {
            return;
        };
        match spec.kind {
            FieldKind::Select(options) => {
                let current = self.store.values().text(spec.name);
                let next = match options.iter().position(|o| *o == current) {
                    None if forward => 0,
                    None => options.len() - 1,
                    Some(i) if forward => (i + 1) % options.len(),
                    Some(i) => (i + options.len() - 1) % options.len(),
                };
                self.select(spec, FieldValue::text(options[next]));
            }
            FieldKind::MultiSelect(options) => {
                let len = options.len();
                self.option_cursor = if forward {
                    (self.option_cursor + 1) % len
                } else {
                    (self.option_cursor + len - 1) % len
                };
            }
            _ => {}
        }
    }

    /// Space: flip a checkbox or the highlighted multi-select option
    pub fn toggle(&mut self) {
        let Focus::Field(spec) = self.focus() else {
            return;
        };
        match spec.kind {
            FieldKind::Toggle => {
                let checked = self.store.values().flag(spec.name);
                self.select(spec, FieldValue::Flag(!checked));
            }
            FieldKind::MultiSelect(options) => {
                if let Some(option) = options.get(self.option_cursor) {
                    self.store.set_field(spec.name, FieldValue::text(*option));
                }
            }
            _ => {}
        }
    }

    fn select(&mut self, spec: &'static FieldSpec, value: FieldValue) {
        let schema = self.schema();
        if spec.name == schema.governing_field() {
            if switch_branch(&mut self.store, schema, value) {
                self.queue_enrichment();
            }
        } else {
            self.store.set_field(spec.name, value);
        }
    }

    fn queue_enrichment(&mut self) {
        if self.form != FormId::Survey {
            return;
        }
        let Some(topic) = survey::Topic::parse(self.store.values().text(survey::SURVEY_TOPIC))
        else {
            return;
        };
        self.latest_request += 1;
        self.pending_enrichment = Some(EnrichmentRequest {
            session: self.id,
            request_id: self.latest_request,
            category: topic.question_category(),
        });
    }

    pub fn take_pending_enrichment(&mut self) -> Option<EnrichmentRequest> {
        self.pending_enrichment.take()
    }

    /// Apply a fetch result. Only the latest request of this session counts;
    /// a failure leaves the current questions untouched.
    pub fn apply_enrichment(&mut self, outcome: EnrichmentOutcome) -> bool {
        if outcome.session != self.id || outcome.request_id != self.latest_request {
            tracing::debug!(
                request_id = outcome.request_id,
                latest = self.latest_request,
                "Discarding stale additional questions"
            );
            return false;
        }
        match outcome.result {
            Ok(questions) => {
                let focus = self.focus();
                self.additional_questions = questions;
                self.refocus(focus);
                true
            }
            Err(err) => {
                tracing::warn!("Error fetching additional questions: {err}");
                false
            }
        }
    }

    /// Keep the same element focused after the focus list changed
    fn refocus(&mut self, focus: Focus) {
        let targets = self.focus_targets();
        self.focus_index = match focus {
            Focus::Question(_) => targets.len() - 1,
            _ => targets.iter().position(|t| *t == focus).unwrap_or(0),
        };
    }

    /// Run full validation. Returns whether the submission is accepted.
    pub fn submit(&mut self) -> bool {
        self.store.validate_all()
    }
}
