//! Per-form schema: field layout, branch table and validator

use super::field::{FieldSpec, FieldValue, FormErrors, FormValues};
use super::{event, job, survey};

/// Pure validation function of one form kind
pub type Validator = fn(&FormValues) -> FormErrors;

/// One `label: value` line of a confirmation summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Identifies one of the available forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    EventRegistration,
    JobApplication,
    Survey,
}

impl FormId {
    pub const ALL: [FormId; 3] = [
        FormId::EventRegistration,
        FormId::JobApplication,
        FormId::Survey,
    ];

    pub fn schema(self) -> &'static dyn FormSchema {
        match self {
            FormId::EventRegistration => &event::EventRegistrationForm,
            FormId::JobApplication => &job::JobApplicationForm,
            FormId::Survey => &survey::SurveyForm,
        }
    }

    /// Label used by the form picker
    pub fn label(self) -> &'static str {
        match self {
            FormId::EventRegistration => "Event Registration Form",
            FormId::JobApplication => "Job Application Form",
            FormId::Survey => "Survey Form",
        }
    }
}

/// Static description of a form kind.
///
/// Fields are laid out as `fields()` in order, with the fields of the current
/// branch inserted right after the governing field.
pub trait FormSchema: Send + Sync {
    fn title(&self) -> &'static str;

    /// Heading of the confirmation view
    fn success_title(&self) -> &'static str;

    /// Fields present regardless of branch, governing field included
    fn fields(&self) -> &'static [FieldSpec];

    fn governing_field(&self) -> &'static str;

    /// Fields relevant for the given governing selection
    fn branch_fields(&self, selection: &FieldValue) -> &'static [FieldSpec];

    fn validator(&self) -> Validator;

    /// Summary of an accepted submission. `None` if the record does not form
    /// a complete submission.
    fn summarize(&self, values: &FormValues) -> Option<Vec<SummaryLine>>;

    /// Default record: every base field plus the fields of the default branch
    fn defaults(&self) -> FormValues {
        let mut values: FormValues = self
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), f.default_value()))
            .collect();
        let selection = values
            .get(self.governing_field())
            .cloned()
            .unwrap_or_default();
        for spec in self.branch_fields(&selection) {
            values.insert(spec.name.to_string(), spec.default_value());
        }
        values
    }

    /// Visible fields for the current record, in display order
    fn layout(&self, values: &FormValues) -> Vec<&'static FieldSpec> {
        let governing = self.governing_field();
        let selection = values.get(governing).cloned().unwrap_or_default();
        let mut layout = Vec::new();
        for spec in self.fields() {
            layout.push(spec);
            if spec.name == governing {
                layout.extend(self.branch_fields(&selection));
            }
        }
        layout
    }

    /// Every required field visible under the current branch is non-empty
    fn required_fields_present(&self, values: &FormValues) -> bool {
        self.layout(values)
            .iter()
            .filter(|spec| spec.required)
            .all(|spec| values.get(spec.name).is_some_and(|v| !v.is_empty()))
    }

    /// Union of the fields of every branch
    fn exclusive_fields(&self) -> Vec<&'static str> {
        self.all_branch_specs().iter().map(|s| s.name).collect()
    }

    /// Branch field specs for every option of the governing field
    fn all_branch_specs(&self) -> Vec<&'static FieldSpec> {
        let governing = self.fields().iter().find(|s| s.name == self.governing_field());
        let selections: Vec<FieldValue> = match governing {
            Some(spec) if spec.options().is_empty() => {
                vec![FieldValue::Flag(true), FieldValue::Flag(false)]
            }
            Some(spec) => spec.options().iter().map(|o| FieldValue::text(*o)).collect(),
            None => Vec::new(),
        };
        let mut specs: Vec<&'static FieldSpec> = Vec::new();
        for selection in &selections {
            for spec in self.branch_fields(selection) {
                if !specs.iter().any(|s| s.name == spec.name) {
                    specs.push(spec);
                }
            }
        }
        specs
    }
}
