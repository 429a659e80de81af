//! Event registration form

use super::field::{FieldSpec, FieldValue, FormErrors, FormValues, ValuesExt};
use super::rules;
use super::schema::{FormSchema, SummaryLine, Validator};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const AGE: &str = "age";
pub const HAS_GUEST: &str = "hasGuest";
pub const GUEST_NAME: &str = "guestName";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text(NAME, "Name"),
    FieldSpec::text(EMAIL, "Email"),
    FieldSpec::text(AGE, "Age"),
    FieldSpec::toggle(HAS_GUEST, "Are you attending with a guest?"),
];

const GUEST_FIELDS: &[FieldSpec] = &[FieldSpec::text(GUEST_NAME, "Guest Name")];

pub fn validate(values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::new();

    rules::required(&mut errors, values, NAME, "Name is required");
    rules::email(&mut errors, values, EMAIL);
    rules::positive_number(
        &mut errors,
        values,
        AGE,
        "Age is required",
        "Age must be a positive number",
    );

    if values.flag(HAS_GUEST) {
        rules::required(
            &mut errors,
            values,
            GUEST_NAME,
            "Guest name is required when bringing a guest",
        );
    }

    errors
}

/// Whether the registrant brings a guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guest {
    None,
    Attending { name: String },
}

/// A complete, validated event registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRegistration {
    pub name: String,
    pub email: String,
    pub age: String,
    pub guest: Guest,
}

impl EventRegistration {
    pub fn from_values(values: &FormValues) -> Option<Self> {
        if !validate(values).is_empty() {
            return None;
        }
        let guest = if values.flag(HAS_GUEST) {
            Guest::Attending {
                name: values.text(GUEST_NAME).to_string(),
            }
        } else {
            Guest::None
        };
        Some(Self {
            name: values.text(NAME).to_string(),
            email: values.text(EMAIL).to_string(),
            age: values.text(AGE).trim().to_string(),
            guest,
        })
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new("Name", &self.name),
            SummaryLine::new("Email", &self.email),
            SummaryLine::new("Age", &self.age),
        ];
        match &self.guest {
            Guest::None => lines.push(SummaryLine::new("Attending with guest", "No")),
            Guest::Attending { name } => {
                lines.push(SummaryLine::new("Attending with guest", "Yes"));
                lines.push(SummaryLine::new("Guest Name", name));
            }
        }
        lines
    }
}

pub struct EventRegistrationForm;

impl FormSchema for EventRegistrationForm {
    fn title(&self) -> &'static str {
        "Event Registration Form"
    }

    fn success_title(&self) -> &'static str {
        "Registration Successful!"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn governing_field(&self) -> &'static str {
        HAS_GUEST
    }

    fn branch_fields(&self, selection: &FieldValue) -> &'static [FieldSpec] {
        if selection.as_flag() {
            GUEST_FIELDS
        } else {
            &[]
        }
    }

    fn validator(&self) -> Validator {
        validate
    }

    fn summarize(&self, values: &FormValues) -> Option<Vec<SummaryLine>> {
        EventRegistration::from_values(values).map(|r| r.summary())
    }
}
