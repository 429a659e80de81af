//! Job application form

use super::field::{FieldSpec, FieldValue, FormErrors, FormValues, ValuesExt};
use super::rules;
use super::schema::{FormSchema, SummaryLine, Validator};
use chrono::NaiveDateTime;

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const PHONE_NUMBER: &str = "phoneNumber";
pub const APPLYING_FOR: &str = "applyingFor";
pub const RELEVANT_EXPERIENCE: &str = "relevantExperience";
pub const PORTFOLIO_URL: &str = "portfolioUrl";
pub const MANAGEMENT_EXPERIENCE: &str = "managementExperience";
pub const ADDITIONAL_SKILLS: &str = "additionalSkills";
pub const PREFERRED_INTERVIEW_TIME: &str = "preferredInterviewTime";

pub const POSITIONS: &[&str] = &["Developer", "Designer", "Manager"];
pub const SKILLS: &[&str] = &["JavaScript", "CSS", "Python", "React"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text(FULL_NAME, "Full Name"),
    FieldSpec::text(EMAIL, "Email"),
    FieldSpec::text(PHONE_NUMBER, "Phone Number"),
    FieldSpec::select(APPLYING_FOR, "Applying for Position", POSITIONS),
    FieldSpec::multi_select(ADDITIONAL_SKILLS, "Additional Skills", SKILLS),
    FieldSpec::text(
        PREFERRED_INTERVIEW_TIME,
        "Preferred Interview Time (YYYY-MM-DD HH:MM)",
    ),
];

const DEVELOPER_FIELDS: &[FieldSpec] = &[FieldSpec::text(
    RELEVANT_EXPERIENCE,
    "Relevant Experience (years)",
)];

const DESIGNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(RELEVANT_EXPERIENCE, "Relevant Experience (years)"),
    FieldSpec::text(PORTFOLIO_URL, "Portfolio URL"),
];

const MANAGER_FIELDS: &[FieldSpec] = &[FieldSpec::text(
    MANAGEMENT_EXPERIENCE,
    "Management Experience",
)];

const INTERVIEW_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Position selected by the governing `applyingFor` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Developer,
    Designer,
    Manager,
}

impl Position {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Developer" => Some(Self::Developer),
            "Designer" => Some(Self::Designer),
            "Manager" => Some(Self::Manager),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Manager => "Manager",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Developer => DEVELOPER_FIELDS,
            Self::Designer => DESIGNER_FIELDS,
            Self::Manager => MANAGER_FIELDS,
        }
    }
}

pub fn parse_interview_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    INTERVIEW_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub fn validate(values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::new();

    rules::required(&mut errors, values, FULL_NAME, "Full Name is required");
    rules::email(&mut errors, values, EMAIL);
    rules::digits(
        &mut errors,
        values,
        PHONE_NUMBER,
        "Phone Number is required",
        "Phone Number is invalid",
    );
    rules::required(&mut errors, values, APPLYING_FOR, "Applying For is required");

    let position = Position::parse(values.text(APPLYING_FOR));
    if matches!(position, Some(Position::Developer | Position::Designer)) {
        rules::positive_number(
            &mut errors,
            values,
            RELEVANT_EXPERIENCE,
            "Relevant Experience is required",
            "Relevant Experience must be a number greater than 0",
        );
    }
    if position == Some(Position::Designer) {
        rules::http_url(
            &mut errors,
            values,
            PORTFOLIO_URL,
            "Portfolio URL is required",
            "Portfolio URL is invalid",
        );
    }
    if position == Some(Position::Manager) {
        rules::required(
            &mut errors,
            values,
            MANAGEMENT_EXPERIENCE,
            "Management Experience is required",
        );
    }

    rules::required(
        &mut errors,
        values,
        ADDITIONAL_SKILLS,
        "At least one skill must be selected",
    );
    if rules::required(
        &mut errors,
        values,
        PREFERRED_INTERVIEW_TIME,
        "Preferred Interview Time is required",
    ) && parse_interview_time(values.text(PREFERRED_INTERVIEW_TIME)).is_none()
    {
        errors.insert(
            PREFERRED_INTERVIEW_TIME.to_string(),
            "Preferred Interview Time must look like YYYY-MM-DD HH:MM".to_string(),
        );
    }

    errors
}

/// Position together with the fields only that position asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionDetails {
    Developer {
        relevant_experience: String,
    },
    Designer {
        relevant_experience: String,
        portfolio_url: String,
    },
    Manager {
        management_experience: String,
    },
}

impl PositionDetails {
    pub fn position(&self) -> Position {
        match self {
            Self::Developer { .. } => Position::Developer,
            Self::Designer { .. } => Position::Designer,
            Self::Manager { .. } => Position::Manager,
        }
    }
}

/// A complete, validated job application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub position: PositionDetails,
    pub additional_skills: Vec<String>,
    pub preferred_interview_time: NaiveDateTime,
}

impl JobApplication {
    pub fn from_values(values: &FormValues) -> Option<Self> {
        if !validate(values).is_empty() {
            return None;
        }
        let experience = || values.text(RELEVANT_EXPERIENCE).trim().to_string();
        let position = match Position::parse(values.text(APPLYING_FOR))? {
            Position::Developer => PositionDetails::Developer {
                relevant_experience: experience(),
            },
            Position::Designer => PositionDetails::Designer {
                relevant_experience: experience(),
                portfolio_url: values.text(PORTFOLIO_URL).to_string(),
            },
            Position::Manager => PositionDetails::Manager {
                management_experience: values.text(MANAGEMENT_EXPERIENCE).to_string(),
            },
        };
        Some(Self {
            full_name: values.text(FULL_NAME).to_string(),
            email: values.text(EMAIL).to_string(),
            phone_number: values.text(PHONE_NUMBER).to_string(),
            position,
            additional_skills: values.choices(ADDITIONAL_SKILLS).to_vec(),
            preferred_interview_time: parse_interview_time(values.text(PREFERRED_INTERVIEW_TIME))?,
        })
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new("Full Name", &self.full_name),
            SummaryLine::new("Email", &self.email),
            SummaryLine::new("Phone Number", &self.phone_number),
            SummaryLine::new("Applying For", self.position.position().label()),
        ];
        match &self.position {
            PositionDetails::Developer {
                relevant_experience,
            } => {
                lines.push(SummaryLine::new(
                    "Relevant Experience",
                    format!("{relevant_experience} years"),
                ));
            }
            PositionDetails::Designer {
                relevant_experience,
                portfolio_url,
            } => {
                lines.push(SummaryLine::new(
                    "Relevant Experience",
                    format!("{relevant_experience} years"),
                ));
                lines.push(SummaryLine::new("Portfolio URL", portfolio_url));
            }
            PositionDetails::Manager {
                management_experience,
            } => {
                lines.push(SummaryLine::new(
                    "Management Experience",
                    management_experience,
                ));
            }
        }
        lines.push(SummaryLine::new(
            "Additional Skills",
            self.additional_skills.join(", "),
        ));
        lines.push(SummaryLine::new(
            "Preferred Interview Time",
            self.preferred_interview_time
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        ));
        lines
    }
}

pub struct JobApplicationForm;

impl FormSchema for JobApplicationForm {
    fn title(&self) -> &'static str {
        "Job Application Form"
    }

    fn success_title(&self) -> &'static str {
        "Application Submitted Successfully!"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn governing_field(&self) -> &'static str {
        APPLYING_FOR
    }

    fn branch_fields(&self, selection: &FieldValue) -> &'static [FieldSpec] {
        Position::parse(selection.as_text())
            .map(Position::fields)
            .unwrap_or(&[])
    }

    fn validator(&self) -> Validator {
        validate
    }

    fn summarize(&self, values: &FormValues) -> Option<Vec<SummaryLine>> {
        JobApplication::from_values(values).map(|a| a.summary())
    }
}
