//! Survey form

use super::field::{FieldSpec, FieldValue, FormErrors, FormValues, ValuesExt};
use super::rules;
use super::schema::{FormSchema, SummaryLine, Validator};

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const SURVEY_TOPIC: &str = "surveyTopic";
pub const FAVORITE_PROGRAMMING_LANGUAGE: &str = "favoriteProgrammingLanguage";
pub const YEARS_OF_EXPERIENCE: &str = "yearsOfExperience";
pub const EXERCISE_FREQUENCY: &str = "exerciseFrequency";
pub const DIET_PREFERENCE: &str = "dietPreference";
pub const HIGHEST_QUALIFICATION: &str = "highestQualification";
pub const FIELD_OF_STUDY: &str = "fieldOfStudy";
pub const FEEDBACK: &str = "feedback";

pub const FEEDBACK_MIN_CHARS: usize = 50;

pub const TOPICS: &[&str] = &["Technology", "Health", "Education"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text(FULL_NAME, "Full Name"),
    FieldSpec::text(EMAIL, "Email"),
    FieldSpec::select(SURVEY_TOPIC, "Survey Topic", TOPICS),
    FieldSpec::multiline(FEEDBACK, "Feedback"),
];

const TECHNOLOGY_FIELDS: &[FieldSpec] = &[
    FieldSpec::select(
        FAVORITE_PROGRAMMING_LANGUAGE,
        "Favorite Programming Language",
        &["JavaScript", "Python", "Java", "C#"],
    ),
    FieldSpec::text(YEARS_OF_EXPERIENCE, "Years of Experience"),
];

const HEALTH_FIELDS: &[FieldSpec] = &[
    FieldSpec::select(
        EXERCISE_FREQUENCY,
        "Exercise Frequency",
        &["Daily", "Weekly", "Monthly", "Rarely"],
    ),
    FieldSpec::select(
        DIET_PREFERENCE,
        "Diet Preference",
        &["Vegetarian", "Vegan", "Non-Vegetarian"],
    ),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::select(
        HIGHEST_QUALIFICATION,
        "Highest Qualification",
        &["High School", "Bachelor's", "Master's", "PhD"],
    ),
    FieldSpec::text(FIELD_OF_STUDY, "Field of Study"),
];

/// Topic selected by the governing `surveyTopic` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Technology,
    Health,
    Education,
}

impl Topic {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Technology" => Some(Self::Technology),
            "Health" => Some(Self::Health),
            "Education" => Some(Self::Education),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Education => "Education",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Technology => TECHNOLOGY_FIELDS,
            Self::Health => HEALTH_FIELDS,
            Self::Education => EDUCATION_FIELDS,
        }
    }

    /// Question bank category holding follow-up questions for this topic
    pub fn question_category(self) -> u32 {
        match self {
            Self::Technology => 18,
            Self::Health => 17,
            Self::Education => 19,
        }
    }
}

pub fn validate(values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::new();

    rules::required(&mut errors, values, FULL_NAME, "Full Name is required");
    rules::email(&mut errors, values, EMAIL);
    rules::required(&mut errors, values, SURVEY_TOPIC, "Survey Topic is required");

    match Topic::parse(values.text(SURVEY_TOPIC)) {
        Some(Topic::Technology) => {
            rules::required(
                &mut errors,
                values,
                FAVORITE_PROGRAMMING_LANGUAGE,
                "Favorite Programming Language is required",
            );
            rules::positive_number(
                &mut errors,
                values,
                YEARS_OF_EXPERIENCE,
                "Years of Experience is required",
                "Years of Experience must be greater than 0",
            );
        }
        Some(Topic::Health) => {
            rules::required(
                &mut errors,
                values,
                EXERCISE_FREQUENCY,
                "Exercise Frequency is required",
            );
            rules::required(
                &mut errors,
                values,
                DIET_PREFERENCE,
                "Diet Preference is required",
            );
        }
        Some(Topic::Education) => {
            rules::required(
                &mut errors,
                values,
                HIGHEST_QUALIFICATION,
                "Highest Qualification is required",
            );
            rules::required(
                &mut errors,
                values,
                FIELD_OF_STUDY,
                "Field of Study is required",
            );
        }
        None => {}
    }

    rules::min_chars(
        &mut errors,
        values,
        FEEDBACK,
        FEEDBACK_MIN_CHARS,
        "Feedback is required",
        "Feedback must be at least 50 characters long",
    );

    errors
}

/// Topic together with the answers only that topic asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicDetails {
    Technology {
        favorite_language: String,
        years_of_experience: String,
    },
    Health {
        exercise_frequency: String,
        diet_preference: String,
    },
    Education {
        highest_qualification: String,
        field_of_study: String,
    },
}

/// A complete, validated survey response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    pub full_name: String,
    pub email: String,
    pub topic: TopicDetails,
    pub feedback: String,
}

impl SurveyResponse {
    pub fn from_values(values: &FormValues) -> Option<Self> {
        if !validate(values).is_empty() {
            return None;
        }
        let text = |name: &str| values.text(name).to_string();
        let topic = match Topic::parse(values.text(SURVEY_TOPIC))? {
            Topic::Technology => TopicDetails::Technology {
                favorite_language: text(FAVORITE_PROGRAMMING_LANGUAGE),
                years_of_experience: values.text(YEARS_OF_EXPERIENCE).trim().to_string(),
            },
            Topic::Health => TopicDetails::Health {
                exercise_frequency: text(EXERCISE_FREQUENCY),
                diet_preference: text(DIET_PREFERENCE),
            },
            Topic::Education => TopicDetails::Education {
                highest_qualification: text(HIGHEST_QUALIFICATION),
                field_of_study: text(FIELD_OF_STUDY),
            },
        };
        Some(Self {
            full_name: text(FULL_NAME),
            email: text(EMAIL),
            topic,
            feedback: text(FEEDBACK),
        })
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new("Full Name", &self.full_name),
            SummaryLine::new("Email", &self.email),
        ];
        match &self.topic {
            TopicDetails::Technology {
                favorite_language,
                years_of_experience,
            } => {
                lines.push(SummaryLine::new("Survey Topic", Topic::Technology.label()));
                lines.push(SummaryLine::new(
                    "Favorite Programming Language",
                    favorite_language,
                ));
                lines.push(SummaryLine::new("Years of Experience", years_of_experience));
            }
            TopicDetails::Health {
                exercise_frequency,
                diet_preference,
            } => {
                lines.push(SummaryLine::new("Survey Topic", Topic::Health.label()));
                lines.push(SummaryLine::new("Exercise Frequency", exercise_frequency));
                lines.push(SummaryLine::new("Diet Preference", diet_preference));
            }
            TopicDetails::Education {
                highest_qualification,
                field_of_study,
            } => {
                lines.push(SummaryLine::new("Survey Topic", Topic::Education.label()));
                lines.push(SummaryLine::new(
                    "Highest Qualification",
                    highest_qualification,
                ));
                lines.push(SummaryLine::new("Field of Study", field_of_study));
            }
        }
        lines.push(SummaryLine::new("Feedback", &self.feedback));
        lines
    }
}

pub struct SurveyForm;

impl FormSchema for SurveyForm {
    fn title(&self) -> &'static str {
        "Survey Form"
    }

    fn success_title(&self) -> &'static str {
        "Survey Submitted Successfully!"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn governing_field(&self) -> &'static str {
        SURVEY_TOPIC
    }

    fn branch_fields(&self, selection: &FieldValue) -> &'static [FieldSpec] {
        Topic::parse(selection.as_text())
            .map(Topic::fields)
            .unwrap_or(&[])
    }

    fn validator(&self) -> Validator {
        validate
    }

    fn summarize(&self, values: &FormValues) -> Option<Vec<SummaryLine>> {
        SurveyResponse::from_values(values).map(|r| r.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEEDBACK_TEXT: &str =
        "The sessions were well paced and the examples were easy to follow along.";

    fn valid(topic: Topic) -> FormValues {
        let mut values = SurveyForm.defaults();
        let mut set = |name: &str, value: &str| {
            values.insert(name.to_string(), FieldValue::text(value));
        };
        set(FULL_NAME, "Alan Turing");
        set(EMAIL, "alan@example.com");
        set(SURVEY_TOPIC, topic.label());
        set(FEEDBACK, FEEDBACK_TEXT);
        match topic {
            Topic::Technology => {
                set(FAVORITE_PROGRAMMING_LANGUAGE, "Python");
                set(YEARS_OF_EXPERIENCE, "7");
            }
            Topic::Health => {
                set(EXERCISE_FREQUENCY, "Weekly");
                set(DIET_PREFERENCE, "Vegan");
            }
            Topic::Education => {
                set(HIGHEST_QUALIFICATION, "PhD");
                set(FIELD_OF_STUDY, "Mathematics");
            }
        }
        values
    }

    const ALL_TOPICS: [Topic; 3] = [Topic::Technology, Topic::Health, Topic::Education];

    #[test]
    fn test_valid_records_have_no_errors() {
        for topic in ALL_TOPICS {
            assert_eq!(validate(&valid(topic)), FormErrors::new(), "{topic:?}");
        }
    }

    #[test]
    fn test_each_missing_required_field_is_reported_alone() {
        for topic in ALL_TOPICS {
            let base = valid(topic);
            for spec in SurveyForm.layout(&base) {
                if spec.name == SURVEY_TOPIC {
                    continue;
                }
                let mut values = base.clone();
                values.insert(spec.name.to_string(), spec.default_value());
                let errors = validate(&values);
                assert_eq!(
                    errors.keys().collect::<Vec<_>>(),
                    vec![spec.name],
                    "{topic:?} without {}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_missing_topic_is_reported() {
        let mut values = SurveyForm.defaults();
        values.insert(FULL_NAME.to_string(), FieldValue::text("Alan Turing"));
        values.insert(EMAIL.to_string(), FieldValue::text("alan@example.com"));
        values.insert(FEEDBACK.to_string(), FieldValue::text(FEEDBACK_TEXT));
        let errors = validate(&values);
        assert_eq!(
            errors.get(SURVEY_TOPIC).map(String::as_str),
            Some("Survey Topic is required")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_feedback_length_boundary() {
        let mut values = valid(Topic::Health);
        values.insert(FEEDBACK.to_string(), FieldValue::text("x".repeat(49)));
        assert_eq!(
            validate(&values).get(FEEDBACK).map(String::as_str),
            Some("Feedback must be at least 50 characters long")
        );
        values.insert(FEEDBACK.to_string(), FieldValue::text("x".repeat(50)));
        assert!(validate(&values).get(FEEDBACK).is_none());
    }

    #[test]
    fn test_topic_fields_only_checked_for_their_topic() {
        let mut values = valid(Topic::Health);
        values.insert(
            YEARS_OF_EXPERIENCE.to_string(),
            FieldValue::text("not a number"),
        );
        assert!(validate(&values).is_empty());
    }

    #[test]
    fn test_years_of_experience_must_be_positive() {
        let mut values = valid(Topic::Technology);
        values.insert(YEARS_OF_EXPERIENCE.to_string(), FieldValue::text("0"));
        assert_eq!(
            validate(&values).get(YEARS_OF_EXPERIENCE).map(String::as_str),
            Some("Years of Experience must be greater than 0")
        );
    }

    #[test]
    fn test_question_categories() {
        assert_eq!(Topic::Technology.question_category(), 18);
        assert_eq!(Topic::Health.question_category(), 17);
        assert_eq!(Topic::Education.question_category(), 19);
        assert_eq!(Topic::parse("Sports"), None);
    }

    #[test]
    fn test_response_carries_topic_payload() {
        let response = SurveyResponse::from_values(&valid(Topic::Education)).unwrap();
        assert_eq!(
            response.topic,
            TopicDetails::Education {
                highest_qualification: "PhD".to_string(),
                field_of_study: "Mathematics".to_string(),
            }
        );
        let labels: Vec<&str> = response.summary().iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "Full Name",
                "Email",
                "Survey Topic",
                "Highest Qualification",
                "Field of Study",
                "Feedback"
            ]
        );
    }
}
