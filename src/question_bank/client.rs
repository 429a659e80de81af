//! HTTP client for the public trivia question bank
//!
//! Issues `GET <base>?amount=<n>&category=<code>` and turns the returned items
//! into unanswered follow-up questions.

use super::traits::QuestionBank;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Default question bank endpoint
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";

/// Default number of questions requested per topic
pub const DEFAULT_AMOUNT: u32 = 5;

/// Errors that can occur while fetching questions.
#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Optional follow-up question with the user's answer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdditionalQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct QuestionBankResponse {
    #[serde(default)]
    results: Vec<QuestionItem>,
}

#[derive(Debug, Deserialize)]
struct QuestionItem {
    question: String,
}

/// Client for the question bank endpoint
#[derive(Debug, Clone)]
pub struct QuestionBankClient {
    http_client: reqwest::Client,
    base_url: String,
    amount: u32,
}

impl QuestionBankClient {
    pub fn new(base_url: impl Into<String>, amount: u32) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            amount,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, category: u32) -> Result<Url, QuestionBankError> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("amount", self.amount.to_string()),
                ("category", category.to_string()),
            ],
        )?;
        Ok(url)
    }
}

impl Default for QuestionBankClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_AMOUNT)
    }
}

#[async_trait]
impl QuestionBank for QuestionBankClient {
    async fn fetch_questions(
        &self,
        category: u32,
    ) -> Result<Vec<AdditionalQuestion>, QuestionBankError> {
        let url = self.request_url(category)?;
        tracing::debug!(%url, "Fetching additional questions");

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(QuestionBankError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: QuestionBankResponse = response.json().await?;
        Ok(into_additional_questions(body.results))
    }
}

fn into_additional_questions(items: Vec<QuestionItem>) -> Vec<AdditionalQuestion> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| AdditionalQuestion {
            question: format!("Question {}: {}", index + 1, decode_entities(&item.question)),
            answer: String::new(),
        })
        .collect()
}

/// Decode the HTML entities the question bank uses in its default encoding
fn decode_entities(text: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&quot;", "\""),
        ("&#039;", "'"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
    ];
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}
