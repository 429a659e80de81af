//! Trait abstraction for the question bank to enable mocking in tests

use super::client::{AdditionalQuestion, QuestionBankError};
use async_trait::async_trait;

/// Source of follow-up questions, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch the follow-up questions of one category
    async fn fetch_questions(
        &self,
        category: u32,
    ) -> Result<Vec<AdditionalQuestion>, QuestionBankError>;
}
