//! Question bank client for optional survey follow-up questions

mod client;
mod traits;

pub use client::{
    AdditionalQuestion, QuestionBankClient, QuestionBankError, DEFAULT_AMOUNT, DEFAULT_BASE_URL,
};
pub use traits::QuestionBank;

#[cfg(test)]
pub use traits::MockQuestionBank;
