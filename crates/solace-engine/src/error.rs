use serde::{Deserialize, Serialize};
use solace_core::ConfigurationError;
use thiserror::Error;
use ts_rs::TS;

use crate::repository::RepositoryError;

/// A required question still holding no answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MissingQuestion {
    pub index: usize,
    pub question_id: String,
    pub order: u32,
}

/// Why a response set cannot be scored against an assessment type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidResponse {
    #[error("question '{0}' does not belong to this assessment")]
    UnknownQuestion(String),

    #[error("question '{0}' is answered more than once")]
    DuplicateQuestion(String),

    #[error("required question '{0}' is unanswered")]
    MissingRequired(String),

    #[error("question '{question_id}' expects a {expected} answer, got {actual}")]
    WrongAnswerKind {
        question_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("option {index} is out of range for question '{question_id}' ({options} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        options: usize,
    },

    #[error("option {index} is selected twice for question '{question_id}'")]
    DuplicateOption { question_id: String, index: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{} required question(s) unanswered", .missing.len())]
    IncompleteAssessment { missing: Vec<MissingQuestion> },

    #[error("invalid response set for '{assessment}': {reason}")]
    InvalidResponseSet {
        assessment: String,
        reason: InvalidResponse,
    },

    #[error("'{assessment}' produced score {value} outside [0, {max}]")]
    ScoringInvariantViolation {
        assessment: String,
        question_id: Option<String>,
        value: i64,
        max: u32,
    },

    #[error("'{assessment}' has {matches} risk bands containing score {score}, expected exactly one")]
    UnclassifiableScore {
        assessment: String,
        score: u32,
        matches: usize,
    },

    #[error("raw-score trend cannot compare different instruments: {}", .instruments.join(", "))]
    MixedInstrumentComparison { instruments: Vec<String> },

    #[error("cannot {operation} while the session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("question index {index} is out of range (assessment has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("invalid answer: {0}")]
    InvalidAnswer(InvalidResponse),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EngineError {
    /// Only an incomplete submission can be fixed by the respondent.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::IncompleteAssessment { .. })
    }

    /// Message safe to show a respondent. Never includes a score.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::IncompleteAssessment { missing } => {
                let numbers: Vec<String> = missing.iter().map(|m| m.order.to_string()).collect();
                format!(
                    "Please answer the remaining required questions: {}.",
                    numbers.join(", ")
                )
            }
            EngineError::InvalidAnswer(_) | EngineError::QuestionOutOfRange { .. } => {
                "That answer could not be recorded. Please try again.".to_string()
            }
            _ => "We could not process this assessment. Please try again later.".to_string(),
        }
    }
}
