use thiserror::Error;

use crate::models::risk::RiskLevel;

/// An assessment type that must never be presented to a respondent.
///
/// These are content-authoring bugs. They are caught when a definition is
/// loaded or a session is started, never during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("assessment '{assessment}' has no questions")]
    NoQuestions { assessment: String },

    #[error("assessment '{assessment}' has duplicate question id '{question_id}'")]
    DuplicateQuestionId {
        assessment: String,
        question_id: String,
    },

    #[error("assessment '{assessment}': question order must run 1..={expected_last} without gaps, found {found:?}")]
    NonDenseOrder {
        assessment: String,
        expected_last: usize,
        found: Vec<u32>,
    },

    #[error("assessment '{assessment}': question '{question_id}' has no options")]
    EmptyOptions {
        assessment: String,
        question_id: String,
    },

    #[error("assessment '{assessment}': yes/no question '{question_id}' must have exactly 2 options, found {found}")]
    YesNoOptionCount {
        assessment: String,
        question_id: String,
        found: usize,
    },

    #[error("assessment '{assessment}': numeric scale '{question_id}' has min {min} above max {max}")]
    InvertedScale {
        assessment: String,
        question_id: String,
        min: u32,
        max: u32,
    },

    #[error("assessment '{assessment}': scores overflow at question '{question_id}'")]
    ScoreOverflow {
        assessment: String,
        question_id: String,
    },

    #[error("assessment '{assessment}': stored max_score {stored} does not match derived {derived}")]
    StaleMaxScore {
        assessment: String,
        stored: u32,
        derived: u32,
    },

    #[error("assessment '{assessment}': stored total_questions {stored} does not match {derived} questions")]
    StaleQuestionCount {
        assessment: String,
        stored: usize,
        derived: usize,
    },

    #[error("assessment '{assessment}' has no risk bands")]
    NoRiskBands { assessment: String },

    #[error("assessment '{assessment}': risk band {level:?} has low {low} above high {high}")]
    InvertedBand {
        assessment: String,
        level: RiskLevel,
        low: u32,
        high: u32,
    },

    #[error("assessment '{assessment}': risk bands must be in ascending severity, {level:?} follows {previous:?}")]
    UnorderedBands {
        assessment: String,
        previous: RiskLevel,
        level: RiskLevel,
    },

    #[error("assessment '{assessment}': risk bands leave a gap or overlap at score {at}")]
    BandDiscontinuity { assessment: String, at: u32 },

    #[error("assessment '{assessment}': risk bands cover [{low}, {high}] but scores range over [0, {max_score}]")]
    BandCoverage {
        assessment: String,
        low: u32,
        high: u32,
        max_score: u32,
    },
}
