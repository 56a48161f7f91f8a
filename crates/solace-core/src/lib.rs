//! solace-core
//!
//! Pure domain vocabulary for standardized psychometric questionnaires.
//! Questions, assessment types, risk band tables and responses, plus the
//! configuration checks every assessment type must pass before it can be
//! presented to a respondent. No I/O.

pub mod error;
pub mod models;

pub use error::ConfigurationError;
pub use models::assessment_type::AssessmentType;
pub use models::question::{AnswerOption, Question, QuestionKind};
pub use models::response::{Answer, Response};
pub use models::risk::{Recommendation, RiskBand, RiskLevel};
