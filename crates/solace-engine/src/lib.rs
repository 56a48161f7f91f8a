//! solace-engine
//!
//! The assessment engine: walks a respondent through a questionnaire,
//! scores the finished response set, classifies it into a risk band and
//! aggregates a respondent's history into progress statistics.
//!
//! Everything here is synchronous and free of I/O. Loading assessment
//! types and persisting results go through the traits in [`repository`].

pub mod analytics;
pub mod audit;
pub mod classify;
pub mod completed;
pub mod error;
pub mod repository;
pub mod scoring;
pub mod session;

pub use analytics::{
    AlertLevel, AlertReason, DistressAlert, OptionCount, Priority, ProgressSummary,
    QuestionAnalytics, RecentActivity, ResponsePatterns, Suggestion, SuggestionKind, Trend,
    TrendBasis, distress_alert, instrument_trends, question_analytics, response_patterns,
    suggestions, summarize, summarize_with,
};
pub use audit::{AuditAction, AuditEvent};
pub use classify::classify;
pub use completed::{AssessmentRef, CompletedAssessment};
pub use error::{EngineError, InvalidResponse, MissingQuestion};
pub use scoring::{ItemScore, ScoreBreakdown, score, score_items};
pub use session::{Progress, Session, SessionState};
