use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The value recorded for one question slot.
///
/// `Unanswered` replaces the `-1` "no selection" sentinel used by web
/// clients; see [`Answer::selected_option_index`] for the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Answer {
    #[default]
    Unanswered,
    /// Index into the question's options (single-choice, yes/no).
    Option { index: usize },
    /// Indices into the question's options (multi-select).
    Options { indices: Vec<usize> },
    /// Raw rating for a numeric scale. Clamped when scored.
    Numeric { value: i64 },
    Text { text: String },
}

impl Answer {
    /// Whether this slot counts towards completeness.
    ///
    /// Empty selections and whitespace-only text do not.
    pub fn is_answered(&self) -> bool {
        match self {
            Answer::Unanswered => false,
            Answer::Option { .. } | Answer::Numeric { .. } => true,
            Answer::Options { indices } => !indices.is_empty(),
            Answer::Text { text } => !text.trim().is_empty(),
        }
    }

    /// Single selected option, or `-1` for no single selection.
    pub fn selected_option_index(&self) -> i64 {
        match self {
            Answer::Option { index } => i64::try_from(*index).unwrap_or(-1),
            _ => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Unanswered => "unanswered",
            Answer::Option { .. } => "option",
            Answer::Options { .. } => "options",
            Answer::Numeric { .. } => "numeric",
            Answer::Text { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub question_id: String,
    pub answer: Answer,
}

impl Response {
    pub fn new(question_id: impl Into<String>, answer: Answer) -> Self {
        Self {
            question_id: question_id.into(),
            answer,
        }
    }

    pub fn unanswered(question_id: impl Into<String>) -> Self {
        Self::new(question_id, Answer::Unanswered)
    }

    pub fn option(question_id: impl Into<String>, index: usize) -> Self {
        Self::new(question_id, Answer::Option { index })
    }
}
