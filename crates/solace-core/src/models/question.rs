use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One selectable answer and the points it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub text: String,
    pub score: u32,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, score: u32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// The shape of a question, carrying only the fields its scoring rule reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    /// Exactly one option is selected.
    SingleChoice { options: Vec<AnswerOption> },
    /// Any subset of options; contributes the sum of the selected scores.
    MultiSelect { options: Vec<AnswerOption> },
    /// A two-option choice. Scored like `SingleChoice`.
    YesNo { options: Vec<AnswerOption> },
    /// An integer rating, clamped to `[min_value, max_value]` when scored.
    NumericScale {
        min_value: u32,
        max_value: u32,
        #[serde(default)]
        labels: Vec<String>,
    },
    /// Qualitative annotation. Never contributes to the score.
    FreeText,
}

impl QuestionKind {
    /// Options for choice-type questions; empty for scales and free text.
    pub fn options(&self) -> &[AnswerOption] {
        match self {
            QuestionKind::SingleChoice { options }
            | QuestionKind::MultiSelect { options }
            | QuestionKind::YesNo { options } => options,
            QuestionKind::NumericScale { .. } | QuestionKind::FreeText => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionKind::SingleChoice { .. }
                | QuestionKind::MultiSelect { .. }
                | QuestionKind::YesNo { .. }
        )
    }

    /// The largest value this question can contribute to a total.
    ///
    /// Single-choice and yes/no use the highest option score, numeric scales
    /// their `max_value`, multi-select the sum of every option, free text 0.
    /// Saturates at `u32::MAX`; see [`QuestionKind::checked_ceiling`].
    pub fn ceiling(&self) -> u32 {
        self.checked_ceiling().unwrap_or(u32::MAX)
    }

    /// [`QuestionKind::ceiling`], or `None` when multi-select option
    /// scores add up past `u32::MAX`.
    pub fn checked_ceiling(&self) -> Option<u32> {
        match self {
            QuestionKind::SingleChoice { options } | QuestionKind::YesNo { options } => {
                Some(options.iter().map(|o| o.score).max().unwrap_or(0))
            }
            QuestionKind::MultiSelect { options } => options
                .iter()
                .try_fold(0u32, |acc, o| acc.checked_add(o.score)),
            QuestionKind::NumericScale { max_value, .. } => Some(*max_value),
            QuestionKind::FreeText => Some(0),
        }
    }

    /// Stable snake_case label, matching the serialized `type` tag.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single_choice",
            QuestionKind::MultiSelect { .. } => "multi_select",
            QuestionKind::YesNo { .. } => "yes_no",
            QuestionKind::NumericScale { .. } => "numeric_scale",
            QuestionKind::FreeText => "free_text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// Unique within its assessment type.
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default = "default_required")]
    pub is_required: bool,
    #[serde(default)]
    pub is_reverse_scored: bool,
    /// Presentation position, 1-based and dense within an assessment type.
    pub order: u32,
}

fn default_required() -> bool {
    true
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, order: u32, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            is_required: true,
            is_reverse_scored: false,
            order,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn reverse_scored(mut self) -> Self {
        self.is_reverse_scored = true;
        self
    }

    pub fn ceiling(&self) -> u32 {
        self.kind.ceiling()
    }
}
