use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use solace_core::{Answer, AssessmentType, Question, QuestionKind, Response};
use ts_rs::TS;

use crate::error::{EngineError, InvalidResponse};

/// What one question added to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemScore {
    pub question_id: String,
    /// Points before reverse scoring.
    pub raw: u32,
    pub contributed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub items: Vec<ItemScore>,
}

/// Total score of a complete response set.
pub fn score(responses: &[Response], assessment: &AssessmentType) -> Result<u32, EngineError> {
    score_items(responses, assessment).map(|b| b.total)
}

/// Score a complete response set, keeping the per-question breakdown.
///
/// Every response must reference a question of `assessment`, at most once,
/// and every required question must be answered. Questions without a
/// response are treated as unanswered. A total outside `[0, max_score]` is
/// reported as [`EngineError::ScoringInvariantViolation`], never clamped.
pub fn score_items(
    responses: &[Response],
    assessment: &AssessmentType,
) -> Result<ScoreBreakdown, EngineError> {
    let invalid = |reason| EngineError::InvalidResponseSet {
        assessment: assessment.name.clone(),
        reason,
    };

    let mut by_id: HashMap<&str, &Answer> = HashMap::with_capacity(responses.len());
    for r in responses {
        if assessment.question_by_id(&r.question_id).is_none() {
            return Err(invalid(InvalidResponse::UnknownQuestion(r.question_id.clone())));
        }
        if by_id.insert(r.question_id.as_str(), &r.answer).is_some() {
            return Err(invalid(InvalidResponse::DuplicateQuestion(r.question_id.clone())));
        }
    }

    let mut total: i64 = 0;
    let mut items = Vec::with_capacity(assessment.questions.len());
    for q in &assessment.questions {
        let answer = by_id.get(q.id.as_str()).copied().unwrap_or(&Answer::Unanswered);
        if q.is_required && !answer.is_answered() {
            return Err(invalid(InvalidResponse::MissingRequired(q.id.clone())));
        }
        check_answer(q, answer).map_err(invalid)?;

        let raw = raw_value(&q.kind, answer);
        let contributed = contribution(q, answer, raw);
        let ceiling = i64::from(q.ceiling());
        if !(0..=ceiling).contains(&contributed) {
            tracing::error!(
                assessment = %assessment.name,
                question = %q.id,
                contributed,
                ceiling,
                "question contribution outside its own range"
            );
            return Err(EngineError::ScoringInvariantViolation {
                assessment: assessment.name.clone(),
                question_id: Some(q.id.clone()),
                value: contributed,
                max: q.ceiling(),
            });
        }

        total += contributed;
        items.push(ItemScore {
            question_id: q.id.clone(),
            raw,
            contributed: u32::try_from(contributed).unwrap_or(u32::MAX),
        });
    }

    let max = i64::from(assessment.max_score);
    let total = match u32::try_from(total) {
        Ok(t) if i64::from(t) <= max => t,
        _ => {
            tracing::error!(
                assessment = %assessment.name,
                total,
                max_score = assessment.max_score,
                "total score outside assessment range"
            );
            return Err(EngineError::ScoringInvariantViolation {
                assessment: assessment.name.clone(),
                question_id: None,
                value: total,
                max: assessment.max_score,
            });
        }
    };

    tracing::debug!(assessment = %assessment.name, total, "scored response set");
    Ok(ScoreBreakdown { total, items })
}

/// Check that `answer` has the shape `question` expects. Unanswered slots
/// always pass; completeness is checked separately.
pub fn check_answer(question: &Question, answer: &Answer) -> Result<(), InvalidResponse> {
    let options = question.kind.options().len();
    let in_range = |index: usize| {
        if index < options {
            Ok(())
        } else {
            Err(InvalidResponse::OptionOutOfRange {
                question_id: question.id.clone(),
                index,
                options,
            })
        }
    };

    match (&question.kind, answer) {
        (_, Answer::Unanswered) => Ok(()),
        (QuestionKind::SingleChoice { .. } | QuestionKind::YesNo { .. }, Answer::Option { index }) => {
            in_range(*index)
        }
        (QuestionKind::MultiSelect { .. }, Answer::Options { indices }) => {
            for (i, index) in indices.iter().enumerate() {
                in_range(*index)?;
                if indices[..i].contains(index) {
                    return Err(InvalidResponse::DuplicateOption {
                        question_id: question.id.clone(),
                        index: *index,
                    });
                }
            }
            Ok(())
        }
        (QuestionKind::NumericScale { .. }, Answer::Numeric { .. })
        | (QuestionKind::FreeText, Answer::Text { .. }) => Ok(()),
        (kind, answer) => Err(InvalidResponse::WrongAnswerKind {
            question_id: question.id.clone(),
            expected: kind.label(),
            actual: answer.label(),
        }),
    }
}

/// Points an answer is worth before reverse scoring. Free text is always 0.
pub(crate) fn raw_value(kind: &QuestionKind, answer: &Answer) -> u32 {
    match (kind, answer) {
        (QuestionKind::SingleChoice { options } | QuestionKind::YesNo { options }, Answer::Option { index }) => {
            options.get(*index).map_or(0, |o| o.score)
        }
        (QuestionKind::MultiSelect { options }, Answer::Options { indices }) => indices
            .iter()
            .filter_map(|i| options.get(*i))
            .fold(0u32, |acc, o| acc.saturating_add(o.score)),
        (
            QuestionKind::NumericScale {
                min_value,
                max_value,
                ..
            },
            Answer::Numeric { value },
        ) => {
            let clamped = (*value).clamp(i64::from(*min_value), i64::from(*max_value));
            u32::try_from(clamped).unwrap_or(*max_value)
        }
        _ => 0,
    }
}

/// Reverse-scored items mirror around the question's own ceiling, not the
/// assessment's. Unanswered optional items and free text contribute 0.
fn contribution(question: &Question, answer: &Answer, raw: u32) -> i64 {
    let scored = answer.is_answered() && !matches!(question.kind, QuestionKind::FreeText);
    if !scored {
        return 0;
    }
    if question.is_reverse_scored {
        i64::from(question.ceiling()) - i64::from(raw)
    } else {
        i64::from(raw)
    }
}
