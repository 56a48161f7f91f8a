use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ConfigurationError;
use crate::models::question::{Question, QuestionKind};
use crate::models::risk::RiskBand;

/// A standardized questionnaire: ordered questions plus its cut-point table.
///
/// `max_score` and `total_questions` are derived caches. Build values with
/// [`AssessmentType::new`] so they are computed; values that arrive any other
/// way must pass [`AssessmentType::validate`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentType {
    pub id: String,
    /// Machine key, e.g. `PHQ9`.
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    pub questions: Vec<Question>,
    pub risk_bands: Vec<RiskBand>,
    pub max_score: u32,
    pub total_questions: usize,
}

impl AssessmentType {
    /// Sort questions by `order`, derive the cached fields and validate.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        mut questions: Vec<Question>,
        risk_bands: Vec<RiskBand>,
    ) -> Result<Self, ConfigurationError> {
        questions.sort_by_key(|q| q.order);
        let mut assessment = Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            instructions: String::new(),
            questions,
            risk_bands,
            max_score: 0,
            total_questions: 0,
        };
        assessment.refresh_derived();
        assessment.validate()?;
        Ok(assessment)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Recompute `max_score` and `total_questions` from the question list.
    pub fn refresh_derived(&mut self) {
        self.max_score = self.derived_max_score();
        self.total_questions = self.questions.len();
    }

    /// Sum of every question's ceiling, saturating; [`AssessmentType::validate`]
    /// rejects a sum that overflows.
    pub fn derived_max_score(&self) -> u32 {
        self.questions
            .iter()
            .fold(0u32, |acc, q| acc.saturating_add(q.ceiling()))
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Position and definition of the question with `id`.
    pub fn question_by_id(&self, id: &str) -> Option<(usize, &Question)> {
        self.questions.iter().enumerate().find(|(_, q)| q.id == id)
    }

    pub fn required_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_required).count()
    }

    /// Check every structural invariant an assessment type must hold before
    /// it is presented or used for scoring.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.validate_questions()?;
        self.validate_cache()?;
        self.validate_bands()
    }

    fn validate_questions(&self) -> Result<(), ConfigurationError> {
        let assessment = &self.name;
        if self.questions.is_empty() {
            return Err(ConfigurationError::NoQuestions {
                assessment: assessment.clone(),
            });
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id.as_str()) {
                return Err(ConfigurationError::DuplicateQuestionId {
                    assessment: assessment.clone(),
                    question_id: q.id.clone(),
                });
            }
        }

        let dense = self
            .questions
            .iter()
            .enumerate()
            .all(|(i, q)| usize::try_from(q.order).is_ok_and(|o| o == i + 1));
        if !dense {
            return Err(ConfigurationError::NonDenseOrder {
                assessment: assessment.clone(),
                expected_last: self.questions.len(),
                found: self.questions.iter().map(|q| q.order).collect(),
            });
        }

        let mut max_score = 0u32;
        for q in &self.questions {
            let sum = q.kind.checked_ceiling().and_then(|c| max_score.checked_add(c));
            let Some(sum) = sum else {
                return Err(ConfigurationError::ScoreOverflow {
                    assessment: assessment.clone(),
                    question_id: q.id.clone(),
                });
            };
            max_score = sum;

            match &q.kind {
                QuestionKind::YesNo { options } if options.len() != 2 => {
                    return Err(ConfigurationError::YesNoOptionCount {
                        assessment: assessment.clone(),
                        question_id: q.id.clone(),
                        found: options.len(),
                    });
                }
                QuestionKind::NumericScale {
                    min_value,
                    max_value,
                    ..
                } if min_value > max_value => {
                    return Err(ConfigurationError::InvertedScale {
                        assessment: assessment.clone(),
                        question_id: q.id.clone(),
                        min: *min_value,
                        max: *max_value,
                    });
                }
                kind if kind.is_choice() && kind.options().is_empty() => {
                    return Err(ConfigurationError::EmptyOptions {
                        assessment: assessment.clone(),
                        question_id: q.id.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigurationError> {
        let derived = self.derived_max_score();
        if self.max_score != derived {
            return Err(ConfigurationError::StaleMaxScore {
                assessment: self.name.clone(),
                stored: self.max_score,
                derived,
            });
        }
        if self.total_questions != self.questions.len() {
            return Err(ConfigurationError::StaleQuestionCount {
                assessment: self.name.clone(),
                stored: self.total_questions,
                derived: self.questions.len(),
            });
        }
        Ok(())
    }

    fn validate_bands(&self) -> Result<(), ConfigurationError> {
        let assessment = &self.name;
        let (Some(first), Some(last)) = (self.risk_bands.first(), self.risk_bands.last()) else {
            return Err(ConfigurationError::NoRiskBands {
                assessment: assessment.clone(),
            });
        };

        for band in &self.risk_bands {
            if band.low > band.high {
                return Err(ConfigurationError::InvertedBand {
                    assessment: assessment.clone(),
                    level: band.level,
                    low: band.low,
                    high: band.high,
                });
            }
        }

        for pair in self.risk_bands.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level <= prev.level {
                return Err(ConfigurationError::UnorderedBands {
                    assessment: assessment.clone(),
                    previous: prev.level,
                    level: next.level,
                });
            }
            if prev.high.checked_add(1) != Some(next.low) {
                return Err(ConfigurationError::BandDiscontinuity {
                    assessment: assessment.clone(),
                    at: next.low.min(prev.high),
                });
            }
        }

        if first.low != 0 || last.high != self.max_score {
            return Err(ConfigurationError::BandCoverage {
                assessment: assessment.clone(),
                low: first.low,
                high: last.high,
                max_score: self.max_score,
            });
        }
        Ok(())
    }
}
