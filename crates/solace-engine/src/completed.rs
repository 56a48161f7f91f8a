use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use solace_core::{AssessmentType, Recommendation, Response, RiskBand, RiskLevel};
use ts_rs::TS;
use uuid::Uuid;

/// The instrument a completed assessment was taken against, frozen at
/// submission so history stays comparable if the definition changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRef {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub max_score: u32,
}

impl From<&AssessmentType> for AssessmentRef {
    fn from(assessment: &AssessmentType) -> Self {
        Self {
            id: assessment.id.clone(),
            name: assessment.name.clone(),
            display_name: assessment.display_name.clone(),
            max_score: assessment.max_score,
        }
    }
}

/// A scored, classified assessment. Immutable once created: a re-take
/// produces a new value. Only a submitted session creates one; persistence
/// layers restore them through `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletedAssessment {
    id: Uuid,
    respondent_id: String,
    assessment_type: AssessmentRef,
    responses: Vec<Response>,
    total_score: u32,
    risk_level: RiskLevel,
    interpretation: Option<String>,
    recommendations: Vec<Recommendation>,
    completed_at: Timestamp,
    time_taken_seconds: Option<u64>,
}

impl CompletedAssessment {
    pub(crate) fn new(
        respondent_id: String,
        assessment: &AssessmentType,
        responses: Vec<Response>,
        total_score: u32,
        band: &RiskBand,
        completed_at: Timestamp,
        time_taken_seconds: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            respondent_id,
            assessment_type: AssessmentRef::from(assessment),
            responses,
            total_score,
            risk_level: band.level,
            interpretation: band.interpretation.clone(),
            recommendations: band.recommendations.clone(),
            completed_at,
            time_taken_seconds,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn respondent_id(&self) -> &str {
        &self.respondent_id
    }

    pub fn assessment_type(&self) -> &AssessmentRef {
        &self.assessment_type
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn interpretation(&self) -> Option<&str> {
        self.interpretation.as_deref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }

    pub fn time_taken_seconds(&self) -> Option<u64> {
        self.time_taken_seconds
    }

    /// `total_score / max_score` in `[0, 1]`; 0 for an instrument with no
    /// scored questions.
    pub fn normalized_score(&self) -> f64 {
        if self.assessment_type.max_score == 0 {
            return 0.0;
        }
        f64::from(self.total_score) / f64::from(self.assessment_type.max_score)
    }

    /// Percentage of the maximum, rounded to one decimal place.
    pub fn percentage_score(&self) -> f64 {
        (self.normalized_score() * 1000.0).round() / 10.0
    }
}
