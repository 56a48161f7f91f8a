use serde::Serialize;
use solace_core::RiskLevel;
use tracing::info;
use uuid::Uuid;

use crate::completed::CompletedAssessment;
use crate::session::Session;

/// What happened to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuditAction {
    #[serde(rename = "assessment.started")]
    AssessmentStarted,
    #[serde(rename = "assessment.submitted")]
    AssessmentSubmitted,
    #[serde(rename = "assessment.recorded")]
    AssessmentRecorded,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AssessmentStarted => "assessment.started",
            AuditAction::AssessmentSubmitted => "assessment.submitted",
            AuditAction::AssessmentRecorded => "assessment.recorded",
        }
    }
}

/// A structured audit event for assessment activity.
///
/// Emitted through `tracing` so the host's subscriber decides where it
/// lands. Events carry identifiers and the risk level only, never scores
/// or answer content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub respondent_id: String,
    /// Machine key of the instrument, e.g. `PHQ9`.
    pub assessment: String,
    pub completed_assessment_id: Option<Uuid>,
    pub risk_level: Option<RiskLevel>,
}

impl AuditEvent {
    pub fn assessment_started(session: &Session) -> Self {
        Self {
            action: AuditAction::AssessmentStarted,
            respondent_id: session.respondent_id().to_string(),
            assessment: session.assessment().name.clone(),
            completed_assessment_id: None,
            risk_level: None,
        }
    }

    pub fn assessment_submitted(completed: &CompletedAssessment) -> Self {
        Self::about(AuditAction::AssessmentSubmitted, completed)
    }

    pub fn assessment_recorded(completed: &CompletedAssessment) -> Self {
        Self::about(AuditAction::AssessmentRecorded, completed)
    }

    fn about(action: AuditAction, completed: &CompletedAssessment) -> Self {
        Self {
            action,
            respondent_id: completed.respondent_id().to_string(),
            assessment: completed.assessment_type().name.clone(),
            completed_assessment_id: Some(completed.id()),
            risk_level: Some(completed.risk_level()),
        }
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let completed_assessment_id = self
            .completed_assessment_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let risk_level = self.risk_level.map(|l| l.label()).unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.respondent_id = %self.respondent_id,
            audit.assessment = %self.assessment,
            audit.completed_assessment_id = %completed_assessment_id,
            audit.risk_level = risk_level,
            "audit event"
        );
    }
}
