//! Seams to the collaborators that own I/O: where assessment types come
//! from and where completed assessments go.

use std::collections::HashMap;
use std::sync::RwLock;

use jiff::Timestamp;
use solace_core::AssessmentType;
use solace_instruments::{AssessmentTypeKey, Catalog, CatalogError};
use thiserror::Error;
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::completed::CompletedAssessment;
use crate::error::EngineError;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("completed assessment {0} is already recorded")]
    AlreadyRecorded(Uuid),

    #[error("session is {0}, only submitted sessions can be recorded")]
    NotSubmitted(&'static str),

    #[error("history store lock poisoned")]
    Poisoned,
}

/// Source of assessment types. Implementations must return a fully
/// populated question list.
pub trait AssessmentTypeRepository: Send + Sync {
    fn get(&self, key: &AssessmentTypeKey) -> Result<AssessmentType, RepositoryError>;
}

/// Store of completed assessments. No ordering is promised by `list_for`.
pub trait AssessmentHistoryRepository: Send + Sync {
    fn list_for(&self, respondent_id: &str) -> Result<Vec<CompletedAssessment>, RepositoryError>;

    /// Record a new completed assessment. Existing records are never replaced.
    fn append(&self, assessment: CompletedAssessment) -> Result<(), RepositoryError>;
}

impl AssessmentTypeRepository for Catalog {
    fn get(&self, key: &AssessmentTypeKey) -> Result<AssessmentType, RepositoryError> {
        Ok(Catalog::get(self, key)?.clone())
    }
}

/// Process-local history, keyed by respondent.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: RwLock<HashMap<String, Vec<CompletedAssessment>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssessmentHistoryRepository for InMemoryHistory {
    fn list_for(&self, respondent_id: &str) -> Result<Vec<CompletedAssessment>, RepositoryError> {
        let records = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(records.get(respondent_id).cloned().unwrap_or_default())
    }

    fn append(&self, assessment: CompletedAssessment) -> Result<(), RepositoryError> {
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        let entries = records
            .entry(assessment.respondent_id().to_string())
            .or_default();
        if entries.iter().any(|e| e.id() == assessment.id()) {
            return Err(RepositoryError::AlreadyRecorded(assessment.id()));
        }
        entries.push(assessment);
        Ok(())
    }
}

/// Load an assessment type and start a session for `respondent_id`.
pub fn begin(
    types: &dyn AssessmentTypeRepository,
    respondent_id: &str,
    key: &AssessmentTypeKey,
    now: Timestamp,
) -> Result<Session, EngineError> {
    let assessment = types.get(key)?;
    Session::new(respondent_id, assessment).start(now)
}

/// Hand a submitted session's result to the history store.
pub fn record(
    history: &dyn AssessmentHistoryRepository,
    session: &Session,
) -> Result<CompletedAssessment, EngineError> {
    let completed = session
        .completed()
        .ok_or(RepositoryError::NotSubmitted(session.status()))?
        .clone();
    history.append(completed.clone())?;
    AuditEvent::assessment_recorded(&completed).emit();
    Ok(completed)
}
