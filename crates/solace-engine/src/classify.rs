use solace_core::{AssessmentType, RiskBand};

use crate::error::EngineError;

/// Find the single risk band whose inclusive range contains `total_score`.
///
/// Cut-points come from the assessment's own table; there is no
/// percentage-of-max fallback.
pub fn classify(total_score: u32, assessment: &AssessmentType) -> Result<&RiskBand, EngineError> {
    let matching: Vec<&RiskBand> = assessment
        .risk_bands
        .iter()
        .filter(|band| band.contains(total_score))
        .collect();

    match matching.as_slice() {
        [band] => {
            tracing::debug!(
                assessment = %assessment.name,
                risk_level = ?band.level,
                "classified score"
            );
            Ok(band)
        }
        _ => {
            tracing::error!(
                assessment = %assessment.name,
                score = total_score,
                matches = matching.len(),
                "risk band table does not classify score"
            );
            Err(EngineError::UnclassifiableScore {
                assessment: assessment.name.clone(),
                score: total_score,
                matches: matching.len(),
            })
        }
    }
}
