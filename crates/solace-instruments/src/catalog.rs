use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use solace_core::AssessmentType;

use crate::all_instruments;
use crate::definition;
use crate::error::CatalogError;

/// How a caller refers to an assessment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum AssessmentTypeKey {
    Id(String),
    /// Machine key, compared case-insensitively.
    Name(String),
}

impl AssessmentTypeKey {
    pub fn matches(&self, assessment: &AssessmentType) -> bool {
        match self {
            AssessmentTypeKey::Id(id) => assessment.id == *id,
            AssessmentTypeKey::Name(name) => assessment.name.eq_ignore_ascii_case(name),
        }
    }
}

impl fmt::Display for AssessmentTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentTypeKey::Id(id) => write!(f, "id={id}"),
            AssessmentTypeKey::Name(name) => write!(f, "name={name}"),
        }
    }
}

/// Every assessment type available to sessions: built-ins plus custom
/// definitions. Only validated types are ever admitted.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    assessments: Vec<AssessmentType>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in standard instruments.
    pub fn builtin() -> Self {
        Self {
            assessments: all_instruments()
                .iter()
                .map(|i| i.definition().clone())
                .collect(),
        }
    }

    /// Register a custom assessment type.
    ///
    /// The type is validated, and its id and name must not collide with
    /// anything already registered.
    pub fn add(&mut self, assessment: AssessmentType) -> Result<(), CatalogError> {
        self.check_admissible(&assessment, &[])?;
        self.register(assessment);
        Ok(())
    }

    /// Load every `*.json` definition in `dir` and register them together.
    /// Returns the number of definitions added. If any definition is
    /// rejected, none are registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, CatalogError> {
        let loaded = definition::load_definitions_dir(dir)?;
        for (i, assessment) in loaded.iter().enumerate() {
            self.check_admissible(assessment, &loaded[..i])?;
        }

        let count = loaded.len();
        for assessment in loaded {
            self.register(assessment);
        }
        tracing::info!(dir = %dir.display(), count, "loaded custom assessment definitions");
        Ok(count)
    }

    pub fn get(&self, key: &AssessmentTypeKey) -> Result<&AssessmentType, CatalogError> {
        self.assessments
            .iter()
            .find(|a| key.matches(a))
            .ok_or_else(|| CatalogError::UnknownAssessment(key.clone()))
    }

    pub fn list(&self) -> &[AssessmentType] {
        &self.assessments
    }

    /// Validate `assessment` and check its id and name against registered
    /// types and `pending` ones not yet registered.
    fn check_admissible(
        &self,
        assessment: &AssessmentType,
        pending: &[AssessmentType],
    ) -> Result<(), CatalogError> {
        assessment.validate()?;
        let collides = self.assessments.iter().chain(pending).any(|a| {
            a.id == assessment.id || a.name.eq_ignore_ascii_case(&assessment.name)
        });
        if collides {
            return Err(CatalogError::Duplicate(assessment.name.clone()));
        }
        Ok(())
    }

    fn register(&mut self, assessment: AssessmentType) {
        tracing::debug!(
            assessment = %assessment.name,
            questions = assessment.total_questions,
            max_score = assessment.max_score,
            "registered assessment type"
        );
        self.assessments.push(assessment);
    }
}
