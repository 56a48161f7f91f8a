use std::path::PathBuf;

use solace_core::ConfigurationError;
use thiserror::Error;

use crate::catalog::AssessmentTypeKey;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown assessment type: {0}")]
    UnknownAssessment(AssessmentTypeKey),

    #[error("assessment type '{0}' is already registered")]
    Duplicate(String),

    #[error("invalid assessment name '{0}': only letters, digits and underscores are allowed")]
    InvalidName(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("definition_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("definition is not a JSON object")]
    NotAnObject,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
