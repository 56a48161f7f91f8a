//! solace-instruments
//!
//! Standardized screening instruments (PHQ-9, GAD-7, PCL-5) as static data,
//! a [`Catalog`] that combines them with custom definitions, and the
//! versioned JSON format custom definitions are authored in.

pub mod catalog;
pub mod definition;
pub mod error;
pub mod instruments;

use solace_core::{AssessmentType, ConfigurationError};

pub use catalog::{AssessmentTypeKey, Catalog};
pub use error::CatalogError;

/// Trait implemented by each built-in instrument.
pub trait Instrument: Send + Sync {
    /// Stable identifier (e.g., "phq9").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Machine key (e.g., "PHQ9").
    fn name(&self) -> &str {
        &self.definition().name
    }

    /// Full question list and cut-point table.
    fn definition(&self) -> &AssessmentType;

    /// Check the static definition against every configuration invariant.
    fn validate(&self) -> Result<(), ConfigurationError> {
        self.definition().validate()
    }
}

/// Return all built-in instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::pcl5::Pcl5),
    ]
}

/// Look up a built-in instrument by machine key, ignoring case.
pub fn get_instrument(name: &str) -> Option<Box<dyn Instrument>> {
    all_instruments()
        .into_iter()
        .find(|i| i.name().eq_ignore_ascii_case(name))
}
