use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Clinical risk levels in ascending severity.
///
/// Each instrument uses an ordered subset; GAD-7 has no
/// `ModeratelySevere` band, for example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "Minimal",
            RiskLevel::Mild => "Mild",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::ModeratelySevere => "Moderately Severe",
            RiskLevel::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub action_items: Vec<String>,
}

/// One row of an instrument's cut-point table. `low` and `high` are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskBand {
    pub level: RiskLevel,
    pub low: u32,
    pub high: u32,
    #[serde(default)]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl RiskBand {
    pub fn new(level: RiskLevel, low: u32, high: u32) -> Self {
        Self {
            level,
            low,
            high,
            interpretation: None,
            recommendations: Vec::new(),
        }
    }

    pub fn with_interpretation(mut self, text: impl Into<String>) -> Self {
        self.interpretation = Some(text.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendations.push(recommendation);
        self
    }

    pub fn contains(&self, score: u32) -> bool {
        score >= self.low && score <= self.high
    }
}
