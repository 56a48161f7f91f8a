use std::sync::LazyLock;

use solace_core::{AssessmentType, RiskBand, RiskLevel};

use super::{frequency_options, items, recommendation};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3. Total 0–21.
pub struct Gad7;

impl Instrument for Gad7 {
    fn definition(&self) -> &AssessmentType {
        static DEFINITION: LazyLock<AssessmentType> = LazyLock::new(|| {
            let questions = items(
                "gad7",
                &[
                    "Feeling nervous, anxious, or on edge",
                    "Not being able to stop or control worrying",
                    "Worrying too much about different things",
                    "Trouble relaxing",
                    "Being so restless that it is hard to sit still",
                    "Becoming easily annoyed or irritable",
                    "Feeling afraid, as if something awful might happen",
                ],
                frequency_options(),
            );

            let risk_bands = vec![
                RiskBand::new(RiskLevel::Minimal, 0, 4)
                    .with_interpretation("Your responses suggest minimal anxiety symptoms."),
                RiskBand::new(RiskLevel::Mild, 5, 9)
                    .with_interpretation("Your responses suggest mild anxiety symptoms. Consider stress management techniques.")
                    .with_recommendation(recommendation(
                        "Stress management",
                        "Breathing exercises, regular sleep and activity can reduce mild anxiety.",
                        &["Try a guided breathing exercise daily"],
                    )),
                RiskBand::new(RiskLevel::Moderate, 10, 14)
                    .with_interpretation("Your responses suggest moderate anxiety symptoms. Professional support may be helpful.")
                    .with_recommendation(recommendation(
                        "Professional support",
                        "Talking with a clinician can help identify the right kind of support.",
                        &["Book a session with your guide"],
                    )),
                RiskBand::new(RiskLevel::Severe, 15, 21)
                    .with_interpretation("Your responses suggest severe anxiety symptoms. Please consider seeking professional help.")
                    .with_recommendation(recommendation(
                        "Clinical evaluation",
                        "Severe anxiety warrants evaluation by a mental health professional.",
                        &["Contact a mental health professional this week"],
                    )),
            ];

            let mut definition = AssessmentType {
                id: "gad7".to_string(),
                name: "GAD7".to_string(),
                display_name: "Generalized Anxiety Disorder-7".to_string(),
                description: "Screens for the presence and severity of generalized anxiety.".to_string(),
                instructions: "Over the last 2 weeks, how often have you been bothered by the following problems?".to_string(),
                questions,
                risk_bands,
                max_score: 0,
                total_questions: 0,
            };
            definition.refresh_derived();
            definition
        });
        &DEFINITION
    }
}
