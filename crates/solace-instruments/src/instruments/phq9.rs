use std::sync::LazyLock;

use solace_core::{AssessmentType, RiskBand, RiskLevel};

use super::{frequency_options, items, recommendation};
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items rated 0–3. Total 0–27.
pub struct Phq9;

impl Instrument for Phq9 {
    fn definition(&self) -> &AssessmentType {
        static DEFINITION: LazyLock<AssessmentType> = LazyLock::new(|| {
            let questions = items(
                "phq9",
                &[
                    "Little interest or pleasure in doing things",
                    "Feeling down, depressed, or hopeless",
                    "Trouble falling or staying asleep, or sleeping too much",
                    "Feeling tired or having little energy",
                    "Poor appetite or overeating",
                    "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
                    "Trouble concentrating on things, such as reading the newspaper or watching television",
                    "Moving or speaking so slowly that other people could have noticed, or the opposite: being so fidgety or restless that you have been moving around a lot more than usual",
                    "Thoughts that you would be better off dead, or of hurting yourself in some way",
                ],
                frequency_options(),
            );

            let risk_bands = vec![
                RiskBand::new(RiskLevel::Minimal, 0, 4)
                    .with_interpretation("Your responses suggest minimal depression symptoms."),
                RiskBand::new(RiskLevel::Mild, 5, 9)
                    .with_interpretation("Your responses suggest mild depression symptoms. Consider speaking with a mental health professional.")
                    .with_recommendation(recommendation(
                        "Watchful waiting",
                        "Repeat the PHQ-9 at a follow-up visit to see whether symptoms persist.",
                        &["Retake this assessment in two weeks"],
                    )),
                RiskBand::new(RiskLevel::Moderate, 10, 14)
                    .with_interpretation("Your responses suggest moderate depression symptoms. We recommend seeking professional support.")
                    .with_recommendation(recommendation(
                        "Treatment plan",
                        "Discuss counselling, follow-up and possible treatment with a clinician.",
                        &["Book a session with your guide", "Retake this assessment in two weeks"],
                    )),
                RiskBand::new(RiskLevel::ModeratelySevere, 15, 19)
                    .with_interpretation("Your responses suggest moderately severe depression symptoms. Professional help is strongly recommended.")
                    .with_recommendation(recommendation(
                        "Active treatment",
                        "Active treatment with psychotherapy and/or medication is usually indicated.",
                        &["Contact a mental health professional this week"],
                    )),
                RiskBand::new(RiskLevel::Severe, 20, 27)
                    .with_interpretation("Your responses suggest severe depression symptoms. Please seek immediate professional help.")
                    .with_recommendation(recommendation(
                        "Immediate support",
                        "Prompt evaluation by a mental health professional is recommended.",
                        &["Contact a mental health professional today", "If you are in crisis, call your local emergency number"],
                    )),
            ];

            let mut definition = AssessmentType {
                id: "phq9".to_string(),
                name: "PHQ9".to_string(),
                display_name: "Patient Health Questionnaire-9 (Depression)".to_string(),
                description: "Screens for the presence and severity of depression.".to_string(),
                instructions: "Over the last 2 weeks, how often have you been bothered by any of the following problems?".to_string(),
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
