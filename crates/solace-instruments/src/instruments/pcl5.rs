use std::sync::LazyLock;

use solace_core::{AnswerOption, AssessmentType, RiskBand, RiskLevel};

use super::{items, recommendation};
use crate::Instrument;

/// PCL-5: PTSD Checklist for DSM-5.
/// 20 items rated 0–4. Total 0–80; 33 is the usual provisional cut-point.
pub struct Pcl5;

impl Instrument for Pcl5 {
    fn definition(&self) -> &AssessmentType {
        static DEFINITION: LazyLock<AssessmentType> = LazyLock::new(|| {
            let options = vec![
                AnswerOption::new("Not at all", 0),
                AnswerOption::new("A little bit", 1),
                AnswerOption::new("Moderately", 2),
                AnswerOption::new("Quite a bit", 3),
                AnswerOption::new("Extremely", 4),
            ];

            let questions = items(
                "pcl5",
                &[
                    "Repeated, disturbing, and unwanted memories of the stressful experience",
                    "Repeated, disturbing dreams of the stressful experience",
                    "Suddenly feeling or acting as if the stressful experience were actually happening again",
                    "Feeling very upset when something reminded you of the stressful experience",
                    "Having strong physical reactions when something reminded you of the stressful experience",
                    "Avoiding memories, thoughts, or feelings related to the stressful experience",
                    "Avoiding external reminders of the stressful experience",
                    "Trouble remembering important parts of the stressful experience",
                    "Having strong negative beliefs about yourself, other people, or the world",
                    "Blaming yourself or someone else for the stressful experience or what happened after it",
                    "Having strong negative feelings such as fear, horror, anger, guilt, or shame",
                    "Loss of interest in activities that you used to enjoy",
                    "Feeling distant or cut off from other people",
                    "Trouble experiencing positive feelings",
                    "Irritable behavior, angry outbursts, or acting aggressively",
                    "Taking too many risks or doing things that could cause you harm",
                    "Being \"superalert\" or watchful or on guard",
                    "Feeling jumpy or easily startled",
                    "Having difficulty concentrating",
                    "Trouble falling or staying asleep",
                ],
                options,
            );

            let risk_bands = vec![
                RiskBand::new(RiskLevel::Minimal, 0, 32)
                    .with_interpretation("Your responses suggest minimal PTSD symptoms."),
                RiskBand::new(RiskLevel::Mild, 33, 43)
                    .with_interpretation("Your responses suggest some trauma-related symptoms. Consider speaking with a professional.")
                    .with_recommendation(recommendation(
                        "Follow-up screening",
                        "Scores at or above 33 suggest a structured clinical interview may be useful.",
                        &["Share these results with your guide"],
                    )),
                RiskBand::new(RiskLevel::Moderate, 44, 52)
                    .with_interpretation("Your responses suggest moderate PTSD symptoms. Professional evaluation is recommended.")
                    .with_recommendation(recommendation(
                        "Professional evaluation",
                        "A trauma-informed clinician can confirm the result and discuss treatment.",
                        &["Book an evaluation with a trauma-informed clinician"],
                    )),
                RiskBand::new(RiskLevel::Severe, 53, 80)
                    .with_interpretation("Your responses suggest significant PTSD symptoms. Please seek professional help.")
                    .with_recommendation(recommendation(
                        "Seek help promptly",
                        "Significant symptoms benefit from prompt specialist care.",
                        &["Contact a mental health professional this week"],
                    )),
            ];

            let mut definition = AssessmentType {
                id: "pcl5".to_string(),
                name: "PCL5".to_string(),
                display_name: "PTSD Checklist for DSM-5".to_string(),
                description: "Screens for the presence and severity of PTSD symptoms.".to_string(),
                instructions: "In the past month, how much were you bothered by the following problems?".to_string(),
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
