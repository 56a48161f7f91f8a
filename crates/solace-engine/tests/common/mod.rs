#![allow(dead_code)]

use jiff::Timestamp;
use solace_core::{
    Answer, AnswerOption, AssessmentType, Question, QuestionKind, RiskBand, RiskLevel,
};
use solace_engine::{CompletedAssessment, Session};
use solace_instruments::get_instrument;

pub fn at(s: &str) -> Timestamp {
    s.parse().unwrap()
}

pub fn phq9() -> AssessmentType {
    get_instrument("PHQ9").unwrap().definition().clone()
}

pub fn gad7() -> AssessmentType {
    get_instrument("GAD7").unwrap().definition().clone()
}

pub fn choice(scores: &[u32]) -> QuestionKind {
    QuestionKind::SingleChoice {
        options: scores
            .iter()
            .map(|s| AnswerOption::new(format!("option {s}"), *s))
            .collect(),
    }
}

/// One numeric question rated `0..=max`, so the total equals the rating.
pub fn dial(name: &str, max: u32) -> AssessmentType {
    let mid = max / 2;
    AssessmentType::new(
        name.to_lowercase(),
        name,
        format!("{name} dial"),
        vec![Question::new(
            "rating",
            "Rate it",
            1,
            QuestionKind::NumericScale {
                min_value: 0,
                max_value: max,
                labels: vec![],
            },
        )],
        vec![
            RiskBand::new(RiskLevel::Minimal, 0, mid),
            RiskBand::new(RiskLevel::Severe, mid + 1, max),
        ],
    )
    .unwrap()
}

/// Run a full session answering every question in order with `answers`.
pub fn take(assessment: AssessmentType, answers: &[Answer], completed_at: Timestamp) -> CompletedAssessment {
    let started = Timestamp::from_second(completed_at.as_second() - 120).unwrap();
    let mut session = Session::new("client-1", assessment).start(started).unwrap();
    for (i, answer) in answers.iter().enumerate() {
        session = session.answer_with(i, answer.clone()).unwrap();
    }
    session
        .submit(completed_at)
        .unwrap()
        .completed()
        .unwrap()
        .clone()
}

/// A completed `dial` assessment with the given total.
pub fn dial_entry(name: &str, max: u32, total: i64, completed_at: &str) -> CompletedAssessment {
    take(dial(name, max), &[Answer::Numeric { value: total }], at(completed_at))
}
