pub mod gad7;
pub mod pcl5;
pub mod phq9;

use solace_core::{AnswerOption, Question, QuestionKind, Recommendation};

/// "Over the last 2 weeks" frequency scale shared by PHQ-9 and GAD-7.
fn frequency_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Not at all", 0),
        AnswerOption::new("Several days", 1),
        AnswerOption::new("More than half the days", 2),
        AnswerOption::new("Nearly every day", 3),
    ]
}

/// Required single-choice items numbered from 1, ids `{prefix}_q{n}`.
fn items(prefix: &str, texts: &[&str], options: Vec<AnswerOption>) -> Vec<Question> {
    texts
        .iter()
        .zip(1u32..)
        .map(|(text, order)| {
            Question::new(
                format!("{prefix}_q{order}"),
                *text,
                order,
                QuestionKind::SingleChoice {
                    options: options.clone(),
                },
            )
        })
        .collect()
}

fn recommendation(title: &str, description: &str, action_items: &[&str]) -> Recommendation {
    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        action_items: action_items.iter().map(|s| s.to_string()).collect(),
    }
}
