use eyre::{bail, eyre};
use solace_core::{Answer, AssessmentType, QuestionKind};

/// Parse a comma-separated answer list, one token per question in order.
///
/// Choice questions take an option index, numeric scales take the value,
/// multi-select takes indices joined with `+` and free text takes the
/// token as written. `-` or an empty token leaves a question unanswered,
/// and empty input leaves every question unanswered.
pub fn parse_answers(assessment: &AssessmentType, input: &str) -> eyre::Result<Vec<Answer>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    if tokens.len() > assessment.questions.len() {
        bail!(
            "{} answers given but {} has {} questions",
            tokens.len(),
            assessment.name,
            assessment.questions.len()
        );
    }

    assessment
        .questions
        .iter()
        .zip(tokens)
        .map(|(question, token)| -> eyre::Result<Answer> {
            if token.is_empty() || token == "-" {
                return Ok(Answer::Unanswered);
            }
            let answer = match &question.kind {
                QuestionKind::SingleChoice { .. } | QuestionKind::YesNo { .. } => Answer::Option {
                    index: index(token)?,
                },
                QuestionKind::MultiSelect { .. } => Answer::Options {
                    indices: token.split('+').map(index).collect::<eyre::Result<_>>()?,
                },
                QuestionKind::NumericScale { .. } => Answer::Numeric {
                    value: token
                        .parse()
                        .map_err(|_| eyre!("question {}: {token:?} is not a number", question.order))?,
                },
                QuestionKind::FreeText => Answer::Text {
                    text: token.to_string(),
                },
            };
            Ok(answer)
        })
        .collect()
}

fn index(token: &str) -> eyre::Result<usize> {
    token
        .trim()
        .parse()
        .map_err(|_| eyre!("{token:?} is not an option index"))
}
