use std::path::Path;

use eyre::{WrapErr, bail};
use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde_json::json;
use solace_engine::{
    CompletedAssessment, EngineError, Session, distress_alert, instrument_trends, response_patterns,
    suggestions, summarize,
};
use solace_instruments::definition::{load_definition, render_definition};
use solace_instruments::{AssessmentTypeKey, Catalog};

use crate::answers::parse_answers;

/// Built-in instruments plus any definitions found in `definitions`.
pub fn catalog(definitions: Option<&Path>) -> eyre::Result<Catalog> {
    let mut catalog = Catalog::builtin();
    if let Some(dir) = definitions {
        catalog
            .load_dir(dir)
            .wrap_err_with(|| format!("loading definitions from {}", dir.display()))?;
    }
    Ok(catalog)
}

pub fn list(catalog: &Catalog) -> String {
    catalog
        .list()
        .iter()
        .map(|a| {
            format!(
                "{:<10} {:>3} questions  max {:>3}  {}",
                a.name, a.total_questions, a.max_score, a.display_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn show(catalog: &Catalog, name: &str) -> eyre::Result<String> {
    let assessment = catalog.get(&AssessmentTypeKey::Name(name.to_string()))?;
    Ok(render_definition(assessment)?)
}

/// Load a definition file and report what it declares.
pub fn validate(path: &Path) -> eyre::Result<String> {
    let assessment = load_definition(path)?;
    Ok(format!(
        "{}: ok ({} questions, max score {}, {} risk bands)",
        assessment.name,
        assessment.total_questions,
        assessment.max_score,
        assessment.risk_bands.len()
    ))
}

/// Run a whole session from a prepared answer list.
pub fn take(
    catalog: &Catalog,
    name: &str,
    answers: &str,
    respondent_id: &str,
    now: Timestamp,
) -> eyre::Result<CompletedAssessment> {
    let assessment = catalog
        .get(&AssessmentTypeKey::Name(name.to_string()))?
        .clone();
    let answers = parse_answers(&assessment, answers)?;

    let mut session = Session::new(respondent_id, assessment).start(now)?;
    for (i, answer) in answers.into_iter().enumerate() {
        session = session.answer_with(i, answer)?;
    }
    match session.submit(now) {
        Ok(submitted) => match submitted.completed() {
            Some(completed) => Ok(completed.clone()),
            None => bail!("session was not submitted"),
        },
        Err(err @ EngineError::IncompleteAssessment { .. }) => bail!(err.user_message()),
        Err(err) => Err(err.into()),
    }
}

/// Summarize a JSON array of completed assessments.
pub fn summarize_file(path: &Path, tz: TimeZone) -> eyre::Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading history from {}", path.display()))?;
    let history: Vec<CompletedAssessment> =
        serde_json::from_str(&contents).wrap_err("parsing assessment history")?;

    let clock = Timestamp::now().to_zoned(tz);
    Ok(json!({
        "summary": summarize(&history, &clock),
        "instrument_trends": instrument_trends(&history),
        "response_patterns": response_patterns(&history),
        "distress_alert": distress_alert(&history, &clock),
        "suggestions": suggestions(&history, &clock),
    }))
}
