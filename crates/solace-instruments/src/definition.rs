use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use solace_core::{AssessmentType, Question, RiskBand};

use crate::error::CatalogError;

/// Current definition format version. Bump this when changing the shape,
/// and add the matching step to [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// On-disk form of a custom assessment type.
///
/// `max_score` and `total_questions` are never stored; they are derived
/// when the definition is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Definition {
    /// Missing or 0 = pre-versioned definition.
    #[serde(default)]
    definition_version: u32,
    id: String,
    name: String,
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instructions: String,
    questions: Vec<Question>,
    risk_bands: Vec<RiskBand>,
}

/// Parse, migrate and validate one definition document.
pub fn parse_definition(contents: &str) -> Result<AssessmentType, CatalogError> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("definition_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let def: Definition = serde_json::from_value(migrated)?;

    let name = normalize_name(&def.name)?;
    let assessment = AssessmentType::new(
        def.id,
        name,
        def.display_name,
        def.questions,
        def.risk_bands,
    )?
    .with_description(def.description)
    .with_instructions(def.instructions);
    Ok(assessment)
}

pub fn load_definition(path: &Path) -> Result<AssessmentType, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let assessment = parse_definition(&contents)?;
    tracing::debug!(path = %path.display(), assessment = %assessment.name, "definition loaded");
    Ok(assessment)
}

/// Load every `*.json` file in `dir`, in path order.
pub fn load_definitions_dir(dir: &Path) -> Result<Vec<AssessmentType>, CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths.iter().map(|p| load_definition(p)).collect()
}

/// Render an assessment type in the current definition format.
pub fn render_definition(assessment: &AssessmentType) -> Result<String, CatalogError> {
    let def = Definition {
        definition_version: CURRENT_VERSION,
        id: assessment.id.clone(),
        name: assessment.name.clone(),
        display_name: assessment.display_name.clone(),
        description: assessment.description.clone(),
        instructions: assessment.instructions.clone(),
        questions: assessment.questions.clone(),
        risk_bands: assessment.risk_bands.clone(),
    };
    Ok(serde_json::to_string_pretty(&def)?)
}

/// Machine keys are letters, digits and underscores, stored upper-case.
fn normalize_name(name: &str) -> Result<String, CatalogError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(CatalogError::InvalidName(name.to_string()));
    }
    Ok(name.to_ascii_uppercase())
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CatalogError> {
    if from_version > CURRENT_VERSION {
        return Err(CatalogError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: questions used `question_number` / `question_text`, and the
    // top level carried cached `max_score` / `total_questions`.
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(CatalogError::NotAnObject)?;
        obj.remove("max_score");
        obj.remove("total_questions");
        if let Some(questions) = obj.get_mut("questions").and_then(|q| q.as_array_mut()) {
            for question in questions.iter_mut().filter_map(|q| q.as_object_mut()) {
                rename_key(question, "question_number", "order");
                rename_key(question, "question_text", "text");
            }
        }
        obj.insert(
            "definition_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated definition v0 → v1 (renamed question fields)");
    }

    Ok(json)
}

fn rename_key(obj: &mut serde_json::Map<String, serde_json::Value>, from: &str, to: &str) {
    if obj.contains_key(to) {
        return;
    }
    if let Some(value) = obj.remove(from) {
        obj.insert(to.to_string(), value);
    }
}
