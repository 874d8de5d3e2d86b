use std::path::Path;

use thiserror::Error;

pub mod record;
pub mod source;
pub mod tsv;

pub use record::{FieldIssue, FlagValue, PatientRecord};
pub use tsv::load_patient_tsv;

use crate::model::flags::LabThresholds;
use crate::model::inputs::ClinicalInputs;
use source::open_maybe_gz;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("parse error at {path}:{line}: {msg}")]
    Parse {
        path: String,
        line: usize,
        msg: String,
    },
    #[error("invalid patient {location}: {}", join_issues(.issues))]
    Invalid {
        location: String,
        issues: Vec<FieldIssue>,
    },
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A validated patient ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub inputs: ClinicalInputs,
}

pub fn load_patient_json(path: &Path) -> Result<PatientRecord, InputError> {
    let reader = open_maybe_gz(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Loads patients from a JSON object (one patient) or a TSV table (many),
/// chosen by file extension.
pub fn load_patients(path: &Path, thresholds: &LabThresholds) -> Result<Vec<Patient>, InputError> {
    if is_json_path(path) {
        let record = load_patient_json(path)?;
        let location = record
            .id
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        let inputs = record.into_inputs(thresholds, &location)?;
        Ok(vec![Patient {
            id: record.id.unwrap_or_else(|| "patient".to_string()),
            inputs,
        }])
    } else {
        load_patient_tsv(path, thresholds)
    }
}

pub fn is_json_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".json") || name.ends_with(".json.gz")
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
