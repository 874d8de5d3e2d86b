pub mod json;
pub mod text;
pub mod tsv;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::nomogram::Nomogram;
use crate::pipeline::Evaluation;
use json::{build_batch_summary, build_summary};
use text::render_report_text;
use tsv::write_outcomes_tsv;

pub const TOOL_NAME: &str = "kira-lupsma";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn bool_fraction(values: &[bool]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.iter().filter(|&&v| v).count();
    count as f64 / values.len() as f64
}

/// Writes `summary.json` and `report.txt` for one patient. Returns the paths written.
pub fn write_reports(
    patient_id: &str,
    eval: &Evaluation,
    nomogram: &Nomogram,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    create_dir(out_dir)?;

    let summary = build_summary(patient_id, eval, nomogram);
    let summary_path = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary).map_err(|source| ReportError::Json {
        what: "summary",
        source,
    })?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(patient_id, eval, nomogram))?;

    info!(out_dir = %out_dir.display(), "reports written");
    Ok(vec![summary_path, report_path])
}

/// Writes `outcomes.tsv` and a distribution `summary.json` for a patient table.
pub fn write_batch_reports(
    results: &[(String, Evaluation)],
    nomogram: &Nomogram,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    create_dir(out_dir)?;

    let tsv_path = out_dir.join("outcomes.tsv");
    let file = File::create(&tsv_path).map_err(|source| io_error(&tsv_path, source))?;
    let mut w = BufWriter::new(file);
    write_outcomes_tsv(&mut w, results)
        .and_then(|_| w.flush())
        .map_err(|source| io_error(&tsv_path, source))?;

    let summary = build_batch_summary(results, nomogram);
    let summary_path = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary).map_err(|source| ReportError::Json {
        what: "batch summary",
        source,
    })?;
    write_text(&summary_path, &json)?;

    info!(
        out_dir = %out_dir.display(),
        n_patients = results.len(),
        "batch reports written"
    );
    Ok(vec![tsv_path, summary_path])
}

fn create_dir(dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))
}

fn write_text(path: &Path, content: &str) -> Result<(), ReportError> {
    fs::write(path, content).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
