use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};

use crate::input::record::{FlagValue, PatientRecord};
use crate::input::source::open_maybe_gz;
use crate::input::{InputError, Patient};
use crate::model::flags::LabThresholds;

/// Columns understood in a patient table; any order, `id` optional.
pub const KNOWN_COLUMNS: &[&str] = &[
    "id",
    "suv_max",
    "years_since_diagnosis",
    "opioid_use",
    "ast",
    "hemoglobin",
    "lymphocyte_count",
    "psma_positive_lymph_nodes",
    "ldh_high",
    "ldh",
    "alp_high",
    "alp",
    "neutrophil_high",
    "neutrophils",
    "liver_metastases",
];

pub fn load_patient_tsv(path: &Path, thresholds: &LabThresholds) -> Result<Vec<Patient>, InputError> {
    let records = read_patient_tsv(path)?;
    let mut patients = Vec::with_capacity(records.len());
    for (row, (line_no, record)) in records.into_iter().enumerate() {
        let id = record.id.clone().unwrap_or_else(|| format!("row{}", row + 1));
        let location = format!("{} (line {line_no})", id);
        let inputs = record.into_inputs(thresholds, &location)?;
        patients.push(Patient { id, inputs });
    }
    info!(path = %path.display(), n_patients = patients.len(), "patient table loaded");
    Ok(patients)
}

/// Parses rows without validating them. Returns each record with its 1-based line number.
/// Blank lines and `#` comments are skipped anywhere, including before the header.
pub fn read_patient_tsv(path: &Path) -> Result<Vec<(usize, PatientRecord)>, InputError> {
    let path_str = path.display().to_string();
    let io_err = |source: std::io::Error| InputError::Io {
        path: path_str.clone(),
        source,
    };
    let parse_err = |line: usize, msg: String| InputError::Parse {
        path: path_str.clone(),
        line,
        msg,
    };
    let mut reader = open_maybe_gz(path).map_err(io_err)?;
    let mut buf = String::new();
    let mut line_no = 0usize;

    if !next_content_line(&mut reader, &mut buf, &mut line_no).map_err(io_err)? {
        return Err(parse_err(1, "patient table has no header".to_string()));
    }
    let header_line = line_no;
    let header: Vec<String> = buf
        .split('\t')
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();

    let mut seen = HashSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            return Err(parse_err(header_line, format!("duplicate column {name}")));
        }
        if !KNOWN_COLUMNS.contains(&name.as_str()) {
            warn!(path = %path.display(), column = %name, "ignoring unknown column");
        }
    }

    let mut records = Vec::new();
    while next_content_line(&mut reader, &mut buf, &mut line_no).map_err(io_err)? {
        let cells: Vec<&str> = buf.split('\t').collect();
        if cells.len() != header.len() {
            return Err(parse_err(
                line_no,
                format!("expected {} columns, found {}", header.len(), cells.len()),
            ));
        }
        let mut record = PatientRecord::default();
        for (name, cell) in header.iter().zip(cells) {
            set_field(&mut record, name, cell).map_err(|msg| parse_err(line_no, msg))?;
        }
        records.push((line_no, record));
    }

    if records.is_empty() {
        warn!(path = %path.display(), "patient table has no rows");
    }
    Ok(records)
}

/// Reads the next line that is neither blank nor a `#` comment into `buf`,
/// without its line terminator. Returns `false` at end of input.
fn next_content_line(
    reader: &mut dyn BufRead,
    buf: &mut String,
    line_no: &mut usize,
) -> std::io::Result<bool> {
    loop {
        buf.clear();
        if reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        *line_no += 1;
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        if buf.trim().is_empty() || buf.starts_with('#') {
            continue;
        }
        return Ok(true);
    }
}

fn set_field(record: &mut PatientRecord, column: &str, cell: &str) -> Result<(), String> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("na") {
        return Ok(());
    }
    let number = || {
        cell.parse::<f64>()
            .map(Some)
            .map_err(|_| format!("{column}: cannot parse {cell:?} as a number"))
    };
    let text = || Some(FlagValue::Text(cell.to_string()));
    match column {
        "id" => record.id = Some(cell.to_string()),
        "suv_max" => record.suv_max = number()?,
        "years_since_diagnosis" => record.years_since_diagnosis = number()?,
        "ast" => record.ast = number()?,
        "hemoglobin" => record.hemoglobin = number()?,
        "lymphocyte_count" => record.lymphocyte_count = number()?,
        "ldh" => record.ldh = number()?,
        "alp" => record.alp = number()?,
        "neutrophils" => record.neutrophils = number()?,
        "opioid_use" => record.opioid_use = text(),
        "psma_positive_lymph_nodes" => record.psma_positive_lymph_nodes = text(),
        "ldh_high" => record.ldh_high = text(),
        "alp_high" => record.alp_high = text(),
        "neutrophil_high" => record.neutrophil_high = text(),
        "liver_metastases" => record.liver_metastases = text(),
        _ => {}
    }
    Ok(())
}
