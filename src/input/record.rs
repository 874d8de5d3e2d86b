use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::input::InputError;
use crate::model::axes::Variable;
use crate::model::flags::LabThresholds;
use crate::model::inputs::{ClinicalInputs, field_domain};

/// A categorical answer as it arrives from a form, file or command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(b) => Some(*b),
            FlagValue::Int(0) => Some(false),
            FlagValue::Int(1) => Some(true),
            FlagValue::Int(_) => None,
            FlagValue::Text(s) => parse_flag(s),
        }
    }
}

pub fn parse_flag(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldIssue {
    #[error("missing required field {field}")]
    Missing { field: &'static str },
    #[error("{field}={value} outside valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field}: expected yes/no, got {token:?}")]
    InvalidFlag { field: &'static str, token: String },
    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Boundary-side patient record. Every field is optional here so that all
/// problems can be reported at once by [`PatientRecord::into_inputs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientRecord {
    pub id: Option<String>,
    pub suv_max: Option<f64>,
    pub years_since_diagnosis: Option<f64>,
    pub opioid_use: Option<FlagValue>,
    pub ast: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub lymphocyte_count: Option<f64>,
    pub psma_positive_lymph_nodes: Option<FlagValue>,
    pub ldh_high: Option<FlagValue>,
    /// LDH in U/L; used when `ldh_high` is absent.
    pub ldh: Option<f64>,
    pub alp_high: Option<FlagValue>,
    /// ALP in U/L; used when `alp_high` is absent.
    pub alp: Option<f64>,
    pub neutrophil_high: Option<FlagValue>,
    /// Neutrophils in 10^9/L; used when `neutrophil_high` is absent.
    pub neutrophils: Option<f64>,
    pub liver_metastases: Option<FlagValue>,
}

impl PatientRecord {
    pub fn into_inputs(
        &self,
        thresholds: &LabThresholds,
        location: &str,
    ) -> Result<ClinicalInputs, InputError> {
        let mut issues = Vec::new();

        let suv_max = numeric(Variable::SuvMax, self.suv_max, &mut issues);
        let years_since_diagnosis = numeric(
            Variable::YearsSinceDiagnosis,
            self.years_since_diagnosis,
            &mut issues,
        );
        let ast = numeric(Variable::Ast, self.ast, &mut issues);
        let hemoglobin = numeric(Variable::Hemoglobin, self.hemoglobin, &mut issues);
        let lymphocyte_count =
            numeric(Variable::LymphocyteCount, self.lymphocyte_count, &mut issues);

        let opioid_use = flag("opioid_use", self.opioid_use.as_ref(), &mut issues);
        let psma_positive_lymph_nodes = flag(
            "psma_positive_lymph_nodes",
            self.psma_positive_lymph_nodes.as_ref(),
            &mut issues,
        );
        let liver_metastases = flag(
            "liver_metastases",
            self.liver_metastases.as_ref(),
            &mut issues,
        );
        let ldh_high = lab_flag(
            ("ldh_high", self.ldh_high.as_ref()),
            ("ldh", self.ldh),
            |v| thresholds.ldh_high(v),
            location,
            &mut issues,
        );
        let alp_high = lab_flag(
            ("alp_high", self.alp_high.as_ref()),
            ("alp", self.alp),
            |v| thresholds.alp_high(v),
            location,
            &mut issues,
        );
        let neutrophil_high = lab_flag(
            ("neutrophil_high", self.neutrophil_high.as_ref()),
            ("neutrophils", self.neutrophils),
            |v| thresholds.neutrophil_high(v),
            location,
            &mut issues,
        );

        if !issues.is_empty() {
            return Err(InputError::Invalid {
                location: location.to_string(),
                issues,
            });
        }

        Ok(ClinicalInputs {
            suv_max: suv_max.unwrap_or_default(),
            years_since_diagnosis: years_since_diagnosis.unwrap_or_default(),
            opioid_use: opioid_use.unwrap_or_default(),
            ast: ast.unwrap_or_default(),
            hemoglobin: hemoglobin.unwrap_or_default(),
            lymphocyte_count: lymphocyte_count.unwrap_or_default(),
            psma_positive_lymph_nodes: psma_positive_lymph_nodes.unwrap_or_default(),
            ldh_high: ldh_high.unwrap_or_default(),
            alp_high: alp_high.unwrap_or_default(),
            neutrophil_high: neutrophil_high.unwrap_or_default(),
            liver_metastases: liver_metastases.unwrap_or_default(),
        })
    }
}

fn numeric(variable: Variable, value: Option<f64>, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let field = variable.name();
    let Some(value) = value else {
        issues.push(FieldIssue::Missing { field });
        return None;
    };
    let domain = field_domain(variable);
    if !domain.contains(value) {
        issues.push(FieldIssue::OutOfRange {
            field,
            value,
            min: domain.min,
            max: domain.max,
        });
        return None;
    }
    Some(value)
}

fn flag(
    field: &'static str,
    value: Option<&FlagValue>,
    issues: &mut Vec<FieldIssue>,
) -> Option<bool> {
    let Some(value) = value else {
        issues.push(FieldIssue::Missing { field });
        return None;
    };
    match value.to_bool() {
        Some(b) => Some(b),
        None => {
            issues.push(FieldIssue::InvalidFlag {
                field,
                token: flag_token(value),
            });
            None
        }
    }
}

fn flag_token(value: &FlagValue) -> String {
    match value {
        FlagValue::Bool(b) => b.to_string(),
        FlagValue::Int(i) => i.to_string(),
        FlagValue::Text(s) => s.clone(),
    }
}

/// Explicit flag wins; otherwise the raw measurement is thresholded.
fn lab_flag(
    (flag_field, flag_value): (&'static str, Option<&FlagValue>),
    (raw_field, raw_value): (&'static str, Option<f64>),
    is_high: impl Fn(f64) -> bool,
    location: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<bool> {
    if let Some(raw) = raw_value {
        if !raw.is_finite() || raw < 0.0 {
            issues.push(FieldIssue::InvalidValue {
                field: raw_field,
                reason: format!("{raw} is not a non-negative measurement"),
            });
            return None;
        }
    }
    match (flag_value, raw_value) {
        (Some(value), raw) => {
            let explicit = flag(flag_field, Some(value), issues)?;
            if let Some(raw) = raw {
                if is_high(raw) != explicit {
                    warn!(
                        patient = location,
                        flag = flag_field,
                        measurement = raw,
                        "explicit flag disagrees with measurement; using flag"
                    );
                }
            }
            Some(explicit)
        }
        (None, Some(raw)) => {
            let derived = is_high(raw);
            info!(
                patient = location,
                flag = flag_field,
                measurement = raw,
                derived,
                "lab flag derived from measurement"
            );
            Some(derived)
        }
        (None, None) => {
            issues.push(FieldIssue::Missing { field: flag_field });
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/record.rs"]
mod tests;
