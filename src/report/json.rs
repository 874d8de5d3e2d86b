use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::axes::axis_order;
use crate::model::inputs::ClinicalInputs;
use crate::model::outcomes::{AxisPoints, OutcomeProbabilities, outcome_order};
use crate::nomogram::Nomogram;
use crate::pipeline::Evaluation;
use crate::pipeline::stage1_transform::Contribution;
use crate::pipeline::stage3_interpolate::Interpolation;
use crate::report::{TOOL_NAME, bool_fraction, median, p10, p90};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NomogramMeta {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub tool: ToolMeta,
    pub nomogram: NomogramMeta,
    pub patient_id: String,
    pub inputs: ClinicalInputs,
    pub points: AxisPoints,
    pub outcomes: OutcomeProbabilities,
    pub interpolation: BTreeMap<&'static str, Interpolation>,
    pub contributors: BTreeMap<&'static str, Vec<Contribution>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub tool: ToolMeta,
    pub nomogram: NomogramMeta,
    pub n_patients: usize,
    pub points: BTreeMap<&'static str, Distribution>,
    pub outcomes: BTreeMap<&'static str, Distribution>,
    pub clamped_fraction: f64,
}

pub fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: TOOL_NAME,
        version: env!("CARGO_PKG_VERSION"),
    }
}

fn nomogram_meta(nomogram: &Nomogram) -> NomogramMeta {
    NomogramMeta {
        id: nomogram.id.clone(),
        version: nomogram.version.clone(),
    }
}

pub fn build_summary(patient_id: &str, eval: &Evaluation, nomogram: &Nomogram) -> PatientSummary {
    let interpolation = eval
        .interpolations
        .iter()
        .map(|(outcome, interp)| (outcome.name(), *interp))
        .collect();
    let contributors = axis_order()
        .iter()
        .map(|&axis| (axis.name(), eval.top_contributors(axis)))
        .collect();

    PatientSummary {
        tool: tool_meta(),
        nomogram: nomogram_meta(nomogram),
        patient_id: patient_id.to_string(),
        inputs: eval.inputs,
        points: eval.points,
        outcomes: eval.probabilities,
        interpolation,
        contributors,
    }
}

pub fn build_batch_summary(results: &[(String, Evaluation)], nomogram: &Nomogram) -> BatchSummary {
    let mut points = BTreeMap::new();
    for &axis in axis_order() {
        let values: Vec<f64> = results.iter().map(|(_, e)| e.points.get(axis)).collect();
        points.insert(axis.name(), distribution(&values));
    }

    let mut outcomes = BTreeMap::new();
    for &outcome in outcome_order() {
        let values: Vec<f64> = results
            .iter()
            .map(|(_, e)| e.probabilities.get(outcome))
            .collect();
        outcomes.insert(outcome.name(), distribution(&values));
    }

    let clamped: Vec<bool> = results.iter().map(|(_, e)| e.any_clamped()).collect();

    BatchSummary {
        tool: tool_meta(),
        nomogram: nomogram_meta(nomogram),
        n_patients: results.len(),
        points,
        outcomes,
        clamped_fraction: bool_fraction(&clamped),
    }
}

fn distribution(values: &[f64]) -> Distribution {
    Distribution {
        median: median(values),
        p10: p10(values),
        p90: p90(values),
    }
}
