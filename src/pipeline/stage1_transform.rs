use serde::Serialize;

use crate::model::axes::Axis;
use crate::model::inputs::ClinicalInputs;
use crate::nomogram::{AxisModel, Nomogram, Term};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub term: &'static str,
    pub points: f64,
}

/// Per-axis point contributions, in the order the nomogram lists its terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointContributions {
    pub os: Vec<Contribution>,
    pub rpfs: Vec<Contribution>,
    pub psa50: Vec<Contribution>,
}

impl PointContributions {
    pub fn get(&self, axis: Axis) -> &[Contribution] {
        match axis {
            Axis::Os => &self.os,
            Axis::Rpfs => &self.rpfs,
            Axis::Psa50 => &self.psa50,
        }
    }
}

/// Maps `x` from `domain` onto `range`. No clamping: callers pass in-domain values.
pub fn linear_range(x: f64, domain: [f64; 2], range: [f64; 2]) -> f64 {
    range[0] + (x - domain[0]) / (domain[1] - domain[0]) * (range[1] - range[0])
}

pub fn flag_points(value: bool, points_if_yes: f64, points_if_no: f64) -> f64 {
    if value { points_if_yes } else { points_if_no }
}

pub fn term_points(term: &Term, inputs: &ClinicalInputs) -> f64 {
    match *term {
        Term::Continuous {
            variable,
            domain,
            range,
        } => linear_range(inputs.value(variable), domain, range),
        Term::Flag {
            flag,
            points_if_yes,
            points_if_no,
        } => flag_points(inputs.flag(flag), points_if_yes, points_if_no),
    }
}

pub fn run_stage1(inputs: &ClinicalInputs, nomogram: &Nomogram) -> PointContributions {
    PointContributions {
        os: axis_contributions(&nomogram.os, inputs),
        rpfs: axis_contributions(&nomogram.rpfs, inputs),
        psa50: axis_contributions(&nomogram.psa50, inputs),
    }
}

fn axis_contributions(model: &AxisModel, inputs: &ClinicalInputs) -> Vec<Contribution> {
    model
        .terms
        .iter()
        .map(|term| Contribution {
            term: term.name(),
            points: term_points(term, inputs),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_transform.rs"]
mod tests;
