pub mod stage1_transform;
pub mod stage2_aggregate;
pub mod stage3_interpolate;
pub mod stage4_outcome;

use serde::Serialize;
use tracing::debug;

use crate::model::axes::{Axis, axis_order};
use crate::model::inputs::ClinicalInputs;
use crate::model::outcomes::{AxisPoints, OutcomeProbabilities};
use crate::nomogram::Nomogram;
use stage1_transform::{Contribution, PointContributions, run_stage1};
use stage2_aggregate::run_stage2;
use stage3_interpolate::{Stage3Output, run_stage3};
use stage4_outcome::run_stage4;

const TOP_CONTRIBUTORS: usize = 5;

/// Result of one pass through the engine. Carries the intermediate values
/// next to the final percentages so reports can explain them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub inputs: ClinicalInputs,
    pub contributions: PointContributions,
    pub points: AxisPoints,
    pub interpolations: Stage3Output,
    pub probabilities: OutcomeProbabilities,
}

impl Evaluation {
    pub fn top_contributors(&self, axis: Axis) -> Vec<Contribution> {
        top_contributors(self.contributions.get(axis))
    }

    pub fn any_clamped(&self) -> bool {
        self.interpolations.iter().any(|(_, i)| i.clamped)
    }
}

pub fn evaluate(inputs: &ClinicalInputs, nomogram: &Nomogram) -> Evaluation {
    let contributions = run_stage1(inputs, nomogram);
    let points = run_stage2(&contributions);
    for &axis in axis_order() {
        debug!(axis = axis.name(), points = points.get(axis), "axis points");
    }
    let interpolations = run_stage3(&points, &nomogram.curves);
    let probabilities = run_stage4(&interpolations);

    Evaluation {
        inputs: *inputs,
        contributions,
        points,
        interpolations,
        probabilities,
    }
}

/// Largest absolute contributions first; ties by term name; zero terms dropped.
pub fn top_contributors(items: &[Contribution]) -> Vec<Contribution> {
    let mut v: Vec<Contribution> = items.iter().copied().filter(|c| c.points != 0.0).collect();

    v.sort_by(|a, b| {
        let am = a.points.abs();
        let bm = b.points.abs();
        match bm.partial_cmp(&am).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.term.cmp(b.term),
            other => other,
        }
    });

    if v.len() > TOP_CONTRIBUTORS {
        v.truncate(TOP_CONTRIBUTORS);
    }
    v
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/evaluate.rs"]
mod tests;
