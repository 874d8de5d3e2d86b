use serde::Serialize;
use tracing::debug;

use crate::model::outcomes::{AxisPoints, Outcome, outcome_order};
use crate::nomogram::{AnchorTable, OutcomeCurves};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpolation {
    pub points: f64,
    pub clamped_points: f64,
    pub probability: f64,
    pub clamped: bool,
}

/// One interpolation per outcome curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stage3Output {
    pub os12: Interpolation,
    pub os24: Interpolation,
    pub pfs12: Interpolation,
    pub pfs24: Interpolation,
    pub psa50: Interpolation,
}

impl Stage3Output {
    pub fn get(&self, outcome: Outcome) -> &Interpolation {
        match outcome {
            Outcome::Os12 => &self.os12,
            Outcome::Os24 => &self.os24,
            Outcome::Pfs12 => &self.pfs12,
            Outcome::Pfs24 => &self.pfs24,
            Outcome::Psa50 => &self.psa50,
        }
    }

    /// Outcomes in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, &Interpolation)> {
        outcome_order().iter().map(|&o| (o, self.get(o)))
    }
}

/// Clamps `points` to the table's anchor range, then interpolates linearly
/// between the bracketing anchors. Points landing on an anchor return its
/// stored probability unchanged.
pub fn interpolate(table: &AnchorTable, points: f64) -> Interpolation {
    let anchors = &table.anchors;
    let Some(last) = anchors.last() else {
        return Interpolation {
            points,
            clamped_points: points,
            probability: 0.0,
            clamped: false,
        };
    };

    let (min, max) = (table.min_points(), table.max_points());
    let clamped_points = if points < min {
        min
    } else if points > max {
        max
    } else {
        points
    };
    let clamped = clamped_points != points;

    let mut probability = last.probability;
    if let Some(hit) = anchors.iter().find(|a| a.points == clamped_points) {
        probability = hit.probability;
    } else {
        for w in anchors.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            if clamped_points >= lo.points && clamped_points <= hi.points {
                let frac = (clamped_points - lo.points) / (hi.points - lo.points);
                probability = lo.probability + frac * (hi.probability - lo.probability);
                break;
            }
        }
    }

    Interpolation {
        points,
        clamped_points,
        probability,
        clamped,
    }
}

pub fn run_stage3(points: &AxisPoints, curves: &OutcomeCurves) -> Stage3Output {
    let run = |outcome: Outcome| {
        let interp = interpolate(curves.table(outcome), points.get(outcome.axis()));
        if interp.clamped {
            debug!(
                outcome = outcome.name(),
                points = interp.points,
                clamped_to = interp.clamped_points,
                "points outside anchor range; clamped"
            );
        }
        interp
    };
    Stage3Output {
        os12: run(Outcome::Os12),
        os24: run(Outcome::Os24),
        pfs12: run(Outcome::Pfs12),
        pfs24: run(Outcome::Pfs24),
        psa50: run(Outcome::Psa50),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_interpolate.rs"]
mod tests;
