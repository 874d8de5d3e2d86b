pub mod defs;
pub mod loader;

use serde::{Deserialize, Serialize};

use crate::model::axes::{Axis, Variable};
use crate::model::flags::ClinicalFlag;
use crate::model::outcomes::Outcome;

pub use defs::builtin;
pub use loader::{NomogramError, load_nomogram, validate_nomogram};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub points: f64,
    pub probability: f64,
}

/// Piecewise-linear points-to-probability curve. Anchor points are strictly
/// ascending once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorTable {
    pub anchors: Vec<Anchor>,
}

impl AnchorTable {
    pub fn from_pairs(points: &[f64], probabilities: &[f64]) -> Self {
        let anchors = points
            .iter()
            .zip(probabilities)
            .map(|(&points, &probability)| Anchor {
                points,
                probability,
            })
            .collect();
        Self { anchors }
    }

    pub fn min_points(&self) -> f64 {
        self.anchors.first().map(|a| a.points).unwrap_or(0.0)
    }

    pub fn max_points(&self) -> f64 {
        self.anchors.last().map(|a| a.points).unwrap_or(0.0)
    }
}

/// One additive contribution to an axis score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    /// `range[0] + (x - domain[0]) / (domain[1] - domain[0]) * (range[1] - range[0])`.
    /// A descending domain is kept as written; it flips the direction.
    Continuous {
        variable: Variable,
        domain: [f64; 2],
        range: [f64; 2],
    },
    Flag {
        flag: ClinicalFlag,
        points_if_yes: f64,
        points_if_no: f64,
    },
}

impl Term {
    pub fn name(&self) -> &'static str {
        match self {
            Term::Continuous { variable, .. } => variable.name(),
            Term::Flag { flag, .. } => flag.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeCurves {
    pub os_12mo: AnchorTable,
    pub os_24mo: AnchorTable,
    pub rpfs_12mo: AnchorTable,
    pub rpfs_24mo: AnchorTable,
    pub psa50: AnchorTable,
}

impl OutcomeCurves {
    pub fn table(&self, outcome: Outcome) -> &AnchorTable {
        match outcome {
            Outcome::Os12 => &self.os_12mo,
            Outcome::Os24 => &self.os_24mo,
            Outcome::Pfs12 => &self.rpfs_12mo,
            Outcome::Pfs24 => &self.rpfs_24mo,
            Outcome::Psa50 => &self.psa50,
        }
    }
}

/// Complete scoring configuration: per-axis point terms plus the anchor
/// tables that turn total points into probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nomogram {
    pub id: String,
    pub version: String,
    pub os: AxisModel,
    pub rpfs: AxisModel,
    pub psa50: AxisModel,
    pub curves: OutcomeCurves,
}

impl Nomogram {
    pub fn axis(&self, axis: Axis) -> &AxisModel {
        match axis {
            Axis::Os => &self.os,
            Axis::Rpfs => &self.rpfs,
            Axis::Psa50 => &self.psa50,
        }
    }

    pub fn validate(&self) -> Result<(), NomogramError> {
        validate_nomogram(self)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/nomogram/tests.rs"]
mod tests;
