use serde::{Deserialize, Serialize};

use crate::model::axes::Axis;

/// Total nomogram points per outcome axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPoints {
    pub os: f64,
    pub rpfs: f64,
    pub psa50: f64,
}

impl AxisPoints {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Os => self.os,
            Axis::Rpfs => self.rpfs,
            Axis::Psa50 => self.psa50,
        }
    }
}

/// Outcome estimates as percentages in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub os12: f64,
    pub os24: f64,
    pub pfs12: f64,
    pub pfs24: f64,
    pub psa50: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Os12,
    Os24,
    Pfs12,
    Pfs24,
    Psa50,
}

impl Outcome {
    pub fn name(self) -> &'static str {
        match self {
            Outcome::Os12 => "os12",
            Outcome::Os24 => "os24",
            Outcome::Pfs12 => "pfs12",
            Outcome::Pfs24 => "pfs24",
            Outcome::Psa50 => "psa50",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Os12 => "12-month overall survival",
            Outcome::Os24 => "24-month overall survival",
            Outcome::Pfs12 => "12-month rPFS",
            Outcome::Pfs24 => "24-month rPFS",
            Outcome::Psa50 => "PSA50 response",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Outcome::Os12 | Outcome::Os24 => Axis::Os,
            Outcome::Pfs12 | Outcome::Pfs24 => Axis::Rpfs,
            Outcome::Psa50 => Axis::Psa50,
        }
    }
}

pub fn outcome_order() -> &'static [Outcome] {
    &[
        Outcome::Os12,
        Outcome::Os24,
        Outcome::Pfs12,
        Outcome::Pfs24,
        Outcome::Psa50,
    ]
}

impl OutcomeProbabilities {
    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Os12 => self.os12,
            Outcome::Os24 => self.os24,
            Outcome::Pfs12 => self.pfs12,
            Outcome::Pfs24 => self.pfs24,
            Outcome::Psa50 => self.psa50,
        }
    }
}
