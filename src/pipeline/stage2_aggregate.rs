use crate::model::outcomes::AxisPoints;
use crate::pipeline::stage1_transform::{Contribution, PointContributions};

pub fn run_stage2(contributions: &PointContributions) -> AxisPoints {
    AxisPoints {
        os: total_points(&contributions.os),
        rpfs: total_points(&contributions.rpfs),
        psa50: total_points(&contributions.psa50),
    }
}

/// Left-to-right sum in term order, so repeated evaluations are bit-identical.
pub fn total_points(contributions: &[Contribution]) -> f64 {
    contributions.iter().fold(0.0, |acc, c| acc + c.points)
}
