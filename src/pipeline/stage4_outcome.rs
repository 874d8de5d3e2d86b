use crate::model::outcomes::{Outcome, OutcomeProbabilities};
use crate::pipeline::stage3_interpolate::Stage3Output;

pub fn to_percent(probability: f64) -> f64 {
    probability * 100.0
}

pub fn run_stage4(stage3: &Stage3Output) -> OutcomeProbabilities {
    let pct = |outcome: Outcome| to_percent(stage3.get(outcome).probability);
    OutcomeProbabilities {
        os12: pct(Outcome::Os12),
        os24: pct(Outcome::Os24),
        pfs12: pct(Outcome::Pfs12),
        pfs24: pct(Outcome::Pfs24),
        psa50: pct(Outcome::Psa50),
    }
}
