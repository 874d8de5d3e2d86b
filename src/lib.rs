pub mod cli;
pub mod input;
pub mod logging;
pub mod model;
pub mod nomogram;
pub mod pipeline;
pub mod report;

pub use model::inputs::ClinicalInputs;
pub use model::outcomes::{AxisPoints, OutcomeProbabilities};
pub use nomogram::{Nomogram, builtin};
pub use pipeline::{Evaluation, evaluate};

/// Scores one patient and returns the five outcome percentages.
pub fn outcome_probabilities(inputs: &ClinicalInputs, nomogram: &Nomogram) -> OutcomeProbabilities {
    evaluate(inputs, nomogram).probabilities
}
