use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Os,
    Rpfs,
    Psa50,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Os => "os",
            Axis::Rpfs => "rpfs",
            Axis::Psa50 => "psa50",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Os => "Overall survival",
            Axis::Rpfs => "Radiographic progression-free survival",
            Axis::Psa50 => "PSA50 response",
        }
    }
}

pub fn axis_order() -> &'static [Axis] {
    &[Axis::Os, Axis::Rpfs, Axis::Psa50]
}

/// Continuous pre-treatment measurements scored by linear-range transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    SuvMax,
    YearsSinceDiagnosis,
    Ast,
    Hemoglobin,
    LymphocyteCount,
}

impl Variable {
    pub fn name(self) -> &'static str {
        match self {
            Variable::SuvMax => "suv_max",
            Variable::YearsSinceDiagnosis => "years_since_diagnosis",
            Variable::Ast => "ast",
            Variable::Hemoglobin => "hemoglobin",
            Variable::LymphocyteCount => "lymphocyte_count",
        }
    }
}
