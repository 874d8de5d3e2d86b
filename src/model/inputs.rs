use serde::{Deserialize, Serialize};

use crate::model::axes::Variable;
use crate::model::flags::ClinicalFlag;

/// Pre-treatment measurements consumed by the scoring engine.
///
/// Every numeric field is expected to lie inside its [`FieldDomain`]; the
/// engine does not re-check. Construct through
/// [`crate::input::PatientRecord::into_inputs`] when values come from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInputs {
    pub suv_max: f64,
    pub years_since_diagnosis: f64,
    pub opioid_use: bool,
    pub ast: f64,
    pub hemoglobin: f64,
    pub lymphocyte_count: f64,
    pub psma_positive_lymph_nodes: bool,
    pub ldh_high: bool,
    pub alp_high: bool,
    pub neutrophil_high: bool,
    pub liver_metastases: bool,
}

impl ClinicalInputs {
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::SuvMax => self.suv_max,
            Variable::YearsSinceDiagnosis => self.years_since_diagnosis,
            Variable::Ast => self.ast,
            Variable::Hemoglobin => self.hemoglobin,
            Variable::LymphocyteCount => self.lymphocyte_count,
        }
    }

    pub fn flag(&self, flag: ClinicalFlag) -> bool {
        match flag {
            ClinicalFlag::OpioidUse => self.opioid_use,
            ClinicalFlag::PsmaPositiveLymphNodes => self.psma_positive_lymph_nodes,
            ClinicalFlag::LdhHigh => self.ldh_high,
            ClinicalFlag::AlpHigh => self.alp_high,
            ClinicalFlag::NeutrophilHigh => self.neutrophil_high,
            ClinicalFlag::LiverMetastases => self.liver_metastases,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub variable: Variable,
    pub min: f64,
    pub max: f64,
}

impl FieldDomain {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

const FIELD_DOMAINS: &[FieldDomain] = &[
    FieldDomain {
        variable: Variable::SuvMax,
        min: 0.0,
        max: 350.0,
    },
    FieldDomain {
        variable: Variable::YearsSinceDiagnosis,
        min: 0.0,
        max: 26.0,
    },
    FieldDomain {
        variable: Variable::Ast,
        min: 0.0,
        max: 90.0,
    },
    FieldDomain {
        variable: Variable::Hemoglobin,
        min: 70.0,
        max: 160.0,
    },
    FieldDomain {
        variable: Variable::LymphocyteCount,
        min: 0.0,
        max: 3.5,
    },
];

pub fn field_domain(variable: Variable) -> &'static FieldDomain {
    let idx = match variable {
        Variable::SuvMax => 0,
        Variable::YearsSinceDiagnosis => 1,
        Variable::Ast => 2,
        Variable::Hemoglobin => 3,
        Variable::LymphocyteCount => 4,
    };
    &FIELD_DOMAINS[idx]
}
