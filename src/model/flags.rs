use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalFlag {
    OpioidUse,
    PsmaPositiveLymphNodes,
    LdhHigh,
    AlpHigh,
    NeutrophilHigh,
    LiverMetastases,
}

impl ClinicalFlag {
    pub fn name(self) -> &'static str {
        match self {
            ClinicalFlag::OpioidUse => "opioid_use",
            ClinicalFlag::PsmaPositiveLymphNodes => "psma_positive_lymph_nodes",
            ClinicalFlag::LdhHigh => "ldh_high",
            ClinicalFlag::AlpHigh => "alp_high",
            ClinicalFlag::NeutrophilHigh => "neutrophil_high",
            ClinicalFlag::LiverMetastases => "liver_metastases",
        }
    }
}

/// Cut-offs used when a lab flag is derived from the raw measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabThresholds {
    pub ldh_u_per_l: f64,
    pub alp_u_per_l: f64,
    pub neutrophils_1e9_per_l: f64,
}

impl LabThresholds {
    pub fn default_v1() -> Self {
        Self {
            ldh_u_per_l: 280.0,
            alp_u_per_l: 140.0,
            neutrophils_1e9_per_l: 7.0,
        }
    }

    pub fn ldh_high(&self, ldh: f64) -> bool {
        ldh >= self.ldh_u_per_l
    }

    pub fn alp_high(&self, alp: f64) -> bool {
        alp >= self.alp_u_per_l
    }

    pub fn neutrophil_high(&self, neutrophils: f64) -> bool {
        neutrophils >= self.neutrophils_1e9_per_l
    }
}
