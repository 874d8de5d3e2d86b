use std::sync::OnceLock;

use crate::model::axes::Variable;
use crate::model::flags::ClinicalFlag;
use crate::nomogram::{AnchorTable, AxisModel, Nomogram, OutcomeCurves, Term};

pub const BUILTIN_ID: &str = "vision_lupsma";
pub const BUILTIN_VERSION: &str = "v1";

const fn continuous(variable: Variable, domain: [f64; 2], range: [f64; 2]) -> Term {
    Term::Continuous {
        variable,
        domain,
        range,
    }
}

const fn flag(flag: ClinicalFlag, points_if_yes: f64, points_if_no: f64) -> Term {
    Term::Flag {
        flag,
        points_if_yes,
        points_if_no,
    }
}

// Higher SUVmax and longer time since diagnosis carry fewer OS/rPFS points,
// hence the descending domains.
const OS_TERMS: &[Term] = &[
    continuous(Variable::SuvMax, [350.0, 0.0], [0.0, 100.0]),
    continuous(Variable::YearsSinceDiagnosis, [26.0, 0.0], [0.0, 28.5]),
    flag(ClinicalFlag::OpioidUse, 12.5, 0.0),
    continuous(Variable::Ast, [0.0, 90.0], [0.0, 5.0]),
    continuous(Variable::Hemoglobin, [160.0, 70.0], [0.0, 46.0]),
    continuous(Variable::LymphocyteCount, [3.5, 0.0], [0.0, 37.5]),
    flag(ClinicalFlag::PsmaPositiveLymphNodes, 11.0, 0.0),
    flag(ClinicalFlag::LdhHigh, 18.0, 0.0),
    flag(ClinicalFlag::AlpHigh, 17.2, 0.0),
    flag(ClinicalFlag::NeutrophilHigh, 15.5, 0.0),
];

const RPFS_TERMS: &[Term] = &[
    continuous(Variable::SuvMax, [350.0, 0.0], [0.0, 100.0]),
    continuous(Variable::YearsSinceDiagnosis, [26.0, 0.0], [0.0, 24.2]),
    flag(ClinicalFlag::OpioidUse, 11.2, 0.0),
    continuous(Variable::LymphocyteCount, [3.5, 0.0], [0.0, 32.4]),
    flag(ClinicalFlag::LiverMetastases, 20.4, 0.0),
    flag(ClinicalFlag::LdhHigh, 12.4, 0.0),
    flag(ClinicalFlag::AlpHigh, 13.8, 0.0),
];

const PSA50_TERMS: &[Term] = &[
    continuous(Variable::SuvMax, [0.0, 350.0], [0.0, 100.0]),
    continuous(Variable::LymphocyteCount, [0.0, 3.5], [0.0, 20.0]),
    flag(ClinicalFlag::AlpHigh, 0.0, 10.0),
];

const OS_12MO_POINTS: &[f64] = &[146.0, 168.0, 181.0, 191.0, 200.0, 224.0, 232.0];
const OS_12MO_PROB: &[f64] = &[0.9, 0.8, 0.7, 0.6, 0.5, 0.2, 0.1];

const OS_24MO_POINTS: &[f64] = &[109.0, 130.0, 144.0, 154.0, 187.0, 196.0];
const OS_24MO_PROB: &[f64] = &[0.9, 0.8, 0.7, 0.6, 0.2, 0.1];

const RPFS_12MO_POINTS: &[f64] = &[
    109.0, 132.0, 144.0, 154.0, 163.0, 170.0, 178.0, 186.0, 196.0,
];
const RPFS_12MO_PROB: &[f64] = &[0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

const RPFS_24MO_POINTS: &[f64] = &[72.0, 93.0, 107.0, 116.0, 125.0, 159.0];
const RPFS_24MO_PROB: &[f64] = &[0.9, 0.8, 0.7, 0.6, 0.5, 0.1];

// Ascending: more points means a better chance of response.
const PSA50_POINTS: &[f64] = &[10.3, 16.2, 36.0, 42.0, 51.8];
const PSA50_PROB: &[f64] = &[0.2, 0.3, 0.7, 0.8, 0.9];

/// Published nomogram, built on first use and shared for the process lifetime.
pub fn builtin() -> &'static Nomogram {
    static BUILTIN: OnceLock<Nomogram> = OnceLock::new();
    BUILTIN.get_or_init(build_v1)
}

fn build_v1() -> Nomogram {
    Nomogram {
        id: BUILTIN_ID.to_string(),
        version: BUILTIN_VERSION.to_string(),
        os: AxisModel {
            terms: OS_TERMS.to_vec(),
        },
        rpfs: AxisModel {
            terms: RPFS_TERMS.to_vec(),
        },
        psa50: AxisModel {
            terms: PSA50_TERMS.to_vec(),
        },
        curves: OutcomeCurves {
            os_12mo: AnchorTable::from_pairs(OS_12MO_POINTS, OS_12MO_PROB),
            os_24mo: AnchorTable::from_pairs(OS_24MO_POINTS, OS_24MO_PROB),
            rpfs_12mo: AnchorTable::from_pairs(RPFS_12MO_POINTS, RPFS_12MO_PROB),
            rpfs_24mo: AnchorTable::from_pairs(RPFS_24MO_POINTS, RPFS_24MO_PROB),
            psa50: AnchorTable::from_pairs(PSA50_POINTS, PSA50_PROB),
        },
    }
}
