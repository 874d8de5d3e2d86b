use super::*;
use crate::model::outcomes::Outcome;
use crate::nomogram::builtin;

fn lr(x: f64, domain: [f64; 2], range: [f64; 2]) -> f64 {
    range[0] + (x - domain[0]) / (domain[1] - domain[0]) * (range[1] - range[0])
}

fn reference_interp(points: &[f64], probs: &[f64], x: f64) -> f64 {
    let x = x.max(points[0]).min(points[points.len() - 1]);
    for i in 0..points.len() - 1 {
        if x >= points[i] && x <= points[i + 1] {
            return probs[i] + (x - points[i]) / (points[i + 1] - points[i]) * (probs[i + 1] - probs[i]);
        }
    }
    probs[probs.len() - 1]
}

fn example_inputs() -> ClinicalInputs {
    ClinicalInputs {
        suv_max: 34.4,
        years_since_diagnosis: 7.4,
        opioid_use: false,
        ast: 24.0,
        hemoglobin: 117.0,
        lymphocyte_count: 1.025,
        psma_positive_lymph_nodes: false,
        ldh_high: false,
        alp_high: false,
        neutrophil_high: false,
        liver_metastases: false,
    }
}

#[test]
fn test_example_patient_os() {
    let eval = evaluate(&example_inputs(), builtin());

    let os_points = lr(34.4, [350.0, 0.0], [0.0, 100.0])
        + lr(7.4, [26.0, 0.0], [0.0, 28.5])
        + 0.0
        + lr(24.0, [0.0, 90.0], [0.0, 5.0])
        + lr(117.0, [160.0, 70.0], [0.0, 46.0])
        + lr(1.025, [3.5, 0.0], [0.0, 37.5])
        + 0.0
        + 0.0
        + 0.0
        + 0.0;
    assert!((eval.points.os - os_points).abs() < 1e-9);
    assert!((eval.points.os - 160.388858).abs() < 1e-6);

    let os12 = reference_interp(
        &[146.0, 168.0, 181.0, 191.0, 200.0, 224.0, 232.0],
        &[0.9, 0.8, 0.7, 0.6, 0.5, 0.2, 0.1],
        os_points,
    ) * 100.0;
    let os24 = reference_interp(
        &[109.0, 130.0, 144.0, 154.0, 187.0, 196.0],
        &[0.9, 0.8, 0.7, 0.6, 0.2, 0.1],
        os_points,
    ) * 100.0;
    assert!((eval.probabilities.os12 - os12).abs() < 1e-9);
    assert!((eval.probabilities.os24 - os24).abs() < 1e-9);
    assert!((eval.probabilities.os12 - 83.459610).abs() < 1e-5);
    assert!((eval.probabilities.os24 - 52.255929).abs() < 1e-5);
}

#[test]
fn test_example_patient_rpfs_and_psa50() {
    let eval = evaluate(&example_inputs(), builtin());

    let rpfs_points = lr(34.4, [350.0, 0.0], [0.0, 100.0])
        + lr(7.4, [26.0, 0.0], [0.0, 24.2])
        + lr(1.025, [3.5, 0.0], [0.0, 32.4]);
    let psa50_points = lr(34.4, [0.0, 350.0], [0.0, 100.0]) + lr(1.025, [0.0, 3.5], [0.0, 20.0]) + 10.0;
    assert!((eval.points.rpfs - rpfs_points).abs() < 1e-9);
    assert!((eval.points.psa50 - psa50_points).abs() < 1e-9);

    assert!((eval.probabilities.pfs12 - 80.697754).abs() < 1e-5);
    assert!((eval.probabilities.pfs24 - 43.652747).abs() < 1e-5);
    assert!((eval.probabilities.psa50 - 49.163059).abs() < 1e-5);
}

#[test]
fn test_worst_case_clamps_to_last_os_anchor() {
    let inputs = ClinicalInputs {
        suv_max: 0.0,
        years_since_diagnosis: 0.0,
        opioid_use: true,
        ast: 90.0,
        hemoglobin: 70.0,
        lymphocyte_count: 0.0,
        psma_positive_lymph_nodes: true,
        ldh_high: true,
        alp_high: true,
        neutrophil_high: true,
        liver_metastases: true,
    };
    let eval = evaluate(&inputs, builtin());
    assert!((eval.points.os - 291.2).abs() < 1e-9);

    let os12 = eval.interpolations.get(Outcome::Os12);
    assert!(os12.clamped);
    assert_eq!(os12.clamped_points, 232.0);
    assert_eq!(eval.probabilities.os12, 10.0);
    assert_eq!(eval.probabilities.os24, 10.0);
    assert_eq!(eval.probabilities.pfs12, 10.0);
    assert_eq!(eval.probabilities.pfs24, 10.0);
    assert!(eval.any_clamped());
}

#[test]
fn test_determinism_bits() {
    let inputs = example_inputs();
    let a = evaluate(&inputs, builtin());
    let b = evaluate(&inputs, builtin());
    assert_eq!(a.points.os.to_bits(), b.points.os.to_bits());
    assert_eq!(a.points.rpfs.to_bits(), b.points.rpfs.to_bits());
    assert_eq!(a.points.psa50.to_bits(), b.points.psa50.to_bits());
    assert_eq!(a.probabilities.os12.to_bits(), b.probabilities.os12.to_bits());
    assert_eq!(a.probabilities.psa50.to_bits(), b.probabilities.psa50.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_percentages_within_bounds() {
    let eval = evaluate(&example_inputs(), builtin());
    for (_, interp) in eval.interpolations.iter() {
        assert!((0.0..=1.0).contains(&interp.probability));
    }
    let p = eval.probabilities;
    for v in [p.os12, p.os24, p.pfs12, p.pfs24, p.psa50] {
        assert!((0.0..=100.0).contains(&v));
    }
}

#[test]
fn test_top_contributors_ordering() {
    let eval = evaluate(&example_inputs(), builtin());
    let top = eval.top_contributors(Axis::Os);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].term, "suv_max");
    for w in top.windows(2) {
        assert!(w[0].points.abs() >= w[1].points.abs());
    }
    assert!(top.iter().all(|c| c.points != 0.0));
}

#[test]
fn test_top_contributors_tie_breaks_by_name() {
    let items = vec![
        Contribution {
            term: "b",
            points: 5.0,
        },
        Contribution {
            term: "a",
            points: -5.0,
        },
        Contribution {
            term: "c",
            points: 0.0,
        },
    ];
    let top = top_contributors(&items);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].term, "a");
    assert_eq!(top[1].term, "b");
}
