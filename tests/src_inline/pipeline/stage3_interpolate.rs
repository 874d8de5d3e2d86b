use super::*;
use crate::nomogram::builtin;

#[test]
fn test_exact_anchor_returns_stored_probability() {
    let table = &builtin().curves.os_12mo;
    let out = interpolate(table, 181.0);
    assert_eq!(out.probability, 0.7);
    assert!(!out.clamped);
    assert!((out.probability * 100.0 - 70.0).abs() < 1e-9);
}

#[test]
fn test_every_anchor_round_trips_exactly() {
    let curves = &builtin().curves;
    for &outcome in outcome_order() {
        let table = curves.table(outcome);
        for anchor in &table.anchors {
            let out = interpolate(table, anchor.points);
            assert_eq!(
                out.probability.to_bits(),
                anchor.probability.to_bits(),
                "{} at {}",
                outcome.name(),
                anchor.points
            );
        }
    }
}

#[test]
fn test_midpoint_interpolation() {
    let table = &builtin().curves.os_12mo;
    let out = interpolate(table, 157.0);
    assert!((out.probability - 0.85).abs() < 1e-12);

    let table = &builtin().curves.rpfs_24mo;
    let out = interpolate(table, 142.0);
    assert!((out.probability - 0.3).abs() < 1e-12);
}

#[test]
fn test_clamp_low_and_high() {
    let table = &builtin().curves.os_12mo;
    let low = interpolate(table, -40.0);
    assert!(low.clamped);
    assert_eq!(low.clamped_points, 146.0);
    assert_eq!(low.probability, 0.9);

    let high = interpolate(table, 1_000.0);
    assert!(high.clamped);
    assert_eq!(high.clamped_points, 232.0);
    assert_eq!(high.probability, 0.1);
    assert_eq!(high.points, 1_000.0);
}

#[test]
fn test_clamp_uses_each_tables_own_domain() {
    let curves = &builtin().curves;
    let os12 = interpolate(&curves.os_12mo, 120.0);
    let os24 = interpolate(&curves.os_24mo, 120.0);
    assert!(os12.clamped);
    assert_eq!(os12.probability, 0.9);
    assert!(!os24.clamped);
    assert!((os24.probability - (0.9 + (120.0 - 109.0) / 21.0 * (0.8 - 0.9))).abs() < 1e-12);
}

#[test]
fn test_os12_is_monotonic_non_increasing() {
    let table = &builtin().curves.os_12mo;
    let mut prev = f64::INFINITY;
    let mut p = 100.0;
    while p <= 260.0 {
        let prob = interpolate(table, p).probability;
        assert!(prob <= prev, "increase at {p}");
        prev = prob;
        p += 0.25;
    }
}

#[test]
fn test_psa50_curve_ascends() {
    let table = &builtin().curves.psa50;
    assert_eq!(interpolate(table, 0.0).probability, 0.2);
    assert_eq!(interpolate(table, 200.0).probability, 0.9);
    let a = interpolate(table, 20.0).probability;
    let b = interpolate(table, 40.0).probability;
    assert!(b > a);
}

#[test]
fn test_empty_table_yields_zero() {
    let table = AnchorTable { anchors: vec![] };
    let out = interpolate(&table, 50.0);
    assert_eq!(out.probability, 0.0);
    assert!(!out.clamped);
}

#[test]
fn test_run_stage3_covers_all_outcomes() {
    let points = AxisPoints {
        os: 181.0,
        rpfs: 163.0,
        psa50: 42.0,
    };
    let out = run_stage3(&points, &builtin().curves);
    let order: Vec<Outcome> = out.iter().map(|(o, _)| o).collect();
    assert_eq!(order, outcome_order());
    assert_eq!(out.get(Outcome::Os12).probability, 0.7);
    assert_eq!(out.get(Outcome::Pfs12).probability, 0.5);
    assert_eq!(out.get(Outcome::Psa50).probability, 0.8);
    assert!(out.get(Outcome::Pfs24).clamped);
    assert_eq!(out.get(Outcome::Pfs24).probability, 0.1);
}
