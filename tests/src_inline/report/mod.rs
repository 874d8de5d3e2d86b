use super::*;
use crate::model::inputs::ClinicalInputs;
use crate::nomogram::builtin;
use crate::pipeline::evaluate;

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

fn worst_inputs() -> ClinicalInputs {
    ClinicalInputs {
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
    }
}

#[test]
fn test_quantiles() {
    let v = vec![5.0, 1.0, 4.0, 2.0, 3.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p10(&v), 2.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(median(&[]), 0.0);
}

#[test]
fn test_bool_fraction() {
    assert_eq!(bool_fraction(&[true, false, false, true]), 0.5);
    assert_eq!(bool_fraction(&[]), 0.0);
}

#[test]
fn test_text_report_sections() {
    let eval = evaluate(&example_inputs(), builtin());
    let text = text::render_report_text("P-001", &eval, builtin());
    assert!(text.starts_with("177Lu-PSMA-617 Outcome Nomogram Report\n"));
    assert!(text.contains("Patient: P-001"));
    assert!(text.contains("Nomogram: vision_lupsma (v1)"));
    assert!(text.contains("1. Pre-treatment variables"));
    assert!(text.contains("2. Nomogram points"));
    assert!(text.contains("3. Outcome estimates"));
    assert!(text.contains("12-month overall survival: 83.5%"));
    assert!(text.contains("PSA50 response: 49.2%"));
    assert!(text.contains("contributors: suv_max="));
    assert!(text.contains("All totals fall within the published curves."));
}

#[test]
fn test_text_report_notes_clamping() {
    let eval = evaluate(&worst_inputs(), builtin());
    let text = text::render_report_text("worst", &eval, builtin());
    assert!(text.contains("12-month overall survival: 10.0%"));
    assert!(text.contains("reported at the upper boundary (232.000000 points)"));
    assert!(!text.contains("All totals fall within"));
}

#[test]
fn test_build_summary_fields() {
    let eval = evaluate(&example_inputs(), builtin());
    let summary = json::build_summary("P-001", &eval, builtin());
    let v = serde_json::to_value(&summary).unwrap();
    assert_eq!(v["tool"]["name"], "kira-lupsma");
    assert_eq!(v["nomogram"]["id"], "vision_lupsma");
    assert_eq!(v["patient_id"], "P-001");
    assert_eq!(v["inputs"]["hemoglobin"], 117.0);
    assert!(v["points"]["os"].as_f64().unwrap() > 160.0);
    assert!(v["outcomes"]["os12"].is_number());
    assert_eq!(v["interpolation"]["os12"]["clamped"], false);
    assert_eq!(v["contributors"]["os"][0]["term"], "suv_max");
}

#[test]
fn test_batch_summary_distribution() {
    let results = vec![
        ("a".to_string(), evaluate(&example_inputs(), builtin())),
        ("b".to_string(), evaluate(&worst_inputs(), builtin())),
    ];
    let summary = json::build_batch_summary(&results, builtin());
    assert_eq!(summary.n_patients, 2);
    assert_eq!(summary.clamped_fraction, 0.5);
    let os12 = &summary.outcomes["os12"];
    assert_eq!(os12.p10, results[0].1.probabilities.os12);
    assert_eq!(os12.p90, results[0].1.probabilities.os12);
    assert_eq!(os12.median, results[0].1.probabilities.os12);
}

#[test]
fn test_outcomes_tsv_rows() {
    let results = vec![
        ("P\t1".to_string(), evaluate(&example_inputs(), builtin())),
        ("P2".to_string(), evaluate(&worst_inputs(), builtin())),
    ];
    let mut buf = Vec::new();
    tsv::write_outcomes_tsv(&mut buf, &results).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id\tos_points\trpfs_points\tpsa50_points\tos12\tos24\tpfs12\tpfs24\tpsa50\tclamped"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("P 1\t"));
    assert!(lines[1].ends_with("\t0"));
    assert!(lines[2].starts_with("P2\t291.200000\t"));
    assert!(lines[2].ends_with("\t1"));
}

#[test]
fn test_write_reports_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("nested");
    let eval = evaluate(&example_inputs(), builtin());
    let written = write_reports("P-001", &eval, builtin(), &out).unwrap();
    assert_eq!(written.len(), 2);
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["patient_id"], "P-001");
    let report = std::fs::read_to_string(out.join("report.txt")).unwrap();
    assert!(report.contains("4. Caveats"));
}

#[test]
fn test_write_batch_reports_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let results = vec![("a".to_string(), evaluate(&example_inputs(), builtin()))];
    write_batch_reports(&results, builtin(), dir.path()).unwrap();
    let tsv = std::fs::read_to_string(dir.path().join("outcomes.tsv")).unwrap();
    assert_eq!(tsv.lines().count(), 2);
    let summary: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["n_patients"], 1);
}
