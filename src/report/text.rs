use crate::model::axes::{Axis, axis_order};
use crate::model::outcomes::outcome_order;
use crate::nomogram::Nomogram;
use crate::pipeline::Evaluation;
use crate::report::format_f64_6;

pub fn render_report_text(patient_id: &str, eval: &Evaluation, nomogram: &Nomogram) -> String {
    let mut out = String::new();

    out.push_str("177Lu-PSMA-617 Outcome Nomogram Report\n");
    out.push_str("======================================\n\n");
    out.push_str(&format!("Patient: {}\n", patient_id));
    out.push_str(&format!(
        "Nomogram: {} ({})\n\n",
        nomogram.id, nomogram.version
    ));

    out.push_str("1. Pre-treatment variables\n");
    let i = &eval.inputs;
    out.push_str(&format!("SUVmax: {}\n", format_f64_6(i.suv_max)));
    out.push_str(&format!(
        "Years since diagnosis: {}\n",
        format_f64_6(i.years_since_diagnosis)
    ));
    out.push_str(&format!("AST (U/L): {}\n", format_f64_6(i.ast)));
    out.push_str(&format!("Hemoglobin (g/L): {}\n", format_f64_6(i.hemoglobin)));
    out.push_str(&format!(
        "Lymphocytes (x10^9/L): {}\n",
        format_f64_6(i.lymphocyte_count)
    ));
    out.push_str(&format!("Opioid use: {}\n", yes_no(i.opioid_use)));
    out.push_str(&format!(
        "PSMA+ lymph nodes: {}\n",
        yes_no(i.psma_positive_lymph_nodes)
    ));
    out.push_str(&format!("LDH >= 280 U/L: {}\n", yes_no(i.ldh_high)));
    out.push_str(&format!("ALP >= 140 U/L: {}\n", yes_no(i.alp_high)));
    out.push_str(&format!(
        "Neutrophils >= 7 x10^9/L: {}\n",
        yes_no(i.neutrophil_high)
    ));
    out.push_str(&format!("Liver metastases: {}\n\n", yes_no(i.liver_metastases)));

    out.push_str("2. Nomogram points\n");
    for &axis in axis_order() {
        out.push_str(&format!(
            "{} points ({}): {}\n",
            axis_short(axis),
            axis.label(),
            format_f64_6(eval.points.get(axis))
        ));
        let top = eval.top_contributors(axis);
        if !top.is_empty() {
            let parts = top
                .iter()
                .map(|c| format!("{}={}", c.term, format_f64_6(c.points)))
                .collect::<Vec<_>>();
            out.push_str(&format!("  contributors: {}\n", parts.join(", ")));
        }
    }
    out.push('\n');

    out.push_str("3. Outcome estimates\n");
    for &outcome in outcome_order() {
        out.push_str(&format!(
            "{}: {}%\n",
            outcome.label(),
            format_percent(eval.probabilities.get(outcome))
        ));
    }
    out.push('\n');

    out.push_str("4. Caveats\n");
    let mut any_note = false;
    for (outcome, interp) in eval.interpolations.iter() {
        if interp.clamped {
            any_note = true;
            out.push_str(&format!(
                "{}: {} points outside the published curve; reported at the {} boundary ({} points).\n",
                outcome.label(),
                format_f64_6(interp.points),
                boundary_side(interp.points, interp.clamped_points),
                format_f64_6(interp.clamped_points)
            ));
        }
    }
    if !any_note {
        out.push_str("All totals fall within the published curves.\n");
    }
    out.push_str(
        "Estimates are population-level nomogram readings and do not replace clinical judgement.\n",
    );

    out
}

fn yes_no(v: bool) -> &'static str {
    if v { "Yes" } else { "No" }
}

fn format_percent(v: f64) -> String {
    format!("{:.1}", v)
}

fn axis_short(axis: Axis) -> &'static str {
    match axis {
        Axis::Os => "OS",
        Axis::Rpfs => "rPFS",
        Axis::Psa50 => "PSA50",
    }
}

fn boundary_side(points: f64, clamped_points: f64) -> &'static str {
    if points < clamped_points {
        "lower"
    } else {
        "upper"
    }
}
