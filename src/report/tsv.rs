use std::io::Write;

use crate::model::axes::axis_order;
use crate::model::outcomes::outcome_order;
use crate::pipeline::Evaluation;
use crate::report::format_f64_6;

pub fn outcomes_header() -> String {
    let mut cols = vec!["id".to_string()];
    for &axis in axis_order() {
        cols.push(format!("{}_points", axis.name()));
    }
    for &outcome in outcome_order() {
        cols.push(outcome.name().to_string());
    }
    cols.push("clamped".to_string());
    cols.join("\t")
}

/// One row per patient, in input order.
pub fn write_outcomes_tsv<W: Write>(
    w: &mut W,
    results: &[(String, Evaluation)],
) -> std::io::Result<()> {
    writeln!(w, "{}", outcomes_header())?;
    for (id, eval) in results {
        let mut row = vec![sanitize(id)];
        for &axis in axis_order() {
            row.push(format_f64_6(eval.points.get(axis)));
        }
        for &outcome in outcome_order() {
            row.push(format_f64_6(eval.probabilities.get(outcome)));
        }
        row.push(if eval.any_clamped() { "1" } else { "0" }.to_string());
        writeln!(w, "{}", row.join("\t"))?;
    }
    Ok(())
}

fn sanitize(id: &str) -> String {
    id.replace(['\t', '\n', '\r'], " ")
}
