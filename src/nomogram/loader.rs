use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::input::source::open_maybe_gz;
use crate::model::axes::axis_order;
use crate::nomogram::{AnchorTable, AxisModel, Nomogram, Term};

#[derive(Debug, Error)]
pub enum NomogramError {
    #[error("failed to read nomogram {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse nomogram {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid anchor table {table}: {reason}")]
    InvalidTable { table: String, reason: String },
    #[error("invalid term {term} on axis {axis}: {reason}")]
    InvalidTerm {
        axis: String,
        term: String,
        reason: String,
    },
}

pub fn load_nomogram(path: &Path) -> Result<Nomogram, NomogramError> {
    let reader = open_maybe_gz(path).map_err(|source| NomogramError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let nomogram: Nomogram =
        serde_json::from_reader(reader).map_err(|source| NomogramError::Json {
            path: path.display().to_string(),
            source,
        })?;
    validate_nomogram(&nomogram)?;
    info!(
        id = %nomogram.id,
        version = %nomogram.version,
        path = %path.display(),
        "nomogram loaded"
    );
    Ok(nomogram)
}

pub fn validate_nomogram(nomogram: &Nomogram) -> Result<(), NomogramError> {
    for &axis in axis_order() {
        validate_axis(axis.name(), nomogram.axis(axis))?;
    }

    let curves = &nomogram.curves;
    validate_table("os_12mo", &curves.os_12mo)?;
    validate_table("os_24mo", &curves.os_24mo)?;
    validate_table("rpfs_12mo", &curves.rpfs_12mo)?;
    validate_table("rpfs_24mo", &curves.rpfs_24mo)?;
    validate_table("psa50", &curves.psa50)?;
    debug!(id = %nomogram.id, "nomogram validated");
    Ok(())
}

fn validate_axis(axis: &str, model: &AxisModel) -> Result<(), NomogramError> {
    if model.terms.is_empty() {
        return Err(NomogramError::InvalidTerm {
            axis: axis.to_string(),
            term: "-".to_string(),
            reason: "axis has no terms".to_string(),
        });
    }
    for term in &model.terms {
        let invalid = |reason: &str| NomogramError::InvalidTerm {
            axis: axis.to_string(),
            term: term.name().to_string(),
            reason: reason.to_string(),
        };
        match *term {
            Term::Continuous { domain, range, .. } => {
                if domain.iter().chain(range.iter()).any(|v| !v.is_finite()) {
                    return Err(invalid("non-finite domain or range"));
                }
                if domain[0] == domain[1] {
                    return Err(invalid("domain endpoints coincide"));
                }
            }
            Term::Flag {
                points_if_yes,
                points_if_no,
                ..
            } => {
                if !points_if_yes.is_finite() || !points_if_no.is_finite() {
                    return Err(invalid("non-finite flag points"));
                }
            }
        }
    }
    Ok(())
}

fn validate_table(name: &str, table: &AnchorTable) -> Result<(), NomogramError> {
    let invalid = |reason: String| NomogramError::InvalidTable {
        table: name.to_string(),
        reason,
    };
    if table.anchors.len() < 2 {
        return Err(invalid(format!(
            "need at least 2 anchors, got {}",
            table.anchors.len()
        )));
    }
    for (idx, anchor) in table.anchors.iter().enumerate() {
        if !anchor.points.is_finite() || !anchor.probability.is_finite() {
            return Err(invalid(format!("anchor {idx} is not finite")));
        }
        if !(0.0..=1.0).contains(&anchor.probability) {
            return Err(invalid(format!(
                "anchor {idx} probability {} outside [0, 1]",
                anchor.probability
            )));
        }
    }
    for (idx, w) in table.anchors.windows(2).enumerate() {
        if w[1].points <= w[0].points {
            return Err(invalid(format!(
                "anchor points must be strictly ascending ({} then {} at anchor {})",
                w[0].points,
                w[1].points,
                idx + 1
            )));
        }
    }
    Ok(())
}
