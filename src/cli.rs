use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::input::record::parse_flag;
use crate::input::{FlagValue, InputError, PatientRecord};
use crate::nomogram::{Nomogram, NomogramError, builtin, load_nomogram};
use crate::report::ReportError;

#[derive(Debug, Parser)]
#[command(
    name = "kira-lupsma",
    version,
    about = "Outcome nomogram for 177Lu-PSMA-617 therapy (OS, rPFS, PSA50)"
)]
pub struct Cli {
    #[arg(long, global = true, default_value_t = false, help = "Debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one patient
    Run(RunArgs),
    /// Score every row of a patient TSV
    Batch(BatchArgs),
    /// Check a patient file and/or nomogram file without scoring
    Validate(ValidateArgs),
    /// Inspect the active nomogram
    Nomogram(NomogramArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Patient JSON; individual flags override its fields")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Patient identifier used in reports")]
    pub id: Option<String>,

    #[command(flatten)]
    pub patient: PatientArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Write summary.json and report.txt into this directory")]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Nomogram JSON replacing the built-in tables")]
    pub nomogram: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PatientArgs {
    #[arg(long = "suvmax", help = "SUVmax [0, 350]")]
    pub suv_max: Option<f64>,

    #[arg(long, help = "Years since diagnosis [0, 26]")]
    pub years_since_diagnosis: Option<f64>,

    #[arg(long, value_parser = parse_yes_no)]
    pub opioid_use: Option<bool>,

    #[arg(long, help = "AST in U/L [0, 90]")]
    pub ast: Option<f64>,

    #[arg(long, help = "Hemoglobin in g/L [70, 160]")]
    pub hemoglobin: Option<f64>,

    #[arg(long = "lymphocytes", help = "Lymphocyte count in 10^9/L [0, 3.5]")]
    pub lymphocyte_count: Option<f64>,

    #[arg(long = "psma-lymph-nodes", value_parser = parse_yes_no)]
    pub psma_positive_lymph_nodes: Option<bool>,

    #[arg(long, value_parser = parse_yes_no)]
    pub ldh_high: Option<bool>,

    #[arg(long, help = "LDH in U/L (high at >= 280)")]
    pub ldh: Option<f64>,

    #[arg(long, value_parser = parse_yes_no)]
    pub alp_high: Option<bool>,

    #[arg(long, help = "ALP in U/L (high at >= 140)")]
    pub alp: Option<f64>,

    #[arg(long, value_parser = parse_yes_no)]
    pub neutrophil_high: Option<bool>,

    #[arg(long, help = "Neutrophils in 10^9/L (high at >= 7)")]
    pub neutrophils: Option<f64>,

    #[arg(long, value_parser = parse_yes_no)]
    pub liver_metastases: Option<bool>,
}

impl PatientArgs {
    /// Overlays every flag given on the command line onto `record`.
    pub fn apply(&self, record: &mut PatientRecord) {
        fn set<T: Copy>(dst: &mut Option<T>, src: Option<T>) {
            if src.is_some() {
                *dst = src;
            }
        }
        fn set_flag(dst: &mut Option<FlagValue>, src: Option<bool>) {
            if let Some(b) = src {
                *dst = Some(FlagValue::Bool(b));
            }
        }

        set(&mut record.suv_max, self.suv_max);
        set(&mut record.years_since_diagnosis, self.years_since_diagnosis);
        set(&mut record.ast, self.ast);
        set(&mut record.hemoglobin, self.hemoglobin);
        set(&mut record.lymphocyte_count, self.lymphocyte_count);
        set(&mut record.ldh, self.ldh);
        set(&mut record.alp, self.alp);
        set(&mut record.neutrophils, self.neutrophils);
        set_flag(&mut record.opioid_use, self.opioid_use);
        set_flag(
            &mut record.psma_positive_lymph_nodes,
            self.psma_positive_lymph_nodes,
        );
        set_flag(&mut record.ldh_high, self.ldh_high);
        set_flag(&mut record.alp_high, self.alp_high);
        set_flag(&mut record.neutrophil_high, self.neutrophil_high);
        set_flag(&mut record.liver_metastases, self.liver_metastases);
    }
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(long, help = "Patient TSV (.tsv or .tsv.gz) with a header row")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Nomogram JSON replacing the built-in tables")]
    pub nomogram: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(
        long,
        required_unless_present = "nomogram",
        help = "Patient JSON or TSV"
    )]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Nomogram JSON")]
    pub nomogram: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct NomogramArgs {
    #[command(subcommand)]
    pub command: NomogramCommand,
}

#[derive(Debug, Subcommand)]
pub enum NomogramCommand {
    /// Print the active nomogram as JSON
    Show(NomogramShowArgs),
}

#[derive(Debug, Args)]
pub struct NomogramShowArgs {
    #[arg(long, help = "Show this nomogram file instead of the built-in one")]
    pub nomogram: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Nomogram(#[from] NomogramError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} record(s) failed validation")]
    ValidationFailed(usize),
}

pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    parse_flag(s).ok_or_else(|| format!("expected yes/no, got {s:?}"))
}

/// A loaded override, or the shared built-in nomogram.
pub enum ActiveNomogram {
    Builtin(&'static Nomogram),
    Loaded(Box<Nomogram>),
}

impl ActiveNomogram {
    pub fn get(&self) -> &Nomogram {
        match self {
            ActiveNomogram::Builtin(n) => n,
            ActiveNomogram::Loaded(n) => n,
        }
    }
}

pub fn resolve_nomogram(path: Option<&Path>) -> Result<ActiveNomogram, NomogramError> {
    match path {
        Some(path) => Ok(ActiveNomogram::Loaded(Box::new(load_nomogram(path)?))),
        None => Ok(ActiveNomogram::Builtin(builtin())),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
