use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing::info;

use kira_lupsma::cli::{
    BatchArgs, Cli, CliError, Commands, NomogramCommand, OutputFormat, RunArgs, ValidateArgs,
    resolve_nomogram,
};
use kira_lupsma::input::tsv::read_patient_tsv;
use kira_lupsma::input::{PatientRecord, is_json_path, load_patient_json, load_patients};
use kira_lupsma::model::flags::LabThresholds;
use kira_lupsma::nomogram::load_nomogram;
use kira_lupsma::pipeline::evaluate;
use kira_lupsma::report::json::build_summary;
use kira_lupsma::report::text::render_report_text;
use kira_lupsma::report::{write_batch_reports, write_reports};

fn main() {
    let cli = Cli::parse();
    kira_lupsma::logging::init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Run(args) => run_single(&args),
        Commands::Batch(args) => run_batch(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Nomogram(args) => match args.command {
            NomogramCommand::Show(show) => {
                let active = resolve_nomogram(show.nomogram.as_deref())?;
                let json = serde_json::to_string_pretty(active.get())?;
                writeln!(std::io::stdout(), "{json}")?;
                Ok(())
            }
        },
    }
}

fn run_single(args: &RunArgs) -> Result<(), CliError> {
    let active = resolve_nomogram(args.nomogram.as_deref())?;
    let nomogram = active.get();
    info!(id = %nomogram.id, version = %nomogram.version, "scoring patient");

    let mut record = match &args.input {
        Some(path) => load_patient_json(path)?,
        None => PatientRecord::default(),
    };
    args.patient.apply(&mut record);
    if let Some(id) = &args.id {
        record.id = Some(id.clone());
    }
    let patient_id = record.id.clone().unwrap_or_else(|| "patient".to_string());

    let inputs = record.into_inputs(&LabThresholds::default_v1(), &patient_id)?;
    let eval = evaluate(&inputs, nomogram);

    let rendered = match args.format {
        OutputFormat::Text => render_report_text(&patient_id, &eval, nomogram),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&build_summary(&patient_id, &eval, nomogram))?
        }
    };
    writeln!(std::io::stdout(), "{rendered}")?;

    if let Some(out_dir) = &args.out {
        write_reports(&patient_id, &eval, nomogram, out_dir)?;
    }
    Ok(())
}

fn run_batch(args: &BatchArgs) -> Result<(), CliError> {
    let active = resolve_nomogram(args.nomogram.as_deref())?;
    let nomogram = active.get();
    info!(
        id = %nomogram.id,
        input = %args.input.display(),
        "scoring patient table"
    );

    let patients = load_patients(&args.input, &LabThresholds::default_v1())?;
    let results = patients
        .into_iter()
        .map(|p| {
            let eval = evaluate(&p.inputs, nomogram);
            (p.id, eval)
        })
        .collect::<Vec<_>>();

    write_batch_reports(&results, nomogram, &args.out)?;
    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<(), CliError> {
    if let Some(path) = &args.nomogram {
        let nomogram = load_nomogram(path)?;
        writeln!(
            std::io::stdout(),
            "nomogram {} ({}): OK",
            nomogram.id,
            nomogram.version
        )?;
    }
    if let Some(path) = &args.input {
        let failures = validate_patients(path)?;
        if failures > 0 {
            return Err(CliError::ValidationFailed(failures));
        }
    }
    Ok(())
}

/// Checks every record and prints each failure; returns how many failed.
fn validate_patients(path: &Path) -> Result<usize, CliError> {
    let thresholds = LabThresholds::default_v1();
    let records = if is_json_path(path) {
        vec![(1usize, load_patient_json(path)?)]
    } else {
        read_patient_tsv(path)?
    };

    let mut stdout = std::io::stdout();
    let mut failures = 0usize;
    for (line_no, record) in &records {
        let location = match &record.id {
            Some(id) => format!("{id} (line {line_no})"),
            None => format!("line {line_no}"),
        };
        if let Err(err) = record.into_inputs(&thresholds, &location) {
            failures += 1;
            writeln!(stdout, "{err}")?;
        }
    }
    writeln!(
        stdout,
        "{}: {} record(s), {} invalid",
        path.display(),
        records.len(),
        failures
    )?;
    Ok(failures)
}
