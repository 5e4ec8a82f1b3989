use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_footprint_rs::calculator::{FootprintCalculator, StandardCalculator};
use farm_footprint_rs::cli::{Cli, Command};
use farm_footprint_rs::collector::collect_partitioned;
use farm_footprint_rs::config::AppConfig;
use farm_footprint_rs::dataset::{load_activities, load_factor_table};
use farm_footprint_rs::error::{FootprintError, Result};
use farm_footprint_rs::export::{ExportFormat, export_report, resolve_output};
use farm_footprint_rs::factors::{EmissionFactorTable, FactorSource};
use farm_footprint_rs::interface::{
    collect_crop_activities, display_factors, display_footprint, display_rejections,
    display_results, prompt_crop, prompt_output_path, prompt_yes_no,
};
use farm_footprint_rs::models::{Report, Scope};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only the report output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "farm_footprint_rs=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let factors_path = cli.factors.clone().unwrap_or_else(|| config.factors.clone());
    let scope = cli.scope.unwrap_or(config.scope);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Form => cmd_form(&factors_path, scope, config.format),
        Command::Calculate {
            input,
            output,
            format,
        } => cmd_calculate(
            &factors_path,
            scope,
            &input,
            output.as_deref(),
            format,
            config.format,
        ),
        Command::Factors { crop } => cmd_factors(&factors_path, cli.scope, crop.as_deref()),
    }
}

/// Load the factor table, with a clear message when the file is missing.
fn open_table(path: &Path) -> Result<EmissionFactorTable> {
    if !path.exists() {
        return Err(FootprintError::InvalidInput(format!(
            "Emission factor dataset not found: {} (use --factors to point at one)",
            path.display()
        )));
    }

    load_factor_table(path)
}

/// Interactive form: enter crops and activities, review, export.
fn cmd_form(factors_path: &Path, scope: Scope, default_format: ExportFormat) -> Result<()> {
    let table = open_table(factors_path)?;
    let crops = table.crops();
    let calculator = StandardCalculator::new(&table);

    println!(
        "Loaded {} emission factors (dataset {}, scope {})",
        table.len(),
        table.version(),
        scope
    );
    if !crops.is_empty() {
        println!("Crops: {}", crops.join(", "));
    }
    println!();

    let mut results = Vec::new();

    loop {
        let crop = prompt_crop(&crops)?;
        let activities = collect_crop_activities(&crop)?;

        if activities.is_empty() {
            println!("No activities entered for {}.", crop);
        } else {
            match calculator.calculate(&crop, &activities, scope) {
                Ok(result) => {
                    display_footprint(&result);
                    results.push(result);
                }
                Err(e @ FootprintError::FactorNotFound { .. }) => {
                    println!("Cannot compute the footprint of {}: {}", crop, e);
                    println!("Enter the crop again without that activity, or load a dataset that covers it.");
                }
                Err(e) => return Err(e),
            }
        }

        if !prompt_yes_no("Add another crop?", false)? {
            break;
        }
    }

    if results.is_empty() {
        println!("Nothing to report.");
        return Ok(());
    }

    display_results(&results);

    if !prompt_yes_no("Export report?", true)? {
        return Ok(());
    }

    let report = Report::new(scope, table.version(), results);
    let default_name = format!("footprint_report.{}", default_format.extension());

    loop {
        let requested = prompt_output_path(&default_name)?;
        let attempt = resolve_output(&requested, None, default_format)
            .and_then(|(path, format)| export_report(&report, &path, format).map(|_| path));

        match attempt {
            Ok(path) => {
                println!("Report written to {}", path.display());
                return Ok(());
            }
            Err(e @ (FootprintError::ExportIo { .. } | FootprintError::InvalidInput(_))) => {
                println!("{}", e);
                if !prompt_yes_no("Try another path?", true)? {
                    return Ok(());
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Batch mode: compute footprints for a CSV of activities.
fn cmd_calculate(
    factors_path: &Path,
    scope: Scope,
    input: &Path,
    output: Option<&Path>,
    format: Option<ExportFormat>,
    default_format: ExportFormat,
) -> Result<()> {
    let table = open_table(factors_path)?;

    let entries = load_activities(input)?;
    tracing::info!(input = %input.display(), entries = entries.len(), "read activities");

    let collected = collect_partitioned(&entries);
    if let Some(first) = collected.rejected.first().cloned() {
        display_rejections(&collected.rejected);
        return Err(first.into_error());
    }

    let calculator = StandardCalculator::new(&table);
    let results = calculator.calculate_all(&collected.accepted, scope)?;
    display_results(&results);

    if let Some(output) = output {
        let (path, format): (PathBuf, ExportFormat) = resolve_output(output, format, default_format)?;
        let report = Report::new(scope, table.version(), results);
        export_report(&report, &path, format)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// List factors, optionally filtered by crop and scope.
fn cmd_factors(factors_path: &Path, scope: Option<Scope>, crop: Option<&str>) -> Result<()> {
    let table = open_table(factors_path)?;

    let factors = match crop {
        Some(crop) => table.factors_for_crop(crop),
        None => table.all_factors(),
    };
    let factors: Vec<_> = factors
        .into_iter()
        .filter(|f| scope.is_none_or(|s| f.scope == s))
        .collect();

    display_factors(&factors, table.version());
    Ok(())
}
