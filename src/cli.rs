use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::ExportFormat;
use crate::models::Scope;

/// farm_footprint: cradle-to-farm-gate carbon footprints from farm activity data.
#[derive(Parser, Debug)]
#[command(name = "farm_footprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the emission factor dataset, JSON or CSV [default: data/emission_factors.json].
    #[arg(short, long, global = true)]
    pub factors: Option<PathBuf>,

    /// Accounting standard for factor lookup (ipcc or pas2050).
    #[arg(short, long, global = true)]
    pub scope: Option<Scope>,

    /// Path to a JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enter activities interactively and compute the footprint.
    Form,

    /// Compute footprints for activities listed in a CSV file.
    Calculate {
        /// CSV with columns crop,activity,quantity,unit.
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the report (.csv or .xlsx).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format; inferred from the output extension if omitted.
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// List the emission factor table.
    Factors {
        /// Only show factors for this crop.
        #[arg(long)]
        crop: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate() {
        let cli = Cli::parse_from([
            "farm_footprint",
            "--scope",
            "pas2050",
            "calculate",
            "--input",
            "activities.csv",
            "--output",
            "report.xlsx",
        ]);
        assert_eq!(cli.scope, Some(Scope::Pas2050));
        match cli.command {
            Some(Command::Calculate { input, output, format }) => {
                assert_eq!(input, PathBuf::from("activities.csv"));
                assert_eq!(output, Some(PathBuf::from("report.xlsx")));
                assert_eq!(format, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_command_is_form() {
        let cli = Cli::parse_from(["farm_footprint"]);
        assert!(matches!(cli.command.unwrap_or_default(), Command::Form));
    }

    #[test]
    fn test_invalid_scope_rejected() {
        assert!(Cli::try_parse_from(["farm_footprint", "--scope", "ghg", "factors"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
