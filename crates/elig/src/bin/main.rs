//! Eligibility command-line tool

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use elig::cli::check::{self, CheckParams};
use elig::cli::output;
use elig_types::Gender;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Medicaid eligibility verification tool
#[derive(Parser)]
#[command(name = "elig")]
#[command(author, version, about = "Real-time X12 270/271 eligibility checks", long_about = None)]
struct Cli {
    /// Configuration file (trading partner, credentials, registry)
    #[arg(short, long, default_value = "elig.toml", global = true)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one patient's eligibility
    Check {
        /// Patient first name
        #[arg(long)]
        first_name: String,

        /// Patient last name
        #[arg(long)]
        last_name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,

        /// Gender code (M or F)
        #[arg(long)]
        gender: Option<Gender>,

        /// Medicaid member id
        #[arg(long)]
        member_id: String,

        /// Service date (YYYY-MM-DD, default today)
        #[arg(long)]
        service_date: Option<NaiveDate>,

        /// End of the service date range
        #[arg(long, requires = "service_date")]
        service_end: Option<NaiveDate>,

        /// Print the full JSON result
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    let filter = if cli.verbose { "elig=debug" } else { "elig=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let outcome: Result<()> = match cli.command {
        Commands::Check {
            first_name,
            last_name,
            dob,
            gender,
            member_id,
            service_date,
            service_end,
            json,
        } => {
            check::run(
                &cli.config,
                CheckParams {
                    first_name,
                    last_name,
                    date_of_birth: dob,
                    gender,
                    member_id,
                    service_start: service_date,
                    service_end,
                    json,
                },
            )
            .await
        }
    };

    if let Err(error) = outcome {
        eprintln!("{}", output::format_error(&error));
        std::process::exit(2);
    }
}
