//! Command line front end: prints a climate or farm record as JSON.
//!
//! Usage:
//!   agroclimate climate 3 2000 2020
//!   agroclimate farm 7 3 --skip-probe
//!
//! Set RUST_LOG=info (or debug) to follow the source fallbacks on stderr.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use agroclimate::{AgroClimate, AgroClimateError, RegionTable, SourceConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Agro-climatic records for African regions and farms.
#[derive(Parser)]
#[command(name = "agroclimate", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON region table replacing the built-in one.
    #[arg(long, global = true, env = "AGROCLIMATE_REGIONS")]
    regions: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    /// Skip the FAOSTAT portal reachability check.
    #[arg(long, global = true)]
    skip_probe: bool,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Temperature and rainfall trends plus monthly climate of a region.
    Climate {
        /// FAOSTAT region code (1-5).
        region: String,
        /// First year of the trends.
        year_start: Option<i32>,
        /// Last year of the trends.
        year_end: Option<i32>,
    },
    /// Farm profile, soil, fields, water use and risks.
    Farm {
        farm_id: i64,
        /// FAOSTAT region code (1-5).
        region: String,
    },
}

fn build_client(args: &Args) -> Result<AgroClimate, AgroClimateError> {
    let config = SourceConfig::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .probe_primary(!args.skip_probe)
        .build();
    let client = AgroClimate::with_config(config)?;
    match &args.regions {
        Some(path) => Ok(client.with_regions(RegionTable::from_json_file(path)?)),
        None => Ok(client),
    }
}

async fn run(args: &Args) -> Result<serde_json::Value, AgroClimateError> {
    let client = build_client(args)?;
    match &args.command {
        Command::Climate {
            region,
            year_start,
            year_end,
        } => {
            let record = client
                .climate()
                .region(region)
                .maybe_year_start(*year_start)
                .maybe_year_end(*year_end)
                .call()
                .await?;
            Ok(to_value(&record))
        }
        Command::Farm { farm_id, region } => {
            let record = client.farm().id(*farm_id).region(region).call().await?;
            Ok(to_value(&record))
        }
    }
}

fn to_value<T: Serialize>(record: &T) -> serde_json::Value {
    serde_json::to_value(record).unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }))
}

/// The error message followed by its chain of causes.
fn describe(error: &AgroClimateError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn print(value: &serde_json::Value, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args).await {
        Ok(value) => {
            print(&value, args.pretty);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", describe(&e));
            print(&serde_json::json!({ "error": describe(&e) }), args.pretty);
            ExitCode::FAILURE
        }
    }
}
