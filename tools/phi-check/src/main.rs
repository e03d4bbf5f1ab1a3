//! phi-check: compliance review for the analytics PHI filter
//!
//! Runs events through the same filter the app ships, so reviewers can see
//! exactly what would be sent or dropped.
//!
//! Exit status: 0 allowed, 1 rejected, 2 input or policy error.

mod commands;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Instrument;

use being_telemetry::{component_span, init_telemetry, TelemetryConfig};

/// Check analytics events against the Being. PHI filter policy
#[derive(Parser, Debug)]
#[command(name = "phi-check")]
#[command(about = "Check analytics events against the PHI filter policy")]
struct Args {
    /// Policy JSON file (defaults to the bundled policy)
    #[arg(short, long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one event given as JSON (file or stdin)
    Check {
        /// Event JSON file; reads stdin when omitted
        event: Option<PathBuf>,
    },
    /// Print the effective policy
    Policy,
    /// Run a JSON-lines file of events through the gateway and report outcomes
    Replay {
        /// JSON-lines file; reads stdin when omitted
        events: Option<PathBuf>,
    },
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let mut buf = String::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("opening {}", path.display()))?
                .read_to_string(&mut buf)?;
        }
        None => {
            io::stdin().read_to_string(&mut buf)?;
        }
    }
    Ok(buf)
}

async fn run(args: Args) -> Result<bool> {
    let policy = commands::resolve_policy(args.policy.as_deref())?;
    let mut stdout = io::stdout().lock();

    match &args.command {
        Command::Check { event } => {
            let input = read_input(event.as_ref())?;
            let result = commands::check(policy, &input, &mut stdout)?;
            Ok(result.is_allowed())
        }
        Command::Policy => {
            commands::show_policy(&policy, &mut stdout)?;
            Ok(true)
        }
        Command::Replay { events } => {
            let snapshot = match events {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    commands::replay(policy, BufReader::new(file), &mut stdout).await?
                }
                None => commands::replay(policy, io::stdin().lock(), &mut stdout).await?,
            };
            Ok(snapshot.rejected_total == 0)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_telemetry(&TelemetryConfig::for_service("phi-check")) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let span = component_span!("phi_check", command = ?args.command);
    match run(args).instrument(span).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "phi-check failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
