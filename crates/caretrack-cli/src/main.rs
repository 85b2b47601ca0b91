use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use caretrack_cli::commands;
use caretrack_cli::config::{default_config_path, load_config};
use caretrack_core::models::weights::RecoveryWeights;

#[derive(Parser)]
#[command(name = "caretrack", version, about = "Recovery scoring for residential care")]
struct Cli {
    /// Config file (defaults to <config dir>/caretrack/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a patient's recovery report for one month
    Report {
        #[arg(long)]
        patient: String,
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
        /// JSON export of stored assessment documents
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Show or change the Master Recovery Score weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },
}

#[derive(Subcommand)]
enum WeightsAction {
    Show,
    /// Replace all five weights; they must sum to 100
    Set {
        #[arg(long)]
        symptom_reduction: u32,
        #[arg(long)]
        insight: u32,
        #[arg(long)]
        function: u32,
        #[arg(long)]
        family_system: u32,
        #[arg(long)]
        medication_adherence: u32,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = load_config(&config_path)?;

    match cli.command {
        Command::Report {
            patient,
            month,
            events,
        } => {
            let view = commands::report(&config, &patient, &month, events).await?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Weights { action } => match action {
            WeightsAction::Show => print!("{}", commands::show_weights(&config.weights)),
            WeightsAction::Set {
                symptom_reduction,
                insight,
                function,
                family_system,
                medication_adherence,
            } => {
                let weights = RecoveryWeights {
                    symptom_reduction,
                    insight,
                    function,
                    family_system,
                    medication_adherence,
                };
                commands::set_weights(&mut config, weights, &config_path)?;
                print!("{}", commands::show_weights(&config.weights));
            }
        },
    }

    Ok(())
}
