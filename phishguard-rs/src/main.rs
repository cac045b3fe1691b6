//! CLI front-end for the risk scoring engine
//!
//! ```bash
//! # Score one message
//! phishguard-rs check "Urgent: renew your account at http://login.xyz"
//!
//! # Audit a JSON array of records with a "message" field
//! phishguard-rs audit messages.json
//! ```

use clap::{Parser, Subcommand};
use phishguard_rs::classifier::ClassifierArtifact;
use phishguard_rs::config::Config;
use phishguard_rs::scoring::RiskEngine;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "phishguard")]
#[command(about = "Score messages for phishing risk", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single message
    Check {
        /// Message text to analyze
        message: String,
    },
    /// Score a batch of JSON records
    Audit {
        /// Path to a JSON array of records
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if std::path::Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    // Initialize logging
    let level = config.logging.level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Loading classifier artifact from {}", config.artifact.path);
    let artifact = ClassifierArtifact::from_file(&config.artifact.path)?;
    let engine = RiskEngine::new(artifact, &config)?;

    match cli.command {
        Commands::Check { message } => {
            let assessment = engine.analyze(&message)?;
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        Commands::Audit { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
            let report = engine.audit(&records)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
