//! cluster-verdict — entry point.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use cluster_verdict_cli::compare::{info, run_compare, Backend, CompareOptions};

#[derive(Parser)]
#[command(
    name = "cluster-verdict",
    about = "Judge instrument-cluster screen captures against their references",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an actual capture against a reference capture.
    Compare {
        /// Path to the actual (to-be-checked) image.
        #[arg(short, long)]
        actual: PathBuf,

        /// Path to the reference (expected) image.
        #[arg(short, long)]
        reference: PathBuf,

        /// Comparator to run.
        #[arg(short, long, value_enum, default_value = "remote")]
        backend: Backend,

        /// Model API key.
        /// Also reads from MISTRAL_API_KEY env var.
        #[arg(long)]
        api_key: Option<String>,

        /// Chat-completion endpoint URL.
        #[arg(long)]
        endpoint: Option<String>,

        /// Vision model identifier.
        #[arg(long)]
        model: Option<String>,

        /// Print a JSON report instead of the bare verdict.
        #[arg(long)]
        json: bool,
    },

    /// Print defaults and verdict labels as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   cluster-verdict completions bash > ~/.local/share/bash-completion/completions/cluster-verdict
    ///   cluster-verdict completions zsh > ~/.zfunc/_cluster-verdict
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare {
            actual,
            reference,
            backend,
            api_key,
            endpoint,
            model,
            json,
        } => {
            let report = run_compare(&CompareOptions {
                actual,
                reference,
                backend,
                api_key,
                endpoint,
                model,
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.verdict);
            }
        }

        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&info())?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cluster-verdict", &mut std::io::stdout());
        }
    }

    Ok(())
}
