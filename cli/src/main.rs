use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod dump;
mod error;
mod generate;
mod inspect;
mod logging;
mod normalize;
mod output;
mod utils;

use error::Result;
use logging::{DEFAULT_LOG_LEVEL, LOG_ENV};

#[derive(Parser)]
#[command(name = "pemkit")]
#[command(about = "PEM key and certificate toolkit", long_about = None)]
struct Cli {
    /// Log filter directives (e.g. "debug" or "pemkit_codec=debug")
    #[arg(long, global = true, env = LOG_ENV, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key or a self-signed certificate and print it as PEM
    Generate {
        #[command(flatten)]
        config: generate::Config,
    },
    /// Decode a PEM block and describe its contents
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Re-encode a PEM block as PKCS#8, SubjectPublicKeyInfo or X.509
    Normalize {
        #[command(flatten)]
        config: normalize::Config,
    },
    /// Print the DER payload of a PEM block
    Dump {
        #[command(flatten)]
        config: dump::Config,
    },
}

fn run(cli: Cli) -> Result<()> {
    logging::init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Generate { config } => generate::execute(config)?,
        Commands::Inspect { config } => inspect::execute(config)?,
        Commands::Normalize { config } => normalize::execute(config)?,
        Commands::Dump { config } => dump::execute(config)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
