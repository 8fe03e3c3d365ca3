mod commands;

use clap::{Parser, Subcommand};
use commands::{check, run};
use std::error::Error;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "skit")]
#[command(author, version, about = "Interpreter for the skit scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn run(self) -> Result<(), Box<dyn Error>> {
        match self.command {
            Commands::Run(args) => run::run(args),
            Commands::Check(args) => check::run(args),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script
    Run(commands::run::RunArgs),

    /// Parse and lint a script without executing it
    Check(commands::check::CheckArgs),
}

fn main() {
    // Initialize tracing subscriber with env filter (e.g. SKIT_LOG=debug)
    let filter = match EnvFilter::try_from_env("SKIT_LOG") {
        Ok(f) => f,
        Err(_) => {
            EnvFilter::new("info")
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
