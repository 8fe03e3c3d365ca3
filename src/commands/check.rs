use std::{error::Error, fs, path::PathBuf};

use clap::Args;
use skit::{builtins, lint, native::registry::Registry, parser};
use tracing::{error, info};

/// Parse and lint a script without executing it.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Script file to check
    pub script: PathBuf,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn Error>> {
    let path = args.script.to_string_lossy().to_string();
    info!(%path, "checking script");

    let source = fs::read_to_string(&args.script)?;
    let block = parser::parse(&source)?;

    let mut registry = Registry::new();
    builtins::install(&mut registry)?;
    let findings = lint::check_block(&registry, &block);
    if !findings.is_empty() {
        for finding in &findings {
            error!("{}", finding);
        }
        return Err(format!("{} problem(s) found in {}", findings.len(), path).into());
    }

    info!(statements = block.stmts.len(), "no problems found");
    Ok(())
}
