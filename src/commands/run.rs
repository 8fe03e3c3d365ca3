use std::{error::Error, fs, path::PathBuf};

use clap::Args;
use skit::{
    builtins,
    evaluator::{driver::Interp, env::Env},
    lint,
    native::registry::Registry,
    parser,
};
use tracing::{error, info};

/// Execute a script.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file to run
    pub script: PathBuf,

    /// Log every call as it executes
    #[arg(long)]
    pub trace: bool,

    /// Override the block nesting limit
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Print the final variables as JSON after the script finishes
    #[arg(long)]
    pub dump_vars: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let path = args.script.to_string_lossy().to_string();
    info!(%path, trace = args.trace, "running script");

    // 1) Parse
    let source = fs::read_to_string(&args.script)?;
    let block = parser::parse(&source)?;

    // 2) Lint before running anything
    let mut registry = Registry::new();
    builtins::install(&mut registry)?;
    let mut interp = Interp::new(registry);
    if let Some(max_depth) = args.max_depth {
        interp.set_max_depth(max_depth);
    }
    let findings = lint::check_block(interp.registry(), &block);
    if !findings.is_empty() {
        for finding in &findings {
            error!("{}", finding);
        }
        return Err(format!("{} problem(s) found in {}", findings.len(), path).into());
    }

    // 3) Execute
    let env = Env::new_ref();
    interp.run_block(&block, &env, 0, args.trace)?;

    info!(statements = block.stmts.len(), "script finished");

    if args.dump_vars {
        println!("{}", serde_json::to_string_pretty(&env.borrow().export())?);
    }
    Ok(())
}
