use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use wfcheck::{finality::DEFAULT_MAX_MARKINGS, parser, CheckCorrectFinality, FinalityConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks workflow process graphs for incorrect final states", long_about = None)]
struct Cli {
    /// Process definition to check (defaults to the bundled order approval demo)
    #[arg(short, long, value_parser)]
    filename: Option<PathBuf>,

    /// Give up once this many reachable markings have been built
    #[arg(long, default_value_t = DEFAULT_MAX_MARKINGS)]
    max_markings: usize,

    /// Log generators, the reachability graph and the witness path
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose { "debug" } else { "info" })
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let input = match &args.filename {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                error!("cannot read {}: {e}", path.display());
                return ExitCode::from(2);
            }
        },
        None => include_str!("../demos/order_approval.wf").to_string(),
    };

    let model = match parser::load(&input) {
        Ok(model) => model,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let config = FinalityConfig {
        max_markings: args.max_markings,
        verbose: args.verbose,
    };
    let mut check = CheckCorrectFinality::new(&model, config);
    if let Err(e) = check.run() {
        error!("{e}");
        return ExitCode::from(2);
    }

    if !check.has_incorrect_final_state() {
        println!("correct finality");
        return ExitCode::SUCCESS;
    }

    println!("incorrect final state: {}", check.offending_ids());
    if args.verbose {
        for marking in check.witness() {
            println!("  {}", marking);
        }
    }
    ExitCode::from(1)
}
