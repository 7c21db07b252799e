//! hyperscript-to-jsx: rewrites hyperscript builder calls into JSX.

mod cli;
mod config;
mod error;
mod logging;
mod orchestrator;
mod output;
mod source;

use clap::Parser;
use cli::Args;
use miette::Result;

fn main() -> Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    match orchestrator::run(args) {
        Ok(summary) => {
            if summary.should_fail() {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
