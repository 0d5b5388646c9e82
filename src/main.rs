//! difftest - differential test runner for compiler-like executables
//!
//! Runs each testcase through the executable under test and compares its
//! return code, stdout and stderr against a recorded description.

use std::path::PathBuf;

use clap::Parser;
use difftest::{cli, common::logging};
use difftest::commands::Commands;

#[derive(Parser)]
#[command(name = "difftest", about = "Differential test runner for compiler-like executables")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: ./difftest.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let result = match cli::load_config(cli.config) {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
