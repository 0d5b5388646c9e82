//! CLI command definitions
//!
//! Defines the clap commands for the test runner.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the whole suite, or a single named testcase
    Run {
        /// Testcase name, resolved against the working and suite directories
        name: Option<String>,

        /// Do not offer to update the descriptions of failed testcases
        #[arg(long)]
        no_recover: bool,

        /// Answer yes to every question
        #[arg(long, short)]
        yes: bool,

        /// Write a JSON report of the run to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Regenerate a testcase description
    #[command(subcommand)]
    Update(UpdateCommands),
}

#[derive(Subcommand)]
pub enum UpdateCommands {
    /// Re-run a testcase and record its return code, stdout and stderr
    Output {
        /// Testcase name
        name: String,
    },

    /// Enter new stdin for a testcase
    Input {
        /// Testcase name
        name: String,

        /// Also regenerate the expected output without asking
        #[arg(long, short)]
        yes: bool,
    },
}
