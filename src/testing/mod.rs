//! Differential test runner
//!
//! Runs testcases against their recorded descriptions, aggregates the
//! outcomes of a whole suite and regenerates descriptions on request.

pub mod diff;
mod report;
mod resolve;
mod runner;
mod suite;
mod update;

pub use report::{FailReason, Outcome, SuiteReport};
pub use resolve::resolve;
pub use runner::run_one;
pub use suite::{discover, print_summary, recover, run_suite};
pub use update::{update_input, update_output};
