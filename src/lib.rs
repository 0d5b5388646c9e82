//! difftest - differential test runner for compiler-like executables
//!
//! Testcases are source files with a sibling description recording the
//! stdin to feed the executable and the return code, stdout and stderr it
//! must produce. The runner verifies a whole suite, resolves single
//! testcases by name and regenerates descriptions on request.

pub mod cli;
pub mod commands;
pub mod common;
pub mod exec;
pub mod prompt;
pub mod testcase;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use exec::{ExecutionResult, Executor};
pub use testcase::{DecodeMode, Description, TestCase};
