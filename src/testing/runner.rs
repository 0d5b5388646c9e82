//! Single testcase execution
//!
//! Runs one testcase against its recorded description and reports the first
//! field that differs.

use colored::Colorize;

use crate::exec::{ExecutionResult, Executor};
use crate::testcase::{DecodeMode, Description, TestCase};

use super::diff;
use super::report::{FailReason, Outcome};

/// Run a testcase and compare it with its description
pub async fn run_one(executor: &Executor, case: &TestCase) -> Outcome {
    println!("{} {}", "[TESTING]".blue().bold(), case);

    let outcome = evaluate(executor, case).await;
    match &outcome {
        Outcome::Pass => {
            tracing::info!(case = %case, "Testcase passed");
            println!("  {} passed", "✓".green());
        }
        Outcome::Fail(reason) => {
            tracing::info!(case = %case, reason = %reason, "Testcase failed");
            println!("  {} {}", "✗".red(), reason);
            match reason {
                FailReason::Stdout { expected, actual } | FailReason::Stderr { expected, actual } => {
                    print!("{}", diff::render(expected, actual));
                }
                _ => {}
            }
        }
    }
    outcome
}

async fn evaluate(executor: &Executor, case: &TestCase) -> Outcome {
    let expected = match case.load(DecodeMode::Strict) {
        Ok(desc) => desc,
        Err(e) => return Outcome::Fail(FailReason::Description(e)),
    };

    match executor.invoke(case.source(), &expected.stdin).await {
        Ok(actual) => compare(&expected, actual),
        Err(e) => Outcome::Fail(FailReason::Execution(e)),
    }
}

/// Compare return code, stdout and stderr in that order, stopping at the first mismatch
pub(crate) fn compare(expected: &Description, actual: ExecutionResult) -> Outcome {
    if expected.return_code != actual.return_code {
        return Outcome::Fail(FailReason::ReturnCode {
            expected: expected.return_code,
            actual: actual.return_code,
        });
    }
    if expected.stdout != actual.stdout {
        return Outcome::Fail(FailReason::Stdout {
            expected: expected.stdout.clone(),
            actual: actual.stdout,
        });
    }
    if expected.stderr != actual.stderr {
        return Outcome::Fail(FailReason::Stderr {
            expected: expected.stderr.clone(),
            actual: actual.stderr,
        });
    }
    Outcome::Pass
}
