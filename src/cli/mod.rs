//! CLI command handling
//!
//! Dispatches parsed commands to the test runner and maps the outcome to
//! success or failure.

use std::path::{Path, PathBuf};

use crate::commands::{Commands, UpdateCommands};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::exec::Executor;
use crate::prompt::TerminalPrompt;
use crate::testcase::TestCase;
use crate::testing::{self, SuiteReport};

/// Dispatch a CLI command
///
/// Returns `Ok(false)` when testcases failed and were not repaired.
pub async fn dispatch(command: Commands, config: &Config) -> Result<bool> {
    let executor = Executor::from_config(&config.executor);

    match command {
        Commands::Run {
            name,
            no_recover,
            yes,
            report,
        } => {
            let suite_report = match name {
                Some(name) => {
                    let case = resolve_case(&name, config)?;
                    let outcome = testing::run_one(&executor, &case).await;
                    let mut single = SuiteReport::new();
                    single.push(case.source(), outcome);
                    single
                }
                None => {
                    testing::run_suite(&executor, &config.suite.directories, &config.extensions)
                        .await
                }
            };

            testing::print_summary(&suite_report);
            if let Some(path) = report {
                write_report(&path, &suite_report)?;
            }
            if suite_report.all_passed() || no_recover {
                return Ok(suite_report.all_passed());
            }

            let mut prompt = TerminalPrompt::stdio(yes);
            testing::recover(&executor, &suite_report, &config.extensions, &mut prompt).await
        }

        Commands::Update(UpdateCommands::Output { name }) => {
            let case = resolve_case(&name, config)?;
            testing::update_output(&executor, &case).await?;
            Ok(true)
        }

        Commands::Update(UpdateCommands::Input { name, yes }) => {
            let case = resolve_case(&name, config)?;
            let mut prompt = TerminalPrompt::stdio(yes);
            testing::update_input(&executor, &case, &mut prompt).await?;
            Ok(true)
        }
    }
}

fn resolve_case(name: &str, config: &Config) -> Result<TestCase> {
    let source = testing::resolve(name, &config.search_dirs(), &config.extensions.source)?;
    Ok(TestCase::new(source, &config.extensions.description))
}

fn write_report(path: &Path, report: &SuiteReport) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

/// Load the configuration from `path`, or from the default locations
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}
