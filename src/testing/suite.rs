//! Suite discovery, execution and recovery

use std::path::PathBuf;

use colored::Colorize;

use crate::common::config::Extensions;
use crate::common::Result;
use crate::exec::Executor;
use crate::prompt::Prompt;
use crate::testcase::TestCase;

use super::report::SuiteReport;
use super::runner::run_one;
use super::update::update_output;

/// Find the testcases directly inside each directory, directory by directory
///
/// A directory that cannot be listed is skipped with a warning.
pub fn discover(dirs: &[PathBuf], extensions: &Extensions) -> Vec<TestCase> {
    let mut cases = Vec::new();
    for dir in dirs {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping suite directory");
                continue;
            }
        };

        let mut sources: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Unreadable directory entry");
                    None
                }
            })
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str())
                        == Some(extensions.source.as_str())
            })
            .collect();
        sources.sort();

        tracing::debug!(dir = %dir.display(), count = sources.len(), "Discovered testcases");
        cases.extend(
            sources
                .into_iter()
                .map(|source| TestCase::new(source, &extensions.description)),
        );
    }
    cases
}

/// Run every testcase found in `dirs`
///
/// A failing testcase never stops the run; it is recorded and the next one starts.
pub async fn run_suite(
    executor: &Executor,
    dirs: &[PathBuf],
    extensions: &Extensions,
) -> SuiteReport {
    let mut report = SuiteReport::new();
    for case in discover(dirs, extensions) {
        let outcome = run_one(executor, &case).await;
        report.push(case.source(), outcome);
    }
    report
}

/// Print the pass/fail totals and the failed testcases
pub fn print_summary(report: &SuiteReport) {
    let total = report.entries().len();
    if report.all_passed() {
        println!(
            "\n{}",
            format!("All {} testcases passed", total).green().bold()
        );
        return;
    }

    println!(
        "\n{}",
        format!("{} of {} testcases failed:", report.failed_count(), total)
            .red()
            .bold()
    );
    for (path, outcome) in report.entries() {
        if let Some(reason) = outcome.reason() {
            println!("  {} {}: {}", "✗".red(), path.display(), reason);
        }
    }
}

/// Offer to regenerate the descriptions of every failed testcase
///
/// Returns whether every failure has been repaired. Errors while updating a
/// testcase are reported and the remaining testcases are still updated.
pub async fn recover(
    executor: &Executor,
    report: &SuiteReport,
    extensions: &Extensions,
    prompt: &mut dyn Prompt,
) -> Result<bool> {
    let failed = report.failed();
    if failed.is_empty() {
        return Ok(true);
    }

    let question = format!("Update expected output of {} failed testcases?", failed.len());
    if !prompt.confirm(&question)? {
        return Ok(false);
    }

    let mut repaired = true;
    for path in failed {
        let case = TestCase::new(path, &extensions.description);
        if let Err(e) = update_output(executor, &case).await {
            tracing::error!(case = %case, error = %e, "Failed to update testcase");
            println!("  {} {}: {}", "✗".red(), case, e);
            repaired = false;
        }
    }
    Ok(repaired)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::testcase::DecodeMode;
    use crate::testing::{FailReason, Outcome};
    use std::path::Path;

    fn write(path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn test_discover_filters_and_orders() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        let examples = root.path().join("examples");
        write(&tests.join("b.mx"), "");
        write(&tests.join("a.mx"), "");
        write(&tests.join("a.txt"), "");
        write(&tests.join("nested/c.mx"), "");
        write(&examples.join("z.mx"), "");

        let dirs = vec![examples.clone(), root.path().join("missing"), tests.clone()];
        let cases = discover(&dirs, &Extensions::default());
        let sources: Vec<&Path> = cases.iter().map(|c| c.source()).collect();
        assert_eq!(
            sources,
            vec![
                examples.join("z.mx").as_path(),
                tests.join("a.mx").as_path(),
                tests.join("b.mx").as_path()
            ]
        );
    }

    #[tokio::test]
    async fn test_corrupt_description_does_not_stop_suite() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        write(&tests.join("a.mx"), "printf ok\n");
        write(&tests.join("a.txt"), ":returncode 0\n:stdout 99\nok");
        write(&tests.join("b.mx"), "printf ok\n");
        write(&tests.join("b.txt"), ":returncode 0\n\n:stdout 2\nok\n\n");

        let report = run_suite(
            &Executor::new("sh", vec![]),
            &[tests.clone()],
            &Extensions::default(),
        )
        .await;

        assert_eq!(report.entries().len(), 2);
        assert!(matches!(
            report.outcome(&tests.join("a.mx")),
            Some(Outcome::Fail(FailReason::Description(_)))
        ));
        assert!(report.outcome(&tests.join("b.mx")).unwrap().passed());
        assert_eq!(report.failed(), vec![tests.join("a.mx").as_path()]);
    }

    #[tokio::test]
    async fn test_recover_updates_failed_cases() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        write(&tests.join("a.mx"), "printf new\n");
        write(&tests.join("a.txt"), ":returncode 0\n\n:stdout 3\nold\n\n");
        let executor = Executor::new("sh", vec![]);
        let extensions = Extensions::default();

        let report = run_suite(&executor, &[tests.clone()], &extensions).await;
        assert_eq!(report.failed_count(), 1);

        let mut prompt = ScriptedPrompt::new().answer(true);
        assert!(recover(&executor, &report, &extensions, &mut prompt).await.unwrap());
        assert_eq!(
            prompt.asked,
            vec!["Update expected output of 1 failed testcases?"]
        );

        let case = TestCase::new(tests.join("a.mx"), "txt");
        assert_eq!(case.load(DecodeMode::Strict).unwrap().stdout, "new");
        assert!(run_suite(&executor, &[tests], &extensions).await.all_passed());
    }

    #[tokio::test]
    async fn test_recover_declined_or_failing() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        write(&tests.join("a.mx"), "exit 1\n");
        let extensions = Extensions::default();

        let report = run_suite(&Executor::new("sh", vec![]), &[tests.clone()], &extensions).await;
        let mut declined = ScriptedPrompt::new().answer(false);
        assert!(!recover(&Executor::new("sh", vec![]), &report, &extensions, &mut declined)
            .await
            .unwrap());

        let broken = Executor::new("./no-such-compiler", vec![]);
        let mut accepted = ScriptedPrompt::new().answer(true);
        assert!(!recover(&broken, &report, &extensions, &mut accepted).await.unwrap());
    }

    #[tokio::test]
    async fn test_recover_continues_after_failed_update() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        write(&tests.join("a.mx"), "printf new\n");
        std::fs::create_dir_all(tests.join("a.txt")).unwrap();
        write(&tests.join("b.mx"), "printf new\n");
        write(&tests.join("b.txt"), ":returncode 0\n\n:stdout 3\nold\n\n");
        let executor = Executor::new("sh", vec![]);
        let extensions = Extensions::default();

        let report = run_suite(&executor, &[tests.clone()], &extensions).await;
        assert_eq!(report.failed_count(), 2);

        let mut prompt = ScriptedPrompt::new().answer(true);
        assert!(!recover(&executor, &report, &extensions, &mut prompt).await.unwrap());

        let repaired = TestCase::new(tests.join("b.mx"), "txt");
        assert_eq!(repaired.load(DecodeMode::Strict).unwrap().stdout, "new");
        assert!(tests.join("a.txt").is_dir());
    }
}
