//! Regeneration of testcase descriptions

use colored::Colorize;

use crate::common::Result;
use crate::exec::Executor;
use crate::prompt::Prompt;
use crate::testcase::{DecodeMode, Description, TestCase};

/// Re-run a testcase on its recorded stdin and record the new outputs
///
/// The recorded stdin is kept as is. Missing or corrupt descriptions start
/// from defaults.
pub async fn update_output(executor: &Executor, case: &TestCase) -> Result<Description> {
    println!("{} {}", "[UPDATING]".cyan().bold(), case);
    let previous = case.load(DecodeMode::Lenient)?;

    let actual = executor.invoke(case.source(), &previous.stdin).await?;
    print_field("returncode", &actual.return_code.to_string());
    print_field("stdout", &actual.stdout);
    print_field("stderr", &actual.stderr);

    let updated = Description {
        return_code: actual.return_code,
        stdout: actual.stdout,
        stderr: actual.stderr,
        stdin: previous.stdin,
    };
    case.save(&updated)?;
    tracing::info!(case = %case, "Updated expected output");
    Ok(updated)
}

/// Record new stdin for a testcase, then optionally regenerate its output
pub async fn update_input(
    executor: &Executor,
    case: &TestCase,
    prompt: &mut dyn Prompt,
) -> Result<Description> {
    let mut desc = case.load(DecodeMode::Lenient)?;
    desc.stdin = prompt.read_text(&format!("Enter stdin for {}", case))?;
    case.save(&desc)?;
    tracing::info!(case = %case, stdin_len = desc.stdin.len(), "Updated stdin");

    if prompt.confirm("Update the expected output too?")? {
        return update_output(executor, case).await;
    }
    Ok(desc)
}

fn print_field(name: &str, value: &str) {
    println!("  {}", format!("{}:", name).dimmed());
    for line in value.lines() {
        println!("    {}", line);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::testcase::description;

    fn case(dir: &std::path::Path, script: &str) -> TestCase {
        let source = dir.join("case.mx");
        std::fs::write(&source, script).unwrap();
        TestCase::new(source, "txt")
    }

    #[tokio::test]
    async fn test_update_output_keeps_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let case = case(dir.path(), "cat\necho warn >&2\nexit 2\n");
        description::save(
            case.description_path(),
            &Description {
                return_code: 0,
                stdout: "stale".to_string(),
                stderr: String::new(),
                stdin: "in:put\n".to_string(),
            },
        )
        .unwrap();

        let updated = update_output(&Executor::new("sh", vec![]), &case).await.unwrap();
        let expected = Description {
            return_code: 2,
            stdout: "in:put\n".to_string(),
            stderr: "warn\n".to_string(),
            stdin: "in:put\n".to_string(),
        };
        assert_eq!(updated, expected);
        assert_eq!(case.load(DecodeMode::Strict).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_update_output_starts_from_defaults_when_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let case = case(dir.path(), "printf hi\n");
        std::fs::write(case.description_path(), ":bogus 1\n").unwrap();

        let updated = update_output(&Executor::new("sh", vec![]), &case).await.unwrap();
        assert_eq!(updated.stdout, "hi");
        assert_eq!(updated.stdin, "");
        assert!(case.load(DecodeMode::Strict).is_ok());
    }

    #[tokio::test]
    async fn test_update_input_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let case = case(dir.path(), "cat\n");
        let mut prompt = ScriptedPrompt::new().text("new input\n").answer(false);

        let desc = update_input(&Executor::new("sh", vec![]), &case, &mut prompt)
            .await
            .unwrap();
        assert_eq!(desc.stdin, "new input\n");
        assert_eq!(desc.stdout, "");
        assert_eq!(case.load(DecodeMode::Strict).unwrap(), desc);
    }

    #[tokio::test]
    async fn test_update_input_chains_into_output() {
        let dir = tempfile::tempdir().unwrap();
        let case = case(dir.path(), "cat\n");
        let mut prompt = ScriptedPrompt::new().text("echo me\n").answer(true);

        let desc = update_input(&Executor::new("sh", vec![]), &case, &mut prompt)
            .await
            .unwrap();
        assert_eq!(desc.stdin, "echo me\n");
        assert_eq!(desc.stdout, "echo me\n");
        assert_eq!(prompt.asked.len(), 2);
    }
}
