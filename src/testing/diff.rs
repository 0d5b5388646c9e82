//! Line diff rendering for mismatched output

use colored::Colorize;
use difference::{Changeset, Difference};

/// Render a line diff of `expected` against `actual`
///
/// Removed lines are prefixed with `-`, added lines with `+`, common lines
/// with a space.
pub fn render(expected: &str, actual: &str) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut out = String::new();
    for diff in &changeset.diffs {
        let (prefix, text) = match diff {
            Difference::Same(x) => (' ', x),
            Difference::Add(x) => ('+', x),
            Difference::Rem(x) => ('-', x),
        };
        for line in text.split('\n') {
            let line = format!("{}{}", prefix, line);
            let line = match prefix {
                '+' => line.green().to_string(),
                '-' => line.red().to_string(),
                _ => line,
            };
            out.push_str("    ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
