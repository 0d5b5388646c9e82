//! Testcase description codec
//!
//! A description is a flat sequence of fields, each introduced by a header
//! line. Blob fields carry their length in characters so their content may
//! hold anything, including newlines and colons:
//! ```text
//! :returncode 0
//!
//! :stdout 6
//! hello!
//!
//! :stdin 3
//! a:b
//!
//! ```

use std::fmt;
use std::path::Path;

use colored::Colorize;

use crate::common::{Error, Result};

/// Expected outcome of running one testcase, plus the input that produces it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub stdin: String,
}

/// How to treat a missing or malformed description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Any problem is an error (verifying a testcase)
    Strict,
    /// Missing or malformed data falls back to defaults (regenerating a testcase)
    Lenient,
}

/// A recognized description field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ReturnCode,
    Stdout,
    Stderr,
    Stdin,
}

impl Field {
    const ALL: [Field; 4] = [Field::ReturnCode, Field::Stdout, Field::Stderr, Field::Stdin];

    fn name(self) -> &'static str {
        match self {
            Field::ReturnCode => "returncode",
            Field::Stdout => "stdout",
            Field::Stderr => "stderr",
            Field::Stdin => "stdin",
        }
    }

    /// Match `<name> <digits>` exactly, returning the numeric part
    fn match_header(self, header: &str) -> Option<&str> {
        let value = header.strip_prefix(self.name())?.strip_prefix(' ')?;
        let digits = match self {
            Field::ReturnCode => value.strip_prefix('-').unwrap_or(value),
            _ => value,
        };
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(value)
        } else {
            None
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte offset just past the first `count` chars, if the text has that many
fn char_boundary(text: &str, count: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(count)
}

/// Parse a description from its textual form
pub fn decode(text: &str) -> Result<Description> {
    let mut desc = Description::default();
    let mut return_code = None;
    let mut rest = text;

    while let Some(start) = rest.find(':') {
        let after = &rest[start + 1..];
        let (header, body) = match after.find('\n') {
            Some(nl) => (&after[..nl], Some(&after[nl + 1..])),
            None => (after, None),
        };
        // Tolerate CRLF line endings
        let header = header.strip_suffix('\r').unwrap_or(header);

        let (field, value) = Field::ALL
            .iter()
            .find_map(|field| field.match_header(header).map(|value| (*field, value)))
            .ok_or_else(|| Error::Format(format!("unknown field header ':{}'", header)))?;

        if field == Field::ReturnCode {
            let code = value.parse::<i32>().map_err(|_| {
                Error::Format(format!("return code '{}' is out of range", value))
            })?;
            return_code = Some(code);
            rest = body.unwrap_or("");
            continue;
        }

        let body = body.ok_or_else(|| {
            Error::Format(format!("header ':{}' is not followed by a newline", header))
        })?;
        let len = value.parse::<usize>().map_err(|_| {
            Error::Format(format!("length '{}' of field '{}' is out of range", value, field))
        })?;
        let end = char_boundary(body, len).ok_or_else(|| {
            Error::Format(format!(
                "field '{}' declares {} characters but only {} remain",
                field,
                len,
                body.chars().count()
            ))
        })?;

        let blob = body[..end].to_string();
        match field {
            Field::Stdout => desc.stdout = blob,
            Field::Stderr => desc.stderr = blob,
            Field::Stdin => desc.stdin = blob,
            Field::ReturnCode => unreachable!("return code handled above"),
        }
        rest = &body[end..];
    }

    desc.return_code = return_code.ok_or(Error::MissingField("returncode"))?;
    Ok(desc)
}

/// Serialize a description; empty blobs are left out
pub fn encode(desc: &Description) -> String {
    let mut out = format!(":{} {}\n\n", Field::ReturnCode, desc.return_code);
    for (field, value) in [
        (Field::Stdout, &desc.stdout),
        (Field::Stderr, &desc.stderr),
        (Field::Stdin, &desc.stdin),
    ] {
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!(":{} {}\n{}\n\n", field, value.chars().count(), value));
    }
    out
}

/// Read and decode the description stored at `path`
pub fn load(path: &Path, mode: DecodeMode) -> Result<Description> {
    let result = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map_err(|e| Error::Format(format!("not valid UTF-8 ({})", e.utf8_error())))
            .and_then(|text| decode(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::DescriptionNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            })
        }
    };

    match (result, mode) {
        (Err(e), DecodeMode::Lenient) if e.is_recoverable_description() => {
            tracing::warn!(path = %path.display(), error = %e, "Using default description");
            println!("{} {}, using defaults", "[NOTE]".yellow(), e);
            Ok(Description::default())
        }
        (result, _) => result,
    }
}

/// Encode and write a description to `path`
pub fn save(path: &Path, desc: &Description) -> Result<()> {
    std::fs::write(path, encode(desc)).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "Wrote description");
    Ok(())
}
