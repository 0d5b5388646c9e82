//! Testcases and their recorded descriptions

pub mod description;

use std::fmt;
use std::path::{Path, PathBuf};

pub use description::{DecodeMode, Description};

use crate::common::Result;

/// A testcase source file and the description stored next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    source: PathBuf,
    description: PathBuf,
}

impl TestCase {
    /// Create a testcase whose description shares the source path with `description_ext`
    pub fn new(source: impl Into<PathBuf>, description_ext: &str) -> Self {
        let source = source.into();
        let description = source.with_extension(description_ext);
        Self {
            source,
            description,
        }
    }

    /// Path handed to the executable
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path of the recorded description
    pub fn description_path(&self) -> &Path {
        &self.description
    }

    /// Load the recorded description
    pub fn load(&self, mode: DecodeMode) -> Result<Description> {
        description::load(&self.description, mode)
    }

    /// Overwrite the recorded description
    pub fn save(&self, desc: &Description) -> Result<()> {
        description::save(&self.description, desc)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source.display())
    }
}
