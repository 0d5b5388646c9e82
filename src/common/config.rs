//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_candidates;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// How the executable under test is invoked
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Where testcases live
    #[serde(default)]
    pub suite: SuiteConfig,

    /// File extensions of testcase sources and descriptions
    #[serde(default)]
    pub extensions: Extensions,
}

/// Configuration for the executable under test
#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    /// Path or name of the executable
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the testcase path
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Upper bound on a single run, 0 disables the limit
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_program() -> String {
    "./Masfix".to_string()
}
fn default_args() -> Vec<String> {
    vec!["-s".to_string(), "-r".to_string()]
}
fn default_timeout() -> u64 {
    30
}

/// Suite layout
#[derive(Debug, Deserialize, Clone)]
pub struct SuiteConfig {
    /// Directories scanned, in order, by a full suite run
    #[serde(default = "default_directories")]
    pub directories: Vec<PathBuf>,

    /// Whether single-test resolution also looks in the working directory
    #[serde(default = "default_search_current_dir")]
    pub search_current_dir: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            directories: default_directories(),
            search_current_dir: default_search_current_dir(),
        }
    }
}

fn default_directories() -> Vec<PathBuf> {
    vec![PathBuf::from("tests"), PathBuf::from("examples")]
}
fn default_search_current_dir() -> bool {
    true
}

/// Testcase file extensions, without the leading dot
#[derive(Debug, Deserialize, Clone)]
pub struct Extensions {
    #[serde(default = "default_source_ext")]
    pub source: String,

    #[serde(default = "default_description_ext")]
    pub description: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            source: default_source_ext(),
            description: default_description_ext(),
        }
    }
}

fn default_source_ext() -> String {
    "mx".to_string()
}
fn default_description_ext() -> String {
    "txt".to_string()
}

impl Config {
    /// Load configuration from the first existing default location
    ///
    /// Returns default configuration if no file exists
    pub fn load() -> Result<Self> {
        for path in config_candidates() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.executor.program.trim().is_empty() {
            return Err(super::Error::Config(
                "executor.program must not be empty".to_string(),
            ));
        }
        if self.extensions.source == self.extensions.description {
            return Err(super::Error::Config(format!(
                "source and description extensions must differ, both are '{}'",
                self.extensions.source
            )));
        }
        Ok(())
    }

    /// Directories searched when resolving a single testcase name,
    /// lowest priority first
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(self.suite.directories.len() + 1);
        if self.suite.search_current_dir {
            dirs.push(PathBuf::from("."));
        }
        dirs.extend(self.suite.directories.iter().cloned());
        dirs
    }
}
