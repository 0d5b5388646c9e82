//! Configuration file locations
//!
//! A `difftest.toml` in the working directory takes precedence over the
//! per-user configuration directory.

use std::path::PathBuf;

/// Name used for the per-user configuration directory
const APP_NAME: &str = "difftest";

/// File name of the project-local configuration
pub const LOCAL_CONFIG_FILE: &str = "difftest.toml";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/difftest/`
/// - macOS: `~/Library/Application Support/difftest/`
/// - Windows: `%APPDATA%\difftest\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Candidate configuration files, most specific first
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    candidates.extend(user_config_path());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_config_comes_first() {
        let candidates = config_candidates();
        assert_eq!(candidates[0], PathBuf::from("difftest.toml"));
    }

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }
}
