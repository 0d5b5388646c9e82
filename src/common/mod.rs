//! Common utilities shared by every command

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Remove every carriage return so captured output compares equal across platforms
pub fn strip_carriage_returns(text: &str) -> String {
    if text.contains('\r') {
        text.replace('\r', "")
    } else {
        text.to_string()
    }
}
