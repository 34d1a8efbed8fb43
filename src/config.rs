//! Environment-derived settings.
//!
//! Values come from the process environment, which `main` first populates
//! from a `.env` file when one is present.

use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/air_quality_rater.log";
pub const DEFAULT_OUTPUT_DIR: &str = "LogFile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rolling JSON log file (`LOG_FILE_PATH`).
    pub log_file_path: PathBuf,
    /// Directory CSV exports are written to (`AIR_QUALITY_OUTPUT_DIR`).
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Settings {
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
            output_dir: get("AIR_QUALITY_OUTPUT_DIR", DEFAULT_OUTPUT_DIR),
        }
    }
}
