//! CLI argument definitions for the Voxpad application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use voxpad_core::error::Result;
use voxpad_core::types::Locale;

/// Voxpad — a dictation pad: speak and it types, type and it speaks.
#[derive(Parser, Debug)]
#[command(name = "voxpad", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Startup locale tag (en-US, hi-IN, gu-IN).
    #[arg(long = "locale")]
    pub locale: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VOXPAD_CONFIG env var > ~/.voxpad/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VOXPAD_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the startup locale.
    ///
    /// Priority: --locale flag > config file value. Errors when the flag
    /// names a tag outside the supported set.
    pub fn resolve_locale(&self, config_locale: Locale) -> Result<Locale> {
        match &self.locale {
            Some(tag) => tag.parse(),
            None => Ok(config_locale),
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".voxpad").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".voxpad").join("config.toml");
    }
    PathBuf::from("config.toml")
}
