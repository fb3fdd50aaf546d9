use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VoxpadError};
use crate::types::Locale;

/// Top-level configuration for the Voxpad application.
///
/// Loaded from `~/.voxpad/config.toml` by default. Each section corresponds
/// to one concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxpadConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl VoxpadConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VoxpadConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VoxpadError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Speech capability settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Locale selected at startup.
    pub default_locale: Locale,
    /// Expose the recognition capability. When false, the dictation action
    /// degrades to a no-op.
    pub recognition_enabled: bool,
    /// Expose the synthesis capability. When false, the speak action
    /// degrades to a no-op.
    pub synthesis_enabled: bool,
    /// Latency of the bundled simulated recognition engine, in milliseconds.
    pub recognition_delay_ms: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::EnUs,
            recognition_enabled: true,
            synthesis_enabled: true,
            recognition_delay_ms: 750,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
