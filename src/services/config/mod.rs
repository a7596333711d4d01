// Engine configuration
// TOML-backed settings for the backend client and tenant conventions

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::conflict::{ConflictDetector, DEFAULT_CANCELLED_STATUS_ID};
use crate::services::projection::StatusPalette;

/// Connection settings for the scheduling API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout_secs: 20,
        }
    }
}

/// One status color override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColor {
    pub id: i64,
    pub color: String,
}

/// Palette overrides; anything not listed keeps its stock color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaletteConfig {
    pub default_color: Option<String>,
    pub status: Vec<StatusColor>,
}

/// Engine settings loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub backend: BackendConfig,
    pub cancelled_status_id: i64,
    pub palette: PaletteConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            cancelled_status_id: DEFAULT_CANCELLED_STATUS_ID,
            palette: PaletteConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse engine configuration")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Stock palette with this tenant's overrides applied.
    pub fn status_palette(&self) -> StatusPalette {
        let mut palette = StatusPalette::default();
        if let Some(color) = &self.palette.default_color {
            palette.set_default(color.clone());
        }
        for entry in &self.palette.status {
            palette.set(entry.id, entry.color.clone());
        }
        palette
    }

    pub fn conflict_detector(&self) -> ConflictDetector {
        ConflictDetector::new(self.cancelled_status_id)
    }
}
