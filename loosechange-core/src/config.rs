//! Configuration management
//!
//! Settings live in `settings.json` inside the LooseChange directory:
//! ```json
//! {
//!   "app": { "baseUrl": "https://dev.lunchmoney.app/v1", "demoMode": false, ... }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving. The access
//! token is never written here.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::lunchmoney::LUNCHMONEY_PRODUCTION_URL;

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "LOOSECHANGE_BASE_URL";

/// Environment variable overriding demo mode
pub const DEMO_MODE_ENV: &str = "LOOSECHANGE_DEMO_MODE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// LooseChange configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub demo_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: LUNCHMONEY_PRODUCTION_URL.to_string(),
            demo_mode: false,
        }
    }
}

impl Config {
    /// Load config from the LooseChange directory
    ///
    /// A missing or unreadable settings file falls back to defaults.
    /// `LOOSECHANGE_BASE_URL` and `LOOSECHANGE_DEMO_MODE` take precedence
    /// over the file.
    pub fn load(dir: &Path) -> Result<Self> {
        let raw = read_settings(dir)?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or(raw.app.base_url)
            .unwrap_or_else(|| LUNCHMONEY_PRODUCTION_URL.to_string());

        let demo_mode = match std::env::var(DEMO_MODE_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            base_url,
            demo_mode,
        })
    }

    /// Save config to the LooseChange directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        let mut settings = read_settings(dir)?;

        settings.app.demo_mode = self.demo_mode;
        settings.app.base_url = if self.base_url == LUNCHMONEY_PRODUCTION_URL {
            None
        } else {
            Some(self.base_url.clone())
        };

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(dir.join("settings.json"), content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

fn read_settings(dir: &Path) -> Result<SettingsFile> {
    let settings_path = dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring malformed settings.json");
        SettingsFile::default()
    }))
}
