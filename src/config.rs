use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Application configuration, loaded from a TOML file when one is given.
///
/// Every field has a default so a partial file (or none at all) works.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub panel: PanelConfig,
    pub ui: UiConfig,
}

/// `[panel]` section: where the panel gateway listens
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub host: String,
    pub port: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 10000,
        }
    }
}

/// `[ui]` section: render cadence and table shape
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
    pub page_size: usize,
    pub buffer_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            page_size: 25,
            buffer_size: 10_000,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no file was given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn panel_addr(&self) -> String {
        format!("{}:{}", self.panel.host, self.panel.port)
    }
}
