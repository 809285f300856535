use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Deployment settings for the chart option templates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptions {
    /// Directory holding the globe textures
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
    #[serde(default = "default_auto_rotate")]
    pub auto_rotate: bool,
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f64,
}

fn default_asset_dir() -> String { "./assets".to_string() }
fn default_auto_rotate() -> bool { true }
fn default_auto_rotate_speed() -> f64 { 5.0 }

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            auto_rotate: default_auto_rotate(),
            auto_rotate_speed: default_auto_rotate_speed(),
        }
    }
}

impl TemplateOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid template options")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Path of a texture file inside the asset directory
    pub fn asset(&self, file: &str) -> String {
        format!("{}/{}", self.asset_dir.trim_end_matches('/'), file)
    }
}
