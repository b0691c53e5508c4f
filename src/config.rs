use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::catalog::Catalog;

/// Root configuration structure, deserialized from `.license-scan/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Extra catalog rules, applied after the built-in table.
    #[serde(default, rename = "license")]
    pub licenses: Vec<LicenseRule>,
}

/// Patterns to recognize under a single label.
#[derive(Debug, Deserialize)]
pub struct LicenseRule {
    /// Label shown in the report. An existing label gains the extra patterns.
    pub label: String,
    /// Regular expressions; any one matching is a hit.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Config {
    /// Build the catalog: built-in entries first, then each configured rule in order.
    pub fn catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::builtin()?;
        for rule in &self.licenses {
            catalog.extend(&rule.label, rule.patterns.iter().map(String::as_str))?;
        }
        Ok(catalog)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<scan_root>/.license-scan/config.toml`
/// 3. `~/.config/license-scan/config.toml`
/// 4. Built-in [`Config::default`] (no extra rules)
pub fn load_config(scan_root: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = scan_root.join(".license-scan").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("license-scan").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
