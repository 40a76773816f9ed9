//! Salvage configuration file
//!
//! Lives at `<config dir>/salvage/config.toml` unless `--config` points
//! elsewhere. A missing file means defaults.

use anyhow::{Context, Result};
use salvage_core::AutoSaveConfiguration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageConfig {
    /// trace | debug | info | warn | error
    pub log_level: String,
    pub backup: BackupConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Quiet period before a dirty document is backed up
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Initial auto-save delay; unset means auto-save after delay is off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_save_delay_ms: Option<u64>,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            backup: BackupConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

impl SalvageConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=60_000).contains(&self.backup.debounce_ms) {
            anyhow::bail!(
                "backup.debounce_ms must be between 1 and 60000, got {}",
                self.backup.debounce_ms
            );
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("Invalid log_level: {}", self.log_level))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.backup.debounce_ms)
    }

    pub fn auto_save(&self) -> AutoSaveConfiguration {
        AutoSaveConfiguration {
            auto_save_delay_ms: self.files.auto_save_delay_ms,
        }
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("salvage").join("config.toml"))
}

/// Load from `path`, or the default location when `None`
pub fn load(path: Option<&Path>) -> Result<SalvageConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Some(path) => path,
            None => return Ok(SalvageConfig::default()),
        },
    };

    if !path.exists() {
        return Ok(SalvageConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SalvageConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

pub fn save(config: &SalvageConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Write a default config file unless one already exists
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(&SalvageConfig::default(), path)?;
    Ok(true)
}

pub fn example_config() -> &'static str {
    r#"# Salvage configuration

# trace | debug | info | warn | error
log_level = "info"

[backup]
# Quiet period after the last edit before a dirty document is backed up
debounce_ms = 1000

[files]
# Auto-save delay of the editor. Below 1500 ms, file-backed documents are
# not backed up because auto-save already persists them.
# auto_save_delay_ms = 1000
"#
}
