// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::CalculationConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Operator planning defaults stored as `config.json` in the user config directory.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config_path: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFile {
    pub fn new() -> Self {
        Self {
            config_path: crate::get_config_root().join("config.json"),
        }
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file means factory defaults; missing keys keep their defaults.
    pub fn load(&self) -> Result<CalculationConfig> {
        if !self.config_path.exists() {
            return Ok(CalculationConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.config_path.display()))
    }

    pub fn save(&self, config: &CalculationConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;
        log::info!("Saved planning defaults — path={}", self.config_path.display());
        Ok(())
    }
}
