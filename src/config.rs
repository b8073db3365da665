// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings come from a YAML file named by `POLEVAL_CONFIG`, or
//! `poleval.yaml` in the working directory. Missing keys take defaults.

use crate::workflow::controller::ValidationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "POLEVAL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "poleval.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated ingestion time for an upload batch
    pub ingest_delay_ms: u64,
    /// Simulated model time for a validation batch
    pub validation_delay_ms: u64,
    pub validation_mode: ValidationMode,
    /// Catalog fixture to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraBackendKind {
    Synthetic,
    Opencv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub backend: CameraBackendKind,
    pub device_index: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ingest_delay_ms: 2000,
            validation_delay_ms: 3000,
            validation_mode: ValidationMode::Realtime,
            catalog_path: None,
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            backend: CameraBackendKind::Synthetic,
            device_index: 0,
            width: 640,
            height: 480,
        }
    }
}

impl AppConfig {
    /// Locate and load the configuration, falling back to defaults when
    /// no file is present.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_path(local);
        }

        log::info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn ingest_delay(&self) -> Duration {
        Duration::from_millis(self.ingest_delay_ms)
    }

    pub fn validation_delay(&self) -> Duration {
        Duration::from_millis(self.validation_delay_ms)
    }
}
