// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Report and fixture serialization.
//!
//! This module exports validation reports and imports catalog fixtures in
//! YAML and JSON formats.

use crate::models::report::ValidationReport;
use crate::workflow::catalog::Catalog;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Supported document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            other => Err(anyhow!("Unsupported file extension: {:?}", other)),
        }
    }
}

/// Export a report to YAML format.
pub fn export_yaml(report: &ValidationReport, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(report)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a report to JSON format.
pub fn export_json(report: &ValidationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export a report in the format implied by the path's extension.
pub fn export_report(report: &ValidationReport, path: &Path) -> Result<()> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => export_yaml(report, path),
        DocumentFormat::Json => export_json(report, path),
    }
}

/// Import a previously exported report.
pub fn import_report(path: &Path) -> Result<ValidationReport> {
    let text = std::fs::read_to_string(path)?;
    let report = match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => serde_yaml::from_str(&text)?,
        DocumentFormat::Json => serde_json::from_str(&text)?,
    };
    Ok(report)
}

/// Load a catalog fixture from YAML or JSON.
pub fn import_catalog(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)?;
    let catalog = match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => Catalog::from_yaml_str(&text)?,
        DocumentFormat::Json => Catalog::from_json_str(&text)?,
    };
    Ok(catalog)
}
