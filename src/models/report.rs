// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exportable validation report.
//!
//! The report bundles the current result set, its status summary and the
//! session's media assets into one serializable document.

use super::asset::{AnalysisOutcome, MediaAsset, MediaKind};
use super::plot::PlotId;
use super::result::{ResultSummary, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One asset entry in an exported report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub kind: MediaKind,
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AnalysisOutcome>,
}

impl From<&MediaAsset> for AssetEntry {
    fn from(asset: &MediaAsset) -> Self {
        Self {
            name: asset.display_name.clone(),
            kind: asset.kind,
            processed: asset.is_processed(),
            outcome: asset.analysis().copied(),
        }
    }
}

/// Complete report data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    /// Plot the results were filtered to, if any
    pub plot_filter: Option<PlotId>,
    pub summary: ResultSummary,
    pub results: Vec<ValidationResult>,
    pub assets: Vec<AssetEntry>,
}

impl ValidationReport {
    /// Create a report stamped with the current time.
    pub fn new(
        plot_filter: Option<PlotId>,
        summary: ResultSummary,
        results: Vec<ValidationResult>,
        assets: Vec<AssetEntry>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            plot_filter,
            summary,
            results,
            assets,
        }
    }
}
