// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Validation results and aggregate statistics.

use super::asset::PoleStatus;
use super::plot::{GeoPoint, PlotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prior pole placement analysis tied to a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub id: u32,
    pub plot_id: PlotId,
    pub pole_id: String,
    pub position: GeoPoint,
    pub status: PoleStatus,
    pub confidence: u8,
    /// Fixtures without a timestamp are stamped when loaded.
    #[serde(default = "chrono::Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Status counts over a set of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub warning_count: usize,
}

impl ResultSummary {
    /// Count one more status.
    pub fn record(&mut self, status: PoleStatus) {
        self.total += 1;
        match status {
            PoleStatus::Valid => self.valid_count += 1,
            PoleStatus::Invalid => self.invalid_count += 1,
            PoleStatus::Warning => self.warning_count += 1,
        }
    }

    pub fn count(&self, status: PoleStatus) -> usize {
        match status {
            PoleStatus::Valid => self.valid_count,
            PoleStatus::Invalid => self.invalid_count,
            PoleStatus::Warning => self.warning_count,
        }
    }
}
