// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Plot and result catalog.
//!
//! Static reference data queried by the UI. The catalog is checked once
//! when loaded and is read-only afterwards.

use crate::error::{Result, WorkflowError};
use crate::models::plot::{GeoPoint, Plot, PlotId};
use crate::models::result::{ResultSummary, ValidationResult};
use crate::util::geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default fixture shipped with the application.
const BUILTIN_FIXTURE: &str = include_str!("../../fixtures/catalog.yaml");

/// Map center used when no plots are loaded (Nagpur).
const FALLBACK_CENTER: GeoPoint = GeoPoint {
    lat: 21.1458,
    lng: 79.0882,
};

/// Serialized shape of a catalog fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub plots: Vec<Plot>,
    #[serde(default)]
    pub results: Vec<ValidationResult>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    plots: Vec<Plot>,
    results: Vec<ValidationResult>,
}

impl Catalog {
    /// Build a catalog, rejecting fixtures that break referential or
    /// range invariants.
    pub fn new(fixture: CatalogFixture) -> Result<Self> {
        let CatalogFixture { plots, results } = fixture;

        let mut plot_ids = HashSet::new();
        for plot in &plots {
            if !plot_ids.insert(plot.id) {
                return Err(WorkflowError::DataIntegrity(format!("duplicate plot id {}", plot.id)));
            }
            if plot.boundary.len() < 3 {
                return Err(WorkflowError::DataIntegrity(format!(
                    "plot {} boundary has {} points, need at least 3",
                    plot.id,
                    plot.boundary.len()
                )));
            }
        }

        let mut result_ids = HashSet::new();
        for result in &results {
            if !result_ids.insert(result.id) {
                return Err(WorkflowError::DataIntegrity(format!("duplicate result id {}", result.id)));
            }
            if !plot_ids.contains(&result.plot_id) {
                return Err(WorkflowError::DataIntegrity(format!(
                    "result {} references unknown plot {}",
                    result.id, result.plot_id
                )));
            }
            if result.confidence > 100 {
                return Err(WorkflowError::DataIntegrity(format!(
                    "result {} confidence {} out of range",
                    result.id, result.confidence
                )));
            }
        }

        log::info!("Loaded catalog with {} plots and {} results", plots.len(), results.len());
        Ok(Self { plots, results })
    }

    /// Parse and check a YAML fixture. Unknown status values and other
    /// malformed records are integrity errors.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let fixture: CatalogFixture = serde_yaml::from_str(yaml)
            .map_err(|e| WorkflowError::DataIntegrity(format!("malformed catalog: {}", e)))?;
        Self::new(fixture)
    }

    /// Parse and check a JSON fixture.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let fixture: CatalogFixture = serde_json::from_str(json)
            .map_err(|e| WorkflowError::DataIntegrity(format!("malformed catalog: {}", e)))?;
        Self::new(fixture)
    }

    /// The fixture embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_FIXTURE)
    }

    pub fn list_plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == id)
    }

    /// Results in fixture order, optionally limited to one plot.
    pub fn list_results(&self, plot_id: Option<PlotId>) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| plot_id.map_or(true, |id| r.plot_id == id))
            .collect()
    }

    /// Centroid of every plot vertex.
    pub fn map_center(&self) -> GeoPoint {
        let vertices: Vec<GeoPoint> = self
            .plots
            .iter()
            .flat_map(|p| p.boundary.iter().copied())
            .collect();
        geometry::centroid(&vertices).unwrap_or(FALLBACK_CENTER)
    }
}

/// Count results by status.
pub fn aggregate<'a>(results: impl IntoIterator<Item = &'a ValidationResult>) -> ResultSummary {
    results.into_iter().fold(ResultSummary::default(), |mut summary, result| {
        summary.record(result.status);
        summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::PoleStatus;

    #[test]
    fn test_builtin_fixture_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.list_plots().len(), 2);
        assert_eq!(catalog.list_results(None).len(), 3);
        assert!(catalog.list_plots().iter().all(|p| p.boundary.len() >= 3));
    }

    #[test]
    fn test_results_filter_by_plot() {
        let catalog = Catalog::builtin().unwrap();
        let plot_a = catalog.list_results(Some(PlotId(1)));
        assert_eq!(plot_a.len(), 2);
        assert!(plot_a.iter().all(|r| r.plot_id == PlotId(1)));
        assert!(catalog.list_results(Some(PlotId(999))).is_empty());
    }

    #[test]
    fn test_aggregate_counts_sum_to_total() {
        let catalog = Catalog::builtin().unwrap();
        let summary = aggregate(catalog.list_results(None));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid_count, 1);
        assert_eq!(summary.invalid_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(
            summary.valid_count + summary.invalid_count + summary.warning_count,
            summary.total
        );

        let empty = aggregate(Vec::<&ValidationResult>::new());
        assert_eq!(empty, ResultSummary::default());
    }

    #[test]
    fn test_aggregate_sum_holds_for_repeated_statuses() {
        let catalog = Catalog::builtin().unwrap();
        let template = catalog.list_results(None)[0].clone();
        let results: Vec<ValidationResult> = (0..17)
            .map(|i| ValidationResult {
                id: i,
                status: PoleStatus::ALL[(i as usize * 7) % 3],
                ..template.clone()
            })
            .collect();

        let summary = aggregate(&results);
        assert_eq!(summary.total, 17);
        assert_eq!(
            PoleStatus::ALL.iter().map(|s| summary.count(*s)).sum::<usize>(),
            17
        );
    }

    #[test]
    fn test_unknown_status_is_integrity_error() {
        let yaml = r#"
plots:
  - id: 1
    name: Plot A
    boundary: [{lat: 0.0, lng: 0.0}, {lat: 1.0, lng: 0.0}, {lat: 1.0, lng: 1.0}]
    area_label: 1 acre
    status: active
results:
  - id: 1
    plot_id: 1
    pole_id: P001
    position: {lat: 0.5, lng: 0.5}
    status: pending
    confidence: 80
"#;
        let err = Catalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, WorkflowError::DataIntegrity(_)));
    }

    #[test]
    fn test_dangling_plot_reference_rejected() {
        let yaml = r#"
plots:
  - id: 1
    name: Plot A
    boundary: [{lat: 0.0, lng: 0.0}, {lat: 1.0, lng: 0.0}, {lat: 1.0, lng: 1.0}]
    area_label: 1 acre
    status: active
results:
  - id: 1
    plot_id: 2
    pole_id: P001
    position: {lat: 0.5, lng: 0.5}
    status: valid
    confidence: 80
"#;
        let err = Catalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, WorkflowError::DataIntegrity(ref msg) if msg.contains("unknown plot")));
    }

    #[test]
    fn test_short_boundary_rejected() {
        let yaml = r#"
plots:
  - id: 1
    name: Sliver
    boundary: [{lat: 0.0, lng: 0.0}, {lat: 1.0, lng: 0.0}]
    area_label: 0 acres
    status: inactive
"#;
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(WorkflowError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_map_center() {
        let catalog = Catalog::builtin().unwrap();
        let center = catalog.map_center();
        assert!(center.lat > 21.14 && center.lat < 21.15);
        assert!(center.lng > 79.08 && center.lng < 79.09);

        let empty = Catalog::new(CatalogFixture::default()).unwrap();
        assert_eq!(empty.map_center(), FALLBACK_CENTER);
    }
}
