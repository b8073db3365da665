// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Plot reference data.
//!
//! A plot is a named area bounded by a closed polygon of geographic
//! coordinates against which pole placements are checked.

use crate::util::geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotId(pub u32);

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Active,
    Inactive,
}

/// A reference area with a closed boundary polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub name: String,
    /// Vertices in order; the last vertex connects back to the first.
    pub boundary: Vec<GeoPoint>,
    pub area_label: String,
    pub status: PlotStatus,
}

impl Plot {
    /// Check whether a position falls inside the plot boundary.
    pub fn contains(&self, position: &GeoPoint) -> bool {
        geometry::point_in_polygon(position, &self.boundary)
    }

    pub fn centroid(&self) -> Option<GeoPoint> {
        geometry::centroid(&self.boundary)
    }

    pub fn is_active(&self) -> bool {
        self.status == PlotStatus::Active
    }
}
