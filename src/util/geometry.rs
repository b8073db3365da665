// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides polygon tests over geographic coordinates and the
//! transformation between coordinates and normalized map space used by the
//! map overlay.

use crate::models::plot::GeoPoint;

/// Axis-aligned bounding box over geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = GeoBounds { min: first, max: first };
        for p in iter {
            bounds.min.lat = bounds.min.lat.min(p.lat);
            bounds.min.lng = bounds.min.lng.min(p.lng);
            bounds.max.lat = bounds.max.lat.max(p.lat);
            bounds.max.lng = bounds.max.lng.max(p.lng);
        }
        Some(bounds)
    }

    /// Grow the box by a fraction of its size on every side.
    pub fn padded(&self, fraction: f64) -> Self {
        let dlat = (self.max.lat - self.min.lat).max(f64::EPSILON) * fraction;
        let dlng = (self.max.lng - self.min.lng).max(f64::EPSILON) * fraction;
        GeoBounds {
            min: GeoPoint::new(self.min.lat - dlat, self.min.lng - dlng),
            max: GeoPoint::new(self.max.lat + dlat, self.max.lng + dlng),
        }
    }
}

/// Convert a coordinate to normalized map space (0.0 to 1.0).
///
/// Longitude maps to x, latitude to y with north at the top.
pub fn normalize_coordinates(point: &GeoPoint, bounds: &GeoBounds) -> (f64, f64) {
    let width = (bounds.max.lng - bounds.min.lng).max(f64::EPSILON);
    let height = (bounds.max.lat - bounds.min.lat).max(f64::EPSILON);
    (
        (point.lng - bounds.min.lng) / width,
        (bounds.max.lat - point.lat) / height,
    )
}

/// Convert normalized map space back to a coordinate.
pub fn denormalize_coordinates(x: f64, y: f64, bounds: &GeoBounds) -> GeoPoint {
    GeoPoint::new(
        bounds.max.lat - y * (bounds.max.lat - bounds.min.lat),
        bounds.min.lng + x * (bounds.max.lng - bounds.min.lng),
    )
}

/// Even-odd ray casting test. The polygon is implicitly closed.
pub fn point_in_polygon(point: &GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (&polygon[i], &polygon[j]);
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Vertex average of a polygon.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(GeoPoint::new(lat / n, lng / n))
}
