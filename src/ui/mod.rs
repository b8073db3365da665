// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the pole validation workbench.

pub mod analysis;
pub mod camera;
pub mod map;
pub mod previews;
pub mod results;
pub mod sidebar;
pub mod toolbar;
pub mod upload;

use crate::models::asset::PoleStatus;

/// Text colour for a placement status.
pub fn status_color(status: PoleStatus) -> egui::Color32 {
    match status {
        PoleStatus::Valid => egui::Color32::from_rgb(22, 163, 74),
        PoleStatus::Invalid => egui::Color32::from_rgb(220, 38, 38),
        PoleStatus::Warning => egui::Color32::from_rgb(202, 138, 4),
    }
}

/// Status label with its icon, coloured.
pub fn status_badge(status: PoleStatus) -> egui::RichText {
    let icon = match status {
        PoleStatus::Valid => "✔",
        PoleStatus::Invalid => "✖",
        PoleStatus::Warning => "⚠",
    };
    egui::RichText::new(format!("{} {}", icon, status.label()))
        .color(status_color(status))
        .strong()
}
