// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Results view: catalog results for the selected plot.

use super::status_badge;
use crate::models::plot::Plot;
use crate::models::result::ValidationResult;

pub enum ResultsAction {
    None,
    Export,
}

pub fn show(ui: &mut egui::Ui, results: &[&ValidationResult], plot: Option<&Plot>) -> ResultsAction {
    let mut action = ResultsAction::None;

    ui.horizontal(|ui| {
        ui.heading("Validation Results");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⬇ Export Report").clicked() {
                action = ResultsAction::Export;
            }
        });
    });

    let scope = match plot {
        Some(plot) => format!("Showing {} results for {}", results.len(), plot.name),
        None => format!("Showing all {} results", results.len()),
    };
    ui.label(egui::RichText::new(scope).weak());
    ui.add_space(8.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for result in results {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("Pole {}", result.pole_id)).strong());
                    ui.label(status_badge(result.status));
                });
                ui.label(
                    egui::RichText::new(format!(
                        "Position: {:.6}, {:.6}",
                        result.position.lat, result.position.lng
                    ))
                    .weak(),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Confidence: {}% | {}",
                        result.confidence,
                        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                    ))
                    .weak(),
                );

                if !result.issues.is_empty() {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Issues:").color(egui::Color32::from_rgb(220, 38, 38)));
                    for issue in &result.issues {
                        ui.label(egui::RichText::new(format!("• {}", issue)).color(egui::Color32::from_rgb(239, 68, 68)));
                    }
                }
            });
        }
    });

    action
}
