// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis view: start validation and inspect per-asset outcomes.

use super::previews::PreviewCache;
use super::status_badge;
use super::upload::fit;
use crate::workflow::assets::AssetStore;

pub enum AnalysisAction {
    None,
    StartValidation,
}

const THUMB: egui::Vec2 = egui::vec2(80.0, 80.0);

pub fn show(
    ui: &mut egui::Ui,
    store: &AssetStore,
    previews: &mut PreviewCache,
    can_start: bool,
    validating: bool,
) -> AnalysisAction {
    let mut action = AnalysisAction::None;

    ui.horizontal(|ui| {
        ui.heading("AI Analysis");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if validating { "Processing..." } else { "Start AI Validation" };
            if ui.add_enabled(can_start, egui::Button::new(label)).clicked() {
                action = AnalysisAction::StartValidation;
            }
        });
    });
    ui.add_space(8.0);

    if validating {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("AI Processing in Progress").strong());
                    ui.label("Analyzing pole positions and validating placement...");
                });
            });
        });
        ui.add_space(8.0);
    }

    let pending = store.unprocessed().count();
    if pending > 0 && !validating {
        ui.label(egui::RichText::new(format!("{} assets awaiting validation", pending)).weak());
    }

    let ctx = ui.ctx().clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for asset in store.list() {
            let Some(outcome) = asset.analysis() else {
                continue;
            };

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    match previews.texture_for(&ctx, asset) {
                        Some(texture) => {
                            ui.image((texture.id(), fit(texture.size_vec2(), THUMB)));
                        }
                        None => {
                            ui.add_sized(THUMB, egui::Label::new(egui::RichText::new("🎞").size(28.0)));
                        }
                    }

                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&asset.display_name).strong());
                        egui::Grid::new(("outcome", asset.id.0)).num_columns(3).show(ui, |ui| {
                            ui.label(egui::RichText::new("Confidence").weak());
                            ui.label(egui::RichText::new("Status").weak());
                            ui.label(egui::RichText::new("Objects").weak());
                            ui.end_row();

                            ui.label(format!("{}%", outcome.confidence));
                            ui.label(status_badge(outcome.status));
                            ui.label(outcome.detected_object_count.to_string());
                            ui.end_row();
                        });
                    });
                });
            });
        }
    });

    action
}
