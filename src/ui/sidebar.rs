// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sidebar: plot selection, statistics and quick actions.

use super::status_color;
use crate::models::asset::PoleStatus;
use crate::models::plot::{Plot, PlotId};
use crate::models::result::ResultSummary;

/// Result of sidebar interaction.
pub enum SidebarAction {
    None,
    SelectPlot(PlotId),
    ClearPlot,
    ShowMap,
    Export,
    Upload,
}

pub fn show(ui: &mut egui::Ui, plots: &[Plot], selected: Option<PlotId>, stats: ResultSummary) -> SidebarAction {
    let mut action = SidebarAction::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Select Plot");
        ui.add_space(4.0);

        for plot in plots {
            let is_selected = selected == Some(plot.id);
            let response = egui::Frame::group(ui.style())
                .fill(if is_selected {
                    ui.visuals().selection.bg_fill.linear_multiply(0.3)
                } else {
                    egui::Color32::TRANSPARENT
                })
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new(&plot.name).strong());
                    ui.label(egui::RichText::new(format!("Area: {}", plot.area_label)).weak());
                    let status = if plot.is_active() { "active" } else { "inactive" };
                    ui.label(egui::RichText::new(status).small());
                })
                .response
                .interact(egui::Sense::click());

            if response.clicked() {
                action = if is_selected {
                    SidebarAction::ClearPlot
                } else {
                    SidebarAction::SelectPlot(plot.id)
                };
            }
        }

        ui.add_space(12.0);
        ui.separator();
        ui.heading("Statistics");
        ui.add_space(4.0);

        egui::Grid::new("statistics").num_columns(2).striped(true).show(ui, |ui| {
            ui.label("Total Poles Analyzed");
            ui.label(egui::RichText::new(stats.total.to_string()).strong());
            ui.end_row();

            for (label, status) in [
                ("Valid Placements", PoleStatus::Valid),
                ("Invalid Placements", PoleStatus::Invalid),
                ("Warnings", PoleStatus::Warning),
            ] {
                ui.label(label);
                ui.label(
                    egui::RichText::new(stats.count(status).to_string())
                        .strong()
                        .color(status_color(status)),
                );
                ui.end_row();
            }
        });

        ui.add_space(12.0);
        ui.separator();
        ui.heading("Quick Actions");
        ui.add_space(4.0);

        if ui.button("View Map Overlay").clicked() {
            action = SidebarAction::ShowMap;
        }
        if ui.button("Generate Report").clicked() {
            action = SidebarAction::Export;
        }
        if ui.button("Upload Files").clicked() {
            action = SidebarAction::Upload;
        }
    });

    action
}
