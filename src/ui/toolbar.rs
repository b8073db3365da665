// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! View tabs and validation mode selection.

use crate::workflow::controller::{ActiveView, ValidationMode};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SelectView(ActiveView),
    SetMode(ValidationMode),
}

/// Display the tab strip and mode selector.
pub fn show(ui: &mut egui::Ui, active: ActiveView, mode: ValidationMode) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        for view in ActiveView::ALL {
            if ui.selectable_label(active == view, view.label()).clicked() && active != view {
                action = ToolbarAction::SelectView(view);
            }
        }

        ui.separator();

        ui.label("⚙ Mode:");
        let mut selected = mode;
        egui::ComboBox::from_id_source("validation_mode")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for option in [ValidationMode::Realtime, ValidationMode::Batch] {
                    ui.selectable_value(&mut selected, option, option.label());
                }
            });
        if selected != mode {
            action = ToolbarAction::SetMode(selected);
        }

        ui.separator();

        let hint = match active {
            ActiveView::Upload => "Add images (JPG, PNG) or videos (MP4, MOV)",
            ActiveView::Camera => "Start the camera, then capture frames as assets",
            ActiveView::Analysis => "Run validation over every pending asset",
            ActiveView::Results => "Browse geo-tagged results for the selected plot",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
