// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Live camera capture view.

use super::upload::fit;

pub enum CameraAction {
    None,
    Start,
    Stop,
    Capture,
}

pub fn show(
    ui: &mut egui::Ui,
    preview: Option<&egui::TextureHandle>,
    active: bool,
    backend: &str,
    captured: usize,
) -> CameraAction {
    let mut action = CameraAction::None;

    ui.heading("Live Camera Capture");
    ui.add_space(8.0);

    let width = ui.available_width();
    let area = egui::vec2(width, width * 9.0 / 16.0);
    let (rect, _) = ui.allocate_exact_size(area, egui::Sense::hover());
    ui.painter().rect_filled(rect, 6.0, egui::Color32::BLACK);

    match preview {
        Some(texture) if active => {
            let size = fit(texture.size_vec2(), rect.size());
            let image_rect = egui::Rect::from_center_size(rect.center(), size);
            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        _ => {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Camera is off",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(150),
            );
        }
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if active {
            if ui.button("⏹ Stop Camera").clicked() {
                action = CameraAction::Stop;
            }
        } else if ui.button("📷 Start Camera").clicked() {
            action = CameraAction::Start;
        }

        if ui.add_enabled(active, egui::Button::new("Capture Image")).clicked() {
            action = CameraAction::Capture;
        }

        ui.separator();
        ui.label(egui::RichText::new(format!("Source: {}", backend)).weak());
        if captured > 0 {
            ui.separator();
            ui.label(format!("{} captured this session", captured));
        }
    });

    action
}
