// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload view: file picker and the grid of ingested assets.

use super::previews::PreviewCache;
use crate::models::asset::{AssetId, MediaKind};
use crate::workflow::assets::AssetStore;

pub enum UploadAction {
    None,
    PickFiles,
    Delete(AssetId),
}

const TILE: egui::Vec2 = egui::vec2(160.0, 90.0);

pub fn show(ui: &mut egui::Ui, store: &AssetStore, previews: &mut PreviewCache, busy: bool) -> UploadAction {
    let mut action = UploadAction::None;

    ui.heading("Upload Images/Videos");
    ui.add_space(8.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            if ui.button(egui::RichText::new("⬆ Choose files to upload").size(16.0)).clicked() {
                action = UploadAction::PickFiles;
            }
            ui.label(
                egui::RichText::new("Support for images (JPG, PNG) and videos (MP4, MOV)")
                    .weak(),
            );
            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing files...");
                });
            }
            ui.add_space(12.0);
        });
    });

    if store.is_empty() {
        return action;
    }

    ui.add_space(12.0);
    ui.label(egui::RichText::new(format!("Uploaded Files ({})", store.len())).strong());
    ui.add_space(4.0);

    let ctx = ui.ctx().clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for asset in store.list() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(TILE.x);
                    ui.vertical(|ui| {
                        match previews.texture_for(&ctx, asset) {
                            Some(texture) => {
                                ui.image((texture.id(), fit(texture.size_vec2(), TILE)));
                            }
                            None => {
                                let label = match asset.kind {
                                    MediaKind::Image => "🖼 image",
                                    MediaKind::Video => "🎞 video",
                                };
                                ui.add_sized(TILE, egui::Label::new(egui::RichText::new(label).weak()));
                            }
                        }

                        ui.label(egui::RichText::new(&asset.display_name).small());
                        ui.horizontal(|ui| {
                            let (text, color) = if asset.is_processed() {
                                ("Processed", egui::Color32::from_rgb(22, 163, 74))
                            } else {
                                ("Pending", egui::Color32::GRAY)
                            };
                            ui.label(egui::RichText::new(text).small().color(color));
                            let kb = asset.source.as_bytes().len() as f64 / 1024.0;
                            ui.label(egui::RichText::new(format!("{:.1} KB", kb)).small().weak());
                            if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                                action = UploadAction::Delete(asset.id);
                            }
                        });
                    });
                });
            }
        });
    });

    action
}

/// Scale `size` to fit inside `bounds`, keeping aspect ratio.
pub fn fit(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y);
    size * scale
}
