// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map overlay of plot boundaries and pole positions.
//!
//! Coordinates are projected into the canvas rectangle through normalized
//! map space, so the overlay has no dependency on a tile provider.

use super::status_color;
use crate::models::plot::{GeoPoint, Plot, PlotId};
use crate::models::result::ValidationResult;
use crate::util::geometry::{denormalize_coordinates, normalize_coordinates, GeoBounds};

/// Result of map interaction.
pub enum MapAction {
    None,
    SelectPlot(PlotId),
}

const POLE_RADIUS: f32 = 5.0;

pub fn show(
    ui: &mut egui::Ui,
    plots: &[Plot],
    results: &[&ValidationResult],
    selected: Option<PlotId>,
    center: GeoPoint,
) -> MapAction {
    let mut action = MapAction::None;

    let points = plots
        .iter()
        .flat_map(|p| p.boundary.iter())
        .chain(results.iter().copied().map(|r| &r.position));
    let bounds = GeoBounds::enclosing(points)
        .unwrap_or(GeoBounds { min: center, max: center })
        .padded(0.1);

    let size = egui::vec2(ui.available_width().max(320.0), 360.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(226, 232, 240));

    let to_screen = |p: &GeoPoint| {
        let (x, y) = normalize_coordinates(p, &bounds);
        egui::pos2(
            rect.min.x + x as f32 * rect.width(),
            rect.min.y + y as f32 * rect.height(),
        )
    };

    for plot in plots {
        let is_selected = selected == Some(plot.id);
        draw_plot(&painter, plot, is_selected, &to_screen);
    }

    for result in results {
        let pos = to_screen(&result.position);
        painter.circle_filled(pos, POLE_RADIUS, status_color(result.status));
        painter.circle_stroke(pos, POLE_RADIUS, egui::Stroke::new(1.0, egui::Color32::WHITE));
    }

    if let Some(pointer) = response.hover_pos() {
        let geo = pointer_to_geo(pointer, rect, &bounds);
        let hovered = results
            .iter()
            .find(|r| to_screen(&r.position).distance(pointer) <= POLE_RADIUS + 2.0);

        let text = match hovered {
            Some(result) => {
                let plot = plots.iter().find(|p| p.id == result.plot_id);
                let inside = plot.map(|p| p.contains(&result.position)).unwrap_or(false);
                format!(
                    "Pole {}: {} ({}%)\n{}",
                    result.pole_id,
                    result.status.label(),
                    result.confidence,
                    if inside { "Inside plot boundary" } else { "Outside plot boundary" }
                )
            }
            None => format!("{:.6}, {:.6}", geo.lat, geo.lng),
        };
        response.clone().on_hover_text_at_pointer(text);
    }

    if response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let geo = pointer_to_geo(pointer, rect, &bounds);
            if let Some(plot) = plots.iter().find(|p| p.contains(&geo)) {
                action = MapAction::SelectPlot(plot.id);
            }
        }
    }

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("Center: {:.4}, {:.4}", center.lat, center.lng)).weak());
        ui.separator();
        ui.label(egui::RichText::new("Click a plot to select it").weak());
    });

    action
}

fn pointer_to_geo(pointer: egui::Pos2, rect: egui::Rect, bounds: &GeoBounds) -> GeoPoint {
    let x = ((pointer.x - rect.min.x) / rect.width()) as f64;
    let y = ((pointer.y - rect.min.y) / rect.height()) as f64;
    denormalize_coordinates(x, y, bounds)
}

fn draw_plot(
    painter: &egui::Painter,
    plot: &Plot,
    is_selected: bool,
    to_screen: &impl Fn(&GeoPoint) -> egui::Pos2,
) {
    if plot.boundary.is_empty() {
        return;
    }

    let screen_points: Vec<egui::Pos2> = plot.boundary.iter().map(to_screen).collect();
    let (stroke, fill) = if is_selected {
        (
            egui::Stroke::new(3.0, egui::Color32::from_rgb(37, 99, 235)),
            egui::Color32::from_rgba_unmultiplied(37, 99, 235, 40),
        )
    } else {
        (
            egui::Stroke::new(2.0, egui::Color32::from_rgb(100, 116, 139)),
            egui::Color32::from_rgba_unmultiplied(100, 116, 139, 20),
        )
    };

    painter.add(egui::Shape::convex_polygon(screen_points.clone(), fill, egui::Stroke::NONE));
    painter.add(egui::Shape::closed_line(screen_points.clone(), stroke));

    for point in &screen_points {
        painter.circle_filled(*point, 3.0, stroke.color);
    }

    if let Some(centroid) = plot.centroid() {
        painter.text(
            to_screen(&centroid),
            egui::Align2::CENTER_CENTER,
            &plot.name,
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(40),
        );
    }
}
