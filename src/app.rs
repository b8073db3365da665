// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app owns the workflow controller and translates UI actions into
//! controller operations. File reading happens on a worker thread so the
//! UI never blocks on disk.

use crate::io::media::{self, UploadFile};
use crate::io::serialization;
use crate::ui::{analysis, camera, map, previews::PreviewCache, results, sidebar, toolbar, upload};
use crate::workflow::controller::{ActiveView, ProcessingState, WorkflowController};
use crate::workflow::tasks::{CancellationToken, PendingTask, TaskPoll};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const CAMERA_FRAME_INTERVAL: Duration = Duration::from_millis(66);
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm", "mkv"];

/// Message shown in the status bar until dismissed.
struct Notice {
    message: String,
    is_error: bool,
}

pub struct PoleValidationApp {
    controller: WorkflowController,
    previews: PreviewCache,

    /// Live camera preview, replaced in place as frames arrive
    camera_texture: Option<egui::TextureHandle>,
    last_camera_frame: Option<Instant>,
    captured: usize,

    show_map: bool,
    notice: Option<Notice>,

    /// Reads picked files off the UI thread
    upload_reader: Option<PendingTask<Vec<UploadFile>>>,
}

impl PoleValidationApp {
    pub fn new(controller: WorkflowController) -> Self {
        Self {
            controller,
            previews: PreviewCache::default(),
            camera_texture: None,
            last_camera_frame: None,
            captured: 0,
            show_map: false,
            notice: None,
            upload_reader: None,
        }
    }

    fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.notice = Some(Notice { message, is_error: false });
    }

    fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.notice = Some(Notice { message, is_error: true });
    }

    /// Open the native picker and read the chosen files in the background.
    fn pick_files(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images and videos", [IMAGE_EXTENSIONS, VIDEO_EXTENSIONS].concat().as_slice())
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("Videos", VIDEO_EXTENSIONS)
            .pick_files()
        else {
            return;
        };

        if self.upload_reader.is_some() {
            self.error("Still reading the previous selection");
            return;
        }

        log::info!("Reading {} picked files", paths.len());
        self.upload_reader = Some(PendingTask::spawn("upload-reader", move |token| async move {
            Some(read_uploads(paths, &token))
        }));
    }

    fn poll_reader(&mut self) {
        let Some(reader) = self.upload_reader.as_ref() else {
            return;
        };
        match reader.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(files) => {
                self.upload_reader = None;
                if files.is_empty() {
                    self.error("None of the selected files could be read");
                } else {
                    let accepted = self.controller.upload_files(files);
                    self.info(format!("Processing {} files...", accepted));
                }
            }
            TaskPoll::Abandoned => {
                self.upload_reader = None;
                self.error("Reading the selected files failed");
            }
        }
    }

    fn export_report(&mut self, path: PathBuf) {
        let report = self.controller.build_report();
        match serialization::export_report(&report, &path) {
            Ok(()) => self.info(format!("Exported report to {}", path.display())),
            Err(e) => self.error(format!("Failed to export report: {:#}", e)),
        }
    }

    /// Load a previously exported report and summarize it.
    fn open_report(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Reports", &["yaml", "yml", "json"])
            .pick_file()
        else {
            return;
        };

        match serialization::import_report(&path) {
            Ok(report) => self.info(format!(
                "Report from {}: {} results ({} valid, {} invalid, {} warnings), {} assets",
                report.generated_at.format("%Y-%m-%d %H:%M"),
                report.summary.total,
                report.summary.valid_count,
                report.summary.invalid_count,
                report.summary.warning_count,
                report.assets.len()
            )),
            Err(e) => self.error(format!("Failed to open report: {:#}", e)),
        }
    }

    fn prompt_export(&mut self, name: &str, extensions: &[&str]) {
        let label = extensions.first().copied().unwrap_or_default().to_uppercase();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(label, extensions)
            .set_file_name(format!("pole_validation_report.{}", name))
            .save_file()
        {
            self.export_report(path);
        }
    }

    fn start_validation(&mut self) {
        match self.controller.start_validation() {
            Ok(0) => self.info("Every asset has already been validated"),
            Ok(count) => self.info(format!("Validating {} assets", count)),
            Err(e) => self.error(e.to_string()),
        }
    }

    fn select_view(&mut self, view: ActiveView) {
        self.controller.select_view(view);
        if !self.controller.camera_active() {
            self.camera_texture = None;
        }
    }

    fn handle_camera(&mut self, action: camera::CameraAction) {
        match action {
            camera::CameraAction::Start => match self.controller.start_camera() {
                Ok(()) => {
                    self.last_camera_frame = None;
                    self.info(format!("Camera started ({})", self.controller.camera_backend()));
                }
                Err(e) => self.error(format!("Unable to access camera: {}", e)),
            },
            camera::CameraAction::Stop => {
                self.controller.stop_camera();
                self.camera_texture = None;
            }
            camera::CameraAction::Capture => match self.controller.capture_image() {
                Ok(id) => {
                    self.captured += 1;
                    self.info(format!("Captured image as asset {}", id));
                }
                Err(e) => self.error(e.to_string()),
            },
            camera::CameraAction::None => {}
        }
    }

    /// Pull a fresh camera frame into the preview texture, throttled.
    fn refresh_camera(&mut self, ctx: &egui::Context) {
        if !self.controller.camera_active() {
            return;
        }
        if self
            .last_camera_frame
            .is_some_and(|at| at.elapsed() < CAMERA_FRAME_INTERVAL)
        {
            return;
        }
        self.last_camera_frame = Some(Instant::now());

        match self.controller.preview_frame() {
            Ok(Some(frame)) => {
                let Some(preview) = media::frame_to_preview(&frame) else {
                    return;
                };
                let size = [preview.width as usize, preview.height as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, &preview.pixels);
                match self.camera_texture.as_mut() {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.camera_texture =
                            Some(ctx.load_texture("camera_preview", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                self.controller.stop_camera();
                self.camera_texture = None;
                self.error(format!("Camera stopped: {}", e));
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Upload Files... (Ctrl+O)").clicked() {
                    ui.close_menu();
                    self.pick_files();
                }
                if ui.button("Open Report...").clicked() {
                    ui.close_menu();
                    self.open_report();
                }
                ui.separator();
                ui.menu_button("Export Report", |ui| {
                    if ui.button("Export as YAML...").clicked() {
                        ui.close_menu();
                        self.prompt_export("yaml", &["yaml", "yml"]);
                    }
                    if ui.button("Export as JSON...").clicked() {
                        ui.close_menu();
                        self.prompt_export("json", &["json"]);
                    }
                });
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                for view in ActiveView::ALL {
                    if ui.button(view.label()).clicked() {
                        ui.close_menu();
                        self.select_view(view);
                    }
                }
                ui.separator();
                ui.checkbox(&mut self.show_map, "Map Overlay");
            });
        });
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.controller.processing_state() {
                ProcessingState::Running => {
                    ui.spinner();
                    ui.label(if self.controller.is_validating() { "Validating..." } else { "Processing files..." });
                }
                ProcessingState::Idle => {
                    ui.label(egui::RichText::new("Idle").weak());
                }
            }
            ui.separator();
            ui.label(format!("{} assets", self.controller.assets().len()));

            let mut dismiss = false;
            if let Some(notice) = &self.notice {
                ui.separator();
                let color = if notice.is_error {
                    egui::Color32::from_rgb(220, 38, 38)
                } else {
                    ui.visuals().text_color()
                };
                ui.label(egui::RichText::new(&notice.message).color(color));
                dismiss = ui.small_button("✖").clicked();
            }
            if dismiss {
                self.notice = None;
            }
        });
    }
}

/// Read every path, skipping the ones that fail.
fn read_uploads(paths: Vec<PathBuf>, token: &CancellationToken) -> Vec<UploadFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        if token.is_cancelled() {
            break;
        }
        match media::read_upload(&path) {
            Ok(file) => files.push(file),
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }
    files
}

impl eframe::App for PoleValidationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_reader();
        self.controller.poll();
        self.previews.prune(self.controller.assets());
        self.refresh_camera(ctx);

        if self.upload_reader.is_some() || self.controller.processing_state() == ProcessingState::Running {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
        if self.controller.camera_active() {
            ctx.request_repaint_after(CAMERA_FRAME_INTERVAL);
        }

        if ctx.input_mut(|i| {
            i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))
        }) {
            self.pick_files();
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.menu_bar(ctx, ui));

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.controller.active_view(), self.controller.validation_mode())
            })
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::SelectView(view) => self.select_view(view),
            toolbar::ToolbarAction::SetMode(mode) => {
                self.controller.set_validation_mode(mode);
                self.info(format!("Validation mode: {}", mode.label()));
            }
            toolbar::ToolbarAction::None => {}
        }

        let sidebar_action = egui::SidePanel::right("sidebar")
            .default_width(260.0)
            .show(ctx, |ui| {
                sidebar::show(
                    ui,
                    self.controller.catalog().list_plots(),
                    self.controller.selected_plot().map(|p| p.id),
                    self.controller.statistics(),
                )
            })
            .inner;
        match sidebar_action {
            sidebar::SidebarAction::SelectPlot(id) => {
                if let Err(e) = self.controller.select_plot(id) {
                    self.error(e.to_string());
                }
            }
            sidebar::SidebarAction::ClearPlot => self.controller.clear_plot_selection(),
            sidebar::SidebarAction::ShowMap => self.show_map = true,
            sidebar::SidebarAction::Export => self.prompt_export("yaml", &["yaml", "yml", "json"]),
            sidebar::SidebarAction::Upload => self.pick_files(),
            sidebar::SidebarAction::None => {}
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.status_bar(ui));

        let view = self.controller.active_view();
        let ingesting = self.upload_reader.is_some()
            || (self.controller.processing_state() == ProcessingState::Running && !self.controller.is_validating());
        let camera_active = self.controller.camera_active();

        egui::CentralPanel::default().show(ctx, |ui| match view {
            ActiveView::Upload => {
                match upload::show(ui, self.controller.assets(), &mut self.previews, ingesting) {
                    upload::UploadAction::PickFiles => self.pick_files(),
                    upload::UploadAction::Delete(id) => {
                        if self.controller.delete_asset(id) {
                            self.info(format!("Removed asset {}", id));
                        }
                    }
                    upload::UploadAction::None => {}
                }
            }
            ActiveView::Camera => {
                let action = camera::show(
                    ui,
                    self.camera_texture.as_ref(),
                    camera_active,
                    self.controller.camera_backend(),
                    self.captured,
                );
                self.handle_camera(action);
            }
            ActiveView::Analysis => {
                let action = analysis::show(
                    ui,
                    self.controller.assets(),
                    &mut self.previews,
                    self.controller.can_start_validation(),
                    self.controller.is_validating(),
                );
                if let analysis::AnalysisAction::StartValidation = action {
                    self.start_validation();
                }
            }
            ActiveView::Results => {
                let action = results::show(
                    ui,
                    &self.controller.visible_results(),
                    self.controller.selected_plot(),
                );
                if let results::ResultsAction::Export = action {
                    self.prompt_export("yaml", &["yaml", "yml", "json"]);
                }
            }
        });

        let mut show_map = self.show_map;
        let map_action = egui::Window::new("Map Overlay")
            .open(&mut show_map)
            .default_width(560.0)
            .show(ctx, |ui| {
                map::show(
                    ui,
                    self.controller.catalog().list_plots(),
                    &self.controller.visible_results(),
                    self.controller.selected_plot().map(|p| p.id),
                    self.controller.catalog().map_center(),
                )
            })
            .and_then(|response| response.inner)
            .unwrap_or(map::MapAction::None);
        self.show_map = show_map;

        if let map::MapAction::SelectPlot(id) = map_action {
            if let Err(e) = self.controller.select_plot(id) {
                self.error(e.to_string());
            }
        }
    }
}

impl Drop for PoleValidationApp {
    fn drop(&mut self) {
        self.upload_reader = None;
        if !self.controller.shutdown(SHUTDOWN_GRACE) {
            log::warn!("Exiting with background work still running");
        }
    }
}
