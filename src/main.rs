// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pole Validation Workbench
//!
//! A desktop application for ingesting site imagery, validating pole
//! placements and reviewing geo-tagged results against surveyed plots.

mod app;
mod capture;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;
mod workflow;

use anyhow::{Context, Result};
use app::PoleValidationApp;
use config::AppConfig;
use std::sync::Arc;
use workflow::catalog::Catalog;
use workflow::controller::WorkflowController;
use workflow::engine::{RandomOutcomePolicy, ValidationEngine};

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;
    log::debug!("Loaded configuration: {:?}", config);

    let catalog = match &config.catalog_path {
        Some(path) => io::serialization::import_catalog(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };
    log::info!("Catalog holds {} plots", catalog.list_plots().len());

    let engine = ValidationEngine::new(Arc::new(RandomOutcomePolicy), config.validation_delay());
    let media_capture = capture::MediaCapture::new(capture::backend_for(&config.camera));
    let controller = WorkflowController::new(
        catalog,
        engine,
        media_capture,
        config.ingest_delay(),
        config.validation_mode,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Pole Validation Workbench"),
        ..Default::default()
    };

    eframe::run_native(
        "Pole Validation Workbench",
        options,
        Box::new(|_cc| Ok(Box::new(PoleValidationApp::new(controller)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
