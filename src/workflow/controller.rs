// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Workflow controller.
//!
//! Owns every store and is the only thing that mutates them. Background
//! work (ingestion, validation) is started here and its results are applied
//! in [`WorkflowController::poll`], one whole batch at a time, so observers
//! never see a partially applied batch.

use super::assets::AssetStore;
use super::catalog::{aggregate, Catalog};
use super::engine::{BatchOutcome, ValidationEngine, ValidationRequest};
use super::tasks::{sleep_or_cancel, CancellationToken, PendingTask, TaskPoll};
use crate::capture::{CaptureHandle, Frame, MediaCapture};
use crate::error::{Result, WorkflowError};
use crate::io::media::{self, UploadFile};
use crate::models::asset::{AssetId, NewAsset};
use crate::models::plot::{Plot, PlotId};
use crate::models::report::{AssetEntry, ValidationReport};
use crate::models::result::{ResultSummary, ValidationResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Top-level views of the workbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Upload,
    Camera,
    Analysis,
    Results,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Upload,
        ActiveView::Camera,
        ActiveView::Analysis,
        ActiveView::Results,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Upload => "Upload",
            ActiveView::Camera => "Camera",
            ActiveView::Analysis => "Analysis",
            ActiveView::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingState {
    Idle,
    Running,
}

/// When validation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Validate new assets as soon as they land
    Realtime,
    /// Validate only on request
    Batch,
}

impl ValidationMode {
    pub fn label(&self) -> &'static str {
        match self {
            ValidationMode::Realtime => "Real-time",
            ValidationMode::Batch => "Batch Processing",
        }
    }
}

pub struct WorkflowController {
    view: ActiveView,
    mode: ValidationMode,
    store: AssetStore,
    catalog: Catalog,
    engine: ValidationEngine,
    capture: MediaCapture,
    camera: Option<CaptureHandle>,
    selected_plot: Option<PlotId>,
    ingest_delay: Duration,
    ingestions: Vec<PendingTask<Vec<NewAsset>>>,
    validation: Option<PendingTask<BatchOutcome>>,
}

impl WorkflowController {
    pub fn new(
        catalog: Catalog,
        engine: ValidationEngine,
        capture: MediaCapture,
        ingest_delay: Duration,
        mode: ValidationMode,
    ) -> Self {
        Self {
            view: ActiveView::Upload,
            mode,
            store: AssetStore::new(),
            catalog,
            engine,
            capture,
            camera: None,
            selected_plot: None,
            ingest_delay,
            ingestions: Vec::new(),
            validation: None,
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.view
    }

    /// Switch views. Leaving the camera view gives the camera back.
    pub fn select_view(&mut self, view: ActiveView) {
        if self.view == view {
            return;
        }
        if self.view == ActiveView::Camera {
            self.stop_camera();
        }
        log::debug!("View {:?} -> {:?}", self.view, view);
        self.view = view;
    }

    pub fn processing_state(&self) -> ProcessingState {
        if self.ingestions.is_empty() && self.validation.is_none() {
            ProcessingState::Idle
        } else {
            ProcessingState::Running
        }
    }

    pub fn is_validating(&self) -> bool {
        self.validation.is_some()
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn set_validation_mode(&mut self, mode: ValidationMode) {
        if self.mode != mode {
            log::info!("Validation mode set to {:?}", mode);
            self.mode = mode;
            self.auto_validate();
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ingest a batch of uploads in the background. Returns the number of
    /// files handed to the ingestion task.
    pub fn upload_files(&mut self, files: Vec<UploadFile>) -> usize {
        if files.is_empty() {
            return 0;
        }

        let count = files.len();
        let delay = self.ingest_delay;
        log::info!("Ingesting {} files", count);
        self.ingestions.push(PendingTask::spawn("asset-ingestion", move |token| async move {
            if sleep_or_cancel(&token, delay).await {
                return None;
            }
            Some(media::ingest(files))
        }));
        count
    }

    /// True when the validate affordance should be enabled.
    pub fn can_start_validation(&self) -> bool {
        self.processing_state() == ProcessingState::Idle && !self.store.is_empty()
    }

    /// Validate every unprocessed asset as one batch. Returns how many
    /// assets were dispatched.
    pub fn start_validation(&mut self) -> Result<usize> {
        if self.store.is_empty() {
            return Err(WorkflowError::NothingToValidate);
        }
        if self.processing_state() == ProcessingState::Running {
            return Err(WorkflowError::AlreadyRunning);
        }

        let ids: Vec<AssetId> = self.store.unprocessed().map(|a| a.id).collect();
        if ids.is_empty() {
            log::info!("All {} assets already processed", self.store.len());
            return Ok(0);
        }

        // Each asset gets a child of the batch token, so deleting it skips
        // only that asset while dropping the batch stops them all.
        let batch = CancellationToken::new();
        let mut requests = Vec::with_capacity(ids.len());
        for id in ids {
            let token = batch.child_token();
            if let Some(asset) = self.store.track_validation(id, token.clone()) {
                requests.push(ValidationRequest::for_asset(asset, token));
            }
        }
        let count = requests.len();
        log::info!("Starting validation of {} assets", count);

        self.validation = Some(self.engine.spawn_batch(batch, requests));
        Ok(count)
    }

    /// Delete an asset, dropping any outcome still being computed for it.
    pub fn delete_asset(&mut self, id: AssetId) -> bool {
        let Some(asset) = self.store.remove(id) else {
            return false;
        };
        let name = asset.display_name.clone();
        drop(asset);
        log::info!(
            "Deleted asset {} ({}), {} display handles live",
            id,
            name,
            self.store.displays().live_count()
        );
        true
    }

    pub fn selected_plot(&self) -> Option<&Plot> {
        self.selected_plot.and_then(|id| self.catalog.plot(id))
    }

    pub fn select_plot(&mut self, id: PlotId) -> Result<()> {
        if self.catalog.plot(id).is_none() {
            return Err(WorkflowError::NotFound(format!("plot {}", id)));
        }
        self.selected_plot = Some(id);
        Ok(())
    }

    pub fn clear_plot_selection(&mut self) {
        self.selected_plot = None;
    }

    /// Results filtered to the selected plot, if any.
    pub fn visible_results(&self) -> Vec<&ValidationResult> {
        self.catalog.list_results(self.selected_plot)
    }

    pub fn statistics(&self) -> ResultSummary {
        aggregate(self.visible_results())
    }

    /// Snapshot of the current results and assets for export.
    pub fn build_report(&self) -> ValidationReport {
        let results: Vec<ValidationResult> = self.visible_results().into_iter().cloned().collect();
        ValidationReport::new(
            self.selected_plot,
            aggregate(&results),
            results,
            self.store.list().iter().map(AssetEntry::from).collect(),
        )
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_some()
    }

    pub fn camera_backend(&self) -> &str {
        self.capture.backend_name()
    }

    pub fn start_camera(&mut self) -> Result<()> {
        if self.camera.is_none() {
            self.camera = Some(self.capture.acquire()?);
        }
        Ok(())
    }

    pub fn stop_camera(&mut self) {
        if let Some(handle) = self.camera.take() {
            self.capture.release(handle);
        }
    }

    /// Current camera frame for live preview, `None` when stopped.
    pub fn preview_frame(&mut self) -> Result<Option<Frame>> {
        match self.camera.as_mut() {
            Some(handle) => handle.read_frame().map(Some),
            None => Ok(None),
        }
    }

    /// Capture the current frame as a new image asset.
    pub fn capture_image(&mut self) -> Result<AssetId> {
        let handle = self
            .camera
            .as_mut()
            .ok_or_else(|| WorkflowError::CaptureFailed("camera is not running".to_string()))?;
        let asset = self.capture.capture_frame(handle)?;
        let name = asset.display_name.clone();
        let id = self.store.add(asset);
        log::info!("Captured {} as asset {}", name, id);
        self.auto_validate();
        Ok(id)
    }

    /// Apply every finished background task. Returns true if any state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        let mut still_pending = Vec::with_capacity(self.ingestions.len());
        for task in self.ingestions.drain(..) {
            match task.poll() {
                TaskPoll::Pending => still_pending.push(task),
                TaskPoll::Ready(assets) => {
                    let added = assets.len();
                    for asset in assets {
                        self.store.add(asset);
                    }
                    log::info!("Ingested {} assets, store now holds {}", added, self.store.len());
                    changed = true;
                }
                TaskPoll::Abandoned => {
                    log::warn!("Ingestion task ended without a result");
                    changed = true;
                }
            }
        }
        self.ingestions = still_pending;

        let finished = match self.validation.as_ref().map(|task| task.poll()) {
            Some(TaskPoll::Ready(outcomes)) => Some(outcomes),
            Some(TaskPoll::Abandoned) => {
                log::warn!("Validation task ended without a result");
                Some(Vec::new())
            }
            Some(TaskPoll::Pending) | None => None,
        };
        if let Some(outcomes) = finished {
            // Dropping the task cancels the batch token, so apply first
            let task = self.validation.take();
            self.apply_outcomes(outcomes);
            drop(task);
            changed = true;
        }

        if changed {
            self.auto_validate();
        }
        changed
    }

    /// Drain background work before exit without starting new validation.
    /// Returns true if everything finished within `timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.mode = ValidationMode::Batch;
        self.stop_camera();
        self.block_until_idle(timeout)
    }

    /// Poll until idle or until `timeout` passes. Returns true if idle.
    pub fn block_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if self.processing_state() == ProcessingState::Idle {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep((deadline - now).min(Duration::from_millis(5)));
        }
    }

    fn apply_outcomes(&mut self, outcomes: BatchOutcome) {
        let mut applied = 0;
        for (id, outcome) in outcomes {
            let cancelled = self
                .store
                .get(id)
                .and_then(|asset| asset.pending.as_ref())
                .map_or(true, |token| token.is_cancelled());
            if cancelled {
                log::debug!("Discarding outcome for deleted asset {}", id);
                continue;
            }
            if !outcome.is_well_formed() {
                log::warn!("Discarding out-of-range outcome for {}: {:?}", id, outcome);
                continue;
            }
            match self.store.mark_processed(id, outcome) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("Could not apply outcome to {}: {}", id, e),
            }
        }
        log::info!("Validation finished, {} outcomes applied", applied);
    }

    fn auto_validate(&mut self) {
        if self.mode != ValidationMode::Realtime || self.processing_state() == ProcessingState::Running {
            return;
        }
        if self.store.unprocessed().next().is_none() {
            return;
        }
        if let Err(e) = self.start_validation() {
            log::debug!("Real-time validation not started: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::synthetic::SyntheticCamera;
    use crate::capture::testing::{Counters, FlakyCamera, MissingCamera};
    use crate::models::asset::{AnalysisOutcome, MediaKind, PoleStatus};
    use crate::workflow::engine::{OutcomePolicy, RandomOutcomePolicy};
    use std::sync::Arc;

    const WAIT: Duration = Duration::from_secs(10);

    struct Fixed;

    impl OutcomePolicy for Fixed {
        fn assess(&self, _request: &ValidationRequest) -> AnalysisOutcome {
            AnalysisOutcome {
                confidence: 77,
                status: PoleStatus::Warning,
                detected_object_count: 2,
            }
        }
    }

    fn controller_with(policy: Arc<dyn OutcomePolicy>, latency: Duration, capture: MediaCapture) -> WorkflowController {
        WorkflowController::new(
            Catalog::builtin().unwrap(),
            ValidationEngine::new(policy, latency),
            capture,
            Duration::ZERO,
            ValidationMode::Batch,
        )
    }

    fn controller(latency: Duration) -> WorkflowController {
        controller_with(
            Arc::new(RandomOutcomePolicy),
            latency,
            MediaCapture::new(Box::new(SyntheticCamera::new(32, 24))),
        )
    }

    fn images(n: usize) -> Vec<UploadFile> {
        (0..n)
            .map(|i| UploadFile {
                name: format!("pole_{}.jpg", i),
                media_type: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8, i as u8],
            })
            .collect()
    }

    fn uploaded(latency: Duration, n: usize) -> WorkflowController {
        let mut ctl = controller(latency);
        ctl.upload_files(images(n));
        assert!(ctl.block_until_idle(WAIT));
        ctl
    }

    #[test]
    fn test_upload_adds_unprocessed_assets() {
        let mut ctl = controller(Duration::ZERO);
        let mut files = images(3);
        files.push(UploadFile {
            name: "readme.txt".to_string(),
            media_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        });

        assert_eq!(ctl.upload_files(files), 4);
        assert_eq!(ctl.processing_state(), ProcessingState::Running);
        assert!(ctl.block_until_idle(WAIT));

        assert_eq!(ctl.assets().len(), 3);
        assert!(ctl.assets().list().iter().all(|a| !a.is_processed()));
        assert!(ctl.assets().list().iter().all(|a| a.kind == MediaKind::Image));
    }

    #[test]
    fn test_ingestion_batch_lands_at_once() {
        let mut ctl = controller(Duration::ZERO);
        ctl.ingest_delay = Duration::from_millis(50);
        ctl.upload_files(images(5));

        // Either nothing or everything is visible
        while ctl.processing_state() == ProcessingState::Running {
            ctl.poll();
            let len = ctl.assets().len();
            assert!(len == 0 || len == 5, "partial batch of {}", len);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(ctl.assets().len(), 5);
    }

    #[test]
    fn test_validation_batch_lands_at_once() {
        let mut ctl = uploaded(Duration::from_millis(50), 5);
        assert_eq!(ctl.start_validation(), Ok(5));

        // Either no outcome or every outcome is visible
        while ctl.processing_state() == ProcessingState::Running {
            ctl.poll();
            let processed = ctl.assets().list().iter().filter(|a| a.is_processed()).count();
            assert!(processed == 0 || processed == 5, "partial batch of {}", processed);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(ctl.assets().list().iter().all(|a| a.is_processed()));
    }

    #[test]
    fn test_validation_rejected_while_ingesting() {
        let mut ctl = uploaded(Duration::ZERO, 2);
        ctl.ingest_delay = Duration::from_millis(200);
        ctl.upload_files(images(3));

        assert_eq!(ctl.start_validation(), Err(WorkflowError::AlreadyRunning));
        assert!(!ctl.can_start_validation());
        assert!(!ctl.is_validating());
        assert_eq!(ctl.assets().len(), 2);
        assert!(ctl.assets().list().iter().all(|a| !a.is_processed()));

        assert!(ctl.block_until_idle(WAIT));
        assert_eq!(ctl.assets().len(), 5);
        assert!(ctl.assets().list().iter().all(|a| !a.is_processed()));
    }

    #[test]
    fn test_empty_upload_stays_idle() {
        let mut ctl = controller(Duration::ZERO);
        assert_eq!(ctl.upload_files(Vec::new()), 0);
        assert_eq!(ctl.processing_state(), ProcessingState::Idle);
    }

    #[test]
    fn test_validation_on_empty_store() {
        let mut ctl = controller(Duration::ZERO);
        assert_eq!(ctl.start_validation(), Err(WorkflowError::NothingToValidate));
        assert_eq!(ctl.processing_state(), ProcessingState::Idle);
        assert!(!ctl.can_start_validation());
    }

    #[test]
    fn test_validation_processes_every_asset() {
        let mut ctl = uploaded(Duration::ZERO, 3);
        assert!(ctl.can_start_validation());

        assert_eq!(ctl.start_validation(), Ok(3));
        assert_eq!(ctl.processing_state(), ProcessingState::Running);
        assert!(ctl.block_until_idle(WAIT));

        assert_eq!(ctl.assets().len(), 3);
        for asset in ctl.assets().list() {
            let outcome = asset.analysis().expect("processed asset has an outcome");
            assert!(asset.is_processed());
            assert!(outcome.confidence <= 100);
            assert!(outcome.detected_object_count >= 1);
            assert!(PoleStatus::ALL.contains(&outcome.status));
        }
    }

    #[test]
    fn test_injected_policy_decides_outcome() {
        let mut ctl = controller_with(
            Arc::new(Fixed),
            Duration::ZERO,
            MediaCapture::new(Box::new(SyntheticCamera::new(8, 8))),
        );
        ctl.upload_files(images(2));
        assert!(ctl.block_until_idle(WAIT));
        ctl.start_validation().unwrap();
        assert!(ctl.block_until_idle(WAIT));

        for asset in ctl.assets().list() {
            assert_eq!(asset.analysis().map(|o| o.status), Some(PoleStatus::Warning));
            assert_eq!(asset.analysis().map(|o| o.confidence), Some(77));
        }
    }

    #[test]
    fn test_overlapping_validation_is_rejected() {
        let mut ctl = uploaded(Duration::from_millis(200), 2);
        ctl.start_validation().unwrap();

        assert_eq!(ctl.start_validation(), Err(WorkflowError::AlreadyRunning));
        assert!(!ctl.can_start_validation());
        assert!(ctl.block_until_idle(WAIT));
        assert!(ctl.assets().list().iter().all(|a| a.is_processed()));
    }

    #[test]
    fn test_validation_only_dispatches_unprocessed() {
        let mut ctl = uploaded(Duration::ZERO, 2);
        ctl.start_validation().unwrap();
        assert!(ctl.block_until_idle(WAIT));

        ctl.upload_files(images(1));
        assert!(ctl.block_until_idle(WAIT));
        assert_eq!(ctl.start_validation(), Ok(1));
        assert!(ctl.block_until_idle(WAIT));
        assert_eq!(ctl.start_validation(), Ok(0));
        assert_eq!(ctl.processing_state(), ProcessingState::Idle);
    }

    #[test]
    fn test_delete_during_validation() {
        let mut ctl = uploaded(Duration::from_millis(100), 3);
        let doomed = ctl.assets().list()[1].id;

        ctl.start_validation().unwrap();
        assert!(ctl.delete_asset(doomed));
        assert!(ctl.block_until_idle(WAIT));

        assert_eq!(ctl.assets().len(), 2);
        assert!(!ctl.assets().contains(doomed));
        assert!(ctl.assets().list().iter().all(|a| a.is_processed()));
    }

    #[test]
    fn test_delete_releases_display_handle() {
        let mut ctl = uploaded(Duration::ZERO, 2);
        let id = ctl.assets().list()[0].id;
        assert_eq!(ctl.assets().displays().live_count(), 2);

        assert!(ctl.delete_asset(id));
        assert!(!ctl.delete_asset(id));
        assert_eq!(ctl.assets().displays().live_count(), 1);
    }

    #[test]
    fn test_select_plot() {
        let mut ctl = controller(Duration::ZERO);
        ctl.select_plot(PlotId(1)).unwrap();
        assert_eq!(ctl.selected_plot().map(|p| p.id), Some(PlotId(1)));
        assert_eq!(ctl.visible_results().len(), 2);

        let err = ctl.select_plot(PlotId(999)).unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
        assert_eq!(ctl.selected_plot().map(|p| p.id), Some(PlotId(1)));

        ctl.clear_plot_selection();
        assert_eq!(ctl.visible_results().len(), 3);
    }

    #[test]
    fn test_statistics_follow_selection() {
        let mut ctl = controller(Duration::ZERO);
        assert_eq!(ctl.statistics().total, 3);

        ctl.select_plot(PlotId(2)).unwrap();
        let stats = ctl.statistics();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.warning_count, 1);
    }

    #[test]
    fn test_select_view_has_no_side_effects() {
        let mut ctl = uploaded(Duration::ZERO, 1);
        ctl.select_plot(PlotId(2)).unwrap();

        for view in ActiveView::ALL {
            ctl.select_view(view);
            assert_eq!(ctl.active_view(), view);
        }
        assert_eq!(ctl.assets().len(), 1);
        assert_eq!(ctl.selected_plot().map(|p| p.id), Some(PlotId(2)));
        assert_eq!(ctl.processing_state(), ProcessingState::Idle);
    }

    #[test]
    fn test_leaving_camera_view_releases_device() {
        let counters = Counters::default();
        let mut ctl = controller_with(
            Arc::new(RandomOutcomePolicy),
            Duration::ZERO,
            MediaCapture::new(Box::new(FlakyCamera {
                counters: counters.clone(),
                fail_frames: false,
            })),
        );

        ctl.select_view(ActiveView::Camera);
        ctl.start_camera().unwrap();
        ctl.start_camera().unwrap();
        assert_eq!(counters.acquired(), 1);

        let id = ctl.capture_image().unwrap();
        assert_eq!(ctl.assets().get(id).map(|a| a.kind), Some(MediaKind::Image));

        ctl.select_view(ActiveView::Results);
        assert!(!ctl.camera_active());
        assert_eq!(counters.released(), 1);
    }

    #[test]
    fn test_failed_capture_keeps_camera_usable() {
        let counters = Counters::default();
        let mut ctl = controller_with(
            Arc::new(RandomOutcomePolicy),
            Duration::ZERO,
            MediaCapture::new(Box::new(FlakyCamera {
                counters: counters.clone(),
                fail_frames: true,
            })),
        );

        ctl.select_view(ActiveView::Camera);
        ctl.start_camera().unwrap();
        assert!(matches!(ctl.capture_image(), Err(WorkflowError::CaptureFailed(_))));
        assert!(ctl.camera_active());
        assert!(ctl.assets().is_empty());

        drop(ctl);
        assert_eq!(counters.released(), 1);
    }

    #[test]
    fn test_capture_without_camera() {
        let mut ctl = controller(Duration::ZERO);
        assert!(matches!(ctl.capture_image(), Err(WorkflowError::CaptureFailed(_))));
        assert_eq!(ctl.preview_frame(), Ok(None));
    }

    #[test]
    fn test_missing_camera_is_reported() {
        let mut ctl = controller_with(
            Arc::new(RandomOutcomePolicy),
            Duration::ZERO,
            MediaCapture::new(Box::new(MissingCamera)),
        );
        ctl.select_view(ActiveView::Camera);
        assert!(matches!(ctl.start_camera(), Err(WorkflowError::DeviceUnavailable(_))));
        assert!(!ctl.camera_active());
        assert_eq!(ctl.active_view(), ActiveView::Camera);
    }

    #[test]
    fn test_realtime_mode_validates_new_assets() {
        let mut ctl = controller(Duration::ZERO);
        ctl.set_validation_mode(ValidationMode::Realtime);
        ctl.upload_files(images(2));

        // Ingestion lands, then validation kicks off on its own
        assert!(ctl.block_until_idle(WAIT));
        assert_eq!(ctl.assets().len(), 2);
        assert!(ctl.assets().list().iter().all(|a| a.is_processed()));
    }

    #[test]
    fn test_shutdown_drains_without_validating() {
        let mut ctl = controller(Duration::ZERO);
        ctl.set_validation_mode(ValidationMode::Realtime);
        ctl.ingest_delay = Duration::from_millis(20);
        ctl.upload_files(images(2));

        assert!(ctl.shutdown(WAIT));
        assert_eq!(ctl.processing_state(), ProcessingState::Idle);
        assert_eq!(ctl.validation_mode(), ValidationMode::Batch);
        assert_eq!(ctl.assets().len(), 2);
        assert!(ctl.assets().list().iter().all(|a| !a.is_processed()));
    }

    #[test]
    fn test_report_reflects_session() {
        let mut ctl = uploaded(Duration::ZERO, 2);
        ctl.start_validation().unwrap();
        assert!(ctl.block_until_idle(WAIT));
        ctl.select_plot(PlotId(1)).unwrap();

        let report = ctl.build_report();
        assert_eq!(report.plot_filter, Some(PlotId(1)));
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.assets.len(), 2);
        assert!(report.assets.iter().all(|a| a.processed && a.outcome.is_some()));
    }

    #[test]
    fn test_upload_validate_delete_scenario() {
        let mut ctl = uploaded(Duration::from_millis(100), 3);
        assert_eq!(ctl.assets().len(), 3);
        assert!(ctl.assets().list().iter().all(|a| !a.is_processed()));

        ctl.start_validation().unwrap();
        let first = ctl.assets().list()[0].id;
        ctl.delete_asset(first);
        assert!(ctl.block_until_idle(WAIT));

        assert_eq!(ctl.assets().len(), 2);
        assert!(ctl.assets().list().iter().all(|a| a.is_processed()));
    }
}
