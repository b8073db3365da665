// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory asset store.
//!
//! Keeps uploaded and captured media in insertion order, which is also the
//! display order. Only the workflow controller holds it mutably.

use super::display::DisplayRegistry;
use super::tasks::CancellationToken;
use crate::error::{Result, WorkflowError};
use crate::models::asset::{AnalysisOutcome, AssetId, MediaAsset, NewAsset};

#[derive(Debug, Default)]
pub struct AssetStore {
    assets: Vec<MediaAsset>,
    /// Last id handed out; ids are never reused
    last_id: u64,
    displays: DisplayRegistry,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an asset, assigning a fresh id and display handle.
    pub fn add(&mut self, asset: NewAsset) -> AssetId {
        self.last_id += 1;
        let id = AssetId(self.last_id);
        self.assets.push(MediaAsset {
            id,
            display_name: asset.display_name,
            kind: asset.kind,
            source: asset.source,
            preview: asset.preview,
            analysis: None,
            display: self.displays.allocate(),
            pending: None,
        });
        id
    }

    /// Remove an asset by identity, cancelling any validation still
    /// pending for it. Returns the removed asset, `None` if it was not
    /// present.
    pub fn remove(&mut self, id: AssetId) -> Option<MediaAsset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        let asset = self.assets.remove(index);
        if let Some(token) = &asset.pending {
            token.cancel();
        }
        Some(asset)
    }

    /// Tie an unprocessed asset to a validation run's token. Returns `None`
    /// for unknown or already processed assets.
    pub fn track_validation(&mut self, id: AssetId, token: CancellationToken) -> Option<&MediaAsset> {
        let asset = self.assets.iter_mut().find(|a| a.id == id && !a.is_processed())?;
        asset.pending = Some(token);
        Some(&*asset)
    }

    /// Attach an outcome to an unprocessed asset.
    pub fn mark_processed(&mut self, id: AssetId, outcome: AnalysisOutcome) -> Result<()> {
        let asset = self
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| WorkflowError::NotFound(format!("asset {}", id)))?;

        if asset.analysis.is_some() {
            return Err(WorkflowError::AlreadyProcessed(id.to_string()));
        }
        asset.analysis = Some(outcome);
        asset.pending = None;
        Ok(())
    }

    pub fn list(&self) -> &[MediaAsset] {
        &self.assets
    }

    pub fn get(&self, id: AssetId) -> Option<&MediaAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }

    pub fn unprocessed(&self) -> impl Iterator<Item = &MediaAsset> {
        self.assets.iter().filter(|a| !a.is_processed())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn displays(&self) -> &DisplayRegistry {
        &self.displays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::{ByteSource, MediaKind, PoleStatus};

    fn image(name: &str) -> NewAsset {
        NewAsset {
            display_name: name.to_string(),
            kind: MediaKind::Image,
            source: ByteSource::new(vec![1u8, 2, 3]),
            preview: None,
        }
    }

    fn outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            confidence: 90,
            status: PoleStatus::Valid,
            detected_object_count: 2,
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = AssetStore::new();
        store.add(image("a.jpg"));
        store.add(image("b.jpg"));
        store.add(image("c.jpg"));

        let names: Vec<&str> = store.list().iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(store.list().iter().all(|a| !a.is_processed()));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = AssetStore::new();
        let first = store.add(image("a.jpg"));
        store.remove(first);
        let second = store.add(image("a.jpg"));
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = AssetStore::new();
        store.add(image("a.jpg"));
        assert!(store.remove(AssetId(42)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mark_processed() {
        let mut store = AssetStore::new();
        let id = store.add(image("a.jpg"));

        store.mark_processed(id, outcome()).unwrap();
        let asset = store.get(id).unwrap();
        assert!(asset.is_processed());
        assert_eq!(asset.analysis(), Some(&outcome()));
        assert_eq!(store.unprocessed().count(), 0);
    }

    #[test]
    fn test_mark_processed_unknown_id() {
        let mut store = AssetStore::new();
        let err = store.mark_processed(AssetId(7), outcome()).unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
    }

    #[test]
    fn test_outcome_is_immutable_once_attached() {
        let mut store = AssetStore::new();
        let id = store.add(image("a.jpg"));
        store.mark_processed(id, outcome()).unwrap();

        let second = AnalysisOutcome {
            status: PoleStatus::Invalid,
            ..outcome()
        };
        let err = store.mark_processed(id, second).unwrap_err();
        assert!(matches!(err, WorkflowError::AlreadyProcessed(_)));
        assert_eq!(store.get(id).unwrap().analysis(), Some(&outcome()));
    }

    #[test]
    fn test_remove_releases_display_handle() {
        let mut store = AssetStore::new();
        let a = store.add(image("a.jpg"));
        store.add(image("b.jpg"));
        assert_eq!(store.displays().live_count(), 2);

        store.remove(a);
        assert_eq!(store.displays().live_count(), 1);
    }

    #[test]
    fn test_remove_cancels_pending_validation() {
        let mut store = AssetStore::new();
        let a = store.add(image("a.jpg"));
        let b = store.add(image("b.jpg"));
        let batch = CancellationToken::new();
        let (token_a, token_b) = (batch.child_token(), batch.child_token());
        assert!(store.track_validation(a, token_a.clone()).is_some());
        assert!(store.track_validation(b, token_b.clone()).is_some());

        store.remove(a);
        assert!(token_a.is_cancelled());
        assert!(!token_b.is_cancelled());
        assert!(!batch.is_cancelled());
    }

    #[test]
    fn test_track_validation_skips_processed() {
        let mut store = AssetStore::new();
        let id = store.add(image("a.jpg"));
        store.mark_processed(id, outcome()).unwrap();
        assert!(store.track_validation(id, CancellationToken::new()).is_none());
        assert!(store.track_validation(AssetId(99), CancellationToken::new()).is_none());
    }
}
