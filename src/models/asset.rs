// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media asset data structures.
//!
//! This module defines the uploaded or captured media items that flow
//! through the validation workflow, together with the per-asset analysis
//! outcome produced by the validation engine.

use crate::workflow::display::DisplayHandle;
use crate::workflow::tasks::CancellationToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Session-unique asset identity. Allocated from a monotonic counter and
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of media an asset carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a declared media type string. Anything that is not
    /// `image/*` is treated as video.
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

/// Placement status shared by asset outcomes and catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoleStatus {
    Valid,
    Invalid,
    Warning,
}

impl PoleStatus {
    pub const ALL: [PoleStatus; 3] = [PoleStatus::Valid, PoleStatus::Invalid, PoleStatus::Warning];

    pub fn label(&self) -> &'static str {
        match self {
            PoleStatus::Valid => "valid",
            PoleStatus::Invalid => "invalid",
            PoleStatus::Warning => "warning",
        }
    }
}

/// Result payload attached to an asset once validation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Percentage in 0..=100
    pub confidence: u8,
    pub status: PoleStatus,
    pub detected_object_count: u32,
}

impl AnalysisOutcome {
    /// Check the outcome is within its documented ranges.
    pub fn is_well_formed(&self) -> bool {
        self.confidence <= 100
    }
}

/// Shared, immutable bytes behind an asset (an upload or a captured
/// frame). Cloning shares the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteSource(Arc<[u8]>);

impl ByteSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Small RGBA thumbnail decoded off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// An asset ready to be added to the store. The store assigns identity and
/// the display handle.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub display_name: String,
    pub kind: MediaKind,
    pub source: ByteSource,
    pub preview: Option<PreviewImage>,
}

/// An uploaded or captured media item.
#[derive(Debug)]
pub struct MediaAsset {
    pub id: AssetId,
    pub display_name: String,
    pub kind: MediaKind,
    pub source: ByteSource,
    pub preview: Option<PreviewImage>,
    pub(crate) analysis: Option<AnalysisOutcome>,
    pub(crate) display: DisplayHandle,
    /// Token of the validation run this asset is part of, if any
    pub(crate) pending: Option<CancellationToken>,
}

impl MediaAsset {
    /// True once an analysis outcome has been attached.
    pub fn is_processed(&self) -> bool {
        self.analysis.is_some()
    }

    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }

    pub fn display(&self) -> &DisplayHandle {
        &self.display
    }
}
