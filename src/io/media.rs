// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading and encoding.
//!
//! This module turns uploaded files into assets, decodes preview
//! thumbnails off the UI thread, and encodes captured frames to PNG.

use crate::capture::Frame;
use crate::models::asset::{ByteSource, MediaKind, NewAsset, PreviewImage};
use anyhow::{anyhow, Result};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Longest edge of decoded preview thumbnails, in pixels.
pub const PREVIEW_EDGE: u32 = 256;

/// An uploaded file: a name, its declared media type and its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Entries without a name, without content, or with a media type that
    /// is neither image nor video are not ingested.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.bytes.is_empty()
            && (self.media_type.starts_with("image/") || self.media_type.starts_with("video/"))
    }
}

/// Read a file from disk and guess its media type from the extension.
pub fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Path has no file name: {}", path.display()))?;
    let media_type = mime_guess::from_path(path).first_or_octet_stream().to_string();

    Ok(UploadFile {
        name,
        media_type,
        bytes,
    })
}

/// Build assets from a batch of uploads, skipping malformed entries.
pub fn ingest(files: Vec<UploadFile>) -> Vec<NewAsset> {
    files
        .into_iter()
        .filter_map(|file| {
            if !file.is_well_formed() {
                log::warn!("Skipping malformed upload {:?} ({})", file.name, file.media_type);
                return None;
            }

            let kind = MediaKind::from_media_type(&file.media_type);
            let preview = match kind {
                MediaKind::Image => decode_preview(&file.bytes),
                MediaKind::Video => None,
            };
            Some(NewAsset {
                display_name: file.name,
                kind,
                source: ByteSource::new(file.bytes),
                preview,
            })
        })
        .collect()
}

/// Decode an encoded image into a preview thumbnail.
pub fn decode_preview(bytes: &[u8]) -> Option<PreviewImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => Some(thumbnail(&img)),
        Err(e) => {
            log::warn!("Could not decode preview: {}", e);
            None
        }
    }
}

/// Preview thumbnail straight from a raw camera frame.
pub fn preview_from_frame(frame: &Frame) -> Option<PreviewImage> {
    let rgb = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())?;
    Some(thumbnail(&DynamicImage::ImageRgb8(rgb)))
}

/// Full-size RGBA pixels of a frame, for live preview.
pub fn frame_to_preview(frame: &Frame) -> Option<PreviewImage> {
    let rgb = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())?;
    let rgba = DynamicImage::ImageRgb8(rgb).to_rgba8();
    Some(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Encode a frame as PNG.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let rgb = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone()).ok_or_else(|| {
        anyhow!(
            "Frame buffer of {} bytes does not match {}x{}",
            frame.rgb.len(),
            frame.width,
            frame.height
        )
    })?;

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn thumbnail(img: &DynamicImage) -> PreviewImage {
    let rgba = img.thumbnail(PREVIEW_EDGE, PREVIEW_EDGE).to_rgba8();
    PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}
