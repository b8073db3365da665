// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Texture cache for asset previews.
//!
//! Textures are keyed by the asset's display handle. Anything whose handle
//! is gone from the store is dropped on the next prune, which frees the GPU
//! texture.

use crate::models::asset::MediaAsset;
use crate::workflow::assets::AssetStore;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<u64, egui::TextureHandle>,
}

impl PreviewCache {
    /// Texture for an asset, uploading its preview on first use.
    pub fn texture_for(&mut self, ctx: &egui::Context, asset: &MediaAsset) -> Option<&egui::TextureHandle> {
        let key = asset.display().key();
        if !self.textures.contains_key(&key) {
            let preview = asset.preview.as_ref()?;
            let size = [preview.width as usize, preview.height as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, &preview.pixels);
            let texture = ctx.load_texture(format!("asset_{}", key), image, egui::TextureOptions::LINEAR);
            self.textures.insert(key, texture);
        }
        self.textures.get(&key)
    }

    /// Drop textures for assets no longer in the store.
    pub fn prune(&mut self, store: &AssetStore) {
        let live: HashSet<u64> = store.list().iter().map(|a| a.display().key()).collect();
        let before = self.textures.len();
        self.textures.retain(|key, _| live.contains(key));
        if self.textures.len() != before {
            log::debug!("Freed {} preview textures", before - self.textures.len());
        }
    }
}
