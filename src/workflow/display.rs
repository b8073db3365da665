// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display handles for asset media.
//!
//! Every asset owns exactly one handle. The UI keys its texture cache by
//! handle key and drops textures whose handle is no longer alive, so
//! removing an asset releases everything allocated to show it.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Allocates display handles and tracks how many are alive.
#[derive(Debug, Clone, Default)]
pub struct DisplayRegistry {
    next_key: Arc<AtomicU64>,
    live: Arc<AtomicUsize>,
}

impl DisplayRegistry {
    pub fn allocate(&self) -> DisplayHandle {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.fetch_add(1, Ordering::Relaxed);
        log::debug!("Allocated display handle {}", key);
        DisplayHandle {
            key,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of handles not yet released.
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }
}

/// Owned display resource; released on drop.
#[derive(Debug)]
pub struct DisplayHandle {
    key: u64,
    live: Arc<AtomicUsize>,
}

impl DisplayHandle {
    pub fn key(&self) -> u64 {
        self.key
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        log::debug!("Released display handle {}", self.key);
    }
}
