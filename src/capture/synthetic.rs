// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Test pattern camera.
//!
//! Produces a moving colour gradient so the capture workflow can be used
//! without camera hardware.

use super::{CameraBackend, CameraStream, Frame};
use crate::error::Result;

pub struct SyntheticCamera {
    width: u32,
    height: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl CameraBackend for SyntheticCamera {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn acquire(&self) -> Result<Box<dyn CameraStream>> {
        Ok(Box::new(SyntheticStream {
            width: self.width,
            height: self.height,
            tick: 0,
        }))
    }
}

/// Byte length of an RGB frame, computed in `usize` so large sizes do not
/// wrap in `u32`.
fn frame_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

struct SyntheticStream {
    width: u32,
    height: u32,
    tick: u32,
}

impl CameraStream for SyntheticStream {
    fn read_frame(&mut self) -> Result<Frame> {
        self.tick = self.tick.wrapping_add(1);
        let (w, h) = (self.width, self.height);
        let bar = self.tick.wrapping_mul(4) % w;

        let mut rgb = Vec::with_capacity(frame_len(w, h));
        for y in 0..h {
            for x in 0..w {
                // Vertical "pole" sweeping across a sky-to-ground gradient
                if x.abs_diff(bar) < w / 40 + 1 {
                    rgb.extend_from_slice(&[70, 60, 50]);
                } else {
                    let t = (u64::from(y) * 255 / u64::from(h)) as u8;
                    rgb.extend_from_slice(&[120u8.saturating_sub(t / 3), 170u8.saturating_sub(t / 4), 255 - t / 2]);
                }
            }
        }

        Ok(Frame {
            width: w,
            height: h,
            rgb,
        })
    }

    fn release(&mut self) {
        self.tick = 0;
    }
}
