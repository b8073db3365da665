// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media capture adapter.
//!
//! Wraps a camera behind scoped acquisition: a [`CaptureHandle`] holds the
//! device for its lifetime and releases it exactly once, either through
//! [`MediaCapture::release`] or when the handle is dropped.

use crate::config::{CameraBackendKind, CameraConfig};
use crate::error::{Result, WorkflowError};
use crate::io::media;
use crate::models::asset::{ByteSource, MediaKind, NewAsset};

#[cfg(feature = "video-opencv")]
pub mod opencv_camera;
pub mod synthetic;

/// One frame drawn to an off-screen RGB buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8, row-major
    pub rgb: Vec<u8>,
}

/// A live camera stream.
pub trait CameraStream {
    fn read_frame(&mut self) -> Result<Frame>;

    /// Give the device back. Called once by [`CaptureHandle`].
    fn release(&mut self);
}

/// Source of camera streams.
pub trait CameraBackend {
    fn name(&self) -> &str;

    fn acquire(&self) -> Result<Box<dyn CameraStream>>;
}

/// Exclusive hold on a camera stream.
pub struct CaptureHandle {
    backend: String,
    stream: Option<Box<dyn CameraStream>>,
}

impl CaptureHandle {
    /// Read the current frame. A failed read leaves the handle usable and
    /// still releasing on drop.
    pub fn read_frame(&mut self) -> Result<Frame> {
        match self.stream.as_mut() {
            Some(stream) => stream.read_frame(),
            None => Err(WorkflowError::CaptureFailed("camera already released".to_string())),
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
            log::info!("Released camera ({})", self.backend);
        }
    }
}

/// Adapter between the workflow and a camera backend.
pub struct MediaCapture {
    backend: Box<dyn CameraBackend>,
}

impl MediaCapture {
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn acquire(&self) -> Result<CaptureHandle> {
        let stream = self.backend.acquire()?;
        log::info!("Acquired camera ({})", self.backend.name());
        Ok(CaptureHandle {
            backend: self.backend.name().to_string(),
            stream: Some(stream),
        })
    }

    /// Grab the current frame and encode it into a new image asset.
    pub fn capture_frame(&self, handle: &mut CaptureHandle) -> Result<NewAsset> {
        let frame = handle.read_frame()?;
        let png = media::encode_png(&frame)
            .map_err(|e| WorkflowError::CaptureFailed(format!("failed to encode frame: {}", e)))?;
        let preview = media::preview_from_frame(&frame);

        Ok(NewAsset {
            display_name: format!("Captured_{}", chrono::Utc::now().to_rfc3339()),
            kind: MediaKind::Image,
            source: ByteSource::new(png),
            preview,
        })
    }

    pub fn release(&self, handle: CaptureHandle) {
        drop(handle);
    }
}

/// Pick the camera backend named in the configuration.
pub fn backend_for(config: &CameraConfig) -> Box<dyn CameraBackend> {
    match config.backend {
        CameraBackendKind::Synthetic => Box::new(synthetic::SyntheticCamera::new(config.width, config.height)),
        #[cfg(feature = "video-opencv")]
        CameraBackendKind::Opencv => Box::new(opencv_camera::OpenCvCamera::new(
            config.device_index,
            config.width,
            config.height,
        )),
        #[cfg(not(feature = "video-opencv"))]
        CameraBackendKind::Opencv => {
            log::warn!("OpenCV camera requested but not available in build. Falling back to test pattern.");
            Box::new(synthetic::SyntheticCamera::new(config.width, config.height))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Camera doubles that record how often the device was released.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct Counters {
        pub acquired: Arc<AtomicUsize>,
        pub released: Arc<AtomicUsize>,
    }

    impl Counters {
        pub fn acquired(&self) -> usize {
            self.acquired.load(Ordering::SeqCst)
        }

        pub fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    /// Backend that counts acquisitions and can fail every frame read.
    pub struct FlakyCamera {
        pub counters: Counters,
        pub fail_frames: bool,
    }

    struct FlakyStream {
        counters: Counters,
        fail_frames: bool,
    }

    impl CameraStream for FlakyStream {
        fn read_frame(&mut self) -> Result<Frame> {
            if self.fail_frames {
                return Err(WorkflowError::CaptureFailed("sensor timeout".to_string()));
            }
            Ok(Frame {
                width: 2,
                height: 2,
                rgb: vec![128; 12],
            })
        }

        fn release(&mut self) {
            self.counters.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl CameraBackend for FlakyCamera {
        fn name(&self) -> &str {
            "flaky"
        }

        fn acquire(&self) -> Result<Box<dyn CameraStream>> {
            self.counters.acquired.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FlakyStream {
                counters: self.counters.clone(),
                fail_frames: self.fail_frames,
            }))
        }
    }

    /// Backend with no device behind it.
    pub struct MissingCamera;

    impl CameraBackend for MissingCamera {
        fn name(&self) -> &str {
            "missing"
        }

        fn acquire(&self) -> Result<Box<dyn CameraStream>> {
            Err(WorkflowError::DeviceUnavailable("no camera attached".to_string()))
        }
    }
}
