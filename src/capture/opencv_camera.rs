// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Live camera access through OpenCV.
//!
//! Only built with the `video-opencv` feature.

use super::{CameraBackend, CameraStream, Frame};
use crate::error::{Result, WorkflowError};
use opencv::{core::Mat, imgproc, prelude::*, videoio};

pub struct OpenCvCamera {
    device_index: i32,
    width: u32,
    height: u32,
}

impl OpenCvCamera {
    pub fn new(device_index: i32, width: u32, height: u32) -> Self {
        Self {
            device_index,
            width,
            height,
        }
    }
}

impl CameraBackend for OpenCvCamera {
    fn name(&self) -> &str {
        "opencv"
    }

    fn acquire(&self) -> Result<Box<dyn CameraStream>> {
        let unavailable = |e: opencv::Error| WorkflowError::DeviceUnavailable(e.to_string());

        let mut capture = videoio::VideoCapture::new(self.device_index, videoio::CAP_ANY).map_err(unavailable)?;
        if !capture.is_opened().map_err(unavailable)? {
            return Err(WorkflowError::DeviceUnavailable(format!(
                "camera {} could not be opened",
                self.device_index
            )));
        }

        // Best effort; drivers are free to pick the nearest supported mode
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, self.width as f64);
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, self.height as f64);

        Ok(Box::new(OpenCvStream { capture }))
    }
}

struct OpenCvStream {
    capture: videoio::VideoCapture,
}

impl CameraStream for OpenCvStream {
    fn read_frame(&mut self) -> Result<Frame> {
        let failed = |e: opencv::Error| WorkflowError::CaptureFailed(e.to_string());

        let mut bgr = Mat::default();
        if !self.capture.read(&mut bgr).map_err(failed)? || bgr.empty() {
            return Err(WorkflowError::CaptureFailed("camera returned an empty frame".to_string()));
        }

        let mut rgb = Mat::default();
        imgproc::cvt_color(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB, 0).map_err(failed)?;

        Ok(Frame {
            width: rgb.cols() as u32,
            height: rgb.rows() as u32,
            rgb: rgb.data_bytes().map_err(failed)?.to_vec(),
        })
    }

    fn release(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {}", e);
        }
    }
}
