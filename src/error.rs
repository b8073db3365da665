// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Workflow error taxonomy.
//!
//! Every failure here is scoped to the single user action that caused it.
//! None of them terminate the application.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Camera permission denied or no capture device present
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// A frame could not be read or encoded; the user may retry
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Unknown plot or asset id
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Nothing to validate: no assets have been added")]
    NothingToValidate,

    #[error("Processing is already running")]
    AlreadyRunning,

    /// Outcomes are immutable once attached
    #[error("Asset {0} has already been processed")]
    AlreadyProcessed(String),

    /// Fixture data violates a catalog invariant
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
