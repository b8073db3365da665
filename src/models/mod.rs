// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for assets, plots, results and reports.

pub mod asset;
pub mod plot;
pub mod report;
pub mod result;
