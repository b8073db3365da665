// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Validation workflow: asset store, simulated engine, catalog and the
//! controller that ties them together.

pub mod assets;
pub mod catalog;
pub mod controller;
pub mod display;
pub mod engine;
pub mod tasks;
