// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media, reports and fixtures.

pub mod media;
pub mod serialization;
