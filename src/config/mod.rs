// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod app;

pub use app::{AppConfig, DEFAULT_PREDICTION_API_BASE};
