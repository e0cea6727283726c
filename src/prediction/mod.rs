// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote diffusion model runs via a prediction API, with fixed-interval polling

pub mod client;
pub mod orchestrator;
pub mod service;
pub mod types;

pub use client::ReplicateClient;
pub use orchestrator::{PollConfig, PredictionOrchestrator};
pub use service::PredictionService;
pub use types::{
    CompletedPrediction, Prediction, PredictionError, PredictionRequest, PredictionStatus,
};
