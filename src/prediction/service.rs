// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction service trait definition

use async_trait::async_trait;

use super::types::{Prediction, PredictionError, PredictionRequest};

/// Remote prediction API
///
/// Implementations submit a model run and report its status; polling and
/// terminal-state handling live in the orchestrator.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Start a prediction
    async fn create_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<Prediction, PredictionError>;

    /// Fetch the current state of a prediction
    async fn get_prediction(&self, id: &str) -> Result<Prediction, PredictionError>;
}
