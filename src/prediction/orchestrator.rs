// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Submit a prediction and poll it until it reaches a terminal state
//!
//! Polling is strictly sequential: the next status request is issued only
//! after the previous response arrives and the fixed interval has elapsed.
//! Nothing is retried; every error ends the request.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::service::PredictionService;
use super::types::{CompletedPrediction, Prediction, PredictionError, PredictionRequest};
use super::PredictionStatus;

/// Fixed-interval polling bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 60,
        }
    }
}

#[derive(Clone)]
pub struct PredictionOrchestrator {
    service: Arc<dyn PredictionService>,
    poll: PollConfig,
}

impl PredictionOrchestrator {
    pub fn new(service: Arc<dyn PredictionService>, poll: PollConfig) -> Self {
        Self { service, poll }
    }

    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Create a prediction and wait for its output URL
    pub async fn run(
        &self,
        request: &PredictionRequest,
    ) -> Result<CompletedPrediction, PredictionError> {
        let prediction = self.service.create_prediction(request).await?;
        self.wait_for(prediction).await
    }

    /// Poll an already-created prediction until it settles or the bound is hit
    pub async fn wait_for(
        &self,
        mut prediction: Prediction,
    ) -> Result<CompletedPrediction, PredictionError> {
        if let Some(outcome) = settle(&prediction) {
            return outcome.map(|output_url| CompletedPrediction {
                id: prediction.id.clone(),
                output_url,
                polls: 0,
            });
        }

        for attempt in 1..=self.poll.max_attempts {
            tokio::time::sleep(self.poll.interval).await;

            prediction = self.service.get_prediction(&prediction.id).await?;
            debug!(
                "Prediction {} poll {}/{}: {}",
                prediction.id,
                attempt,
                self.poll.max_attempts,
                prediction.status.as_str()
            );

            if let Some(outcome) = settle(&prediction) {
                return outcome.map(|output_url| {
                    info!(
                        "Prediction {} succeeded after {} polls",
                        prediction.id, attempt
                    );
                    CompletedPrediction {
                        id: prediction.id.clone(),
                        output_url,
                        polls: attempt,
                    }
                });
            }
        }

        warn!(
            "Prediction {} still {} after {} polls; giving up",
            prediction.id,
            prediction.status.as_str(),
            self.poll.max_attempts
        );
        Err(PredictionError::Timeout {
            attempts: self.poll.max_attempts,
        })
    }
}

/// Terminal outcome of a prediction, or `None` while it is still running.
///
/// An explicit error payload is terminal regardless of status.
fn settle(prediction: &Prediction) -> Option<Result<String, PredictionError>> {
    if let Some(message) = prediction.error_message() {
        warn!("Prediction {} reported error: {}", prediction.id, message);
        return Some(Err(PredictionError::RemoteService(message)));
    }

    match prediction.status {
        PredictionStatus::Succeeded => Some(
            prediction
                .output_url()
                .ok_or_else(|| PredictionError::MissingOutput(prediction.id.clone())),
        ),
        PredictionStatus::Failed | PredictionStatus::Canceled => {
            warn!(
                "Prediction {} ended with status {}",
                prediction.id,
                prediction.status.as_str()
            );
            Some(Err(PredictionError::RemoteService(format!(
                "prediction {}",
                prediction.status.as_str()
            ))))
        }
        _ => None,
    }
}
