// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Replicate-style prediction API client

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use super::service::PredictionService;
use super::types::{Prediction, PredictionError, PredictionRequest};

/// Per-call HTTP timeout; each poll is a short round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a Replicate-compatible predictions API
pub struct ReplicateClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl ReplicateClient {
    /// Create a new ReplicateClient
    pub fn new(endpoint: &str, api_token: &str) -> Result<Self, PredictionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Prediction client configured: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_token: api_token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL a create call is posted to.
    ///
    /// Official models are addressed by path; versioned models go to the
    /// generic predictions endpoint with the version in the body.
    pub fn create_url(&self, request: &PredictionRequest) -> String {
        if request.targets_model() {
            format!("{}/models/{}/predictions", self.endpoint, request.version)
        } else {
            format!("{}/predictions", self.endpoint)
        }
    }

    async fn parse_prediction(response: Response) -> Result<Prediction, PredictionError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictionError::UnexpectedStatus { status, body });
        }
        Ok(response.json::<Prediction>().await?)
    }
}

#[async_trait]
impl PredictionService for ReplicateClient {
    async fn create_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<Prediction, PredictionError> {
        let url = self.create_url(request);
        let body = if request.targets_model() {
            json!({ "input": request.input })
        } else {
            json!({ "version": request.version, "input": request.input })
        };

        debug!("Prediction create POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        let prediction = Self::parse_prediction(response).await?;
        info!(
            "Prediction {} created with status {}",
            prediction.id,
            prediction.status.as_str()
        );
        Ok(prediction)
    }

    async fn get_prediction(&self, id: &str) -> Result<Prediction, PredictionError> {
        let url = format!("{}/predictions/{}", self.endpoint, id);
        debug!("Prediction status GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        Self::parse_prediction(response).await
    }
}
