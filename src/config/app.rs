// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration loaded from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::geometry::ImageDimensions;
use crate::prediction::PollConfig;

pub const DEFAULT_PREDICTION_API_BASE: &str = "https://api.replicate.com/v1";

/// Configuration for the thumbnail service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub api_port: u16,
    /// Base URL of the prediction API
    pub prediction_api_base: String,
    /// Bearer token for the prediction API
    pub api_token: Option<String>,
    /// Text-to-image model version (or `owner/model`)
    pub generation_model: Option<String>,
    /// Inpainting model version; edits are unavailable without it
    pub inpaint_model: Option<String>,
    /// Delay between status polls in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum number of status polls per prediction
    pub max_poll_attempts: u32,
    /// Requested generation size before snapping
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// Directory mask previews are written to
    pub mask_preview_dir: PathBuf,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_port: env_parse("API_PORT").unwrap_or(defaults.api_port),
            prediction_api_base: env_non_empty("PREDICTION_API_BASE")
                .unwrap_or(defaults.prediction_api_base),
            api_token: env_non_empty("REPLICATE_API_TOKEN"),
            generation_model: env_non_empty("GENERATION_MODEL_VERSION"),
            inpaint_model: env_non_empty("INPAINT_MODEL_VERSION"),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(defaults.poll_interval_ms),
            max_poll_attempts: env_parse("MAX_POLL_ATTEMPTS")
                .unwrap_or(defaults.max_poll_attempts),
            thumbnail_width: env_parse("THUMBNAIL_WIDTH").unwrap_or(defaults.thumbnail_width),
            thumbnail_height: env_parse("THUMBNAIL_HEIGHT").unwrap_or(defaults.thumbnail_height),
            mask_preview_dir: env_non_empty("MASK_PREVIEW_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.mask_preview_dir),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let base = url::Url::parse(&self.prediction_api_base)
            .map_err(|e| format!("invalid PREDICTION_API_BASE '{}': {}", self.prediction_api_base, e))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(format!(
                "PREDICTION_API_BASE must be http(s), got '{}'",
                base.scheme()
            ));
        }
        if self.api_token.is_none() {
            return Err("REPLICATE_API_TOKEN must be set".to_string());
        }
        if self.generation_model.is_none() {
            return Err("GENERATION_MODEL_VERSION must be set".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }
        if self.max_poll_attempts == 0 {
            return Err("Max poll attempts must be greater than 0".to_string());
        }
        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(format!(
                "thumbnail size must be positive, got {}x{}",
                self.thumbnail_width, self.thumbnail_height
            ));
        }
        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts,
        }
    }

    pub fn thumbnail_size(&self) -> ImageDimensions {
        ImageDimensions::new(self.thumbnail_width, self.thumbnail_height)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: 8080,
            prediction_api_base: DEFAULT_PREDICTION_API_BASE.to_string(),
            api_token: None,
            generation_model: None,
            inpaint_model: None,
            poll_interval_ms: 1000,
            max_poll_attempts: 60,
            thumbnail_width: 1280,
            thumbnail_height: 720,
            mask_preview_dir: PathBuf::from("./previews"),
        }
    }
}
