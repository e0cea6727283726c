// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::edit_image::edit_image_handler;
use super::extract::MAX_REQUEST_BODY;
use super::generate_image::generate_image_handler;
use super::mask_preview::mask_preview_handler;
use crate::config::AppConfig;
use crate::geometry::ImageDimensions;
use crate::prediction::{PredictionOrchestrator, PredictionService};
use crate::session::SessionRegistry;
use crate::storage::{MaskPreviewStore, PREVIEW_ROUTE};
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: PredictionOrchestrator,
    pub generation_model: Arc<str>,
    pub inpaint_model: Option<Arc<str>>,
    pub thumbnail_size: ImageDimensions,
    pub sessions: SessionRegistry,
    pub previews: MaskPreviewStore,
}

impl AppState {
    pub fn new(orchestrator: PredictionOrchestrator, generation_model: &str) -> Self {
        let defaults = AppConfig::default();
        Self {
            orchestrator,
            generation_model: Arc::from(generation_model),
            inpaint_model: None,
            thumbnail_size: defaults.thumbnail_size(),
            sessions: SessionRegistry::new(),
            previews: MaskPreviewStore::new(defaults.mask_preview_dir),
        }
    }

    /// Build state from validated configuration
    pub fn from_config(
        config: &AppConfig,
        service: Arc<dyn PredictionService>,
    ) -> Result<Self, String> {
        let generation_model = config
            .generation_model
            .as_deref()
            .ok_or_else(|| "GENERATION_MODEL_VERSION must be set".to_string())?;

        let mut state = Self::new(
            PredictionOrchestrator::new(service, config.poll_config()),
            generation_model,
        )
        .with_thumbnail_size(config.thumbnail_size())
        .with_preview_store(MaskPreviewStore::new(config.mask_preview_dir.clone()));

        if let Some(ref inpaint) = config.inpaint_model {
            state = state.with_inpaint_model(inpaint);
        }
        Ok(state)
    }

    pub fn with_inpaint_model(mut self, model: &str) -> Self {
        self.inpaint_model = Some(Arc::from(model));
        self
    }

    pub fn with_thumbnail_size(mut self, size: ImageDimensions) -> Self {
        self.thumbnail_size = size;
        self
    }

    pub fn with_preview_store(mut self, previews: MaskPreviewStore) -> Self {
        self.previews = previews;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    let previews = ServeDir::new(state.previews.dir());

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate", post(generate_image_handler))
        .route("/api/edit", post(edit_image_handler))
        .route("/api/mask-preview", post(mask_preview_handler))
        .nest_service(PREVIEW_ROUTE, previews)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": version::VERSION_NUMBER,
        "build": version::VERSION,
        "features": version::FEATURES,
        "inpaintConfigured": state.inpaint_model.is_some(),
    }))
}
