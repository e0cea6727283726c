// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod geometry;
pub mod imaging;
pub mod mask;
pub mod prediction;
pub mod session;
pub mod storage;
pub mod version;

// Re-export the types most callers need
pub use api::{create_app, start_server, ApiError, AppState};
pub use config::AppConfig;
pub use geometry::{snap, DisplayRect, ImageDimensions, PixelRect, TrueRect};
pub use mask::{project, Mask};
pub use prediction::{
    PollConfig, PredictionError, PredictionOrchestrator, PredictionService, ReplicateClient,
};
pub use session::{EditSession, SessionPhase, SessionRegistry};
