// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Diagnostic mask preview persistence
//!
//! Masks sent by the editor can be written to disk for inspection. Nothing
//! in the edit path depends on these files.

use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::imaging::{decode_image_bytes, encode_png, ImageError};

/// URL prefix the preview directory is served under
pub const PREVIEW_ROUTE: &str = "/previews";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid preview image: {0}")]
    Image(#[from] ImageError),

    #[error("failed to write preview: {0}")]
    Io(#[from] std::io::Error),
}

/// A preview written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPreview {
    pub file_path: PathBuf,
    pub served_path: String,
}

#[derive(Debug, Clone)]
pub struct MaskPreviewStore {
    dir: PathBuf,
}

impl MaskPreviewStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(timestamp: u64) -> String {
        format!("mask-{}.png", timestamp)
    }

    /// Write a mask as PNG, re-encoding other formats
    pub async fn save(&self, bytes: &[u8], timestamp: u64) -> Result<StoredPreview, StorageError> {
        let (img, info) = decode_image_bytes(bytes)?;
        let png = if info.format == ImageFormat::Png {
            bytes.to_vec()
        } else {
            encode_png(&img)?
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = Self::file_name(timestamp);
        let file_path = self.dir.join(&file_name);
        tokio::fs::write(&file_path, &png).await?;

        info!(
            "Mask preview saved: {} ({}x{}, {} bytes)",
            file_path.display(),
            info.width,
            info.height,
            png.len()
        );

        Ok(StoredPreview {
            file_path,
            served_path: format!("{}/{}", PREVIEW_ROUTE, file_name),
        })
    }
}
