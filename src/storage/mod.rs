// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod mask_preview;

pub use mask_preview::{MaskPreviewStore, StorageError, StoredPreview, PREVIEW_ROUTE};
