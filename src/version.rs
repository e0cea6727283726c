// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Thumbnail Studio service

/// Full version string with feature description
pub const VERSION: &str = "v1.2.0-selection-inpainting-2025-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.2.0";

/// Build date
pub const BUILD_DATE: &str = "2025-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "text-to-image",
    "size-lattice-snapping",
    "selection-inpainting",
    "mask-projection",
    "mask-preview",
    "bounded-polling",
    "session-in-flight-guard",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Thumbnail Studio {} ({})", VERSION_NUMBER, BUILD_DATE)
}
