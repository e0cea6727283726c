// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use crate::geometry::GeometryError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("session {session_id} already has an edit in flight")]
    SubmissionInFlight { session_id: String },

    #[error("no selection to submit")]
    NoSelection,

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("no source image loaded")]
    NoSourceImage,

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
