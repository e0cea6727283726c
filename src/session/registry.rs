// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server-side tracking of sessions with an edit in flight
//!
//! A session may have at most one edit request running. The slot is held by
//! an [`InFlightGuard`] and released when the guard drops, including when the
//! HTTP request future is abandoned mid-poll.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use super::error::SessionError;

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set holds no invariants a panicking holder could break
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim the session's in-flight slot
    pub fn try_begin(&self, session_id: &str) -> Result<InFlightGuard, SessionError> {
        if !self.lock().insert(session_id.to_string()) {
            return Err(SessionError::SubmissionInFlight {
                session_id: session_id.to_string(),
            });
        }
        debug!("Session {} edit started", session_id);
        Ok(InFlightGuard {
            registry: self.clone(),
            session_id: session_id.to_string(),
        })
    }

    pub fn is_in_flight(&self, session_id: &str) -> bool {
        self.lock().contains(session_id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.lock().len()
    }
}

/// Releases the session's slot on drop
#[derive(Debug)]
pub struct InFlightGuard {
    registry: SessionRegistry,
    session_id: String,
}

impl InFlightGuard {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.session_id);
        debug!("Session {} edit finished", self.session_id);
    }
}
