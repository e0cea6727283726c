// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod edit_session;
pub mod error;
pub mod registry;

pub use edit_session::{EditSession, EditSubmission, SessionPhase};
pub use error::SessionError;
pub use registry::{InFlightGuard, SessionRegistry};
