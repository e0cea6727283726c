// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client-side edit session state machine
//!
//! Transitions: idle -> selecting -> selected -> submitting -> succeeded/failed -> idle.
//! The selection is held in display space; it is projected into a mask only
//! when a submission begins.

use tracing::debug;
use uuid::Uuid;

use super::error::SessionError;
use crate::geometry::{DisplayRect, DisplaySpace, ImageDimensions, Point};
use crate::mask::{project, Mask};

type DisplayPoint = Point<DisplaySpace>;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Selecting {
        anchor: DisplayPoint,
        current: DisplayPoint,
    },
    Selected {
        selection: DisplayRect,
    },
    Submitting {
        selection: DisplayRect,
    },
    Succeeded {
        image_url: String,
    },
    Failed {
        selection: DisplayRect,
        message: String,
    },
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Selecting { .. } => "selecting",
            SessionPhase::Selected { .. } => "selected",
            SessionPhase::Submitting { .. } => "submitting",
            SessionPhase::Succeeded { .. } => "succeeded",
            SessionPhase::Failed { .. } => "failed",
        }
    }
}

/// Everything needed to send one inpainting request
#[derive(Debug, Clone)]
pub struct EditSubmission {
    pub session_id: String,
    pub prompt: String,
    pub source_image: String,
    pub selection: DisplayRect,
    pub mask: Mask,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    id: String,
    prompt: String,
    source_image: Option<String>,
    phase: SessionPhase,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: String::new(),
            source_image: None,
            phase: SessionPhase::Idle,
        }
    }

    pub fn with_source_image(mut self, image: impl Into<String>) -> Self {
        self.source_image = Some(image.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn source_image(&self) -> Option<&str> {
        self.source_image.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitting { .. })
    }

    /// Current selection, live while dragging
    pub fn selection(&self) -> Option<DisplayRect> {
        match &self.phase {
            SessionPhase::Selecting { anchor, current } => {
                Some(DisplayRect::from_corners(*anchor, *current))
            }
            SessionPhase::Selected { selection }
            | SessionPhase::Submitting { selection }
            | SessionPhase::Failed { selection, .. } => Some(*selection),
            SessionPhase::Idle | SessionPhase::Succeeded { .. } => None,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_source_image(&mut self, image: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_not_submitting()?;
        self.source_image = Some(image.into());
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Mouse-down: start a new selection, replacing any previous one
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), SessionError> {
        self.ensure_not_submitting()?;
        let point = DisplayPoint::new(x, y);
        self.phase = SessionPhase::Selecting {
            anchor: point,
            current: point,
        };
        Ok(())
    }

    /// Mouse-move: update the live selection; ignored unless dragging
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let SessionPhase::Selecting { current, .. } = &mut self.phase {
            *current = DisplayPoint::new(x, y);
        }
    }

    /// Mouse-up: finalize the selection. A drag with no area clears it.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<Option<DisplayRect>, SessionError> {
        let SessionPhase::Selecting { anchor, .. } = self.phase else {
            return Err(SessionError::InvalidTransition {
                from: self.phase.name(),
                action: "pointer_up",
            });
        };

        let selection = DisplayRect::from_corners(anchor, DisplayPoint::new(x, y));
        if selection.is_degenerate() {
            debug!("Session {}: empty drag discarded", self.id);
            self.phase = SessionPhase::Idle;
            return Ok(None);
        }

        self.phase = SessionPhase::Selected { selection };
        Ok(Some(selection))
    }

    /// Clear the selection without submitting
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.ensure_not_submitting()?;
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Whether the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        let has_selection = matches!(
            self.phase,
            SessionPhase::Selected { .. } | SessionPhase::Failed { .. }
        ) && self.selection().map_or(false, |s| !s.is_degenerate());

        has_selection && !self.prompt.trim().is_empty() && self.source_image.is_some()
    }

    /// Project the selection into a mask and enter `Submitting`
    pub fn begin_submit(
        &mut self,
        display_size: ImageDimensions,
        true_size: ImageDimensions,
    ) -> Result<EditSubmission, SessionError> {
        self.ensure_not_submitting()?;

        let selection = match &self.phase {
            SessionPhase::Selected { selection } | SessionPhase::Failed { selection, .. } => {
                *selection
            }
            _ => return Err(SessionError::NoSelection),
        };
        if self.prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        let source_image = self
            .source_image
            .clone()
            .ok_or(SessionError::NoSourceImage)?;

        let mask = project(&selection, display_size, true_size)?;

        self.phase = SessionPhase::Submitting { selection };
        debug!("Session {}: submitting edit", self.id);

        Ok(EditSubmission {
            session_id: self.id.clone(),
            prompt: self.prompt.clone(),
            source_image,
            selection,
            mask,
        })
    }

    /// The edited image becomes the new source so it can be edited again
    pub fn complete_success(&mut self, image_url: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_submitting("complete_success")?;
        let image_url = image_url.into();
        self.source_image = Some(image_url.clone());
        self.phase = SessionPhase::Succeeded { image_url };
        Ok(())
    }

    /// Keep the selection so the user can resubmit
    pub fn complete_failure(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        let SessionPhase::Submitting { selection } = self.phase else {
            return Err(SessionError::InvalidTransition {
                from: self.phase.name(),
                action: "complete_failure",
            });
        };
        self.phase = SessionPhase::Failed {
            selection,
            message: message.into(),
        };
        Ok(())
    }

    /// Dismiss a finished request and return to idle
    pub fn acknowledge(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Succeeded { .. } | SessionPhase::Failed { .. } => {
                self.phase = SessionPhase::Idle;
                Ok(())
            }
            _ => Err(SessionError::InvalidTransition {
                from: self.phase.name(),
                action: "acknowledge",
            }),
        }
    }

    fn ensure_not_submitting(&self) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::SubmissionInFlight {
                session_id: self.id.clone(),
            });
        }
        Ok(())
    }

    fn ensure_submitting(&self, action: &'static str) -> Result<(), SessionError> {
        if !self.is_submitting() {
            return Err(SessionError::InvalidTransition {
                from: self.phase.name(),
                action,
            });
        }
        Ok(())
    }
}
