//! Animation slots: named layers hosting at most one active clip.

use serde::{Deserialize, Serialize};

use crate::ids::{ClipId, SlotId};

/// How a layer treats activations.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlotKind {
    /// Restartable layer that wraps its clip indefinitely.
    Looping,
    /// Event layer: plays once through, refuses overlapping activations.
    OneShot,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SlotState {
    Idle,
    Playing {
        clip: ClipId,
        activation_time: f32,
    },
}

/// A named layer with a two-state machine: Idle or Playing since
/// `activation_time`.
#[derive(Debug)]
pub struct AnimationSlot {
    pub id: SlotId,
    pub name: String,
    pub kind: SlotKind,
    pub(crate) state: SlotState,
}

impl AnimationSlot {
    pub(crate) fn new(id: SlotId, name: String, kind: SlotKind) -> Self {
        Self {
            id,
            name,
            kind,
            state: SlotState::Idle,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, SlotState::Playing { .. })
    }

    /// Active clip and activation time, if Playing.
    pub fn active(&self) -> Option<(ClipId, f32)> {
        match self.state {
            SlotState::Playing {
                clip,
                activation_time,
            } => Some((clip, activation_time)),
            SlotState::Idle => None,
        }
    }

    /// Accept or reject an activation. A one-shot slot that is already
    /// Playing keeps its current clip and activation time untouched
    /// (intentional back-pressure, not an error); everything else restarts
    /// from `now`.
    pub(crate) fn begin(&mut self, clip: ClipId, now: f32) -> bool {
        if self.kind == SlotKind::OneShot && self.is_playing() {
            return false;
        }
        self.state = SlotState::Playing {
            clip,
            activation_time: now,
        };
        true
    }

    /// Force Idle regardless of state.
    #[inline]
    pub(crate) fn halt(&mut self) {
        self.state = SlotState::Idle;
    }
}
