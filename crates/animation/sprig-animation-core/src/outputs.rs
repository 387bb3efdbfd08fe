//! Output contracts from the runtime.
//!
//! Outputs carry the composite frame for this tick plus the semantic
//! events generated while stepping. The caller borrows them until the next
//! `tick`, which clears and rebuilds both.

use serde::{Deserialize, Serialize};

use crate::compositor::CompositeFrame;
use crate::ids::SlotId;

/// Discrete signals emitted during a tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum RuntimeEvent {
    /// A one-shot activation ran out its duration and the slot went idle.
    PlaybackEnded { slot: SlotId, clip: String },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub frame: CompositeFrame,
    pub events: Vec<RuntimeEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.frame.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: RuntimeEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame.is_empty() && self.events.is_empty()
    }
}
