//! Core configuration for sprig-animation-core.

use serde::{Deserialize, Serialize};

/// Runtime sizing hints and fallback knobs.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Track-wrap period used when a clip declares no duration and carries
    /// no keyframes to derive one from, in seconds.
    pub fallback_period: f32,

    /// Initial capacity hint for the per-tick group map.
    pub group_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_period: 2.0,
            group_capacity: 8,
        }
    }
}
