//! Error taxonomy for clip loading and playback.
//!
//! None of these abort a tick: playback-side failures are logged no-ops and
//! load-side failures degrade the affected channel (or clip) to its neutral
//! contribution while the rest of the set proceeds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expr::FormulaError;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ClipError {
    /// `play` referenced a name absent from the loaded clip set.
    #[error("animation not found: {name}")]
    UnknownAnimation { name: String },

    /// A group/channel did not have the expected shape; the channel
    /// contributes its neutral value and the clip otherwise proceeds.
    #[error("malformed channel '{channel}' in group '{group}' of clip '{clip}': {reason}")]
    MalformedChannel {
        clip: String,
        group: String,
        channel: String,
        reason: String,
    },

    /// An unrecognized lerp_mode string; sampling falls back to linear.
    #[error("unknown interpolation mode '{mode}' in clip '{clip}'")]
    UnknownInterpolationMode { clip: String, mode: String },

    /// A component formula failed to compile; the component is replaced
    /// with the neutral constant 0.
    #[error("formula for '{channel}' in group '{group}' of clip '{clip}': {error}")]
    Formula {
        clip: String,
        group: String,
        channel: String,
        error: FormulaError,
    },

    /// Clip-level shape problem (bad duration, failed validation).
    #[error("clip '{clip}' is invalid: {reason}")]
    InvalidClip { clip: String, reason: String },
}

/// Top-level failure to read a clip-set document at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("clip set parse error: {0}")]
    Parse(String),
}
