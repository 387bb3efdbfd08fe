//! Sprig Animation Core (renderer-agnostic)
//!
//! A layered animation compositor for 2D rigs: clips hold per-group
//! keyframe or time-formula tracks, named slots host at most one active
//! clip each, and every tick folds all active layers into one transform
//! per group. The host supplies the clock and applies the resulting frame;
//! the core performs no I/O and no scheduling of its own.

pub mod compositor;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod expr;
pub mod ids;
pub mod interp;
pub mod loader;
pub mod outputs;
pub mod sampling;
pub mod slot;
pub mod value;

// Re-exports for consumers (adapters)
pub use compositor::{CompositeFrame, Contribution, GroupTransform};
pub use config::Config;
pub use data::{
    AnimationClip, Component, ExpressionTrack, InterpolationMode, Keyframe, KeyframeTrack,
    TrackSource, TransformChannels,
};
pub use engine::AnimationRuntime;
pub use error::{ClipError, LoadError};
pub use expr::{Formula, FormulaError, Function};
pub use ids::{ClipId, SlotId};
pub use loader::{parse_clip_set_json, ClipSet};
pub use outputs::{Outputs, RuntimeEvent};
pub use sampling::{evaluate_channels, sample_keyframes, sample_source};
pub use slot::{AnimationSlot, SlotKind};
pub use value::{ChannelKind, Sample};
