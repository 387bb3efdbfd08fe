//! Canonical clip data model.
//!
//! Clips are immutable once loaded and shared read-only; the runtime keeps
//! them behind `Arc`. Track times are seconds.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::expr::Formula;
use crate::value::{ChannelKind, Sample};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    #[default]
    Linear,
    CatmullRom,
}

impl InterpolationMode {
    /// Mode name as it appears in clip documents (`lerp_mode`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(InterpolationMode::Linear),
            "catmullrom" => Some(InterpolationMode::CatmullRom),
            _ => None,
        }
    }
}

/// A single keyframe sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Seconds from clip start; >= 0.
    pub time: f32,
    pub value: Sample,
}

/// Ordered keyframe samples for one channel.
/// Invariant: times strictly increasing, values of uniform arity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeTrack {
    pub keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    pub fn last_time(&self) -> Option<f32> {
        self.keys.last().map(|k| k.time)
    }
}

/// One scalar component of a continuous track.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    Const(f32),
    Formula(Formula),
}

impl Component {
    #[inline]
    pub fn eval(&self, time: f32) -> f32 {
        match self {
            Component::Const(v) => *v,
            Component::Formula(f) => f.eval(time),
        }
    }
}

/// A continuous track: one component per scalar of the channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionTrack {
    pub components: Vec<Component>,
}

impl ExpressionTrack {
    /// Evaluate at the (unwrapped) elapsed time.
    pub fn eval(&self, time: f32) -> Sample {
        match self.components.as_slice() {
            [c] => Sample::Scalar(c.eval(time)),
            [x, y] => Sample::Pair([x.eval(time), y.eval(time)]),
            _ => Sample::Scalar(0.0),
        }
    }
}

/// The concrete data backing one channel.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackSource {
    Keyframes(KeyframeTrack),
    Expression(ExpressionTrack),
}

/// Fixed-shape channel set for one rig group. Absent channels contribute
/// their neutral value when composited.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformChannels {
    pub rotation: Option<TrackSource>,
    pub position: Option<TrackSource>,
    pub scale: Option<TrackSource>,
}

impl TransformChannels {
    pub fn channel(&self, kind: ChannelKind) -> Option<&TrackSource> {
        match kind {
            ChannelKind::Rotation => self.rotation.as_ref(),
            ChannelKind::Position => self.position.as_ref(),
            ChannelKind::Scale => self.scale.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelKind, &TrackSource)> {
        [
            (ChannelKind::Rotation, self.rotation.as_ref()),
            (ChannelKind::Position, self.position.as_ref()),
            (ChannelKind::Scale, self.scale.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, source)| source.map(|s| (kind, s)))
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_none() && self.position.is_none() && self.scale.is_none()
    }
}

/// A named, immutable animation definition covering one or more groups.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub groups: HashMap<String, TransformChannels>,
    /// Declared length in seconds, if any.
    pub duration: Option<f32>,
    pub mode: InterpolationMode,
}

impl AnimationClip {
    /// Track-wrap period: declared duration, else the last keyframe time
    /// across all of the clip's keyframe tracks, else `fallback`.
    pub fn period(&self, fallback: f32) -> f32 {
        if let Some(d) = self.duration {
            if d > 0.0 {
                return d;
            }
        }
        let mut last = 0.0f32;
        for channels in self.groups.values() {
            for (_, source) in channels.iter() {
                if let TrackSource::Keyframes(track) = source {
                    if let Some(t) = track.last_time() {
                        last = last.max(t);
                    }
                }
            }
        }
        if last > 0.0 {
            last
        } else {
            fallback
        }
    }

    /// Validate basic invariants (finite strictly-increasing key times,
    /// uniform arity matching the channel, sane duration and components).
    pub fn validate(&self) -> Result<(), String> {
        if let Some(d) = self.duration {
            if !d.is_finite() || d <= 0.0 {
                return Err(format!("clip '{}' duration must be > 0", self.name));
            }
        }
        for (group, channels) in &self.groups {
            for (kind, source) in channels.iter() {
                let label = kind.json_name();
                match source {
                    TrackSource::Keyframes(track) => {
                        let mut prev = -f32::INFINITY;
                        for key in &track.keys {
                            if !key.time.is_finite() || key.time < 0.0 {
                                return Err(format!(
                                    "keyframe time must be finite and >= 0 for '{group}.{label}'"
                                ));
                            }
                            if key.time <= prev {
                                return Err(format!(
                                    "keyframe times must be strictly increasing for '{group}.{label}'"
                                ));
                            }
                            prev = key.time;
                            if key.value.arity() != kind.arity() {
                                return Err(format!(
                                    "keyframe value arity mismatch for '{group}.{label}'"
                                ));
                            }
                        }
                    }
                    TrackSource::Expression(track) => {
                        if track.components.len() != kind.arity() {
                            return Err(format!(
                                "component count mismatch for '{group}.{label}'"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
