//! Channel value kinds for sampling/compositing.
//!
//! The rig format animates exactly two shapes: scalars (rotation) and
//! 2-vectors (position/scale offsets).

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelKind {
    Rotation,
    Position,
    Scale,
}

impl ChannelKind {
    /// Number of scalar components this channel carries.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            ChannelKind::Rotation => 1,
            ChannelKind::Position | ChannelKind::Scale => 2,
        }
    }

    /// Channel key used by the clip interchange format ("post" is position).
    #[inline]
    pub fn json_name(self) -> &'static str {
        match self {
            ChannelKind::Rotation => "rotation",
            ChannelKind::Position => "post",
            ChannelKind::Scale => "scale",
        }
    }
}

/// A sampled channel value.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Sample {
    Scalar(f32),
    Pair([f32; 2]),
}

impl Sample {
    /// Zero value of the matching shape.
    #[inline]
    pub fn zero(kind: ChannelKind) -> Self {
        match kind.arity() {
            1 => Sample::Scalar(0.0),
            _ => Sample::Pair([0.0, 0.0]),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Sample::Scalar(_) => 1,
            Sample::Pair(_) => 2,
        }
    }

    /// Scalar view; a mismatched shape degrades to the neutral 0.
    #[inline]
    pub fn scalar_or_zero(&self) -> f32 {
        match self {
            Sample::Scalar(v) => *v,
            Sample::Pair(_) => 0.0,
        }
    }

    /// 2-vector view; a mismatched shape degrades to the neutral (0, 0).
    #[inline]
    pub fn pair_or_zero(&self) -> [f32; 2] {
        match self {
            Sample::Pair(p) => *p,
            Sample::Scalar(_) => [0.0, 0.0],
        }
    }
}
