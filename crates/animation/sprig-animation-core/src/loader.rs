//! Clip-set document parsing.
//!
//! The interchange format maps animation names to per-group track specs:
//!
//! ```json
//! { "animations": {
//!     "loop": {
//!       "group": {
//!         "head": { "0": { "rotation": -4, "post": [0, 0] },
//!                   "1": { "rotation": 4 } },
//!         "stem": { "rotation": "6 * sin(time * 2)" }
//!       },
//!       "animation_length": 2.0,
//!       "lerp_mode": "catmullrom"
//!     }
//! } }
//! ```
//!
//! A track spec whose keys are all numeric is keyframe form (each value an
//! object of `rotation` / `post` / `scale` samples); anything else is
//! continuous form (channel name to literal or formula). Channels that do
//! not match the expected shape degrade to their neutral value with a
//! recorded diagnostic; only an unreadable document is a hard error.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::data::{
    AnimationClip, Component, ExpressionTrack, InterpolationMode, Keyframe, KeyframeTrack,
    TrackSource, TransformChannels,
};
use crate::error::{ClipError, LoadError};
use crate::expr::Formula;
use crate::value::{ChannelKind, Sample};

/// Parsed, validated clips plus the diagnostics recorded while degrading
/// malformed pieces.
#[derive(Debug, Default)]
pub struct ClipSet {
    pub clips: Vec<AnimationClip>,
    pub diagnostics: Vec<ClipError>,
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawClipSet {
    animations: BTreeMap<String, RawClip>,
}

#[derive(Debug, Deserialize)]
struct RawClip {
    #[serde(default)]
    group: BTreeMap<String, BTreeMap<String, JsonValue>>,
    #[serde(default)]
    animation_length: Option<f32>,
    #[serde(default)]
    lerp_mode: Option<String>,
}

/// Parse a clip-set document. Returns every clip that survived validation;
/// malformed channels and formulas are degraded in place and reported via
/// `ClipSet::diagnostics` (also logged), never thrown.
pub fn parse_clip_set_json(s: &str) -> Result<ClipSet, LoadError> {
    let raw: RawClipSet = serde_json::from_str(s).map_err(|e| LoadError::Parse(e.to_string()))?;

    let mut set = ClipSet::default();
    for (name, clip) in raw.animations {
        if let Some(clip) = build_clip(name, clip, &mut set.diagnostics) {
            set.clips.push(clip);
        }
    }
    for diag in &set.diagnostics {
        log::warn!("{diag}");
    }
    Ok(set)
}

fn build_clip(name: String, raw: RawClip, diags: &mut Vec<ClipError>) -> Option<AnimationClip> {
    let mode = match raw.lerp_mode.as_deref() {
        None => InterpolationMode::default(),
        Some(m) => InterpolationMode::from_name(m).unwrap_or_else(|| {
            diags.push(ClipError::UnknownInterpolationMode {
                clip: name.clone(),
                mode: m.to_owned(),
            });
            InterpolationMode::Linear
        }),
    };

    let duration = match raw.animation_length {
        Some(d) if d.is_finite() && d > 0.0 => Some(d),
        Some(d) => {
            diags.push(ClipError::InvalidClip {
                clip: name.clone(),
                reason: format!("animation_length must be finite and > 0, got {d}"),
            });
            None
        }
        None => None,
    };

    let mut groups = HashMap::with_capacity(raw.group.len());
    for (group, spec) in raw.group {
        let channels = build_channels(&name, &group, &spec, diags);
        groups.insert(group, channels);
    }

    let clip = AnimationClip {
        name,
        groups,
        duration,
        mode,
    };
    match clip.validate() {
        Ok(()) => Some(clip),
        Err(reason) => {
            diags.push(ClipError::InvalidClip {
                clip: clip.name,
                reason,
            });
            None
        }
    }
}

fn build_channels(
    clip: &str,
    group: &str,
    spec: &BTreeMap<String, JsonValue>,
    diags: &mut Vec<ClipError>,
) -> TransformChannels {
    if is_keyframe_form(spec) {
        build_keyframe_channels(clip, group, spec, diags)
    } else {
        build_continuous_channels(clip, group, spec, diags)
    }
}

/// Keyframe form is recognized by every key parsing as a finite number.
fn is_keyframe_form(spec: &BTreeMap<String, JsonValue>) -> bool {
    !spec.is_empty()
        && spec
            .keys()
            .all(|k| k.parse::<f32>().map(|t| t.is_finite()).unwrap_or(false))
}

fn build_keyframe_channels(
    clip: &str,
    group: &str,
    spec: &BTreeMap<String, JsonValue>,
    diags: &mut Vec<ClipError>,
) -> TransformChannels {
    let mut frames: Vec<(f32, &serde_json::Map<String, JsonValue>)> = Vec::new();
    for (key, value) in spec {
        let Ok(time) = key.parse::<f32>() else {
            continue;
        };
        match value.as_object() {
            Some(obj) => frames.push((time, obj)),
            None => diags.push(ClipError::MalformedChannel {
                clip: clip.to_owned(),
                group: group.to_owned(),
                channel: key.clone(),
                reason: "keyframe value must be an object".to_owned(),
            }),
        }
    }

    // BTreeMap sorts lexically; sort numerically and drop times that
    // collide after parsing (e.g. "1" and "1.0").
    frames.sort_by(|a, b| a.0.total_cmp(&b.0));
    frames.dedup_by(|later, kept| {
        if later.0 == kept.0 {
            diags.push(ClipError::MalformedChannel {
                clip: clip.to_owned(),
                group: group.to_owned(),
                channel: format!("{}", later.0),
                reason: "duplicate keyframe time dropped".to_owned(),
            });
            true
        } else {
            false
        }
    });

    let mut channels = TransformChannels::default();
    for kind in [
        ChannelKind::Rotation,
        ChannelKind::Position,
        ChannelKind::Scale,
    ] {
        let mut keys = Vec::new();
        let mut ok = true;
        for (time, obj) in &frames {
            let Some(value) = obj.get(kind.json_name()) else {
                continue;
            };
            match parse_sample(value, kind) {
                Ok(sample) => keys.push(Keyframe {
                    time: *time,
                    value: sample,
                }),
                Err(reason) => {
                    diags.push(ClipError::MalformedChannel {
                        clip: clip.to_owned(),
                        group: group.to_owned(),
                        channel: kind.json_name().to_owned(),
                        reason,
                    });
                    ok = false;
                    break;
                }
            }
        }
        if ok && !keys.is_empty() {
            set_channel(&mut channels, kind, TrackSource::Keyframes(KeyframeTrack::new(keys)));
        }
    }
    channels
}

fn build_continuous_channels(
    clip: &str,
    group: &str,
    spec: &BTreeMap<String, JsonValue>,
    diags: &mut Vec<ClipError>,
) -> TransformChannels {
    let mut channels = TransformChannels::default();
    for (key, value) in spec {
        let Some(kind) = kind_from_json_name(key) else {
            diags.push(ClipError::MalformedChannel {
                clip: clip.to_owned(),
                group: group.to_owned(),
                channel: key.clone(),
                reason: "unknown channel name".to_owned(),
            });
            continue;
        };

        let track = match kind.arity() {
            1 => continuous_component(clip, group, kind, value, diags).map(|c| ExpressionTrack {
                components: vec![c],
            }),
            _ => value.as_array().filter(|a| a.len() == 2).and_then(|items| {
                let x = continuous_component(clip, group, kind, &items[0], diags)?;
                let y = continuous_component(clip, group, kind, &items[1], diags)?;
                Some(ExpressionTrack {
                    components: vec![x, y],
                })
            }),
        };

        match track {
            Some(track) => set_channel(&mut channels, kind, TrackSource::Expression(track)),
            None => diags.push(ClipError::MalformedChannel {
                clip: clip.to_owned(),
                group: group.to_owned(),
                channel: kind.json_name().to_owned(),
                reason: "expected a number, a formula string, or an [x, y] pair of them"
                    .to_owned(),
            }),
        }
    }
    channels
}

/// One scalar component: literal number or formula string. A formula that
/// fails to compile degrades to the neutral constant 0 with a diagnostic.
fn continuous_component(
    clip: &str,
    group: &str,
    kind: ChannelKind,
    value: &JsonValue,
    diags: &mut Vec<ClipError>,
) -> Option<Component> {
    match value {
        JsonValue::Number(n) => n.as_f64().map(|v| Component::Const(v as f32)),
        JsonValue::String(s) => match Formula::compile(s) {
            Ok(f) => Some(Component::Formula(f)),
            Err(error) => {
                diags.push(ClipError::Formula {
                    clip: clip.to_owned(),
                    group: group.to_owned(),
                    channel: kind.json_name().to_owned(),
                    error,
                });
                Some(Component::Const(0.0))
            }
        },
        _ => None,
    }
}

fn parse_sample(value: &JsonValue, kind: ChannelKind) -> Result<Sample, String> {
    match kind.arity() {
        1 => value
            .as_f64()
            .map(|v| Sample::Scalar(v as f32))
            .ok_or_else(|| "expected a number".to_owned()),
        _ => {
            let arr = value
                .as_array()
                .ok_or_else(|| "expected an [x, y] pair".to_owned())?;
            if arr.len() != 2 {
                return Err(format!("expected exactly two components, got {}", arr.len()));
            }
            let x = arr[0].as_f64().ok_or_else(|| "expected a number".to_owned())?;
            let y = arr[1].as_f64().ok_or_else(|| "expected a number".to_owned())?;
            Ok(Sample::Pair([x as f32, y as f32]))
        }
    }
}

fn kind_from_json_name(name: &str) -> Option<ChannelKind> {
    match name {
        "rotation" => Some(ChannelKind::Rotation),
        "post" => Some(ChannelKind::Position),
        "scale" => Some(ChannelKind::Scale),
        _ => None,
    }
}

fn set_channel(channels: &mut TransformChannels, kind: ChannelKind, source: TrackSource) {
    match kind {
        ChannelKind::Rotation => channels.rotation = Some(source),
        ChannelKind::Position => channels.position = Some(source),
        ChannelKind::Scale => channels.scale = Some(source),
    }
}
