//! Track sampling.
//!
//! Model:
//! - Keyframe tracks are queried at `elapsed mod period`; the four control
//!   indices around the query are clamped into range, which doubles the
//!   endpoints for Catmull-Rom (no out-of-range access, no discontinuity).
//! - Expression tracks receive the raw elapsed time, never wrapped.
//! - A channel that cannot be evaluated contributes its neutral value.

use crate::compositor::Contribution;
use crate::data::{InterpolationMode, KeyframeTrack, TrackSource, TransformChannels};
use crate::interp::{catmull_rom_sample, linear_sample};
use crate::value::{ChannelKind, Sample};

/// Euclidean wrap of `t` into `[0, period)`. Non-positive periods pin to 0.
#[inline]
pub(crate) fn wrap(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let m = t % period;
    if m < 0.0 {
        m + period
    } else {
        m
    }
}

/// Sample a keyframe track at `elapsed` seconds, wrapping by `period`.
///
/// Lookup picks the largest index with `time <= t` (0 when `t` precedes the
/// first key), so queries before the first key extrapolate the first
/// segment and queries past the last key hold the last value.
pub fn sample_keyframes(
    track: &KeyframeTrack,
    mode: InterpolationMode,
    elapsed: f32,
    period: f32,
) -> Sample {
    let keys = &track.keys;
    let n = keys.len();
    match n {
        // No keys: neutral scalar 0.0 (fail-soft; validation rejects this).
        0 => Sample::Scalar(0.0),
        1 => keys[0].value,
        _ => {
            let t = wrap(elapsed, period);

            // Linear scan; rig tracks hold a handful of keys.
            let mut i = 0;
            while i + 1 < n && keys[i + 1].time <= t {
                i += 1;
            }

            let p0 = i.saturating_sub(1);
            let p1 = i;
            let p2 = (i + 1).min(n - 1);
            let p3 = (i + 2).min(n - 1);

            let denom = keys[p2].time - keys[p1].time;
            let u = if denom == 0.0 {
                0.0
            } else {
                (t - keys[p1].time) / denom
            };

            match mode {
                InterpolationMode::Linear => linear_sample(&keys[p1].value, &keys[p2].value, u),
                InterpolationMode::CatmullRom => catmull_rom_sample(
                    Some(&keys[p0].value),
                    &keys[p1].value,
                    &keys[p2].value,
                    Some(&keys[p3].value),
                    u,
                ),
            }
        }
    }
}

/// Sample whichever data backs a channel.
pub fn sample_source(
    source: &TrackSource,
    mode: InterpolationMode,
    elapsed: f32,
    period: f32,
) -> Sample {
    match source {
        TrackSource::Keyframes(track) => sample_keyframes(track, mode, elapsed, period),
        TrackSource::Expression(track) => track.eval(elapsed),
    }
}

/// Evaluate all three channels of a group into one contribution.
pub fn evaluate_channels(
    channels: &TransformChannels,
    mode: InterpolationMode,
    elapsed: f32,
    period: f32,
) -> Contribution {
    let mut out = Contribution::default();
    if let Some(source) = channels.channel(ChannelKind::Rotation) {
        out.rotation = sample_source(source, mode, elapsed, period).scalar_or_zero();
    }
    if let Some(source) = channels.channel(ChannelKind::Position) {
        out.position = sample_source(source, mode, elapsed, period).pair_or_zero();
    }
    if let Some(source) = channels.channel(ChannelKind::Scale) {
        out.scale = sample_source(source, mode, elapsed, period).pair_or_zero();
    }
    out
}
