//! Interpolation helpers:
//! - lerp_f32 / lerp_vec2 (component-wise linear)
//! - catmull_rom_f32 / catmull_rom_vec2 (cubic Catmull-Rom basis)
//! - linear_sample / catmull_rom_sample (dispatch over Sample kinds)

use crate::value::Sample;

/// Linear interpolation of scalars. `t` outside [0, 1] extrapolates.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

/// Cubic Catmull-Rom segment between `p1` (t = 0) and `p2` (t = 1), with
/// `v0`/`v3` the neighboring control samples.
#[inline]
pub fn catmull_rom_f32(v0: f32, p1: f32, p2: f32, v3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let c0 = -0.5 * t3 + t2 - 0.5 * t;
    let c1 = 1.5 * t3 - 2.5 * t2 + 1.0;
    let c2 = -1.5 * t3 + 2.0 * t2 + 0.5 * t;
    let c3 = 0.5 * t3 - 0.5 * t2;

    c0 * v0 + c1 * p1 + c2 * p2 + c3 * v3
}

#[inline]
pub fn catmull_rom_vec2(v0: [f32; 2], p1: [f32; 2], p2: [f32; 2], v3: [f32; 2], t: f32) -> [f32; 2] {
    [
        catmull_rom_f32(v0[0], p1[0], p2[0], v3[0], t),
        catmull_rom_f32(v0[1], p1[1], p2[1], v3[1], t),
    ]
}

/// Linear interpolation across Sample kinds.
pub fn linear_sample(a: &Sample, b: &Sample, t: f32) -> Sample {
    match (a, b) {
        (Sample::Scalar(va), Sample::Scalar(vb)) => Sample::Scalar(lerp_f32(*va, *vb, t)),
        (Sample::Pair(va), Sample::Pair(vb)) => Sample::Pair(lerp_vec2(*va, *vb, t)),
        // Fallback: if kinds mismatch, prefer left (fail-soft).
        _ => *a,
    }
}

/// Catmull-Rom interpolation across Sample kinds.
///
/// An absent `p0` substitutes `p1`, an absent `p3` substitutes `p2`
/// (duplicate-endpoint clamping), so sequence ends stay continuous.
pub fn catmull_rom_sample(
    p0: Option<&Sample>,
    p1: &Sample,
    p2: &Sample,
    p3: Option<&Sample>,
    t: f32,
) -> Sample {
    match (p1, p2) {
        (Sample::Scalar(a), Sample::Scalar(b)) => {
            let v0 = match p0 {
                Some(Sample::Scalar(v)) => *v,
                _ => *a,
            };
            let v3 = match p3 {
                Some(Sample::Scalar(v)) => *v,
                _ => *b,
            };
            Sample::Scalar(catmull_rom_f32(v0, *a, *b, v3, t))
        }
        (Sample::Pair(a), Sample::Pair(b)) => {
            let v0 = match p0 {
                Some(Sample::Pair(v)) => *v,
                _ => *a,
            };
            let v3 = match p3 {
                Some(Sample::Pair(v)) => *v,
                _ => *b,
            };
            Sample::Pair(catmull_rom_vec2(v0, *a, *b, v3, t))
        }
        _ => *p1,
    }
}
