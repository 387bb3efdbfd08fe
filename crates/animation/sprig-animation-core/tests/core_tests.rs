use hashbrown::HashMap;
use sprig_animation_core::{
    interp::{catmull_rom_sample, linear_sample},
    sampling::sample_keyframes,
    AnimationClip, AnimationRuntime, Component, Config, ExpressionTrack, InterpolationMode,
    Keyframe, KeyframeTrack, RuntimeEvent, Sample, TrackSource, TransformChannels,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn scalar_keys(keys: &[(f32, f32)]) -> TrackSource {
    TrackSource::Keyframes(KeyframeTrack::new(
        keys.iter()
            .map(|(t, v)| Keyframe {
                time: *t,
                value: Sample::Scalar(*v),
            })
            .collect(),
    ))
}

fn pair_keys(keys: &[(f32, [f32; 2])]) -> TrackSource {
    TrackSource::Keyframes(KeyframeTrack::new(
        keys.iter()
            .map(|(t, v)| Keyframe {
                time: *t,
                value: Sample::Pair(*v),
            })
            .collect(),
    ))
}

fn const_pair(x: f32, y: f32) -> TrackSource {
    TrackSource::Expression(ExpressionTrack {
        components: vec![Component::Const(x), Component::Const(y)],
    })
}

fn const_scalar(v: f32) -> TrackSource {
    TrackSource::Expression(ExpressionTrack {
        components: vec![Component::Const(v)],
    })
}

fn mk_clip(
    name: &str,
    duration: Option<f32>,
    mode: InterpolationMode,
    groups: Vec<(&str, TransformChannels)>,
) -> AnimationClip {
    let mut map = HashMap::new();
    for (gid, channels) in groups {
        map.insert(gid.to_owned(), channels);
    }
    AnimationClip {
        name: name.to_owned(),
        groups: map,
        duration,
        mode,
    }
}

fn rotation_only(source: TrackSource) -> TransformChannels {
    TransformChannels {
        rotation: Some(source),
        ..Default::default()
    }
}

/// it should hit both endpoints exactly for scalars and pairs
#[test]
fn linear_endpoints_exact() {
    let a = Sample::Scalar(-3.5);
    let b = Sample::Scalar(12.25);
    assert_eq!(linear_sample(&a, &b, 0.0), a);
    assert_eq!(linear_sample(&a, &b, 1.0), b);

    let a = Sample::Pair([1.0, -2.0]);
    let b = Sample::Pair([-7.5, 4.0]);
    assert_eq!(linear_sample(&a, &b, 0.0), a);
    assert_eq!(linear_sample(&a, &b, 1.0), b);
}

/// it should extrapolate outside [0, 1] rather than reject
#[test]
fn linear_extrapolates() {
    let a = Sample::Scalar(0.0);
    let b = Sample::Scalar(10.0);
    assert_eq!(linear_sample(&a, &b, 2.0), Sample::Scalar(20.0));
    assert_eq!(linear_sample(&a, &b, -1.0), Sample::Scalar(-10.0));
}

/// it should duplicate the left endpoint when p0 is absent: no jump at t=0
#[test]
fn catmull_rom_boundary_duplication() {
    let p1 = Sample::Scalar(2.0);
    let p2 = Sample::Scalar(5.0);
    let p3 = Sample::Scalar(9.0);
    assert_eq!(catmull_rom_sample(None, &p1, &p2, Some(&p3), 0.0), p1);
    assert_eq!(catmull_rom_sample(Some(&p1), &p1, &p2, None, 1.0), p2);

    let p1 = Sample::Pair([2.0, -1.0]);
    let p2 = Sample::Pair([5.0, 3.0]);
    assert_eq!(catmull_rom_sample(None, &p1, &p2, None, 0.0), p1);
}

/// it should interpolate each vector component from its own neighbors
#[test]
fn catmull_rom_componentwise() {
    let v0 = Sample::Pair([0.0, 100.0]);
    let p1 = Sample::Pair([0.0, 100.0]);
    let p2 = Sample::Pair([10.0, 200.0]);
    let v3 = Sample::Pair([10.0, 200.0]);
    if let Sample::Pair([x, y]) = catmull_rom_sample(Some(&v0), &p1, &p2, Some(&v3), 0.5) {
        assert!(x > 0.0 && x < 10.0);
        assert!(y > 100.0 && y < 200.0);
    } else {
        panic!("expected a pair");
    }
}

/// it should return identical output for repeated queries
#[test]
fn sampling_is_idempotent() {
    let TrackSource::Keyframes(track) = scalar_keys(&[(0.0, 0.0), (1.0, 90.0), (2.0, 0.0)]) else {
        unreachable!()
    };
    let first = sample_keyframes(&track, InterpolationMode::CatmullRom, 0.73, 2.0);
    let second = sample_keyframes(&track, InterpolationMode::CatmullRom, 0.73, 2.0);
    assert_eq!(first, second);
}

/// it should hold a single keyframe's value for any query time
#[test]
fn single_keyframe_holds() {
    let TrackSource::Keyframes(track) = scalar_keys(&[(0.5, 7.0)]) else {
        unreachable!()
    };
    for t in [0.0, 0.25, 1.0, 100.0] {
        assert_eq!(
            sample_keyframes(&track, InterpolationMode::Linear, t, 2.0),
            Sample::Scalar(7.0)
        );
    }
}

/// it should ignore play for names absent from the clip set
#[test]
fn unknown_animation_is_a_noop() {
    let (mut rt, looping, _) = AnimationRuntime::with_default_slots(Config::default());
    rt.play(looping, "does-not-exist", 0.0);
    assert!(!rt.slot(looping).expect("slot").is_playing());
    let out = rt.tick(0.1);
    assert!(out.frame.is_empty());
}

/// it should keep a busy one-shot slot's activation untouched
#[test]
fn one_shot_slot_rejects_overlap() {
    let (mut rt, _, event) = AnimationRuntime::with_default_slots(Config::default());
    let clip = mk_clip(
        "pulse",
        Some(2.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(scalar_keys(&[(0.0, 0.0), (2.0, 90.0)])))],
    );
    rt.load_clip(clip).expect("valid clip");

    rt.play(event, "pulse", 0.0);
    let before = rt.slot(event).expect("slot").active();
    rt.play(event, "pulse", 0.5);
    let after = rt.slot(event).expect("slot").active();
    assert_eq!(before, after, "activation must not restart");
}

/// it should restart a looping slot on replay
#[test]
fn looping_slot_restarts() {
    let (mut rt, looping, _) = AnimationRuntime::with_default_slots(Config::default());
    let clip = mk_clip(
        "sway",
        Some(2.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(scalar_keys(&[(0.0, 0.0), (2.0, 90.0)])))],
    );
    rt.load_clip(clip).expect("valid clip");

    rt.play(looping, "sway", 0.0);
    rt.play(looping, "sway", 1.0);
    assert_eq!(rt.slot(looping).expect("slot").active().map(|a| a.1), Some(1.0));
}

/// it should produce an empty frame with no active slots, and drop a
/// stopped slot's groups on the next tick
#[test]
fn neutral_composite_after_stop() {
    let (mut rt, looping, _) = AnimationRuntime::with_default_slots(Config::default());
    let clip = mk_clip(
        "sway",
        Some(2.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(scalar_keys(&[(0.0, 0.0), (2.0, 90.0)])))],
    );
    rt.load_clip(clip).expect("valid clip");

    assert!(rt.tick(0.0).frame.is_empty());

    rt.play(looping, "sway", 0.0);
    assert!(rt.tick(0.5).frame.get("head").is_some());

    rt.stop(looping);
    let out = rt.tick(1.0);
    assert!(out.frame.get("head").is_none());
    assert!(out.frame.is_empty());
}

/// it should clamp a negative accumulated scale to exactly 0
#[test]
fn scale_clamps_to_zero() {
    let (mut rt, looping, event) = AnimationRuntime::with_default_slots(Config::default());
    let shrink = mk_clip(
        "shrink",
        None,
        InterpolationMode::Linear,
        vec![(
            "head",
            TransformChannels {
                scale: Some(const_pair(-2.0, -0.5)),
                ..Default::default()
            },
        )],
    );
    rt.load_clip(shrink).expect("valid clip");
    let grow = mk_clip(
        "grow",
        Some(10.0),
        InterpolationMode::Linear,
        vec![(
            "head",
            TransformChannels {
                scale: Some(const_pair(0.25, 0.25)),
                ..Default::default()
            },
        )],
    );
    rt.load_clip(grow).expect("valid clip");

    rt.play(looping, "shrink", 0.0);
    rt.play(event, "grow", 0.0);
    let out = rt.tick(0.5);
    let head = out.frame.get("head").expect("seeded group");
    // base 1 + (-2) + 0.25 = -0.75 -> clamped; 1 - 0.5 + 0.25 = 0.75 stays
    assert_eq!(head.scale[0], 0.0);
    approx(head.scale[1], 0.75, 1e-6);
}

/// it should expire a one-shot exactly at its duration, before evaluation
#[test]
fn one_shot_expiry_boundary() {
    let (mut rt, _, event) = AnimationRuntime::with_default_slots(Config::default());
    let clip = mk_clip(
        "pulse",
        Some(2.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(scalar_keys(&[(0.0, 0.0), (2.0, 90.0)])))],
    );
    rt.load_clip(clip).expect("valid clip");

    rt.play(event, "pulse", 0.0);
    rt.tick(1.999);
    assert!(rt.slot(event).expect("slot").is_playing());

    let out = rt.tick(2.0);
    assert!(out.frame.is_empty(), "expired slot must not seed groups");
    assert_eq!(
        out.events,
        vec![RuntimeEvent::PlaybackEnded {
            slot: event,
            clip: "pulse".to_owned()
        }]
    );
    assert!(!rt.slot(event).expect("slot").is_playing());
}

/// it should contribute neutral values for absent channels
#[test]
fn absent_channels_are_neutral() {
    let (mut rt, looping, _) = AnimationRuntime::with_default_slots(Config::default());
    let clip = mk_clip(
        "sway",
        Some(2.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(const_scalar(30.0)))],
    );
    rt.load_clip(clip).expect("valid clip");

    rt.play(looping, "sway", 0.0);
    let head = *rt.tick(0.5).frame.get("head").expect("seeded group");
    approx(head.rotation, 30.0, 1e-6);
    assert_eq!(head.position, [0.0, 0.0]);
    assert_eq!(head.scale, [1.0, 1.0]);
}

/// it should sum rotation/position across layers and add scale deltas onto
/// the shared base of 1
#[test]
fn layers_accumulate() {
    let (mut rt, looping, event) = AnimationRuntime::with_default_slots(Config::default());
    let base = mk_clip(
        "base",
        None,
        InterpolationMode::Linear,
        vec![(
            "head",
            TransformChannels {
                rotation: Some(const_scalar(10.0)),
                position: Some(const_pair(1.0, 2.0)),
                scale: Some(const_pair(0.25, 0.25)),
            },
        )],
    );
    rt.load_clip(base).expect("valid clip");
    let accent = mk_clip(
        "accent",
        Some(10.0),
        InterpolationMode::Linear,
        vec![(
            "head",
            TransformChannels {
                rotation: Some(const_scalar(5.0)),
                position: Some(const_pair(-0.5, 0.5)),
                scale: Some(const_pair(0.5, 0.5)),
            },
        )],
    );
    rt.load_clip(accent).expect("valid clip");

    rt.play(looping, "base", 0.0);
    rt.play(event, "accent", 0.0);
    let head = *rt.tick(1.0).frame.get("head").expect("seeded group");
    approx(head.rotation, 15.0, 1e-6);
    approx(head.position[0], 0.5, 1e-6);
    approx(head.position[1], 2.5, 1e-6);
    approx(head.scale[0], 1.75, 1e-6);
    approx(head.scale[1], 1.75, 1e-6);
}

/// it should reject hand-built clips that break track invariants
#[test]
fn load_clip_validates() {
    let mut rt = AnimationRuntime::new(Config::default());
    let bad = mk_clip(
        "bad",
        Some(1.0),
        InterpolationMode::Linear,
        vec![("head", rotation_only(scalar_keys(&[(1.0, 0.0), (1.0, 90.0)])))],
    );
    assert!(rt.load_clip(bad).is_err());
}
