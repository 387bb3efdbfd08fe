use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sprig_animation_core::{parse_clip_set_json, AnimationRuntime, Config};

fn bench_tick(c: &mut Criterion) {
    let json = sprig_test_fixtures::animation_json("sunflower").expect("fixture");
    let set = parse_clip_set_json(&json).expect("parse");

    let (mut rt, looping, event) = AnimationRuntime::with_default_slots(Config::default());
    rt.load_clip_set(set);
    rt.play(looping, "loop", 0.0);
    rt.play(event, "produce", 0.0);

    let mut now = 0.0f32;
    c.bench_function("runtime_tick", |b| {
        b.iter(|| {
            now += 1.0 / 60.0;
            black_box(rt.tick(now).frame.len())
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
