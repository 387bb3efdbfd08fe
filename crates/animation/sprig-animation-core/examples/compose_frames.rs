//! Load the sunflower clip set and print composited frames over one swing
//! of the loop layer, firing the one-shot layer halfway through.
//!
//! Run with: cargo run -p sprig-animation-core --example compose_frames

use sprig_animation_core::{parse_clip_set_json, AnimationRuntime, Config};

fn main() {
    let json = sprig_test_fixtures::animation_json("sunflower").expect("fixture");
    let set = parse_clip_set_json(&json).expect("clip set should parse");

    let (mut rt, looping, event) = AnimationRuntime::with_default_slots(Config::default());
    rt.load_clip_set(set);
    rt.play(looping, "loop", 0.0);

    for step in 0..=20 {
        let now = step as f32 * 0.1;
        if step == 10 {
            rt.play(event, "produce", now);
        }
        let out = rt.tick(now);
        println!("t={now:.1}");
        let mut groups: Vec<_> = out.frame.iter().collect();
        groups.sort_by_key(|(name, _)| name.to_owned());
        for (name, t) in groups {
            println!(
                "  {name:<10} rot={:+7.2} pos=({:+5.2}, {:+5.2}) scale=({:.2}, {:.2})",
                t.rotation, t.position[0], t.position[1], t.scale[0], t.scale[1]
            );
        }
        for event in &out.events {
            println!("  event: {event:?}");
        }
    }
}
