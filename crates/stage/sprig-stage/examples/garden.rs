//! Composition root: assemble a small stage, run the frame loop for a few
//! simulated seconds and print each group's SVG transform attribute.
//!
//! Run with: cargo run -p sprig-stage --example garden

use sprig_animation_core::parse_clip_set_json;
use sprig_stage::{svg, Entity, EntityKind, Stage};

fn sunflower(now: f32) -> Entity {
    let json = sprig_test_fixtures::animation_json("sunflower").expect("fixture");
    let set = parse_clip_set_json(&json).expect("clip set should parse");
    Entity::spawn(
        EntityKind::Plant {
            produce_interval: 5.0,
        },
        set,
        now,
    )
}

fn sun(now: f32) -> Entity {
    let json = sprig_test_fixtures::animation_json("sun").expect("fixture");
    let set = parse_clip_set_json(&json).expect("clip set should parse");
    Entity::spawn(EntityKind::Collectable, set, now)
}

fn main() {
    let mut stage = Stage::new(5, 6);
    stage.place(sunflower(0.0), 1, 1).expect("free cell");
    stage.spawn_free(sun(0.0), 100.0, 100.0);

    // A second plant arrives mid-run, like a player planting it.
    let mut late_plant_added = false;

    for step in 0..=24 {
        let now = step as f32 * 0.25;
        if now >= 3.0 && !late_plant_added {
            stage.place(sunflower(now), 2, 2).expect("free cell");
            late_plant_added = true;
        }
        stage.update(now);

        println!("t={now:.2}");
        for (id, placement, entity) in stage.entities() {
            println!("  {id:?} at {placement:?}");
            let mut groups: Vec<_> = entity.frame().iter().collect();
            groups.sort_by_key(|(name, _)| name.to_owned());
            for (name, transform) in groups {
                println!("    {name:<10} {}", svg::transform_attribute(transform));
            }
        }
    }
}
