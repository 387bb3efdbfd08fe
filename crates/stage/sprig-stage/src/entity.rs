//! Entity kinds and their per-frame animation driving.

use sprig_animation_core::{
    AnimationRuntime, ClipSet, CompositeFrame, Config, Outputs, SlotId,
};

/// Clip names every entity rig ships under.
const LOOP_CLIP: &str = "loop";
const PRODUCE_CLIP: &str = "produce";

/// What an entity is, as data. Shared capabilities (animation runtime,
/// placement) live on [`Entity`]; kind-specific behavior hangs off the
/// variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    /// A planted unit that fires its one-shot layer on a fixed cadence.
    Plant { produce_interval: f32 },
    /// A free-floating pickup that keeps its loop layer running.
    Collectable,
}

/// One animated object on the stage, owning its animation runtime and the
/// conventional layer pair.
pub struct Entity {
    pub kind: EntityKind,
    runtime: AnimationRuntime,
    loop_slot: SlotId,
    event_slot: SlotId,
    last_trigger: f32,
}

impl Entity {
    /// Build an entity from its clip set and start the loop layer at `now`.
    pub fn spawn(kind: EntityKind, clips: ClipSet, now: f32) -> Self {
        let (mut runtime, loop_slot, event_slot) =
            AnimationRuntime::with_default_slots(Config::default());
        runtime.load_clip_set(clips);
        runtime.play(loop_slot, LOOP_CLIP, now);
        Self {
            kind,
            runtime,
            loop_slot,
            event_slot,
            last_trigger: now,
        }
    }

    /// Per-frame step: apply the kind's trigger rules, then tick the
    /// runtime at `now`.
    pub fn update(&mut self, now: f32) -> &Outputs {
        match self.kind {
            EntityKind::Plant { produce_interval } => {
                if !self.event_playing() && now - self.last_trigger >= produce_interval {
                    self.runtime.play(self.event_slot, PRODUCE_CLIP, now);
                    self.last_trigger = now;
                }
            }
            EntityKind::Collectable => {
                // Re-arm only when idle so the loop's activation time (and
                // with it the elapsed clock) is preserved across frames.
                if !self.loop_playing() {
                    self.runtime.play(self.loop_slot, LOOP_CLIP, now);
                }
            }
        }
        self.runtime.tick(now)
    }

    /// Composite frame of the most recent update.
    pub fn frame(&self) -> &CompositeFrame {
        &self.runtime.outputs().frame
    }

    pub fn loop_playing(&self) -> bool {
        self.runtime
            .slot(self.loop_slot)
            .map(|s| s.is_playing())
            .unwrap_or(false)
    }

    pub fn event_playing(&self) -> bool {
        self.runtime
            .slot(self.event_slot)
            .map(|s| s.is_playing())
            .unwrap_or(false)
    }

    pub fn runtime(&self) -> &AnimationRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut AnimationRuntime {
        &mut self.runtime
    }
}
