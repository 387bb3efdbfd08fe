//! Runtime: clip ownership and the public control surface.
//!
//! One `AnimationRuntime` drives one animated object. Methods:
//! - new / with_default_slots, add_slot, load_clip / load_clip_set,
//!   play, stop, tick (expire one-shots → seed → evaluate → finalize)

use std::sync::Arc;

use hashbrown::HashMap;

use crate::compositor::CompositeFrame;
use crate::config::Config;
use crate::data::AnimationClip;
use crate::error::ClipError;
use crate::ids::{ClipId, IdAllocator, SlotId};
use crate::loader::ClipSet;
use crate::outputs::{Outputs, RuntimeEvent};
use crate::sampling::evaluate_channels;
use crate::slot::{AnimationSlot, SlotKind, SlotState};

/// Clip storage: id-ordered list plus a name index. Clips are shared
/// read-only once loaded.
#[derive(Default, Debug)]
struct ClipLibrary {
    items: Vec<(ClipId, Arc<AnimationClip>)>,
    by_name: HashMap<String, ClipId>,
}

impl ClipLibrary {
    fn insert(&mut self, id: ClipId, clip: AnimationClip) {
        self.by_name.insert(clip.name.clone(), id);
        self.items.push((id, Arc::new(clip)));
    }

    fn get(&self, id: ClipId) -> Option<&Arc<AnimationClip>> {
        self.items
            .iter()
            .find_map(|(c, d)| if *c == id { Some(d) } else { None })
    }

    fn find(&self, name: &str) -> Option<ClipId> {
        self.by_name.get(name).copied()
    }
}

/// The per-object animation runtime.
///
/// Single-threaded by contract: `play`, `stop` and `tick` are synchronous
/// and must not be called concurrently on one instance. Each `tick` sees
/// the slot states as they stand at entry and finishes in time
/// proportional to active slots × channels.
#[derive(Debug)]
pub struct AnimationRuntime {
    cfg: Config,
    ids: IdAllocator,
    clips: ClipLibrary,
    slots: Vec<AnimationSlot>,

    // Per-tick outputs, reused across ticks.
    outputs: Outputs,
}

impl AnimationRuntime {
    pub fn new(cfg: Config) -> Self {
        Self {
            outputs: Outputs {
                frame: CompositeFrame::with_capacity(cfg.group_capacity),
                events: Vec::new(),
            },
            cfg,
            ids: IdAllocator::new(),
            clips: ClipLibrary::default(),
            slots: Vec::new(),
        }
    }

    /// Convenience constructor with the conventional layer pair: a looping
    /// `"loop"` slot and a one-shot `"event"` slot.
    pub fn with_default_slots(cfg: Config) -> (Self, SlotId, SlotId) {
        let mut rt = Self::new(cfg);
        let looping = rt.add_slot("loop", SlotKind::Looping);
        let event = rt.add_slot("event", SlotKind::OneShot);
        (rt, looping, event)
    }

    pub fn add_slot(&mut self, name: &str, kind: SlotKind) -> SlotId {
        let id = self.ids.alloc_slot();
        self.slots.push(AnimationSlot::new(id, name.to_owned(), kind));
        id
    }

    /// Load a caller-constructed clip. The loader validates its own output;
    /// this is the checked entry point for everything else.
    pub fn load_clip(&mut self, clip: AnimationClip) -> Result<ClipId, ClipError> {
        if let Err(reason) = clip.validate() {
            return Err(ClipError::InvalidClip {
                clip: clip.name.clone(),
                reason,
            });
        }
        let id = self.ids.alloc_clip();
        self.clips.insert(id, clip);
        Ok(id)
    }

    /// Load every clip of a parsed set (already validated by the loader).
    pub fn load_clip_set(&mut self, set: ClipSet) -> Vec<ClipId> {
        let mut out = Vec::with_capacity(set.clips.len());
        for clip in set.clips {
            let id = self.ids.alloc_clip();
            self.clips.insert(id, clip);
            out.push(id);
        }
        out
    }

    pub fn clip(&self, id: ClipId) -> Option<&Arc<AnimationClip>> {
        self.clips.get(id)
    }

    pub fn clip_id(&self, name: &str) -> Option<ClipId> {
        self.clips.find(name)
    }

    pub fn slot(&self, id: SlotId) -> Option<&AnimationSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Outputs of the most recent `tick`.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Activate a clip on a slot at `now`. Unknown names and unknown slots
    /// are logged no-ops; a busy one-shot slot keeps its current activation.
    pub fn play(&mut self, slot: SlotId, name: &str, now: f32) {
        let Some(clip_id) = self.clips.find(name) else {
            log::warn!("animation '{name}' not found; play ignored");
            return;
        };
        let Some(s) = self.slots.iter_mut().find(|s| s.id == slot) else {
            log::warn!("slot {slot:?} not found; play ignored");
            return;
        };
        if s.begin(clip_id, now) {
            log::debug!("slot '{}' started '{name}' at {now}", s.name);
        } else {
            log::debug!("slot '{}' busy; play of '{name}' ignored", s.name);
        }
    }

    /// Force a slot to Idle, effective immediately.
    pub fn stop(&mut self, slot: SlotId) {
        let Some(s) = self.slots.iter_mut().find(|s| s.id == slot) else {
            log::warn!("slot {slot:?} not found; stop ignored");
            return;
        };
        s.halt();
    }

    /// Step to the query time `now` (monotonically non-decreasing seconds),
    /// producing the composite frame for this tick.
    pub fn tick(&mut self, now: f32) -> &Outputs {
        self.outputs.clear();

        // 1) Retire one-shot activations that ran out before evaluating
        //    anything this tick.
        for slot in &mut self.slots {
            if slot.kind != SlotKind::OneShot {
                continue;
            }
            if let SlotState::Playing {
                clip,
                activation_time,
            } = slot.state
            {
                let Some(data) = self.clips.get(clip) else {
                    slot.halt();
                    continue;
                };
                let duration = data
                    .duration
                    .unwrap_or_else(|| data.period(self.cfg.fallback_period));
                if now - activation_time >= duration {
                    slot.halt();
                    self.outputs.events.push(RuntimeEvent::PlaybackEnded {
                        slot: slot.id,
                        clip: data.name.clone(),
                    });
                }
            }
        }

        // 2) Seed the frame with every group referenced by an active slot.
        for slot in &self.slots {
            let Some((clip, _)) = slot.active() else {
                continue;
            };
            if let Some(data) = self.clips.get(clip) {
                for group in data.groups.keys() {
                    self.outputs.frame.seed(group);
                }
            }
        }

        // 3) Evaluate each active slot at its elapsed time and accumulate.
        for slot in &self.slots {
            let Some((clip, activation_time)) = slot.active() else {
                continue;
            };
            let Some(data) = self.clips.get(clip) else {
                continue;
            };
            let elapsed = now - activation_time;
            let period = data.period(self.cfg.fallback_period);
            for (group, channels) in &data.groups {
                let contribution = evaluate_channels(channels, data.mode, elapsed, period);
                self.outputs.frame.apply(group, contribution);
            }
        }

        // 4) Clamp and hand back.
        self.outputs.frame.finalize();
        &self.outputs
    }
}
