//! Accumulation of per-slot contributions into a per-tick composite frame.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// The displayed transform of one rig group after compositing.
/// A renderer applies it as translate, then rotate, then scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupTransform {
    pub rotation: f32,
    pub position: [f32; 2],
    pub scale: [f32; 2],
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            position: [0.0, 0.0],
            scale: [1.0, 1.0],
        }
    }
}

/// One layer's contribution to a group this tick. All fields are deltas;
/// an absent channel contributes zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contribution {
    pub rotation: f32,
    pub position: [f32; 2],
    pub scale: [f32; 2],
}

/// Per-tick blend result, one entry per group referenced by an active
/// layer. Rebuilt fresh every tick; never persisted across ticks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompositeFrame {
    groups: HashMap<String, GroupTransform>,
}

impl CompositeFrame {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Ensure a group entry exists, seeded to the neutral transform.
    pub fn seed(&mut self, group: &str) {
        if !self.groups.contains_key(group) {
            self.groups
                .insert(group.to_owned(), GroupTransform::default());
        }
    }

    /// Fold one layer's contribution into a group. Rotation and position
    /// add algebraically; scale adds the delta onto the seeded (1, 1) base,
    /// so concurrent layers sum their scale offsets rather than multiplying
    /// factors.
    pub fn apply(&mut self, group: &str, c: Contribution) {
        let t = self
            .groups
            .entry(group.to_owned())
            .or_insert_with(GroupTransform::default);
        t.rotation += c.rotation;
        t.position[0] += c.position[0];
        t.position[1] += c.position[1];
        t.scale[0] += c.scale[0];
        t.scale[1] += c.scale[1];
    }

    /// Clamp each scale component to >= 0; visual transforms must not
    /// invert.
    pub fn finalize(&mut self) {
        for t in self.groups.values_mut() {
            t.scale[0] = t.scale[0].max(0.0);
            t.scale[1] = t.scale[1].max(0.0);
        }
    }

    pub fn get(&self, group: &str) -> Option<&GroupTransform> {
        self.groups.get(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupTransform)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
