//! Stage glue around the animation core.
//!
//! Everything the compositor treats as an external collaborator lives
//! here: the placement grid, the entity kinds that own one animation
//! runtime each, the gameplay cadence that decides *when* one-shot layers
//! fire, and the SVG transform writer. This crate is the composition
//! root: stages and entities are constructed explicitly, never through
//! globals.

pub mod entity;
pub mod grid;
pub mod svg;

pub use entity::{Entity, EntityKind};
pub use grid::{Cell, EntityId, Placement, PlacementError, Stage};
