//! The placement grid and entity registry.

use thiserror::Error;

use crate::entity::Entity;

/// 1-based grid coordinates, matching the stage markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Where an entity sits: a grid cell, or free pixel coordinates for
/// collectables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    Cell(Cell),
    Free { x: f32, y: f32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} stage")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: u32, col: u32 },
}

/// A rows x cols stage plus the entities living on it. Drives every
/// entity's animation runtime once per frame.
pub struct Stage {
    rows: u32,
    cols: u32,
    next_id: u32,
    entities: Vec<(EntityId, Placement, Entity)>,
}

impl Stage {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            next_id: 0,
            entities: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Put an entity into a grid cell.
    pub fn place(&mut self, entity: Entity, row: u32, col: u32) -> Result<EntityId, PlacementError> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(PlacementError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let taken = self.entities.iter().any(|(_, placement, _)| {
            matches!(placement, Placement::Cell(c) if c.row == row && c.col == col)
        });
        if taken {
            return Err(PlacementError::Occupied { row, col });
        }
        let id = self.alloc_id();
        self.entities
            .push((id, Placement::Cell(Cell { row, col }), entity));
        log::debug!("placed entity {id:?} at ({row}, {col})");
        Ok(id)
    }

    /// Drop an entity at free pixel coordinates (collectables).
    pub fn spawn_free(&mut self, entity: Entity, x: f32, y: f32) -> EntityId {
        let id = self.alloc_id();
        self.entities.push((id, Placement::Free { x, y }, entity));
        log::debug!("spawned entity {id:?} at ({x}, {y})");
        id
    }

    /// Advance every entity to the frame clock `now`.
    pub fn update(&mut self, now: f32) {
        for (_, _, entity) in &mut self.entities {
            entity.update(now);
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find_map(|(e, _, entity)| if *e == id { Some(entity) } else { None })
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find_map(|(e, _, entity)| if *e == id { Some(entity) } else { None })
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Placement, &Entity)> {
        self.entities
            .iter()
            .map(|(id, placement, entity)| (*id, placement, entity))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
