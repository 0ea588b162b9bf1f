use crate::prelude::*;

/// Spatial index, used for efficiently finding positions of entities and
/// entities at positions.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Placement {
    positions: HashMap<Entity, IVec2>,
    /// Entities in a cell, in insertion order.
    cells: HashMap<IVec2, Vec<Entity>>,
}

impl Placement {
    pub fn entities_at(
        &self,
        pos: impl Into<IVec2>,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.cells.get(&pos.into()).into_iter().flatten().copied()
    }

    pub fn pos_of(&self, e: Entity) -> Option<IVec2> {
        self.positions.get(&e).copied()
    }

    pub fn remove(&mut self, e: Entity) {
        if let Some(pos) = self.positions.remove(&e) {
            if let Some(bin) = self.cells.get_mut(&pos) {
                bin.retain(|&x| x != e);
            }
            // Emptied bins are left in place, the same cells empty and fill
            // over and over.
        }
    }

    pub fn insert(&mut self, pos: impl Into<IVec2>, e: Entity) {
        self.remove(e);
        let pos = pos.into();
        self.positions.insert(e, pos);
        self.cells.entry(pos).or_default().push(e);
    }
}
