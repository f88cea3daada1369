//! Deferred-mutation entity container
//!
//! Any phase may request an add or remove at any point in a tick; the visible
//! entity list only changes at [`EntityRegistry::commit`]. That single commit
//! point is what makes iterate-while-spawning safe without copies or locks.

use crate::sim::entity::{Entity, EntityKind};

/// Owns every transient entity plus the pending add/remove queues.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    to_add: Vec<Entity>,
    to_remove: Vec<u32>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entity for insertion at the next commit.
    pub fn add(&mut self, entity: Entity) {
        self.to_add.push(entity);
    }

    /// Queue an entity for removal at the next commit. Duplicate requests
    /// for the same id are harmless.
    pub fn remove(&mut self, id: u32) {
        self.to_remove.push(id);
    }

    /// Apply pending changes: removals drain first, then additions, then
    /// both queues clear.
    pub fn commit(&mut self) {
        let to_remove = std::mem::take(&mut self.to_remove);
        if !to_remove.is_empty() {
            self.entities.retain(|e| !to_remove.contains(&e.id));
        }
        self.entities.append(&mut self.to_add);
    }

    /// Empty the live list and both queues. Used on session reset.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.to_add.clear();
        self.to_remove.clear();
    }

    /// The committed entity list, including destroyed-but-unremoved entries.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Committed, active entities of one kind. Destroyed entities awaiting
    /// removal are hidden here even though they are still in the list.
    pub fn iter_active(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.active && e.kind() == kind)
    }
}
