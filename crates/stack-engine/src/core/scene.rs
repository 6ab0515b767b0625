use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Every entity in the world, kept in spawn order so later spawns draw on top.
/// A linear scan is fine at this size.
#[derive(Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// IDs of the active entities tagged `tag`, in spawn order.
    /// Owned, so the caller can mutate the context while walking them.
    pub fn ids_by_tag(&self, tag: &str) -> Vec<EntityId> {
        self.iter()
            .filter(|e| e.active && e.tag == tag)
            .map(|e| e.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
