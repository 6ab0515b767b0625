use glam::Vec2;
use stack_engine::{Anchor, Color, EngineContext, Entity, EntityId};

use crate::ring::RING_HEIGHT;

pub const TOWER_TAG: &str = "tower";
pub const TOWER_WIDTH: f32 = 50.0;
pub const TOWER_HEIGHT: f32 = 250.0;
pub const TOWER_COLOR: Color = Color::rgb(150.0, 150.0, 150.0);

/// A fixed post and the rings registered on it, bottom to top.
///
/// Registration is bookkeeping only: nothing checks ring sizes, stack height,
/// or whether the ring is still registered on another tower.
#[derive(Debug, Clone)]
pub struct Tower {
    pub entity: EntityId,
    /// Bottom-centre of the post; the first ring sits here.
    pub anchor: Vec2,
    rings: Vec<EntityId>,
}

impl Tower {
    pub fn new(entity: EntityId, anchor: Vec2) -> Self {
        Self {
            entity,
            anchor,
            rings: Vec::new(),
        }
    }

    /// Register `ring` on top of the stack and return where it should sit.
    /// The n-th ring added sits `(n - 1) * RING_HEIGHT` above the anchor.
    pub fn add_ring(&mut self, ring: EntityId) -> Vec2 {
        self.rings.push(ring);
        let level = (self.rings.len() - 1) as f32;
        Vec2::new(self.anchor.x, self.anchor.y - level * RING_HEIGHT)
    }

    /// The most recently added ring.
    pub fn available_ring(&self) -> Option<EntityId> {
        self.rings.last().copied()
    }

    pub fn rings(&self) -> &[EntityId] {
        &self.rings
    }

    pub fn contains(&self, ring: EntityId) -> bool {
        self.rings.contains(&ring)
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

/// Spawn a grey post with its bottom centre at `pos`.
/// Posts have no collider; rings pass through them.
pub fn spawn_tower(ctx: &mut EngineContext, pos: Vec2) -> Tower {
    let id = ctx.next_id();
    ctx.spawn(
        Entity::new(id)
            .with_tag(TOWER_TAG)
            .with_pos(pos)
            .with_anchor(Anchor::Bot)
            .with_rect(TOWER_WIDTH, TOWER_HEIGHT)
            .with_color(TOWER_COLOR),
    );
    Tower::new(id, pos)
}
