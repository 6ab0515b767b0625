use glam::Vec2;
use stack_engine::{
    Anchor, BodyDesc, ColliderDesc, ColliderMaterial, Color, EngineContext, Entity, EntityId,
    Outline,
};

use crate::tower::Tower;

pub const RING_TAG: &str = "ring";
pub const RING_HEIGHT: f32 = 40.0;
pub const HIGHLIGHT_COLOR: Color = Color::CYAN;
pub const HIGHLIGHT_WIDTH: f32 = 2.0;

const RING_OUTLINE: Outline = Outline { width: 1.0, color: Color::BLACK };
const RING_MATERIAL: ColliderMaterial = ColliderMaterial {
    restitution: 0.0,
    friction: 0.5,
    density: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingSize {
    Large,
    Medium,
    Small,
}

impl RingSize {
    pub fn width(self) -> f32 {
        match self {
            RingSize::Large => 150.0,
            RingSize::Medium => 110.0,
            RingSize::Small => 70.0,
        }
    }
}

/// Handle to a ring entity plus the settings it was made from.
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    pub entity: EntityId,
    pub size: RingSize,
    pub color: Color,
}

/// Spawn a ring at the origin: bottom-anchored, outlined, and falling
/// under gravity without rotating. Place it with [`place_on_tower`].
pub fn spawn_ring(ctx: &mut EngineContext, color: Color, size: RingSize) -> Ring {
    let id = ctx.next_id();
    let entity = Entity::new(id)
        .with_tag(RING_TAG)
        .with_anchor(Anchor::Bot)
        .with_rect(size.width(), RING_HEIGHT)
        .with_color(color)
        .with_outline(RING_OUTLINE);
    let desc = BodyDesc::dynamic(ColliderDesc::rect(Vec2::new(size.width(), RING_HEIGHT)))
        .with_fixed_rotation(true);
    ctx.spawn_with_body(entity, desc, RING_MATERIAL);

    Ring { entity: id, size, color }
}

/// Highlight a ring. Position and tower bookkeeping are untouched.
pub fn select(ctx: &mut EngineContext, ring: EntityId) {
    if let Some(entity) = ctx.scene.get_mut(ring) {
        entity.outline = Some(Outline::new(HIGHLIGHT_WIDTH, HIGHLIGHT_COLOR));
    }
}

/// Register the ring on `tower` and move it to the slot the tower hands back.
///
/// A tower the ring was placed on before keeps its (now stale) entry.
pub fn place_on_tower(ctx: &mut EngineContext, ring: EntityId, tower: &mut Tower) {
    let slot = tower.add_ring(ring);
    ctx.set_position(ring, slot);
}
