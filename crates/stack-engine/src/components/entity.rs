use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::shape::{Anchor, Color, Outline, RectShape};
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Fat entity: a single struct with optional capability blocks.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position of the anchor point in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Which point of the rect `pos` refers to.
    pub anchor: Anchor,
    /// Rect extent (optional; entities without a rect are invisible).
    pub rect: Option<RectShape>,
    /// Fill color.
    pub color: Option<Color>,
    /// Stroke around the rect.
    pub outline: Option<Outline>,
    /// Physics body (optional, requires the "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            anchor: Anchor::TopLeft,
            rect: None,
            color: None,
            outline: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_rect(mut self, width: f32, height: f32) -> Self {
        self.rect = Some(RectShape::new(width, height));
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Offset from `pos` to the rect centre. Zero when the entity has no rect.
    pub fn center_offset(&self) -> Vec2 {
        self.rect
            .map(|r| self.anchor.center_offset(r.size()))
            .unwrap_or(Vec2::ZERO)
    }

    /// World-space centre of the rect.
    pub fn center(&self) -> Vec2 {
        self.pos + self.center_offset()
    }
}
