pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::shape::{Anchor, Color, Outline, RectShape};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{RectInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use input::keyboard::{Key, KeyboardState};
pub use systems::render::build_render_buffer;

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial,
};
