use glam::Vec2;
use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::input::keyboard::KeyboardState;
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::core::physics::{
    PhysicsWorld, BodyDesc, ColliderMaterial, DEFAULT_GROUND_COS,
};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of rect instances written per frame (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for physics simulation. Default: zero (no gravity).
    /// Y points down, so positive Y pulls toward the floor.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 512,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Spawn the world and set up initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. `ctx.keyboard` already reflects this frame's key events;
    /// `input` still carries them (and custom UI events) in arrival order.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub keyboard: KeyboardState,
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    /// Bodies launched since the last physics step. They count as airborne
    /// even though their old contacts are still on record.
    #[cfg(feature = "physics")]
    launched: Vec<EntityId>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Build a context whose physics world uses the config's gravity and step.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            keyboard: KeyboardState::new(),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(config.gravity, config.fixed_dt),
            #[cfg(feature = "physics")]
            launched: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity without physics (decoration, posts).
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Move an entity's anchor to `pos`, carrying its body along.
    /// Unknown ids are ignored.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        let Some(entity) = self.scene.get_mut(id) else { return };
        entity.pos = pos;
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.set_translation(body, entity.center());
        }
    }

    /// Offset an entity's position by `delta`.
    pub fn move_by(&mut self, id: EntityId, delta: Vec2) {
        if let Some(pos) = self.scene.get(id).map(|e| e.pos) {
            self.set_position(id, pos + delta);
        }
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body centred on its rect.
    /// `desc.position` is replaced by the centre derived from the entity's anchor.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let desc = desc.with_position(entity.center());
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_body(body));
        id
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body.as_ref()) {
            self.physics.set_velocity(body, vel);
        }
    }

    /// Linear velocity of an entity's physics body, zero without one.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Launch upward at `force` units/s, keeping horizontal speed.
    /// The entity is airborne from this call on, not from the next step.
    #[cfg(feature = "physics")]
    pub fn jump(&mut self, id: EntityId, force: f32) {
        let Some(body) = self.scene.get(id).and_then(|e| e.body) else { return };
        let vel = self.physics.velocity(&body);
        self.physics.set_velocity(&body, Vec2::new(vel.x, -force));
        if !self.launched.contains(&id) {
            self.launched.push(id);
        }
    }

    /// Whether the entity rests on something. False without a body.
    #[cfg(feature = "physics")]
    pub fn is_grounded(&self, id: EntityId) -> bool {
        if self.launched.contains(&id) {
            return false;
        }
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .is_some_and(|body| self.physics.is_grounded(body, DEFAULT_GROUND_COS))
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner after each `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();
        self.launched.clear();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (center, rot) = self.physics.body_position(body);
                entity.pos = center - entity.center_offset();
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
