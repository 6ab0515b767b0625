use glam::Vec2;
use stack_engine::*;

use crate::ring::{self, Ring, RingSize};
use crate::tower::{self, Tower, TOWER_TAG};

const WORLD_W: f32 = 800.0;
const WORLD_H: f32 = 600.0;
/// Y-down, in world units per second squared.
const GRAVITY: f32 = 1600.0;

const BAND_Y: f32 = 500.0;
const GROUND_Y: f32 = 550.0;
const GROUND_THICKNESS: f32 = 100.0;
const GROUND_COLOR: Color = Color::YELLOW;

const TOWER_Y: f32 = 550.0;
const TOWER_XS: [f32; 3] = [150.0, 400.0, 650.0];

const JUMP_FORCE: f32 = 1000.0;
const MOVE_STEP: f32 = 10.0;

/// Custom event kinds from the page UI. `a` carries the ring index.
pub const CUSTOM_SELECT_RING: u32 = 1;

/// Game event kinds to the page. `a` carries the ring index.
pub const EVENT_RING_SELECTED: f32 = 1.0;

/// Three posts, three rings, and one optionally selected ring that
/// the arrow keys and space bar act on.
pub struct RingStack {
    towers: Vec<Tower>,
    rings: Vec<Ring>,
    selected: Option<EntityId>,
}

impl RingStack {
    pub fn new() -> Self {
        Self {
            towers: Vec::with_capacity(TOWER_XS.len()),
            rings: Vec::with_capacity(3),
            selected: None,
        }
    }

    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Make the ring at `index` (spawn order) the selected one and highlight it.
    /// Selection is driven from outside the scene; out-of-range indices are ignored.
    pub fn select_ring(&mut self, ctx: &mut EngineContext, index: usize) -> Option<EntityId> {
        let Some(&chosen) = self.rings.get(index) else {
            log::warn!("ring-stack: no ring at index {}", index);
            return None;
        };
        let id = chosen.entity;
        ring::select(ctx, id);
        self.selected = Some(id);
        ctx.emit_event(GameEvent::new(EVENT_RING_SELECTED, index as f32));
        log::info!("ring-stack: selected ring {} ({:?})", index, chosen.size);
        Some(id)
    }

    /// Drop the selection. The highlight stays; there is no deselect look.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn build_ground(ctx: &mut EngineContext) {
        // Black band behind the floor, decoration only.
        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id)
                .with_tag("backdrop")
                .with_pos(Vec2::new(0.0, BAND_Y))
                .with_rect(WORLD_W, GROUND_THICKNESS)
                .with_color(Color::BLACK),
        );

        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag("ground")
            .with_pos(Vec2::new(0.0, GROUND_Y))
            .with_rect(WORLD_W, GROUND_THICKNESS)
            .with_color(GROUND_COLOR);
        let desc = BodyDesc::fixed(ColliderDesc::rect(Vec2::new(WORLD_W, GROUND_THICKNESS)));
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());
    }

    fn handle_custom_events(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind, a, .. } = *event {
                if kind == CUSTOM_SELECT_RING && a >= 0.0 {
                    self.select_ring(ctx, a as usize);
                }
            }
        }
    }

    /// Jump only from the ground; steer only in the air.
    fn handle_keys(&mut self, ctx: &mut EngineContext) {
        let Some(ring) = self.selected else { return };

        if ctx.keyboard.is_pressed(Key::Space) && ctx.is_grounded(ring) {
            ctx.jump(ring, JUMP_FORCE);
        }
        if ctx.keyboard.is_down(Key::Right) && !ctx.is_grounded(ring) {
            ctx.move_by(ring, Vec2::new(MOVE_STEP, 0.0));
        }
        if ctx.keyboard.is_down(Key::Left) && !ctx.is_grounded(ring) {
            ctx.move_by(ring, Vec2::new(-MOVE_STEP, 0.0));
        }
        // Enter is bound but does nothing yet.
    }

    fn log_available_rings(&self, ctx: &EngineContext) {
        for id in ctx.scene.ids_by_tag(TOWER_TAG) {
            let top = self
                .towers
                .iter()
                .find(|t| t.entity == id)
                .and_then(Tower::available_ring);
            if let Some(ring) = top {
                log::debug!("tower {}: top ring {}", id.0, ring.0);
            }
        }
    }
}

impl Default for RingStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for RingStack {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            max_instances: 64,
            gravity: Vec2::new(0.0, GRAVITY),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        Self::build_ground(ctx);

        self.towers = TOWER_XS
            .iter()
            .map(|&x| tower::spawn_tower(ctx, Vec2::new(x, TOWER_Y)))
            .collect();

        self.rings = vec![
            ring::spawn_ring(ctx, Color::RED, RingSize::Large),
            ring::spawn_ring(ctx, Color::YELLOW, RingSize::Medium),
            ring::spawn_ring(ctx, Color::GREEN, RingSize::Small),
        ];

        // Call order decides stacking: large ends up at the bottom.
        let first = &mut self.towers[0];
        for r in &self.rings {
            ring::place_on_tower(ctx, r.entity, first);
        }
        let (first_id, stacked) = (first.entity, first.len());

        self.selected = None;
        log::info!(
            "ring-stack: {} towers, {} rings on tower {}",
            self.towers.len(),
            stacked,
            first_id.0
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_custom_events(ctx, input);
        self.handle_keys(ctx);
        self.log_available_rings(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (RingStack, EngineContext) {
        let mut game = RingStack::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn settle(ctx: &mut EngineContext) {
        for _ in 0..120 {
            ctx.step_physics();
        }
    }

    fn hold(ctx: &mut EngineContext, key: Key) {
        ctx.keyboard.ingest(&[InputEvent::KeyDown { key_code: key.code() }]);
    }

    fn release(ctx: &mut EngineContext, key: Key) {
        ctx.keyboard.end_step();
        ctx.keyboard.ingest(&[InputEvent::KeyUp { key_code: key.code() }]);
    }

    fn positions(ctx: &EngineContext) -> Vec<Vec2> {
        ctx.scene.iter().map(|e| e.pos).collect()
    }

    fn pos_of(ctx: &EngineContext, id: EntityId) -> Vec2 {
        ctx.scene.get(id).unwrap().pos
    }

    #[test]
    fn init_builds_world() {
        let (game, ctx) = setup();
        // backdrop + ground + 3 towers + 3 rings
        assert_eq!(ctx.scene.len(), 8);
        assert_eq!(ctx.scene.ids_by_tag(TOWER_TAG).len(), 3);
        assert_eq!(ctx.scene.ids_by_tag(ring::RING_TAG).len(), 3);
        assert_eq!(game.selected(), None);

        let anchors: Vec<Vec2> = game.towers().iter().map(|t| t.anchor).collect();
        assert_eq!(
            anchors,
            vec![
                Vec2::new(150.0, 550.0),
                Vec2::new(400.0, 550.0),
                Vec2::new(650.0, 550.0),
            ]
        );
    }

    #[test]
    fn rings_start_stacked_on_first_tower() {
        let (game, ctx) = setup();
        let [large, medium, small] = [0, 1, 2].map(|i| game.rings()[i]);
        assert_eq!(large.size, RingSize::Large);
        assert_eq!(medium.size, RingSize::Medium);
        assert_eq!(small.size, RingSize::Small);

        assert_eq!(pos_of(&ctx, large.entity), Vec2::new(150.0, 550.0));
        assert_eq!(pos_of(&ctx, medium.entity), Vec2::new(150.0, 510.0));
        assert_eq!(pos_of(&ctx, small.entity), Vec2::new(150.0, 470.0));

        let first = &game.towers()[0];
        assert_eq!(first.rings(), &[large.entity, medium.entity, small.entity]);
        assert_eq!(first.available_ring(), Some(small.entity));
        assert!(game.towers()[1].is_empty());
        assert!(game.towers()[2].is_empty());
    }

    #[test]
    fn stack_stays_put_under_gravity() {
        let (game, mut ctx) = setup();
        settle(&mut ctx);
        for (r, y) in game.rings().iter().zip([550.0, 510.0, 470.0]) {
            let pos = pos_of(&ctx, r.entity);
            assert!((pos.x - 150.0).abs() < 0.5, "x drifted: {:?}", pos);
            assert!((pos.y - y).abs() < 1.0, "y drifted: {:?}", pos);
            assert!(ctx.is_grounded(r.entity));
        }
    }

    #[test]
    fn keys_do_nothing_without_selection() {
        let (mut game, mut ctx) = setup();
        settle(&mut ctx);
        let before = positions(&ctx);

        hold(&mut ctx, Key::Space);
        hold(&mut ctx, Key::Right);
        hold(&mut ctx, Key::Left);
        game.update(&mut ctx, &InputQueue::new());

        assert_eq!(positions(&ctx), before);
        for r in game.rings() {
            let vel = ctx.velocity(r.entity);
            assert!(vel.y > -1.0, "ring jumped: {:?}", vel);
        }
    }

    #[test]
    fn airborne_ring_steers_by_ten() {
        // Before any physics step nothing touches, so every ring is airborne.
        let (mut game, mut ctx) = setup();
        let id = game.select_ring(&mut ctx, 2).unwrap();
        assert!(!ctx.is_grounded(id));
        let start = pos_of(&ctx, id);

        hold(&mut ctx, Key::Right);
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(pos_of(&ctx, id), start + Vec2::new(10.0, 0.0));

        release(&mut ctx, Key::Right);
        hold(&mut ctx, Key::Left);
        game.update(&mut ctx, &InputQueue::new());
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(pos_of(&ctx, id), start - Vec2::new(10.0, 0.0));
    }

    #[test]
    fn grounded_ring_ignores_steering() {
        let (mut game, mut ctx) = setup();
        settle(&mut ctx);
        let id = game.select_ring(&mut ctx, 0).unwrap();
        assert!(ctx.is_grounded(id));
        let start = pos_of(&ctx, id);

        hold(&mut ctx, Key::Right);
        game.update(&mut ctx, &InputQueue::new());
        release(&mut ctx, Key::Right);
        hold(&mut ctx, Key::Left);
        game.update(&mut ctx, &InputQueue::new());

        assert_eq!(pos_of(&ctx, id), start);
    }

    #[test]
    fn grounded_ring_jumps_once_per_press() {
        let (mut game, mut ctx) = setup();
        settle(&mut ctx);
        let id = game.select_ring(&mut ctx, 2).unwrap();

        hold(&mut ctx, Key::Space);
        game.update(&mut ctx, &InputQueue::new());
        let vel = ctx.velocity(id);
        assert!((vel.y + JUMP_FORCE).abs() < 0.001, "vel={:?}", vel);

        // Held space is not another press.
        ctx.keyboard.end_step();
        ctx.set_velocity(id, Vec2::ZERO);
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
    }

    #[test]
    fn jump_tick_already_steers() {
        let (mut game, mut ctx) = setup();
        settle(&mut ctx);
        let id = game.select_ring(&mut ctx, 2).unwrap();
        let start = pos_of(&ctx, id);

        hold(&mut ctx, Key::Space);
        hold(&mut ctx, Key::Right);
        game.update(&mut ctx, &InputQueue::new());

        assert!((ctx.velocity(id).y + JUMP_FORCE).abs() < 0.001);
        assert!(!ctx.is_grounded(id));
        assert_eq!(pos_of(&ctx, id), start + Vec2::new(MOVE_STEP, 0.0));
    }

    #[test]
    fn airborne_ring_cannot_jump() {
        let (mut game, mut ctx) = setup();
        let id = game.select_ring(&mut ctx, 1).unwrap();
        hold(&mut ctx, Key::Space);
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
    }

    #[test]
    fn jumped_ring_leaves_the_stack() {
        let (mut game, mut ctx) = setup();
        settle(&mut ctx);
        let id = game.select_ring(&mut ctx, 2).unwrap();
        hold(&mut ctx, Key::Space);
        game.update(&mut ctx, &InputQueue::new());
        ctx.keyboard.end_step();
        for _ in 0..5 {
            ctx.step_physics();
        }
        assert!(!ctx.is_grounded(id));
        assert!(pos_of(&ctx, id).y < 470.0);
    }

    #[test]
    fn enter_is_a_no_op() {
        let (mut game, mut ctx) = setup();
        game.select_ring(&mut ctx, 2);
        let before = positions(&ctx);
        hold(&mut ctx, Key::Enter);
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(positions(&ctx), before);
    }

    #[test]
    fn custom_event_selects_and_highlights() {
        let (mut game, mut ctx) = setup();
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_SELECT_RING, a: 1.0, b: 0.0, c: 0.0 });
        game.update(&mut ctx, &input);

        let id = game.rings()[1].entity;
        assert_eq!(game.selected(), Some(id));
        let outline = ctx.scene.get(id).unwrap().outline.unwrap();
        assert_eq!(outline, Outline::new(ring::HIGHLIGHT_WIDTH, ring::HIGHLIGHT_COLOR));
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_RING_SELECTED, 1.0)]);
    }

    #[test]
    fn bad_selection_index_is_ignored() {
        let (mut game, mut ctx) = setup();
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_SELECT_RING, a: 5.0, b: 0.0, c: 0.0 });
        input.push(InputEvent::Custom { kind: CUSTOM_SELECT_RING, a: -1.0, b: 0.0, c: 0.0 });
        game.update(&mut ctx, &input);
        assert_eq!(game.selected(), None);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn clearing_selection_stops_input() {
        let (mut game, mut ctx) = setup();
        let id = game.select_ring(&mut ctx, 2).unwrap();
        game.clear_selection();
        let start = pos_of(&ctx, id);
        hold(&mut ctx, Key::Right);
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(pos_of(&ctx, id), start);
    }

    #[test]
    fn runner_drives_select_and_jump() {
        let mut runner = stack_web::GameRunner::new(RingStack::new());
        runner.init();
        for _ in 0..120 {
            runner.tick(1.0 / 60.0);
        }

        runner.push_input(InputEvent::Custom { kind: CUSTOM_SELECT_RING, a: 2.0, b: 0.0, c: 0.0 });
        runner.tick(1.0 / 60.0);
        let id = runner.game().rings()[2].entity;
        assert_eq!(runner.game().selected(), Some(id));
        assert_eq!(runner.game_events_len(), 1);
        let rest_y = pos_of(runner.context(), id).y;

        runner.push_input(InputEvent::KeyDown { key_code: Key::Space.code() });
        runner.tick(1.0 / 60.0);
        assert!(pos_of(runner.context(), id).y < rest_y - 5.0);
    }
}
