use stack_engine::{
    build_render_buffer, EngineContext, FixedTimestep, Game, GameConfig, InputEvent,
    InputQueue, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `ring-stack`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::new(config.fixed_dt),
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_render_buffer();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one rendered frame: as many fixed ticks as `dt` covers, then
    /// rebuild the rect buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        // Input that arrives during a frame with no tick waits for the next one.
        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            self.ctx.keyboard.ingest(self.input.iter());
            for step in 0..steps {
                // Custom events are delivered once, with the first tick.
                if step == 0 {
                    self.game.update(&mut self.ctx, &self.input);
                } else {
                    self.game.update(&mut self.ctx, &InputQueue::new());
                }
                #[cfg(feature = "physics")]
                self.ctx.step_physics();
                self.ctx.keyboard.end_step();
            }
            self.input.drain();
        }

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "dropping {} game events over the per-frame limit",
                self.ctx.events.len() - self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        self.rebuild_render_buffer();
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.config.max_instances,
        );
    }

    /// Read access for hosts and tests.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stack_engine::{Entity, GameEvent, Key};

    /// Counts ticks and key edges, spawns one rect.
    struct Probe {
        ticks: u32,
        presses: u32,
        custom: u32,
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.spawn(Entity::new(id).with_rect(10.0, 10.0));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.ticks += 1;
            if ctx.keyboard.is_pressed(Key::Space) {
                self.presses += 1;
                ctx.emit_event(GameEvent::new(1.0, 0.0));
            }
            self.custom += input
                .iter()
                .filter(|e| matches!(e, InputEvent::Custom { .. }))
                .count() as u32;
        }
    }

    fn runner() -> GameRunner<Probe> {
        let mut r = GameRunner::new(Probe { ticks: 0, presses: 0, custom: 0 });
        r.init();
        r
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut r = GameRunner::new(Probe { ticks: 0, presses: 0, custom: 0 });
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().ticks, 0);
    }

    #[test]
    fn init_fills_render_buffer() {
        let r = runner();
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.world_width(), 800.0);
    }

    #[test]
    fn key_press_is_seen_by_exactly_one_tick() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: Key::Space.code() });
        // Long frame: several fixed ticks.
        r.tick(3.0 / 60.0 + 0.001);
        assert!(r.game().ticks >= 3);
        assert_eq!(r.game().presses, 1);
        assert_eq!(r.game_events_len(), 1);

        r.tick(1.0 / 60.0 + 0.001);
        assert_eq!(r.game().presses, 1);
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn custom_events_delivered_once() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        r.tick(2.0 / 60.0 + 0.001);
        r.tick(1.0 / 60.0 + 0.001);
        assert_eq!(r.game().custom, 1);
    }

    #[test]
    fn input_waits_for_a_tick() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        r.tick(0.001);
        assert_eq!(r.game().ticks, 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().custom, 1);
    }
}
