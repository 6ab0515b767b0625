/// Upper bound on fixed steps run for one rendered frame.
/// A long stall (tab in background) is dropped instead of replayed.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of update ticks.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time and return how many fixed ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let budget = self.dt * MAX_STEPS_PER_FRAME as f32;
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(budget);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
