pub use std::time::Instant;

// Refresh rates that elapsed frame times get snapped to when they
// land within the fudge window, to smooth out jitter under vsync.
const TIME_SNAPS: [f32; 5] = [15.0, 30.0, 60.0, 120.0, 144.0];

/// A time accumulator for a fixed-timestep simulation loop in the
/// style of "Fix Your Timestep!", with optional snapping of frame
/// times to common vsync rates and a cap on steps per tick to avoid
/// death spirals.
pub struct Clock {
    acc: f32,
    dt: f32,
    fudge_amount: f32,
    max_steps_per_tick: usize,
    last_t: Instant,
}

impl Clock {
    /// Creates a clock with the given simulation timestep `dt` in seconds.
    ///
    /// `fudge_amount`, if non-zero, snaps elapsed intervals to nearby
    /// standard frame rates (15hz, 30hz, 60hz, 120hz, 144hz) to
    /// smooth out small differences under vertical sync.
    ///
    /// `max_steps_per_tick` limits the largest number of steps to
    /// simulate at once, so one slow frame can't snowball into ever
    /// more catch-up work on the frames after it.
    pub fn new(dt: f32, fudge_amount: f32, max_steps_per_tick: usize) -> Self {
        Self {
            acc: 0.0,
            dt,
            fudge_amount,
            max_steps_per_tick,
            last_t: Instant::now(),
        }
    }
    /// Re-initialize the last-ticked time to the given instant and
    /// clear the accumulator, e.g. after loading a new level, so the
    /// load stall isn't simulated as elapsed game time.
    pub fn set_now(&mut self, instant: Instant) {
        self.last_t = instant;
        self.acc = 0.0;
    }
    /// Tick the clock forward based on the time since it was last
    /// ticked.  Returns how many timesteps to simulate.
    pub fn tick(&mut self) -> usize {
        let mut elapsed = self.last_t.elapsed().as_secs_f32();
        // snap time to a nearby vsync framerate
        for snap in TIME_SNAPS {
            if (elapsed - 1.0 / snap).abs() < self.fudge_amount {
                elapsed = 1.0 / snap;
                break;
            }
        }
        // death spiral prevention
        if elapsed > self.max_steps_per_tick as f32 * self.dt {
            self.acc = 0.0;
            elapsed = self.dt;
        }
        self.acc += elapsed;
        self.last_t = Instant::now();
        let steps = (self.acc / self.dt) as usize;
        self.acc -= steps as f32 * self.dt;
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fresh_clock_has_no_steps_to_run() {
        let mut clock = Clock::new(1.0 / 60.0, 0.0, 5);
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn long_stall_is_clamped_to_one_step() {
        let mut clock = Clock::new(1.0 / 60.0, 0.0, 5);
        clock.set_now(Instant::now() - Duration::from_secs(10));
        assert_eq!(clock.tick(), 1);
        // and the stall doesn't leak into the next tick
        assert_eq!(clock.tick(), 0);
    }
}
