//! Frame clock: turns host frame timestamps into simulation time steps.

use crate::float::Float;

/// Derives a per-frame delta time from successive frame timestamps.
///
/// The first tick has no previous frame to measure against and yields
/// 1/60 s. With a fixed timestep every tick yields that timestep instead of
/// the measured delta, while still tracking frame times.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock<F: Float = f64> {
    last_frame: Option<F>,
    fixed_timestep: Option<F>,
}

impl<F: Float> FrameClock<F> {
    pub fn new() -> Self {
        FrameClock { last_frame: None, fixed_timestep: None }
    }

    pub fn with_fixed_timestep(mut self, dt: F) -> Self {
        self.fixed_timestep = Some(dt);
        self
    }

    pub fn fixed_timestep(&self) -> Option<F> {
        self.fixed_timestep
    }

    /// Record a frame at `frame_time` (seconds) and return the step to use.
    pub fn tick(&mut self, frame_time: F) -> F {
        let measured = match self.last_frame {
            Some(last) => frame_time - last,
            None => F::one() / F::from_f64(60.0),
        };
        self.last_frame = Some(frame_time);
        self.fixed_timestep.unwrap_or(measured)
    }

    /// Forget the last frame so the next tick starts over.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_sixtieth() {
        let mut clock: FrameClock = FrameClock::new();
        assert!((clock.tick(12.5) - 1.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn measures_between_frames() {
        let mut clock: FrameClock = FrameClock::new();
        clock.tick(1.0);
        assert!((clock.tick(1.25) - 0.25).abs() < 1e-15);
        assert!((clock.tick(1.3) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn fixed_timestep_overrides() {
        let mut clock: FrameClock = FrameClock::new().with_fixed_timestep(0.01);
        assert_eq!(clock.tick(0.0), 0.01);
        assert_eq!(clock.tick(3.0), 0.01);
    }

    #[test]
    fn reset_restarts_measurement() {
        let mut clock: FrameClock = FrameClock::new();
        clock.tick(1.0);
        clock.reset();
        assert!((clock.tick(9.0) - 1.0 / 60.0).abs() < 1e-15);
    }
}
