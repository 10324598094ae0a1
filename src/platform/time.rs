//! Frame timing helpers
//!
//! `requestAnimationFrame` hands us millisecond timestamps; the simulations
//! want either fixed steps (Pong) or variable-length intervals (Snake,
//! shooting stars). Everything here is plain arithmetic so it runs natively.

use crate::consts::MAX_FRAME_DT;

/// Converts rAF timestamps into clamped frame deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, or `fallback` on the first frame.
    /// Long gaps (background tabs) are clamped to `MAX_FRAME_DT`.
    pub fn tick(&mut self, time_ms: f64, fallback: f32) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => fallback,
        };
        self.last_time = Some(time_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the previous timestamp (after a pause or remount)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add frame time and return how many fixed steps to run.
    /// Time beyond the substep cap is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Fires once every `interval` milliseconds; the interval may change between
/// firings (Snake speeds up as the score grows).
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    elapsed_ms: f64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed time
    pub fn add(&mut self, dt_ms: f64) {
        self.elapsed_ms += dt_ms;
    }

    /// Consume one interval if enough time has built up
    pub fn fire(&mut self, interval_ms: f64) -> bool {
        let interval = interval_ms.max(1.0);
        if self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            true
        } else {
            false
        }
    }

    /// Add time and count firings of a fixed interval
    pub fn advance(&mut self, dt_ms: f64, interval_ms: f64) -> u32 {
        self.add(dt_ms);
        let mut fired = 0;
        while self.fire(interval_ms) {
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_first_frame_uses_fallback() {
        let mut clock = FrameClock::new();
        assert!((clock.tick(1000.0, 1.0 / 60.0) - 1.0 / 60.0).abs() < 1e-6);
        assert!((clock.tick(1016.0, 1.0 / 60.0) - 0.016).abs() < 1e-4);
    }

    #[test]
    fn test_frame_clock_clamps_long_gaps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0, 0.0);
        assert_eq!(clock.tick(5000.0, 0.0), MAX_FRAME_DT);

        clock.reset();
        assert_eq!(clock.tick(9000.0, 0.0), 0.0);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut fixed = FixedStep::new(0.01, 8);
        assert_eq!(fixed.advance(0.005), 0);
        assert_eq!(fixed.advance(0.006), 1);
        assert_eq!(fixed.advance(0.03), 3);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut fixed = FixedStep::new(0.01, 4);
        assert_eq!(fixed.advance(1.0), 4);
        // Backlog beyond the cap is dropped
        assert!(fixed.advance(0.0) <= 1);
    }

    #[test]
    fn test_interval_timer_fixed_interval() {
        let mut timer = IntervalTimer::new();
        assert_eq!(timer.advance(100.0, 120.0), 0);
        assert_eq!(timer.advance(30.0, 120.0), 1);
        assert_eq!(timer.advance(250.0, 120.0), 2);
    }

    #[test]
    fn test_interval_timer_variable_interval() {
        let mut timer = IntervalTimer::new();
        timer.add(110.0);
        // Interval shrinks after each firing: 50, then 40, then 30
        assert!(timer.fire(50.0));
        assert!(timer.fire(40.0));
        assert!(!timer.fire(30.0));

        timer.reset();
        assert!(!timer.fire(1.0));
    }
}
