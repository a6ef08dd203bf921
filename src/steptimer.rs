//! Variable-timestep frame timer.
//!
//! Measures wall-clock time between ticks. Long stalls (a debugger break, a
//! dragged window) are capped at [`MAX_DELTA`] so the simulation never takes
//! one giant step.

use std::time::{Duration, Instant};

/// Largest elapsed time reported for a single tick.
pub const MAX_DELTA: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct StepTimer {
    last: Option<Instant>,
    elapsed: Duration,
    total: Duration,
    frame_count: u64,
    max_delta: Duration,
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepTimer {
    pub fn new() -> Self {
        Self {
            last: None,
            elapsed: Duration::ZERO,
            total: Duration::ZERO,
            frame_count: 0,
            max_delta: MAX_DELTA,
        }
    }

    /// Measure the time since the previous tick and return it in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit clock reading.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.elapsed = delta.min(self.max_delta);
        self.total += self.elapsed;
        self.frame_count += 1;
        self.elapsed.as_secs_f32()
    }

    /// Forget the time spent since the last tick, e.g. after a suspend, so
    /// the next tick does not report the whole pause.
    pub fn reset_elapsed_time(&mut self) {
        self.reset_elapsed_time_at(Instant::now());
    }

    pub fn reset_elapsed_time_at(&mut self, now: Instant) {
        self.last = Some(now);
        self.elapsed = Duration::ZERO;
    }

    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut timer = StepTimer::new();
        assert_eq!(timer.tick_at(Instant::now()), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn measures_time_between_ticks() {
        let start = Instant::now();
        let mut timer = StepTimer::new();
        timer.tick_at(start);
        let dt = timer.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        assert!((timer.total_seconds() - 0.016).abs() < 1e-9);
    }

    #[test]
    fn caps_long_stalls() {
        let start = Instant::now();
        let mut timer = StepTimer::new();
        timer.tick_at(start);
        let dt = timer.tick_at(start + Duration::from_secs(5));
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn reset_discards_pause() {
        let start = Instant::now();
        let mut timer = StepTimer::new();
        timer.tick_at(start);
        timer.reset_elapsed_time_at(start + Duration::from_secs(30));
        let dt = timer.tick_at(start + Duration::from_secs(30) + Duration::from_millis(10));
        assert!((dt - 0.010).abs() < 1e-6);
    }
}
