use web_time::Instant;

/// Shared per-frame time source.
///
/// Every orb of a frame reads the same elapsed value. Time only moves
/// forward; [`restart`](Self::restart) is the single way back to zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Accumulated seconds, kept in f64 so long sessions do not lose
    /// sub-frame precision.
    elapsed: f64,
    /// Seconds advanced by the most recent tick.
    delta: f64,
    /// Wall-clock timestamp of the last [`tick`](Self::tick).
    last_sample: Option<Instant>,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Weight of the newest sample in the moving average.
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// A clock at t = 0 that has not sampled wall time yet.
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            last_sample: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Sample wall time and return the new elapsed seconds.
    ///
    /// The first tick after construction or restart advances nothing.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_sample
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_sample = Some(now);
        self.step(delta);
        self.elapsed()
    }

    /// Advance by a host-supplied delta and return the new elapsed seconds.
    /// Negative or non-finite deltas advance nothing.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let delta = if delta.is_finite() && delta > 0.0 {
            f64::from(delta)
        } else {
            0.0
        };
        self.step(delta);
        self.elapsed()
    }

    fn step(&mut self, delta: f64) {
        self.delta = delta;
        self.elapsed += delta;
        if delta > 0.0 {
            let instant_fps = (1.0 / delta) as f32;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Seconds since start (or last restart).
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Seconds covered by the last tick.
    pub fn delta(&self) -> f32 {
        self.delta as f32
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Reset to zero for a full scene restart.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
        self.last_sample = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = FrameClock::new();
        let _ = clock.advance(0.5);
        let t = clock.advance(0.25);
        assert!((t - 0.75).abs() < 1e-6);
        assert!((clock.delta() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn bad_deltas_never_rewind() {
        let mut clock = FrameClock::new();
        let _ = clock.advance(1.0);
        assert_eq!(clock.advance(-3.0), 1.0);
        assert_eq!(clock.advance(f32::NAN), 1.0);
        assert_eq!(clock.advance(f32::INFINITY), 1.0);
    }

    #[test]
    fn tick_is_monotonic() {
        let mut clock = FrameClock::new();
        let mut last = clock.tick();
        assert_eq!(last, 0.0);
        for _ in 0..100 {
            let t = clock.tick();
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn restart_returns_to_zero() {
        let mut clock = FrameClock::new();
        let _ = clock.advance(4.0);
        clock.restart();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn fps_tracks_steady_rate() {
        let mut clock = FrameClock::new();
        for _ in 0..500 {
            let _ = clock.advance(1.0 / 30.0);
        }
        assert!((clock.fps() - 30.0).abs() < 0.5);
    }
}
