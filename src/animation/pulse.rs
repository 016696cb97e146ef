/// Per-tick decay of an active pulse.
pub const PULSE_DECAY: f32 = 0.95;
/// Below this the pulse snaps to exactly zero.
pub const PULSE_EPSILON: f32 = 0.01;

/// Whether a pulse is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    /// Value is exactly zero.
    Resting,
    /// Value is decaying toward zero.
    Pulsing,
}

/// Click pulse: jumps to 1, decays geometrically each tick, then rests at
/// exactly 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    value: f32,
    decay: f32,
    epsilon: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(PULSE_DECAY, PULSE_EPSILON)
    }
}

impl Pulse {
    /// Resting pulse with custom decay factor and cutoff. Out-of-range
    /// values fall back to the defaults.
    pub fn new(decay: f32, epsilon: f32) -> Self {
        let decay = if decay > 0.0 && decay < 1.0 {
            decay
        } else {
            PULSE_DECAY
        };
        let epsilon = if epsilon > 0.0 && epsilon < 1.0 {
            epsilon
        } else {
            PULSE_EPSILON
        };
        Self {
            value: 0.0,
            decay,
            epsilon,
        }
    }

    /// Start (or restart) at full strength.
    pub fn trigger(&mut self) {
        self.value = 1.0;
    }

    /// Drop to rest immediately.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Advance one tick and return the new value.
    pub fn tick(&mut self) -> f32 {
        if self.value > 0.0 {
            self.value *= self.decay;
            if self.value < self.epsilon {
                self.value = 0.0;
            }
        }
        self.value
    }

    /// Current value in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current phase.
    pub fn phase(&self) -> PulsePhase {
        if self.value > 0.0 {
            PulsePhase::Pulsing
        } else {
            PulsePhase::Resting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decays_to_hard_zero_after_ninety_ticks() {
        let mut pulse = Pulse::default();
        pulse.trigger();
        for _ in 0..89 {
            let _ = pulse.tick();
        }
        assert!(pulse.value() > 0.0);
        assert_eq!(pulse.phase(), PulsePhase::Pulsing);
        assert_eq!(pulse.tick(), 0.0);
        assert_eq!(pulse.phase(), PulsePhase::Resting);
    }

    #[test]
    fn resting_stays_zero() {
        let mut pulse = Pulse::default();
        for _ in 0..10 {
            assert_eq!(pulse.tick(), 0.0);
        }
    }

    #[test]
    fn retrigger_restarts() {
        let mut pulse = Pulse::default();
        pulse.trigger();
        for _ in 0..30 {
            let _ = pulse.tick();
        }
        pulse.trigger();
        assert_eq!(pulse.value(), 1.0);
    }

    #[test]
    fn invalid_parameters_use_defaults() {
        let mut pulse = Pulse::new(1.5, -1.0);
        pulse.trigger();
        assert!((pulse.tick() - PULSE_DECAY).abs() < 1e-6);
    }
}
