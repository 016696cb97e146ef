use std::f32::consts::TAU;

/// Sinusoidal scale oscillation ("breathing").
///
/// `factor(t) = 1 + sin(t × speed + phase) × amplitude`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathing {
    /// Scale at rest.
    pub base_scale: f32,
    /// Angular speed (rad/s).
    pub speed: f32,
    /// Relative amplitude.
    pub amplitude: f32,
}

impl Breathing {
    /// Multiplier applied to `base_scale` at `t`.
    #[inline]
    pub fn factor_at(&self, t: f32, phase: f32) -> f32 {
        1.0 + (t * self.speed + phase).sin() * self.amplitude
    }

    /// Breathing scale at `t`.
    #[inline]
    pub fn scale_at(&self, t: f32, phase: f32) -> f32 {
        self.base_scale * self.factor_at(t, phase)
    }

    /// Seconds per cycle; `None` when not breathing.
    pub fn period(&self) -> Option<f32> {
        (self.speed != 0.0 && self.speed.is_finite()).then(|| TAU / self.speed.abs())
    }

    /// `(min, max)` scale over a cycle.
    pub fn bounds(&self) -> (f32, f32) {
        let a = self.base_scale * (1.0 - self.amplitude.abs());
        let b = self.base_scale * (1.0 + self.amplitude.abs());
        (a.min(b), a.max(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Breathing = Breathing {
        base_scale: 1.2,
        speed: 0.8,
        amplitude: 0.05,
    };

    #[test]
    fn periodic() {
        let period = B.period().unwrap();
        for i in 0..50 {
            let t = i as f32 * 0.173;
            let a = B.scale_at(t, 0.4);
            let b = B.scale_at(t + period, 0.4);
            assert!((a - b).abs() < 1e-4, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn stays_within_bounds() {
        let (lo, hi) = B.bounds();
        assert!((lo - 1.14).abs() < 1e-6);
        assert!((hi - 1.26).abs() < 1e-6);
        for i in 0..1000 {
            let s = B.scale_at(i as f32 * 0.05, 1.3);
            assert!(s >= lo - 1e-6 && s <= hi + 1e-6);
        }
    }

    #[test]
    fn still_has_no_period() {
        let still = Breathing { speed: 0.0, ..B };
        assert!(still.period().is_none());
        assert_eq!(still.scale_at(10.0, 0.0), 1.2);
    }
}
