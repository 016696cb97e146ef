use glam::{EulerRot, Quat, Vec3};

/// Per-axis rotation over time: steady spin plus a sinusoidal wobble.
///
/// `angle(axis, t) = spin × t + wobble_amplitude × sin(wobble_frequency × t)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationRule {
    /// Radians per second around x, y, z.
    pub spin: Vec3,
    /// Wobble amplitude in radians per axis.
    pub wobble_amplitude: Vec3,
    /// Wobble angular frequency per axis.
    pub wobble_frequency: Vec3,
}

impl RotationRule {
    /// No rotation.
    pub const STILL: Self = Self {
        spin: Vec3::ZERO,
        wobble_amplitude: Vec3::ZERO,
        wobble_frequency: Vec3::ZERO,
    };

    /// Constant spin only.
    pub const fn spin(spin: Vec3) -> Self {
        Self {
            spin,
            wobble_amplitude: Vec3::ZERO,
            wobble_frequency: Vec3::ZERO,
        }
    }

    /// Add a wobble.
    #[must_use]
    pub const fn with_wobble(mut self, amplitude: Vec3, frequency: Vec3) -> Self {
        self.wobble_amplitude = amplitude;
        self.wobble_frequency = frequency;
        self
    }

    /// Euler angles (XYZ) at `t` seconds.
    pub fn euler_at(&self, t: f32) -> Vec3 {
        let wobble = Vec3::new(
            (self.wobble_frequency.x * t).sin(),
            (self.wobble_frequency.y * t).sin(),
            (self.wobble_frequency.z * t).sin(),
        );
        self.spin * t + self.wobble_amplitude * wobble
    }

    /// Orientation at `t` seconds.
    pub fn quat_at(&self, t: f32) -> Quat {
        let e = self.euler_at(t);
        Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_is_linear_in_time() {
        let rule = RotationRule::spin(Vec3::new(0.0, 0.3, 0.0));
        let e = rule.euler_at(10.0);
        assert!((e.y - 3.0).abs() < 1e-5);
        assert_eq!(e.x, 0.0);
    }

    #[test]
    fn wobble_is_bounded() {
        let rule = RotationRule::STILL
            .with_wobble(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0));
        for i in 0..200 {
            let e = rule.euler_at(i as f32 * 0.37);
            assert!(e.x.abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn still_is_identity() {
        assert!(RotationRule::STILL.quat_at(42.0).abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}
