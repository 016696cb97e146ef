//! Scalar helpers used on the per-frame path. None of them produce NaN.

/// Clamp to `[0, 1]`; NaN maps to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// `v` when finite, otherwise `fallback`.
#[inline]
pub fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Linear interpolation, `t` unclamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise [`lerp`] for RGB triples.
#[inline]
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_is_idempotent() {
        for v in [-5.0, -0.0, 0.0, 0.3, 1.0, 7.5, f32::NAN, f32::INFINITY] {
            let once = clamp01(v);
            assert_eq!(clamp01(once), once);
            assert!((0.0..=1.0).contains(&once));
        }
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp3([0.0; 3], [1.0, 2.0, 3.0], 0.5), [0.5, 1.0, 1.5]);
    }

    #[test]
    fn finite_or_replaces_nan() {
        assert_eq!(finite_or(f32::NAN, 2.0), 2.0);
        assert_eq!(finite_or(f32::NEG_INFINITY, 2.0), 2.0);
        assert_eq!(finite_or(0.5, 2.0), 0.5);
    }
}
