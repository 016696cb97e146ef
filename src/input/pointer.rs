use glam::Vec2;

/// Pixel position (origin top-left) → NDC in `[-1, 1]²` with y up.
///
/// Positions outside the viewport clamp to its edge; a zero-sized viewport
/// maps everything to the center.
pub fn pixels_to_ndc(x: f32, y: f32, size: (u32, u32)) -> Vec2 {
    if size.0 == 0 || size.1 == 0 || !x.is_finite() || !y.is_finite() {
        return Vec2::ZERO;
    }
    let nx = x / size.0 as f32 * 2.0 - 1.0;
    let ny = 1.0 - y / size.1 as f32 * 2.0;
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        assert_eq!(pixels_to_ndc(0.0, 0.0, (800, 600)), Vec2::new(-1.0, 1.0));
        assert_eq!(pixels_to_ndc(800.0, 600.0, (800, 600)), Vec2::new(1.0, -1.0));
        assert_eq!(pixels_to_ndc(400.0, 300.0, (800, 600)), Vec2::ZERO);
    }

    #[test]
    fn outside_clamps() {
        assert_eq!(pixels_to_ndc(-50.0, 9000.0, (800, 600)), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn degenerate_viewport() {
        assert_eq!(pixels_to_ndc(10.0, 10.0, (0, 600)), Vec2::ZERO);
        assert_eq!(pixels_to_ndc(f32::NAN, 10.0, (800, 600)), Vec2::ZERO);
    }
}
