//! Placement of orbs in the scene.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Ring slots around the hexagonal center, filled in declaration order.
pub const HEX_SLOTS: [[f32; 2]; 6] = [
    [2.5, 0.0],
    [-2.5, 0.0],
    [1.25, 2.2],
    [-1.25, 2.2],
    [1.25, -2.2],
    [-1.25, -2.2],
];

/// Layout family, as selected in options and cycled from the keyboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Arc facing the camera.
    Semicircle,
    /// Center plus six fixed slots.
    #[default]
    Hexagonal,
    /// Center plus an even ring.
    Circular,
}

impl LayoutKind {
    /// Next family, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Semicircle => Self::Hexagonal,
            Self::Hexagonal => Self::Circular,
            Self::Circular => Self::Semicircle,
        }
    }
}

/// A concrete layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPolicy {
    /// `angle_i = π/(N−1) × i − π/2` on a fixed radius.
    Semicircle {
        /// Arc radius.
        radius: f32,
    },
    /// `center` at the origin, everything else on [`HEX_SLOTS`].
    Hexagonal {
        /// Label of the centered entity.
        center: Option<String>,
    },
    /// `center` at the origin, everything else evenly on a circle.
    Circular {
        /// Label of the centered entity.
        center: Option<String>,
        /// Ring radius.
        radius: f32,
    },
}

impl LayoutPolicy {
    /// Family of this layout.
    pub fn kind(&self) -> LayoutKind {
        match self {
            Self::Semicircle { .. } => LayoutKind::Semicircle,
            Self::Hexagonal { .. } => LayoutKind::Hexagonal,
            Self::Circular { .. } => LayoutKind::Circular,
        }
    }

    /// One position per label, in input order.
    pub fn positions(&self, labels: &[&str]) -> Vec<Vec3> {
        match self {
            Self::Semicircle { radius } => semicircle(labels.len(), *radius),
            Self::Hexagonal { center } => hexagonal(labels, center.as_deref()),
            Self::Circular { center, radius } => {
                circular(labels, center.as_deref(), *radius)
            }
        }
    }
}

/// Angle of entry `i` of `n` on the semicircle. A single entry sits at 0.
pub fn semicircle_angle(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    PI / (n - 1) as f32 * i as f32 - PI / 2.0
}

fn semicircle(n: usize, radius: f32) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let a = semicircle_angle(i, n);
            Vec3::new(a.sin() * radius, 0.0, -a.cos() * radius)
        })
        .collect()
}

fn hexagonal(labels: &[&str], center: Option<&str>) -> Vec<Vec3> {
    let mut ring = 0usize;
    let positions: Vec<Vec3> = labels
        .iter()
        .map(|label| {
            if Some(*label) == center {
                return Vec3::ZERO;
            }
            let [x, y] = HEX_SLOTS[ring % HEX_SLOTS.len()];
            ring += 1;
            Vec3::new(x, y, 0.0)
        })
        .collect();
    if ring > HEX_SLOTS.len() {
        log::warn!(
            "hexagonal layout has {ring} ring entities for {} slots; \
             extra entities share slots",
            HEX_SLOTS.len()
        );
    }
    positions
}

fn circular(labels: &[&str], center: Option<&str>, radius: f32) -> Vec<Vec3> {
    let remaining = labels.iter().filter(|l| Some(**l) != center).count();
    let mut ring = 0usize;
    labels
        .iter()
        .map(|label| {
            if Some(*label) == center {
                return Vec3::ZERO;
            }
            let a = TAU * ring as f32 / remaining as f32;
            ring += 1;
            Vec3::new(a.cos() * radius, a.sin() * radius, 0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANKS: [&str; 7] = [
        "boveda_monte",
        "boveda_usa",
        "profit",
        "leftie",
        "azteca",
        "flete_sur",
        "utilidades",
    ];

    #[test]
    fn semicircle_single_entry_is_finite() {
        assert_eq!(semicircle_angle(0, 1), 0.0);
        let p = LayoutPolicy::Semicircle { radius: 4.0 }.positions(&["a"]);
        assert!(p[0].is_finite());
        assert!(p[0].abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-6));
    }

    #[test]
    fn semicircle_empty_and_endpoints() {
        assert!(LayoutPolicy::Semicircle { radius: 4.0 }.positions(&[]).is_empty());
        assert!((semicircle_angle(0, 5) + PI / 2.0).abs() < 1e-6);
        assert!((semicircle_angle(4, 5) - PI / 2.0).abs() < 1e-6);
        assert!(semicircle_angle(2, 5).abs() < 1e-6);
    }

    #[test]
    fn hexagonal_distinct_up_to_six_ring() {
        let policy = LayoutPolicy::Hexagonal {
            center: Some("profit".to_owned()),
        };
        let p = policy.positions(&BANKS);
        assert_eq!(p[2], Vec3::ZERO);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j], "{} and {}", BANKS[i], BANKS[j]);
            }
        }
        assert_eq!(p[0], Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(p[1], Vec3::new(-2.5, 0.0, 0.0));
    }

    #[test]
    fn hexagonal_overflow_reuses_slots() {
        let policy = LayoutPolicy::Hexagonal { center: None };
        let p = policy.positions(&BANKS);
        assert_eq!(p[6], p[0]);
    }

    #[test]
    fn circular_even_ring() {
        let policy = LayoutPolicy::Circular {
            center: Some("c".to_owned()),
            radius: 3.0,
        };
        let p = policy.positions(&["a", "c", "b", "d", "e"]);
        assert_eq!(p[1], Vec3::ZERO);
        assert!(p[0].abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
        assert!(p[2].abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
        for (i, q) in p.iter().enumerate().filter(|(i, _)| *i != 1) {
            assert!((q.length() - 3.0).abs() < 1e-5, "entry {i}");
        }
    }

    #[test]
    fn circular_only_center() {
        let policy = LayoutPolicy::Circular {
            center: Some("c".to_owned()),
            radius: 3.0,
        };
        assert_eq!(policy.positions(&["c"]), vec![Vec3::ZERO]);
    }

    #[test]
    fn kind_cycles() {
        assert_eq!(LayoutKind::Circular.next(), LayoutKind::Semicircle);
        assert_eq!(LayoutKind::Hexagonal.next().next().next(), LayoutKind::Hexagonal);
    }
}
