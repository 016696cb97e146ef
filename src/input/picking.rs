//! CPU ray picking of orbs.
//!
//! Orbs are spheres, so an analytic ray/sphere test per orb replaces an
//! ID-buffer pass.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// Ray through `ndc` from the camera eye.
pub fn ray_from_ndc(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.build_matrix().inverse();
    let near = inv.project_point3(ndc.extend(0.0));
    let far = inv.project_point3(ndc.extend(1.0));
    Ray {
        origin: camera.eye,
        direction: (far - near).normalize_or(camera.target - camera.eye),
    }
}

/// Distance along `ray` to the first hit with the sphere, if any.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    let far = -b + sqrt;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Closest of `spheres` (`(key, center, radius)`) under `ndc`.
pub fn pick<K: Copy>(
    camera: &Camera,
    ndc: Vec2,
    spheres: impl IntoIterator<Item = (K, Vec3, f32)>,
) -> Option<K> {
    let ray = ray_from_ndc(camera, ndc);
    spheres
        .into_iter()
        .filter_map(|(key, center, radius)| {
            ray_sphere(&ray, center, radius).map(|t| (key, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = ray_from_ndc(&camera, Vec2::ZERO);
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let t = ray_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray_sphere(&ray, Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray_sphere(&ray, Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn picks_nearest_and_projected() {
        let camera = Camera::default();
        let spheres = [
            (1_u32, Vec3::new(0.0, 0.0, -3.0), 1.0),
            (2_u32, Vec3::new(0.0, 0.0, 0.0), 1.0),
            (3_u32, Vec3::new(2.5, 0.0, 0.0), 1.0),
        ];
        assert_eq!(pick(&camera, Vec2::ZERO, spheres), Some(2));
        let ndc = camera.project_to_ndc(Vec3::new(2.5, 0.0, 0.0)).unwrap();
        assert_eq!(pick(&camera, ndc, spheres), Some(3));
        assert_eq!(pick(&camera, Vec2::new(-0.95, 0.95), spheres), None);
    }
}
