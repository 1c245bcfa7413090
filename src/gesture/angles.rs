//! Joint angle computation.

use crate::skeleton::types::Vec3;

/// Angle in degrees at `vertex` between the rays toward `a` and `b`.
///
/// The dot product is clamped to [-1, 1] before `acos` so floating-point
/// drift on nearly-parallel rays cannot produce a domain error.
pub fn vertex_angle_deg(a: &Vec3, b: &Vec3, vertex: &Vec3) -> f64 {
    let ray_a = vertex.sub(a).normalized();
    let ray_b = vertex.sub(b).normalized();

    let dot = ray_a.dot(&ray_b).clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let vertex = Vec3::new(0.0, 0.0, 0.0);
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!((vertex_angle_deg(&a, &b, &vertex) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_rays() {
        let vertex = Vec3::new(0.0, 0.0, 0.0);
        let a = Vec3::new(-1.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        assert!((vertex_angle_deg(&a, &b, &vertex) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_rays_clamp_to_zero() {
        let vertex = Vec3::new(0.0, 0.0, 0.0);
        // Same direction, different lengths: normalization can leave the dot
        // product a hair above 1.0.
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(0.2, 0.4, 0.6);
        let angle = vertex_angle_deg(&a, &b, &vertex);
        assert!(angle.abs() < 1e-6);
        assert!(!angle.is_nan());
    }

    #[test]
    fn test_known_sixty_degrees() {
        let vertex = Vec3::new(0.0, 0.0, 0.0);
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.5, 3f64.sqrt() / 2.0, 0.0);
        assert!((vertex_angle_deg(&a, &b, &vertex) - 60.0).abs() < 1e-9);
    }
}
