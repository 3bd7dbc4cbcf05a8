//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, spheres, triangles) with
//! efficient intersection testing algorithms.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// A ray for ray casting and picking
///
/// Hits are only accepted inside the `[min_distance, far]` window, where
/// `min_distance` is the larger of `near` and the precision epsilon.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
    /// Closest accepted hit distance
    pub near: f32,
    /// Farthest accepted hit distance
    pub far: f32,
    /// Minimum hit distance epsilon
    pub precision: f32,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            near: 0.0,
            far: f32::INFINITY,
            precision: 0.0,
        }
    }

    /// Set the accepted distance window
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the minimum hit distance epsilon
    pub fn with_precision(mut self, precision: f32) -> Self {
        self.precision = precision;
        self
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Smallest distance at which a hit is accepted
    pub fn min_distance(&self) -> f32 {
        self.precision.max(self.near)
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Apply a world matrix: the center is transformed and the radius
    /// scaled by the largest basis column
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let center = matrix.transform_point(&Point3::new(
            self.center.x,
            self.center.y,
            self.center.z,
        ));

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = scale_x.max(scale_y).max(scale_z);

        BoundingSphere {
            center: Vec3::new(center.x, center.y, center.z),
            radius: self.radius * scale,
        }
    }

    /// Test ray intersection with this sphere
    ///
    /// Returns the distance to the closest intersection in front of the
    /// origin; an origin inside the sphere reports the exit distance.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Solve: |origin + t*direction - center|^2 = radius^2
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex in world space
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculates the normal of the triangle (right-hand rule)
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by
    /// Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);

        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(ray.direction.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_min_distance_takes_larger_bound() {
        let ray = Ray::new(Vec3::zeros(), Vec3::z())
            .with_clip(0.5, 100.0)
            .with_precision(2.0);
        assert_relative_eq!(ray.min_distance(), 2.0);
    }

    #[test]
    fn test_sphere_ray_hit_from_outside() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        let distance = sphere.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere_ray_from_inside_reports_exit() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 3.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::x());

        let distance = sphere.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere_ray_miss() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::x());

        assert!(sphere.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_sphere_transformed_scales_radius_by_largest_axis() {
        let sphere = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let matrix = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 5.0, 1.0));

        let world = sphere.transformed(&matrix);
        assert_relative_eq!(world.radius, 10.0, epsilon = 1e-4);
        assert_relative_eq!(world.center.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_triangle_ray_hit_and_barycentrics() {
        let triangle = Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        let (t, u, v) = triangle.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 5.0, epsilon = 1e-4);
        assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0);
    }

    #[test]
    fn test_triangle_ray_miss_outside_edges() {
        let triangle = Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        let ray = Ray::new(Vec3::new(5.0, 5.0, 0.0), Vec3::z());

        assert!(triangle.intersect_ray(&ray).is_none());
    }
}
