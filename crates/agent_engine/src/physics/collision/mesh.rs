//! Triangle mesh collision geometry
//!
//! The mesh collaborator behind an interactive object: indexed triangles in
//! model space with precomputed local bounds, transformed to world space
//! on demand during per-triangle ray tests.

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::physics::collision::aabb::AABB;
use crate::physics::collision::primitives::{BoundingSphere, Ray, Triangle};

/// The vertex indices and world-space normal of a hit triangle
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// First vertex index
    pub a: u32,
    /// Second vertex index
    pub b: u32,
    /// Third vertex index
    pub c: u32,
    /// World-space face normal (right-hand rule)
    pub normal: Vec3,
}

/// A single per-triangle ray hit reported by the mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// The triangle that was hit
    pub face: Face,
    /// Index of the triangle in the mesh
    pub face_index: usize,
}

/// Indexed triangle mesh stored in MODEL SPACE with precomputed bounds
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    local_aabb: AABB,
    local_bounding_sphere: BoundingSphere,
}

impl TriangleMesh {
    /// Creates a mesh from MODEL SPACE vertices and triangle indices
    ///
    /// Vertices should be in local coordinates relative to the origin.
    /// Trailing indices that do not form a full triangle are ignored.
    pub fn from_vertices(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let local_aabb = AABB::from_points(&vertices);

        // Bounding sphere around the box center, radius from the furthest vertex
        let center = local_aabb.center();
        let mut max_distance_sq = 0.0f32;
        for vertex in &vertices {
            max_distance_sq = max_distance_sq.max((vertex - center).magnitude_squared());
        }
        let local_bounding_sphere = BoundingSphere::new(center, max_distance_sq.sqrt());

        Self {
            vertices,
            indices,
            local_aabb,
            local_bounding_sphere,
        }
    }

    /// Creates an origin-centered box mesh with the given half-extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);
        let vertices = vec![
            Vec3::new(-x, -y, -z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
        ];
        // Two triangles per face, outward winding
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +Z
            1, 0, 3, 1, 3, 2, // -Z
            5, 1, 2, 5, 2, 6, // +X
            0, 4, 7, 0, 7, 3, // -X
            3, 7, 6, 3, 6, 2, // +Y
            0, 1, 5, 0, 5, 4, // -Y
        ];
        Self::from_vertices(vertices, indices)
    }

    /// The model-space vertices
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of full triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The precomputed model-space bounding box
    pub fn local_aabb(&self) -> &AABB {
        &self.local_aabb
    }

    /// The precomputed model-space bounding sphere
    pub fn local_bounding_sphere(&self) -> &BoundingSphere {
        &self.local_bounding_sphere
    }

    /// Per-triangle ray intersection in world space
    ///
    /// Transforms each triangle by `world` and tests it with
    /// Möller-Trumbore, after a world bounding-sphere rejection pass.
    /// Accepted hits land in `hits` with their face data; the caller's
    /// existing entries are left alone.
    pub fn raycast(&self, ray: &Ray, world: &Mat4, hits: &mut Vec<MeshHit>) {
        let sphere = self.local_bounding_sphere.transformed(world);
        if sphere.intersect_ray(ray).is_none() {
            return;
        }

        for (face_index, chunk) in self.indices.chunks_exact(3).enumerate() {
            let triangle = Triangle::new(
                transform_vertex(world, self.vertices[chunk[0] as usize]),
                transform_vertex(world, self.vertices[chunk[1] as usize]),
                transform_vertex(world, self.vertices[chunk[2] as usize]),
            );

            if let Some((t, _u, _v)) = triangle.intersect_ray(ray) {
                if t < ray.min_distance() || t > ray.far {
                    continue;
                }
                hits.push(MeshHit {
                    distance: t,
                    point: ray.point_at(t),
                    face: Face {
                        a: chunk[0],
                        b: chunk[1],
                        c: chunk[2],
                        normal: triangle.normal(),
                    },
                    face_index,
                });
            }
        }
    }
}

fn transform_vertex(matrix: &Mat4, vertex: Vec3) -> Vec3 {
    let point = matrix.transform_point(&Point3::new(vertex.x, vertex.y, vertex.z));
    Vec3::new(point.x, point.y, point.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_bounds() {
        let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.local_aabb().min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.local_aabb().max, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(
            mesh.local_bounding_sphere().radius,
            (1.0f32 + 4.0 + 9.0).sqrt(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_raycast_hits_facing_side() {
        let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let world = Transform::from_position(Vec3::new(0.0, 0.0, 10.0)).to_matrix();
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::z());

        let mut hits = Vec::new();
        mesh.raycast(&ray, &world, &mut hits);

        // The ray pierces the -Z face going in and the +Z face going out
        assert!(!hits.is_empty());
        let closest = hits
            .iter()
            .map(|h| h.distance)
            .fold(f32::INFINITY, f32::min);
        assert_relative_eq!(closest, 9.0, epsilon = 1e-3);

        for hit in &hits {
            assert!(hit.face_index < mesh.triangle_count());
        }
    }

    #[test]
    fn test_raycast_respects_far_clip() {
        let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let world = Transform::from_position(Vec3::new(0.0, 0.0, 10.0)).to_matrix();
        let ray = Ray::new(Vec3::zeros(), Vec3::z()).with_clip(0.0, 5.0);

        let mut hits = Vec::new();
        mesh.raycast(&ray, &world, &mut hits);

        assert!(hits.is_empty());
    }

    #[test]
    fn test_raycast_miss_leaves_collector_untouched() {
        let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let world = Transform::from_position(Vec3::new(0.0, 50.0, 0.0)).to_matrix();
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        let mut hits = Vec::new();
        mesh.raycast(&ray, &world, &mut hits);

        assert!(hits.is_empty());
    }

    #[test]
    fn test_raycast_normal_faces_the_ray() {
        let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let world = Transform::from_position(Vec3::new(0.0, 0.0, 10.0)).to_matrix();
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::z());

        let mut hits = Vec::new();
        mesh.raycast(&ray, &world, &mut hits);

        let entry = hits
            .iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .unwrap();
        // Entry face is -Z, its outward normal points back at the origin
        assert_relative_eq!(entry.face.normal.z, -1.0, epsilon = 1e-4);
    }
}
