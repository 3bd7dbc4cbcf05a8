//! Oriented bounding boxes
//!
//! A box aligned to an object's own rotated axes, derived from the mesh's
//! local bounds and the current world matrix. Overlap against axis-aligned
//! query boxes uses the standard 15-axis separating-axis test; ray queries
//! use a slab test in the box's own frame.

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::physics::collision::aabb::AABB;
use crate::physics::collision::primitives::Ray;

/// Guard added to projected radii so near-parallel edge cross products do
/// not report a phantom separating axis
const SAT_EPSILON: f32 = 1e-6;

/// Direction component below which a ray is parallel to a slab
const PARALLEL_EPSILON: f32 = 1e-8;

/// An oriented bounding box: center, half-extents, and three mutually
/// orthogonal unit axes
#[derive(Debug, Clone, Copy)]
pub struct OBB {
    /// Center point in world space
    pub center: Vec3,
    /// Half-extent along each of the box's own axes
    pub half_extents: Vec3,
    /// The box's orthonormal axes in world space
    pub axes: [Vec3; 3],
}

impl OBB {
    /// Wrap an axis-aligned box as an OBB with identity axes
    pub fn from_aabb(aabb: &AABB) -> Self {
        Self {
            center: aabb.center(),
            half_extents: aabb.extents(),
            axes: [Vec3::x(), Vec3::y(), Vec3::z()],
        }
    }

    /// Derive the world-space OBB of a local-space box under a world matrix
    ///
    /// Axes are the normalized basis columns; half-extents pick up the
    /// per-column scale. A zero-scale column keeps its identity axis so the
    /// result stays a valid basis.
    pub fn from_local_aabb(local: &AABB, world: &Mat4) -> Self {
        let columns = [
            Vec3::new(world.m11, world.m21, world.m31),
            Vec3::new(world.m12, world.m22, world.m32),
            Vec3::new(world.m13, world.m23, world.m33),
        ];
        let identity = [Vec3::x(), Vec3::y(), Vec3::z()];

        let local_center = local.center();
        let local_extents = local.extents();
        let center = world.transform_point(&Point3::new(
            local_center.x,
            local_center.y,
            local_center.z,
        ));

        let mut axes = identity;
        let mut half_extents = Vec3::zeros();
        for i in 0..3 {
            let scale = columns[i].magnitude();
            if scale > f32::EPSILON {
                axes[i] = columns[i] / scale;
            }
            half_extents[i] = local_extents[i] * scale;
        }

        Self {
            center: Vec3::new(center.x, center.y, center.z),
            half_extents,
            axes,
        }
    }

    /// Test overlap against an axis-aligned box
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.intersects_obb(&Self::from_aabb(aabb))
    }

    /// Separating-axis overlap test between two oriented boxes
    ///
    /// Tests the 3 + 3 face axes and the 9 pairwise edge cross products;
    /// the boxes intersect iff no axis separates the projections.
    pub fn intersects_obb(&self, other: &OBB) -> bool {
        // Rotation expressing `other` in this box's frame, plus its
        // epsilon-padded absolute value
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = self.axes[i].dot(&other.axes[j]);
                abs_r[i][j] = r[i][j].abs() + SAT_EPSILON;
            }
        }

        let translation = other.center - self.center;
        let t = [
            translation.dot(&self.axes[0]),
            translation.dot(&self.axes[1]),
            translation.dot(&self.axes[2]),
        ];
        let ae = [self.half_extents.x, self.half_extents.y, self.half_extents.z];
        let be = [
            other.half_extents.x,
            other.half_extents.y,
            other.half_extents.z,
        ];

        // This box's face axes
        for i in 0..3 {
            let ra = ae[i];
            let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // Other box's face axes
        for j in 0..3 {
            let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
            let rb = be[j];
            let projection = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if projection.abs() > ra + rb {
                return false;
            }
        }

        // Edge cross products axes[i] x other.axes[j]
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;

                let ra = ae[i1] * abs_r[i2][j] + ae[i2] * abs_r[i1][j];
                let rb = be[j1] * abs_r[i][j2] + be[j2] * abs_r[i][j1];
                let projection = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if projection.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }

    /// Test ray intersection using a slab test in the box's own axes
    ///
    /// Returns the distance to the entry point, or 0 when the ray starts
    /// inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let he = [self.half_extents.x, self.half_extents.y, self.half_extents.z];

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            let e = self.axes[i].dot(&to_center);
            let f = self.axes[i].dot(&ray.direction);

            if f.abs() > PARALLEL_EPSILON {
                let mut t1 = (e + he[i]) / f;
                let mut t2 = (e - he[i]) / f;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }
                t_min = t_min.max(t1);
                t_max = t_max.min(t2);
                if t_min > t_max {
                    return None;
                }
            } else if e.abs() > he[i] {
                // Parallel to the slab and outside it
                return None;
            }
        }

        if t_max >= 0.0 {
            Some(t_min.max(0.0))
        } else {
            None
        }
    }
}
