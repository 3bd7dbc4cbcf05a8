//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation, plus the
//! heading-from-velocity rotation used by steering agents.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Squared length below which a direction is treated as degenerate
const DEGENERATE_AXIS_EPSILON: f32 = 1e-6;

/// Nudge applied to a direction that is parallel to the world up axis
const PARALLEL_NUDGE: f32 = 1e-4;

/// The world up direction (+Y)
pub fn world_up() -> Vec3 {
    Vec3::y()
}

/// Derive a rotation whose forward (+Z) axis points along `direction`.
///
/// A zero-length direction falls back to +Z. When the direction is parallel
/// to the world up axis the cross product used for the side axis collapses;
/// the direction is nudged off the axis on X and the basis recomputed, so the
/// result is always a NaN-free orthonormal rotation.
pub fn rotation_from_direction(direction: Vec3) -> Quat {
    let mut front = if direction.magnitude_squared() > DEGENERATE_AXIS_EPSILON {
        direction.normalize()
    } else {
        Vec3::z()
    };

    let mut right = front.cross(&world_up());
    if right.magnitude_squared() < DEGENERATE_AXIS_EPSILON {
        // front is (anti)parallel to world up
        front.x += PARALLEL_NUDGE;
        front = front.normalize();
        right = front.cross(&world_up());
    }
    let right = right.normalize();
    let up = front.cross(&right);

    let basis = Mat3::from_columns(&[right, up, front]);
    Quat::from_matrix(&basis)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Set the scale factors, returning self for chaining
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        let matrix = self.to_matrix();
        matrix.transform_point(&point)
    }
}
