//! Interactive object wrapper and registry
//!
//! A collidable object pairs shared mesh geometry with a world transform
//! kept current by the scene layer, and answers box-overlap and ray
//! queries through cached bounding volumes selected by policy. Hits are
//! always stamped with the object's registry handle, never the raw mesh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::collections::{Handle, HandleMap};
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::collision::aabb::AABB;
use crate::physics::collision::mesh::{Face, MeshHit, TriangleMesh};
use crate::physics::collision::obb::OBB;
use crate::physics::collision::primitives::{BoundingSphere, Ray};

/// Stable identifier of a collidable object inside its [`CollidableSet`]
pub type ObjectId = Handle;

/// Bounding volume used for box-overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionType {
    /// Axis-aligned box fitted around the transformed mesh bounds
    Aabb,
    /// Box aligned to the object's own rotated axes
    Obb,
}

/// Bounding representation answering ray queries
///
/// Trades accuracy against cost: the boxes are cheap approximations, the
/// mesh test is exact per triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaycastPrecision {
    /// Slab test against the axis-aligned box
    Aabb,
    /// Slab test against the oriented box
    Obb,
    /// Per-triangle mesh intersection
    Face,
}

/// A single raycast hit record
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// Hit triangle data; absent for box-precision hits
    pub face: Option<Face>,
    /// Hit triangle index; absent for box-precision hits
    pub face_index: Option<usize>,
    /// The logical object that was hit
    pub object: ObjectId,
}

/// An interactive object wrapping mesh geometry with collision policy
///
/// The world transform is owned by the scene layer and pushed in through
/// [`CollidableObject::set_world_transform`] before queries. The cached
/// bounding sphere is refreshed by the cheap per-frame [`update`]; the
/// AABB/OBB caches are scratch state recomputed lazily inside each query.
///
/// [`update`]: CollidableObject::update
#[derive(Debug, Clone)]
pub struct CollidableObject {
    id: ObjectId,
    mesh: Arc<TriangleMesh>,
    world_transform: Mat4,
    collision_type: CollisionType,
    raycast_precision: RaycastPrecision,
    bounding_sphere: BoundingSphere,
    aabb: AABB,
    obb: OBB,
    mesh_hits: Vec<MeshHit>,
}

impl CollidableObject {
    fn new(
        id: ObjectId,
        mesh: Arc<TriangleMesh>,
        collision_type: CollisionType,
        raycast_precision: RaycastPrecision,
    ) -> Self {
        let local_aabb = *mesh.local_aabb();
        let bounding_sphere = *mesh.local_bounding_sphere();
        Self {
            id,
            mesh,
            world_transform: Mat4::identity(),
            collision_type,
            raycast_precision,
            bounding_sphere,
            aabb: local_aabb,
            obb: OBB::from_aabb(&local_aabb),
            mesh_hits: Vec::new(),
        }
    }

    /// The object's registry handle
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The wrapped mesh geometry
    pub fn mesh(&self) -> &Arc<TriangleMesh> {
        &self.mesh
    }

    /// The bounding volume policy for box-overlap tests
    pub fn collision_type(&self) -> CollisionType {
        self.collision_type
    }

    /// The bounding representation answering ray queries
    pub fn raycast_precision(&self) -> RaycastPrecision {
        self.raycast_precision
    }

    /// The current world transform
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    /// Push the current world transform before querying
    pub fn set_world_transform(&mut self, world_transform: Mat4) {
        self.world_transform = world_transform;
    }

    /// Cheap per-frame refresh of the cached world bounding sphere
    ///
    /// The AABB/OBB caches are deliberately not touched here; they are
    /// recomputed inside the next query that needs them.
    pub fn update(&mut self) {
        self.bounding_sphere = self
            .mesh
            .local_bounding_sphere()
            .transformed(&self.world_transform);
    }

    /// The cached world-space bounding sphere (valid after [`update`])
    ///
    /// [`update`]: CollidableObject::update
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// Test overlap against an axis-aligned query box using the
    /// configured collision type
    pub fn intersects_box(&mut self, query: &AABB) -> bool {
        match self.collision_type {
            CollisionType::Aabb => {
                self.aabb = self.mesh.local_aabb().transformed(&self.world_transform);
                self.aabb.intersects(query)
            }
            CollisionType::Obb => {
                self.obb = OBB::from_local_aabb(self.mesh.local_aabb(), &self.world_transform);
                self.obb.intersects_aabb(query)
            }
        }
    }

    /// Cast a ray against this object at its configured precision
    ///
    /// Accepted hits are appended to `results`. Every record carries this
    /// object's handle, including hits delegated to the mesh.
    pub fn raycast(&mut self, ray: &Ray, results: &mut Vec<Intersection>) {
        match self.raycast_precision {
            RaycastPrecision::Face => {
                self.mesh.raycast(ray, &self.world_transform, &mut self.mesh_hits);
                let id = self.id;
                results.extend(self.mesh_hits.drain(..).map(|hit| Intersection {
                    distance: hit.distance,
                    point: hit.point,
                    face: Some(hit.face),
                    face_index: Some(hit.face_index),
                    object: id,
                }));
            }
            RaycastPrecision::Obb => {
                self.obb = OBB::from_local_aabb(self.mesh.local_aabb(), &self.world_transform);
                if let Some(t) = self.obb.intersect_ray(ray) {
                    push_box_hit(ray, t, self.id, results);
                }
            }
            RaycastPrecision::Aabb => {
                self.aabb = self.mesh.local_aabb().transformed(&self.world_transform);
                if let Some(t) = self.aabb.intersect_ray(ray) {
                    push_box_hit(ray, t, self.id, results);
                }
            }
        }
    }
}

/// Append a synthetic record for a box-precision hit if it falls inside
/// the ray's accepted window
fn push_box_hit(ray: &Ray, t: f32, object: ObjectId, results: &mut Vec<Intersection>) {
    let point = ray.point_at(t);
    let distance = (ray.origin - point).magnitude();
    if distance >= ray.min_distance() && distance <= ray.far {
        results.push(Intersection {
            distance,
            point,
            face: None,
            face_index: None,
            object,
        });
    }
}

/// Registry owning the interactive objects of a scene
///
/// Mints the stable [`ObjectId`] handles stamped into intersection
/// records. Objects are registered when a mesh becomes interactive and
/// dropped when removed from the scene.
#[derive(Debug, Default)]
pub struct CollidableSet {
    objects: HandleMap<CollidableObject>,
}

impl CollidableSet {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            objects: HandleMap::default(),
        }
    }

    /// Register a mesh as an interactive object
    pub fn insert(
        &mut self,
        mesh: Arc<TriangleMesh>,
        collision_type: CollisionType,
        raycast_precision: RaycastPrecision,
    ) -> ObjectId {
        let id = self
            .objects
            .insert_with_key(|key| CollidableObject::new(key, mesh, collision_type, raycast_precision));
        log::debug!(
            "Registered collidable object {:?} ({:?} collisions, {:?} raycasts)",
            id,
            collision_type,
            raycast_precision
        );
        id
    }

    /// Remove an object from the registry
    pub fn remove(&mut self, id: ObjectId) -> Option<CollidableObject> {
        let removed = self.objects.remove(id);
        if removed.is_some() {
            log::debug!("Removed collidable object {:?}", id);
        }
        removed
    }

    /// Get an object by handle
    pub fn get(&self, id: ObjectId) -> Option<&CollidableObject> {
        self.objects.get(id)
    }

    /// Get a mutable object by handle
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CollidableObject> {
        self.objects.get_mut(id)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the registered objects
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &CollidableObject)> {
        self.objects.iter()
    }

    /// Iterate mutably over the registered objects
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut CollidableObject)> {
        self.objects.iter_mut()
    }

    /// Refresh every object's cached bounding sphere (call once per frame)
    pub fn update_all(&mut self) {
        for (_, object) in self.objects.iter_mut() {
            object.update();
        }
    }

    /// Cast a ray against every registered object
    ///
    /// Appends the accepted hits to `results` and sorts the collector
    /// ascending by distance so the closest hit comes first.
    pub fn raycast(&mut self, ray: &Ray, results: &mut Vec<Intersection>) {
        for (_, object) in self.objects.iter_mut() {
            object.raycast(ray, results);
        }
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{rotation_from_direction, Transform};
    use approx::assert_relative_eq;

    fn unit_cube() -> Arc<TriangleMesh> {
        Arc::new(TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0)))
    }

    fn place(set: &mut CollidableSet, id: ObjectId, position: Vec3) {
        let object = set.get_mut(id).unwrap();
        object.set_world_transform(Transform::from_position(position).to_matrix());
        object.update();
    }

    #[test]
    fn test_update_refreshes_bounding_sphere() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Face);

        place(&mut set, id, Vec3::new(4.0, 0.0, 0.0));

        let sphere = *set.get(id).unwrap().bounding_sphere();
        assert_relative_eq!(sphere.center.x, 4.0, epsilon = 1e-4);
        assert_relative_eq!(sphere.radius, 3.0f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_face_hits_carry_the_wrapper_id() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Face);
        place(&mut set, id, Vec3::new(0.0, 0.0, 5.0));

        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::z());
        let mut results = Vec::new();
        set.raycast(&ray, &mut results);

        assert!(!results.is_empty());
        for hit in &results {
            assert_eq!(hit.object, id);
            assert!(hit.face.is_some());
            assert!(hit.face_index.is_some());
        }
        assert_relative_eq!(results[0].distance, 4.0, epsilon = 1e-3);
    }

    #[test]
    fn test_face_scratch_list_is_cleared_between_casts() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Face);
        place(&mut set, id, Vec3::new(0.0, 0.0, 5.0));

        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::z());
        let mut first = Vec::new();
        set.raycast(&ray, &mut first);
        let mut second = Vec::new();
        set.raycast(&ray, &mut second);

        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_obb_precision_reports_single_synthetic_hit() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Obb, RaycastPrecision::Obb);
        place(&mut set, id, Vec3::new(0.0, 0.0, 5.0));

        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let mut results = Vec::new();
        set.raycast(&ray, &mut results);

        assert_eq!(results.len(), 1);
        let hit = &results[0];
        assert_eq!(hit.object, id);
        assert!(hit.face.is_none());
        assert!(hit.face_index.is_none());
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-3);
    }

    #[test]
    fn test_ray_from_inside_box_reports_near_zero_hit() {
        for precision in [RaycastPrecision::Aabb, RaycastPrecision::Obb] {
            let mut set = CollidableSet::new();
            let id = set.insert(unit_cube(), CollisionType::Aabb, precision);
            place(&mut set, id, Vec3::zeros());

            let ray = Ray::new(Vec3::new(0.1, 0.0, 0.0), Vec3::z());
            let mut results = Vec::new();
            set.raycast(&ray, &mut results);

            assert_eq!(results.len(), 1, "no inside hit for {:?}", precision);
            assert_relative_eq!(results[0].distance, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_raycast_respects_near_clip() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Aabb);
        place(&mut set, id, Vec3::new(0.0, 0.0, 5.0));

        let ray = Ray::new(Vec3::zeros(), Vec3::z()).with_clip(6.0, 100.0);
        let mut results = Vec::new();
        set.raycast(&ray, &mut results);

        assert!(results.is_empty());
    }

    #[test]
    fn test_intersects_box_is_deterministic() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Obb, RaycastPrecision::Obb);
        let rotation = rotation_from_direction(Vec3::new(1.0, 0.0, 1.0));
        let object = set.get_mut(id).unwrap();
        object.set_world_transform(
            Transform::from_position_rotation(Vec3::zeros(), rotation).to_matrix(),
        );
        object.update();

        let query = AABB::from_center_extents(Vec3::new(2.2, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let first = set.get_mut(id).unwrap().intersects_box(&query);
        for _ in 0..10 {
            assert_eq!(set.get_mut(id).unwrap().intersects_box(&query), first);
        }
    }

    #[test]
    fn test_obb_collision_type_sees_rotated_reach() {
        let mut set = CollidableSet::new();
        let obb_id = set.insert(unit_cube(), CollisionType::Obb, RaycastPrecision::Obb);
        let aabb_id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Aabb);

        // Both rotated 45 degrees about Y; only the OBB policy models the
        // diagonal reach, while the AABB policy inflates the fitted box
        let rotation = rotation_from_direction(Vec3::new(1.0, 0.0, 1.0));
        let world = Transform::from_position_rotation(Vec3::zeros(), rotation).to_matrix();
        for id in [obb_id, aabb_id] {
            let object = set.get_mut(id).unwrap();
            object.set_world_transform(world);
            object.update();
        }

        // Sits just outside the rotated box's corner on the X/Z diagonal
        // but inside the inflated axis-aligned fit
        let query = AABB::from_center_extents(
            Vec3::new(1.35, 0.0, 1.35),
            Vec3::new(0.2, 0.2, 0.2),
        );

        assert!(!set.get_mut(obb_id).unwrap().intersects_box(&query));
        assert!(set.get_mut(aabb_id).unwrap().intersects_box(&query));
    }

    #[test]
    fn test_set_raycast_sorts_by_distance() {
        let mut set = CollidableSet::new();
        let far_id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Aabb);
        let near_id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Aabb);
        place(&mut set, far_id, Vec3::new(0.0, 0.0, 20.0));
        place(&mut set, near_id, Vec3::new(0.0, 0.0, 5.0));

        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let mut results = Vec::new();
        set.raycast(&ray, &mut results);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].object, near_id);
        assert_eq!(results[1].object, far_id);
        assert!(results[0].distance <= results[1].distance);
    }

    #[test]
    fn test_remove_drops_object() {
        let mut set = CollidableSet::new();
        let id = set.insert(unit_cube(), CollisionType::Aabb, RaycastPrecision::Face);

        assert_eq!(set.len(), 1);
        assert!(set.remove(id).is_some());
        assert!(set.is_empty());
        assert!(set.get(id).is_none());
        assert!(set.remove(id).is_none());
    }
}
