//! Picking demo: raycasts and box-overlap queries against interactive
//! objects at each raycast precision

use std::sync::Arc;

use agent_engine::prelude::*;

const CUBE_HALF_EXTENT: f32 = 1.0;

fn describe_hit(hit: &Intersection) -> String {
    match hit.face_index {
        Some(face_index) => format!(
            "object {:?} at distance {:.3} (triangle {})",
            hit.object, hit.distance, face_index
        ),
        None => format!("object {:?} at distance {:.3} (bounding box)", hit.object, hit.distance),
    }
}

fn cast_and_report(set: &mut CollidableSet, label: &str, ray: &Ray) {
    let mut hits = Vec::new();
    set.raycast(ray, &mut hits);

    if hits.is_empty() {
        log::info!("{}: no hit", label);
        return;
    }
    log::info!("{}: {} hit(s)", label, hits.len());
    for hit in &hits {
        log::info!("  {}", describe_hit(hit));
    }
}

fn main() {
    agent_engine::foundation::logging::init();

    let cube = Arc::new(TriangleMesh::cuboid(Vec3::new(
        CUBE_HALF_EXTENT,
        CUBE_HALF_EXTENT,
        CUBE_HALF_EXTENT,
    )));

    let mut set = CollidableSet::new();

    // One object per precision tier, spread along X, the oriented one
    // rotated 45 degrees so the box policies disagree
    let face_id = set.insert(cube.clone(), CollisionType::Aabb, RaycastPrecision::Face);
    let obb_id = set.insert(cube.clone(), CollisionType::Obb, RaycastPrecision::Obb);
    let aabb_id = set.insert(cube, CollisionType::Aabb, RaycastPrecision::Aabb);

    let rotation = rotation_from_direction(Vec3::new(1.0, 0.0, 1.0));
    let placements = [
        (face_id, Transform::from_position(Vec3::new(-6.0, 0.0, 10.0))),
        (
            obb_id,
            Transform::from_position_rotation(Vec3::new(0.0, 0.0, 10.0), rotation),
        ),
        (aabb_id, Transform::from_position(Vec3::new(6.0, 0.0, 10.0))),
    ];
    for (id, transform) in &placements {
        if let Some(object) = set.get_mut(*id) {
            object.set_world_transform(transform.to_matrix());
        }
    }
    set.update_all();

    log::info!("Registered {} interactive objects", set.len());

    // Straight shots at each object
    cast_and_report(
        &mut set,
        "triangle-precision pick",
        &Ray::new(Vec3::new(-5.9, 0.2, 0.0), Vec3::z()),
    );
    cast_and_report(
        &mut set,
        "oriented-box pick",
        &Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::z()),
    );
    cast_and_report(
        &mut set,
        "axis-aligned pick",
        &Ray::new(Vec3::new(6.0, 0.0, 0.0), Vec3::z()),
    );

    // A ray starting inside the axis-aligned cube still reports a hit
    cast_and_report(
        &mut set,
        "ray from inside",
        &Ray::new(Vec3::new(6.1, 0.0, 10.0), Vec3::x()),
    );

    // Movement-blocking check: sweep a probe volume along X at z = 10
    let probe_extents = Vec3::new(0.4, 0.4, 0.4);
    for step in -8..=8 {
        let center = Vec3::new(step as f32, 0.0, 10.0);
        let query = AABB::from_center_extents(center, probe_extents);

        let mut blockers = Vec::new();
        for (id, object) in set.iter_mut() {
            if object.intersects_box(&query) {
                blockers.push(id);
            }
        }
        if !blockers.is_empty() {
            log::info!("probe at x {:5.1} blocked by {:?}", center.x, blockers);
        }
    }
}
