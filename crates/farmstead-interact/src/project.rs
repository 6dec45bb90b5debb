//! Pointer-ray to ground-plane projection.

use farmstead_core::grid::WorldPoint;
use farmstead_core::services::Ray;
use glam::Vec3;

/// Rays closer to parallel with the plane than this produce no point.
const MIN_APPROACH: f32 = 1e-6;

/// Intersect a pointer ray with the horizontal plane `z = plane_z`.
///
/// Returns `None` when the ray runs parallel to the plane or the plane
/// lies behind the ray origin, both of which happen at grazing camera
/// angles near the horizon.
pub fn pointer_world_point(ray: &Ray, plane_z: f32) -> Option<WorldPoint> {
    let origin = Vec3::from(ray.origin);
    let dir = Vec3::from(ray.dir);
    if dir.z.abs() < MIN_APPROACH {
        return None;
    }
    let t = (plane_z - origin.z) / dir.z;
    if t < 0.0 {
        return None;
    }
    let hit = origin + dir * t;
    Some(WorldPoint::new(hit.x, hit.y))
}
