use crate::bounding_volume::Aabb;
use crate::math::{Vector, DEFAULT_EPSILON};
use crate::query::intersection_test::intersection_test_aabb_sphere;
use crate::shape::{Capsule, SegmentPointLocation, Sphere};
use na::Unit;

/// Tests if a capsule intersects an AABB.
///
/// The AABB's center is projected on the capsule's segment. When the
/// projection clamps to an endpoint, the test reduces to the sphere at that
/// endpoint. Otherwise the point at distance `radius` from the projection,
/// toward the AABB's center, must lie inside the AABB. A zero-length capsule
/// therefore behaves exactly like a sphere.
pub fn intersection_test_aabb_capsule(aabb: &Aabb, capsule: &Capsule) -> bool {
    let center = aabb.center();
    let (projection, location) = capsule.segment.project_point_and_get_location(&center);

    match location {
        SegmentPointLocation::OnVertex(0) => {
            intersection_test_aabb_sphere(aabb, &Sphere::new(capsule.segment.a, capsule.radius))
        }
        SegmentPointLocation::OnVertex(_) => {
            intersection_test_aabb_sphere(aabb, &Sphere::new(capsule.segment.b, capsule.radius))
        }
        SegmentPointLocation::OnEdge(_) => {
            let toward_center = Unit::try_new(center - projection, DEFAULT_EPSILON)
                .map(|dir| *dir)
                .unwrap_or_else(Vector::zeros);

            aabb.contains_point(&(projection + toward_center * capsule.radius))
        }
    }
}
