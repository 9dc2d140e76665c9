use crate::bounding_volume::Aabb;
use crate::query::sat;
use crate::shape::Obb;

/// Tests if two oriented boxes intersect, using the 15-axis SAT.
///
/// Touching boxes are considered intersecting.
#[inline]
pub fn intersection_test_obb_obb(obb1: &Obb, obb2: &Obb) -> bool {
    !sat::obb_obb_separating_axis_exists(obb1, obb2)
}

/// Tests if an oriented box intersects an AABB.
///
/// The AABB is wrapped as a degenerate (identity-orientation) OBB so both
/// boxes go through the same SAT routine; for two axis-aligned boxes this
/// agrees with the direct AABB-AABB overlap test.
#[inline]
pub fn intersection_test_aabb_obb(aabb: &Aabb, obb: &Obb) -> bool {
    intersection_test_obb_obb(&Obb::from_aabb(aabb), obb)
}
