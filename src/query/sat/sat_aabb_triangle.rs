use crate::math::{Real, Vector};
use crate::shape::Triangle;

/// Tells whether `axis` separates the given triangle from an AABB centered
/// at the origin with the given half-extents.
///
/// The triangle must already be expressed in the box-centered frame. A null
/// `axis` (produced by the cross product of parallel or degenerate edges)
/// projects everything to zero and therefore never separates.
pub fn triangle_aabb_separated_on_axis(
    triangle: &Triangle,
    half_extents: &Vector<Real>,
    axis: &Vector<Real>,
) -> bool {
    let p0 = triangle.a.coords.dot(axis);
    let p1 = triangle.b.coords.dot(axis);
    let p2 = triangle.c.coords.dot(axis);

    let r = half_extents.x * axis.x.abs()
        + half_extents.y * axis.y.abs()
        + half_extents.z * axis.z.abs();

    let min_p = p0.min(p1).min(p2);
    let max_p = p0.max(p1).max(p2);

    (-max_p).max(min_p) > r
}
