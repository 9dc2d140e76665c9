use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::query::sat;
use crate::shape::Triangle;
use na::Unit;

fn normalized_or_zero(v: Vector<Real>) -> Vector<Real> {
    Unit::try_new(v, DEFAULT_EPSILON)
        .map(|u| *u)
        .unwrap_or_else(Vector::zeros)
}

/// Tests if a triangle intersects an AABB.
///
/// Translates the triangle into the AABB-centered frame and runs the 13-axis
/// SAT: the 9 cross products of the triangle's edges with the coordinate
/// axes, the 3 box face normals, and the triangle's normal. Degenerate
/// triangles produce null candidate axes, which never separate, so slivers
/// and points degrade gracefully instead of yielding NaN.
pub fn intersection_test_aabb_triangle(aabb: &Aabb, triangle: &Triangle) -> bool {
    let triangle = triangle.translated(&-aabb.center().coords);
    let half_extents = aabb.half_extents();

    let ab = normalized_or_zero(triangle.b - triangle.a);
    let bc = normalized_or_zero(triangle.c - triangle.b);
    let ca = normalized_or_zero(triangle.a - triangle.c);

    let axes = [
        // Cross products of the edges with the X axis.
        Vector::new(0.0, -ab.z, ab.y),
        Vector::new(0.0, -bc.z, bc.y),
        Vector::new(0.0, -ca.z, ca.y),
        // Cross products of the edges with the Y axis.
        Vector::new(ab.z, 0.0, -ab.x),
        Vector::new(bc.z, 0.0, -bc.x),
        Vector::new(ca.z, 0.0, -ca.x),
        // Cross products of the edges with the Z axis.
        Vector::new(-ab.y, ab.x, 0.0),
        Vector::new(-bc.y, bc.x, 0.0),
        Vector::new(-ca.y, ca.x, 0.0),
        // The box face normals.
        Vector::x(),
        Vector::y(),
        Vector::z(),
        // The triangle normal.
        ab.cross(&bc),
    ];

    for axis in &axes {
        if sat::triangle_aabb_separated_on_axis(&triangle, &half_extents, axis) {
            return false;
        }
    }

    true
}
