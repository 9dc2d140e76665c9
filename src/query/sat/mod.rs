//! Application of the Separating Axis Theorem (SAT) for intersection tests.
//!
//! Two convex shapes are disjoint if and only if there exists an axis onto
//! which their projections do not overlap. For a pair of oriented boxes the
//! candidate axes are the 3 + 3 face normals plus the 9 pairwise edge cross
//! products; for a triangle against a box they are the 3 box face normals,
//! the triangle normal, and the 9 edge × box-axis cross products.

pub use self::sat_aabb_triangle::triangle_aabb_separated_on_axis;
pub use self::sat_obb_obb::obb_obb_separating_axis_exists;

mod sat_aabb_triangle;
mod sat_obb_obb;
