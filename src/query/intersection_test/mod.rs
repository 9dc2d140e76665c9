//! Boolean intersection tests between shape proxies and boxes.

pub use self::intersection_test_aabb_capsule::intersection_test_aabb_capsule;
pub use self::intersection_test_aabb_sphere::intersection_test_aabb_sphere;
pub use self::intersection_test_aabb_triangle::intersection_test_aabb_triangle;
pub use self::intersection_test_obb_obb::{intersection_test_aabb_obb, intersection_test_obb_obb};

mod intersection_test_aabb_capsule;
mod intersection_test_aabb_sphere;
mod intersection_test_aabb_triangle;
mod intersection_test_obb_obb;
