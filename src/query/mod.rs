//! Non-persistent geometric queries.
//!
//! The rasterizer reduces every shape to a question of the form "does this
//! world-space proxy touch this grid cell?". The entry points answering it
//! live in [`intersection_test`]; the separating-axis machinery they rely on
//! lives in [`sat`].

pub use self::intersection_test::{
    intersection_test_aabb_capsule, intersection_test_aabb_obb, intersection_test_aabb_sphere,
    intersection_test_aabb_triangle, intersection_test_obb_obb,
};

pub mod intersection_test;
pub mod sat;
