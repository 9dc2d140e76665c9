//! World-space shape proxies used for cell intersection tests.

pub use self::capsule::Capsule;
pub use self::heightfield::HeightField;
pub use self::obb::Obb;
pub use self::segment::{Segment, SegmentPointLocation};
pub use self::sphere::Sphere;
pub use self::triangle::{Triangle, TriangleOrientation};

mod capsule;
mod heightfield;
mod obb;
mod segment;
mod sphere;
mod triangle;
