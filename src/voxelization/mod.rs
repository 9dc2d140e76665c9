//! Voxelization of scene collision geometry into occupancy grids.

pub use self::scene_query::{
    BoxElement, CapsuleElement, CollisionShape, ConvexElement, HeightFieldData,
    InstanceTransform, ScenePrimitive, SceneQuery, SphereElement,
};
pub use self::voxelator::Voxelator;

mod scene_query;
mod voxelator;
