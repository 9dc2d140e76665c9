//! Voxel grids and their occupancy data.

pub use self::error::GridError;
pub use self::voxel_data::{BoolOp, VoxelData};
pub use self::voxel_grid::VoxelGrid;

mod error;
mod voxel_data;
mod voxel_grid;
