use na::{Point3, Vector3};

/// Indicates a precondition violation of a grid or occupancy-store operation.
///
/// These errors are raised by the bounds-checked accessors of [`VoxelGrid`]
/// and [`VoxelData`]: they indicate a caller logic error, not a transient
/// condition, so the failed operation should be aborted rather than retried.
///
/// [`VoxelGrid`]: crate::grid::VoxelGrid
/// [`VoxelData`]: crate::grid::VoxelData
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A location or region lies outside of the grid's bounds.
    #[error("the location lies outside of the grid bounds")]
    OutOfBounds,
    /// A flat cell index is outside of `[0, cell count)`.
    #[error("invalid cell index {index} for a grid of {len} cells")]
    InvalidIndex {
        /// The rejected index.
        index: u32,
        /// The total number of cells of the grid.
        len: u32,
    },
    /// A cell coordinate is outside of the per-axis cell counts.
    #[error("invalid cell coordinate {coordinate:?} for a grid of {cell_count:?} cells")]
    InvalidCoordinate {
        /// The rejected coordinate.
        coordinate: Point3<u32>,
        /// The per-axis cell counts of the grid.
        cell_count: Vector3<u32>,
    },
    /// Attempted to merge occupancy data whose grid is not contained in the
    /// target's bounds.
    #[error("the right-hand grid is not contained in the left-hand grid bounds")]
    IncompatibleGrids,
    /// Attempted to merge occupancy data longer than the target's.
    #[error("too much occupancy data: right-hand has {other_len} cells, left-hand only {len}")]
    SizeMismatch {
        /// The number of cells of the left-hand (target) store.
        len: u32,
        /// The number of cells of the right-hand (source) store.
        other_len: u32,
    },
}
