use crate::bounding_volume::Aabb;
use crate::grid::{GridError, VoxelGrid};
use crate::math::{Point, Real};
use na::Point3;

/// A boolean operator applied cell-by-cell when merging occupancy data.
///
/// The voxelization pipeline scatters per-primitive results into an aggregate
/// store; which operator combines them is an explicit call-site decision.
/// [`BoolOp::Or`] is the accumulation semantics the offset-scatter protocol
/// was designed around (a cell is solid if any primitive covers it);
/// [`BoolOp::And`] intersects, [`BoolOp::Xor`] toggles.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoolOp {
    /// Keep a cell occupied only when both sides are occupied.
    And,
    /// Mark a cell occupied when either side is occupied.
    Or,
    /// Toggle a cell when exactly one side is occupied.
    Xor,
}

impl BoolOp {
    #[inline]
    fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BoolOp::And => lhs && rhs,
            BoolOp::Or => lhs || rhs,
            BoolOp::Xor => lhs ^ rhs,
        }
    }
}

/// A dense boolean occupancy value per cell of a [`VoxelGrid`].
///
/// The store keeps one boolean per grid cell, flattened in the grid's index
/// order, and is never resized after creation. Merging two stores follows the
/// sub-grid protocol: when the right-hand grid carries an offset, its cells
/// are remapped coordinate-by-coordinate into the left-hand lattice; without
/// an offset the merge applies index-for-index.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use nalgebra::{Point3, Vector3};
/// use voxelate3d::bounding_volume::Aabb;
/// use voxelate3d::grid::{VoxelData, VoxelGrid};
///
/// let grid = VoxelGrid::new(
///     Vector3::repeat(1.0),
///     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)),
/// );
///
/// // Rasterize into a sub-grid store, then scatter it into the full store.
/// let sub = grid
///     .sub_grid(&Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0)))
///     .unwrap();
/// let mut local = VoxelData::new(sub);
/// local.set_occupancy(0, true).unwrap();
///
/// let mut data = VoxelData::new(grid);
/// data.or(&local).unwrap();
/// assert_eq!(data.occupied_indices(), vec![7]);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelData {
    grid: VoxelGrid,
    occupancy: Vec<bool>,
}

impl VoxelData {
    /// Creates an all-empty occupancy store bound to `grid`.
    pub fn new(grid: VoxelGrid) -> VoxelData {
        let occupancy = vec![false; grid.len() as usize];
        VoxelData { grid, occupancy }
    }

    /// The grid this store is bound to.
    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The number of cells of this store.
    #[inline]
    pub fn len(&self) -> u32 {
        self.occupancy.len() as u32
    }

    /// Is this store empty (zero cells)?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// The occupancy of the cell at the given flat index.
    pub fn occupancy(&self, index: u32) -> Result<bool, GridError> {
        if !self.grid.is_index_valid(index) {
            return Err(GridError::InvalidIndex {
                index,
                len: self.len(),
            });
        }

        Ok(self.occupancy[index as usize])
    }

    /// The occupancy of the cell at the given coordinate.
    pub fn occupancy_at_coordinate(&self, coordinate: &Point3<u32>) -> Result<bool, GridError> {
        let index = self.grid.cell_index(coordinate)?;
        Ok(self.occupancy[index as usize])
    }

    /// The occupancy of the cell containing the given world-space location.
    pub fn occupancy_at_point(&self, location: &Point<Real>) -> Result<bool, GridError> {
        let index = self.grid.cell_index_at_point(location)?;
        Ok(self.occupancy[index as usize])
    }

    /// Sets the occupancy of the cell at the given flat index.
    pub fn set_occupancy(&mut self, index: u32, occupied: bool) -> Result<(), GridError> {
        if !self.grid.is_index_valid(index) {
            return Err(GridError::InvalidIndex {
                index,
                len: self.len(),
            });
        }

        self.occupancy[index as usize] = occupied;
        Ok(())
    }

    /// Sets the occupancy of the cell at the given coordinate.
    pub fn set_occupancy_at_coordinate(
        &mut self,
        coordinate: &Point3<u32>,
        occupied: bool,
    ) -> Result<(), GridError> {
        let index = self.grid.cell_index(coordinate)?;
        self.occupancy[index as usize] = occupied;
        Ok(())
    }

    /// Sets the occupancy of the cell containing the given location.
    pub fn set_occupancy_at_point(
        &mut self,
        location: &Point<Real>,
        occupied: bool,
    ) -> Result<(), GridError> {
        let index = self.grid.cell_index_at_point(location)?;
        self.occupancy[index as usize] = occupied;
        Ok(())
    }

    /// Merges `other` into `self` with a cell-wise AND.
    pub fn and(&mut self, other: &VoxelData) -> Result<(), GridError> {
        self.merge(BoolOp::And, other)
    }

    /// Merges `other` into `self` with a cell-wise OR.
    ///
    /// This is monotone: no previously occupied cell of `self` becomes empty.
    pub fn or(&mut self, other: &VoxelData) -> Result<(), GridError> {
        self.merge(BoolOp::Or, other)
    }

    /// Merges `other` into `self` with a cell-wise XOR.
    pub fn xor(&mut self, other: &VoxelData) -> Result<(), GridError> {
        self.merge(BoolOp::Xor, other)
    }

    /// Merges `other` into `self` with the given boolean operator.
    ///
    /// Preconditions: `other`'s grid must be contained in `self`'s bounds
    /// ([`GridError::IncompatibleGrids`] otherwise) and must not hold more
    /// cells than `self` ([`GridError::SizeMismatch`]).
    ///
    /// When `other`'s grid carries a sub-grid offset, each of its cells is
    /// remapped into `self`'s lattice: the operator is applied at
    /// `self.grid.cell_index(offset + other.grid.cell_coordinate(i))`.
    /// Without an offset the operator is applied index-for-index, both grids
    /// being assumed to share the same layout.
    pub fn merge(&mut self, op: BoolOp, other: &VoxelData) -> Result<(), GridError> {
        if !self.grid.contains_grid(&other.grid) {
            return Err(GridError::IncompatibleGrids);
        }

        if self.len() < other.len() {
            return Err(GridError::SizeMismatch {
                len: self.len(),
                other_len: other.len(),
            });
        }

        if let Some(offset) = other.grid.offset() {
            for i in 0..other.len() {
                let coordinate = other.grid.cell_coordinate(i)? + offset;
                let target = self.grid.cell_index(&coordinate)? as usize;
                self.occupancy[target] = op.apply(self.occupancy[target], other.occupancy[i as usize]);
            }
        } else {
            for i in 0..other.occupancy.len() {
                self.occupancy[i] = op.apply(self.occupancy[i], other.occupancy[i]);
            }
        }

        Ok(())
    }

    /// The ascending flat indices of all occupied cells.
    pub fn occupied_indices(&self) -> Vec<u32> {
        self.occupancy
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// The world-space bounds of all occupied cells, in index order.
    ///
    /// This is the feed for debug visualization: a consumer can draw each
    /// returned box without touching the grid math itself.
    pub fn occupied_cell_aabbs(&self) -> Vec<Aabb> {
        self.occupancy
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(i, _)| {
                let coordinate = self.grid.unchecked_cell_coordinate(i as u32);
                self.grid.unchecked_cell_aabb(&coordinate)
            })
            .collect()
    }
}
