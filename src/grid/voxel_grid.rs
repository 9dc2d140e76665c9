use crate::bounding_volume::Aabb;
use crate::grid::GridError;
use crate::math::{Point, Real, Vector};
use crate::voxelization::HeightFieldData;
use na::{Point3, Vector3};

/// A regularly spaced 3D lattice of axis-aligned cells.
///
/// The grid only handles the lattice math (bounds rounding, coordinate and
/// index derivation, sub-grid construction); the per-cell occupancy values
/// live in [`VoxelData`](crate::grid::VoxelData).
///
/// # Invariants
///
/// - `bounds.mins` and `bounds.maxs` are exact multiples of `cell_size` on
///   every axis: the constructor rounds the requested bounds outward, so any
///   partially covered cell is included.
/// - `cell_count[axis] = ceil(bounds_extent[axis] / cell_size[axis])`.
/// - Flat indices enumerate cells X-fastest, then Y, then Z:
///   `index = x + y * count.x + z * count.x * count.y`.
///
/// A grid constructed with [`VoxelGrid::sub_grid`] additionally records the
/// integer `offset` of its origin cell within the parent's lattice; this
/// offset drives the coordinate remapping of occupancy merges.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use nalgebra::{Point3, Vector3};
/// use voxelate3d::bounding_volume::Aabb;
/// use voxelate3d::grid::VoxelGrid;
///
/// let grid = VoxelGrid::new(
///     Vector3::repeat(1.0),
///     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)),
/// );
///
/// assert_eq!(grid.len(), 8);
/// assert_eq!(grid.cell_index_at_point(&Point3::new(1.5, 1.5, 1.5)).unwrap(), 7);
///
/// let sub = grid
///     .sub_grid(&Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0)))
///     .unwrap();
/// assert_eq!(sub.offset(), Some(Vector3::new(1, 1, 1)));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    cell_size: Vector<Real>,
    bounds: Aabb,
    cell_count: Vector3<u32>,
    offset: Option<Vector3<u32>>,
}

/// Rounds `bounds` outward to whole multiples of `cell_size`.
fn round_bounds_outward(cell_size: &Vector<Real>, bounds: &Aabb) -> Aabb {
    let mins = Point::new(
        (bounds.mins.x / cell_size.x).floor() * cell_size.x,
        (bounds.mins.y / cell_size.y).floor() * cell_size.y,
        (bounds.mins.z / cell_size.z).floor() * cell_size.z,
    );
    let maxs = Point::new(
        (bounds.maxs.x / cell_size.x).ceil() * cell_size.x,
        (bounds.maxs.y / cell_size.y).ceil() * cell_size.y,
        (bounds.maxs.z / cell_size.z).ceil() * cell_size.z,
    );

    Aabb::new(mins, maxs)
}

impl VoxelGrid {
    /// Creates a grid covering `bounds` with cells of size `cell_size`.
    ///
    /// The bounds are rounded outward (mins down, maxs up) to the nearest
    /// multiple of `cell_size` on every axis, so any partially covered cell
    /// ends up inside the grid.
    ///
    /// # Panics
    ///
    /// Panics if any component of `cell_size` is not strictly positive.
    pub fn new(cell_size: Vector<Real>, bounds: Aabb) -> VoxelGrid {
        assert!(
            cell_size.iter().all(|e| *e > 0.0),
            "A voxel grid's cell size must be strictly positive on every axis."
        );

        let bounds = round_bounds_outward(&cell_size, &bounds);
        let extents = bounds.extents();
        let cell_count = Vector3::new(
            (extents.x / cell_size.x).ceil() as u32,
            (extents.y / cell_size.y).ceil() as u32,
            (extents.z / cell_size.z).ceil() as u32,
        );

        VoxelGrid {
            cell_size,
            bounds,
            cell_count,
            offset: None,
        }
    }

    /// Creates a grid matching the native quad resolution of a heightfield.
    ///
    /// The cell size along X and Y is derived from the heightfield's sample
    /// count (`sqrt(element_count)` samples per axis over its world bounds);
    /// the vertical cell size spans the full height of the bounds.
    pub fn from_heightfield(heightfield: &HeightFieldData) -> VoxelGrid {
        let samples_per_axis = (heightfield.samples.len() as Real).sqrt();
        let extents = heightfield.bounds.extents();
        let cell_size = Vector::new(
            extents.x / samples_per_axis,
            extents.y / samples_per_axis,
            extents.z,
        );

        Self::new(cell_size, heightfield.bounds)
    }

    /// Creates the sub-grid of `self` covering `region`.
    ///
    /// The sub-grid shares this grid's cell size, rounds `region` outward the
    /// same way the constructor does, and records the coordinate of its origin
    /// cell within `self` as its offset.
    ///
    /// Returns [`GridError::OutOfBounds`] when `region` is not contained in
    /// this grid's bounds.
    pub fn sub_grid(&self, region: &Aabb) -> Result<VoxelGrid, GridError> {
        if !self.bounds.contains(region) {
            return Err(GridError::OutOfBounds);
        }

        let mut result = Self::new(self.cell_size, *region);
        result.offset = Some(self.cell_coordinate_at_point(&result.bounds.mins)?.coords);
        Ok(result)
    }

    /// The world-space bounds of this grid.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The world-space size of each cell.
    #[inline]
    pub fn cell_size(&self) -> &Vector<Real> {
        &self.cell_size
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn cells(&self) -> Vector3<u32> {
        self.cell_count
    }

    /// The total number of cells of this grid.
    #[inline]
    pub fn len(&self) -> u32 {
        self.cell_count.x * self.cell_count.y * self.cell_count.z
    }

    /// Is this grid empty (zero cells)?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The coordinate of this grid's origin cell within its parent lattice.
    ///
    /// Only present when the grid was built with [`VoxelGrid::sub_grid`];
    /// `None` means the grid is not a sub-grid and merges positionally.
    #[inline]
    pub fn offset(&self) -> Option<Vector3<u32>> {
        self.offset
    }

    /// Is the given flat index a valid cell index of this grid?
    #[inline]
    pub fn is_index_valid(&self, index: u32) -> bool {
        index < self.len()
    }

    /// Is the given coordinate within the per-axis cell counts of this grid?
    #[inline]
    pub fn is_coordinate_valid(&self, coordinate: &Point3<u32>) -> bool {
        coordinate.x < self.cell_count.x
            && coordinate.y < self.cell_count.y
            && coordinate.z < self.cell_count.z
    }

    /// Is the given world-space location inside this grid's bounds?
    ///
    /// Locations exactly on the bounds' faces are considered inside.
    #[inline]
    pub fn contains_point(&self, location: &Point<Real>) -> bool {
        self.bounds.contains_point(location)
    }

    /// Is `other`'s bounds fully contained in this grid's bounds?
    #[inline]
    pub fn contains_grid(&self, other: &VoxelGrid) -> bool {
        self.bounds.contains(&other.bounds)
    }

    /// The coordinate of the cell containing the given world-space location.
    ///
    /// Locations exactly on the upper faces of the bounds map to the last
    /// cell of the corresponding axis. Returns [`GridError::OutOfBounds`]
    /// when the location lies outside the bounds.
    pub fn cell_coordinate_at_point(
        &self,
        location: &Point<Real>,
    ) -> Result<Point3<u32>, GridError> {
        if !self.contains_point(location) {
            return Err(GridError::OutOfBounds);
        }

        let local = *location - self.bounds.mins;
        let coordinate = Point3::new(
            ((local.x / self.cell_size.x).floor() as u32).min(self.cell_count.x.saturating_sub(1)),
            ((local.y / self.cell_size.y).floor() as u32).min(self.cell_count.y.saturating_sub(1)),
            ((local.z / self.cell_size.z).floor() as u32).min(self.cell_count.z.saturating_sub(1)),
        );

        Ok(coordinate)
    }

    /// The flat index of the cell containing the given world-space location.
    ///
    /// Returns [`GridError::OutOfBounds`] when the location lies outside the
    /// bounds.
    pub fn cell_index_at_point(&self, location: &Point<Real>) -> Result<u32, GridError> {
        let coordinate = self.cell_coordinate_at_point(location)?;
        self.cell_index(&coordinate)
    }

    /// The flat index of the cell at the given coordinate.
    ///
    /// Returns [`GridError::InvalidCoordinate`] when the coordinate exceeds
    /// the per-axis cell counts.
    pub fn cell_index(&self, coordinate: &Point3<u32>) -> Result<u32, GridError> {
        if !self.is_coordinate_valid(coordinate) {
            return Err(GridError::InvalidCoordinate {
                coordinate: *coordinate,
                cell_count: self.cell_count,
            });
        }

        Ok(self.unchecked_cell_index(coordinate))
    }

    /// The coordinate of the cell at the given flat index.
    ///
    /// Returns [`GridError::InvalidIndex`] when the index is out of range.
    pub fn cell_coordinate(&self, index: u32) -> Result<Point3<u32>, GridError> {
        if !self.is_index_valid(index) {
            return Err(GridError::InvalidIndex {
                index,
                len: self.len(),
            });
        }

        Ok(self.unchecked_cell_coordinate(index))
    }

    /// The world-space bounds of the cell at the given flat index.
    pub fn cell_aabb(&self, index: u32) -> Result<Aabb, GridError> {
        let coordinate = self.cell_coordinate(index)?;
        Ok(self.unchecked_cell_aabb(&coordinate))
    }

    /// The world-space bounds of the cell at the given coordinate.
    pub fn cell_aabb_at_coordinate(&self, coordinate: &Point3<u32>) -> Result<Aabb, GridError> {
        if !self.is_coordinate_valid(coordinate) {
            return Err(GridError::InvalidCoordinate {
                coordinate: *coordinate,
                cell_count: self.cell_count,
            });
        }

        Ok(self.unchecked_cell_aabb(coordinate))
    }

    /// The world-space bounds of the cell containing the given location.
    pub fn cell_aabb_at_point(&self, location: &Point<Real>) -> Result<Aabb, GridError> {
        let coordinate = self.cell_coordinate_at_point(location)?;
        Ok(self.unchecked_cell_aabb(&coordinate))
    }

    /// The flat indices of all cells touched by `region` (inclusive).
    ///
    /// The region is rounded outward to cell boundaries with the same rule as
    /// the constructor, so partially covered cells are included. Every
    /// produced index is validated against this grid; a region reaching
    /// outside the bounds fails with [`GridError::OutOfBounds`].
    pub fn cell_indices_in_bounds(&self, region: &Aabb) -> Result<Vec<u32>, GridError> {
        let mut result = Vec::new();
        self.for_each_cell_in_bounds(region, |this, coordinate| {
            result.push(this.unchecked_cell_index(&coordinate));
            Ok(())
        })?;

        Ok(result)
    }

    /// The coordinates of all cells touched by `region` (inclusive).
    ///
    /// Same rounding and validation rules as
    /// [`VoxelGrid::cell_indices_in_bounds`].
    pub fn cell_coordinates_in_bounds(&self, region: &Aabb) -> Result<Vec<Point3<u32>>, GridError> {
        let mut result = Vec::new();
        self.for_each_cell_in_bounds(region, |_, coordinate| {
            result.push(coordinate);
            Ok(())
        })?;

        Ok(result)
    }

    fn for_each_cell_in_bounds(
        &self,
        region: &Aabb,
        mut f: impl FnMut(&Self, Point3<u32>) -> Result<(), GridError>,
    ) -> Result<(), GridError> {
        let rounded = round_bounds_outward(&self.cell_size, region);
        let extents = rounded.extents();
        let cells = Vector3::new(
            (extents.x / self.cell_size.x).ceil() as u32,
            (extents.y / self.cell_size.y).ceil() as u32,
            (extents.z / self.cell_size.z).ceil() as u32,
        );

        let origin = self.cell_coordinate_at_point(&rounded.mins)?;

        for z in 0..cells.z {
            for y in 0..cells.y {
                for x in 0..cells.x {
                    let coordinate = origin + Vector3::new(x, y, z);

                    if !self.is_coordinate_valid(&coordinate) {
                        return Err(GridError::OutOfBounds);
                    }

                    f(self, coordinate)?;
                }
            }
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn unchecked_cell_index(&self, coordinate: &Point3<u32>) -> u32 {
        coordinate.x
            + coordinate.y * self.cell_count.x
            + coordinate.z * self.cell_count.x * self.cell_count.y
    }

    #[inline]
    pub(crate) fn unchecked_cell_coordinate(&self, index: u32) -> Point3<u32> {
        let slice = self.cell_count.x * self.cell_count.y;
        let z = index / slice;
        let y = (index - z * slice) / self.cell_count.x;
        let x = index - z * slice - y * self.cell_count.x;

        Point3::new(x, y, z)
    }

    #[inline]
    pub(crate) fn unchecked_cell_aabb(&self, coordinate: &Point3<u32>) -> Aabb {
        let mins = self.bounds.mins
            + Vector::new(
                coordinate.x as Real * self.cell_size.x,
                coordinate.y as Real * self.cell_size.y,
                coordinate.z as Real * self.cell_size.z,
            );

        Aabb::new(mins, mins + self.cell_size)
    }
}

impl PartialEq for VoxelGrid {
    /// Two grids are equal iff their cell size and bounds match exactly.
    ///
    /// The sub-grid offset is deliberately not compared: a sub-grid covering
    /// the full parent bounds is equal to its parent.
    fn eq(&self, other: &Self) -> bool {
        self.cell_size == other.cell_size && self.bounds == other.bounds
    }
}
