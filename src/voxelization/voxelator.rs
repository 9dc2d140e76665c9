use crate::bounding_volume::Aabb;
use crate::grid::{BoolOp, GridError, VoxelData, VoxelGrid};
use crate::query::{
    intersection_test_aabb_capsule, intersection_test_aabb_obb, intersection_test_aabb_sphere,
    intersection_test_aabb_triangle,
};
use crate::voxelization::{CollisionShape, ScenePrimitive, SceneQuery};
use log::{debug, trace};
use na::Point3;

/// Rasterizes scene collision geometry into voxel occupancy data.
///
/// The voxelator pulls primitives from a [`SceneQuery`], rasterizes each one
/// into a fresh occupancy store bound to a sub-grid of the target, and
/// scatters the local results back into the target through the sub-grid
/// offsets. Each primitive is independent: a failure aborts the whole pass
/// (precondition violations are caller errors, not transient conditions).
///
/// The operator combining per-primitive results is an explicit parameter.
/// [`BoolOp::Or`] accumulates solid cells and is what the scatter protocol
/// was designed around; [`BoolOp::And`] keeps only cells covered by every
/// primitive of the pass.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
/// use voxelate3d::bounding_volume::Aabb;
/// use voxelate3d::grid::{BoolOp, VoxelGrid};
/// use voxelate3d::voxelization::{
///     BoxElement, CollisionShape, InstanceTransform, ScenePrimitive, SceneQuery, Voxelator,
/// };
///
/// struct SingleBox(ScenePrimitive);
///
/// impl SceneQuery for SingleBox {
///     type ObjectId = ();
///
///     fn primitives_in(&self, region: &Aabb) -> Vec<ScenePrimitive> {
///         if self.0.bounds.intersects(region) {
///             vec![self.0.clone()]
///         } else {
///             vec![]
///         }
///     }
///
///     fn object_primitives(&self, _: &()) -> Vec<ScenePrimitive> {
///         vec![self.0.clone()]
///     }
/// }
///
/// let element = BoxElement {
///     center: Point3::new(1.0, 1.0, 1.0),
///     rotation: UnitQuaternion::identity(),
///     half_extents: Vector3::repeat(0.5),
/// };
/// let transform = InstanceTransform::identity();
/// let scene = SingleBox(ScenePrimitive {
///     bounds: element.to_obb(&transform).aabb(),
///     transform,
///     shape: CollisionShape::Box(element),
/// });
///
/// let grid = VoxelGrid::new(
///     Vector3::repeat(1.0),
///     Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)),
/// );
/// let data = Voxelator::new(&scene).voxelize_region(&grid, BoolOp::Or).unwrap();
///
/// // The box straddles the center of the grid: every cell is touched.
/// assert_eq!(data.occupied_indices().len(), 8);
/// # }
/// ```
pub struct Voxelator<'a, S: SceneQuery> {
    scene: &'a S,
}

impl<'a, S: SceneQuery> Voxelator<'a, S> {
    /// Creates a voxelator reading primitives from the given scene.
    pub fn new(scene: &'a S) -> Self {
        Voxelator { scene }
    }

    /// Voxelizes every primitive overlapping the bounds of `grid`.
    ///
    /// Queries the scene for the primitives relevant to the grid's bounds and
    /// rasterizes them all into one occupancy store covering the grid.
    pub fn voxelize_region(
        &self,
        grid: &VoxelGrid,
        merge: BoolOp,
    ) -> Result<VoxelData, GridError> {
        let primitives = self.scene.primitives_in(grid.bounds());
        debug!(
            "voxelizing region {:?}: {} primitives",
            grid.bounds(),
            primitives.len()
        );

        self.voxelize_primitives(&primitives, grid, merge)
    }

    /// Voxelizes the collision primitives of a single scene object.
    pub fn voxelize_object(
        &self,
        object: &S::ObjectId,
        grid: &VoxelGrid,
        merge: BoolOp,
    ) -> Result<VoxelData, GridError> {
        let primitives = self.scene.object_primitives(object);
        debug!("voxelizing object: {} primitives", primitives.len());

        self.voxelize_primitives(&primitives, grid, merge)
    }

    fn voxelize_primitives(
        &self,
        primitives: &[ScenePrimitive],
        grid: &VoxelGrid,
        merge: BoolOp,
    ) -> Result<VoxelData, GridError> {
        let mut result = VoxelData::new(grid.clone());

        for primitive in primitives {
            rasterize_primitive(primitive, grid, merge, &mut result)?;
        }

        Ok(result)
    }
}

/// Rasterizes one primitive into a local sub-grid store, then merges the
/// local result into `out`.
///
/// The primitive's bounds are clipped to the grid's bounds before deriving
/// the sub-grid, so primitives straddling the query region keep the sub-grid
/// containment contract; primitives entirely outside are skipped.
fn rasterize_primitive(
    primitive: &ScenePrimitive,
    grid: &VoxelGrid,
    merge: BoolOp,
    out: &mut VoxelData,
) -> Result<(), GridError> {
    let region = match primitive.bounds.intersection(grid.bounds()) {
        Some(region) => region,
        None => {
            trace!("skipping primitive outside of the target grid");
            return Ok(());
        }
    };

    let mut local = VoxelData::new(grid.sub_grid(&region)?);

    match &primitive.shape {
        CollisionShape::Box(element) => {
            let obb = element.to_obb(&primitive.transform);
            mark_intersecting_cells(&mut local, |cell| intersection_test_aabb_obb(cell, &obb))?;
        }
        CollisionShape::Sphere(element) => {
            let sphere = element.to_sphere(&primitive.transform);
            mark_intersecting_cells(&mut local, |cell| {
                intersection_test_aabb_sphere(cell, &sphere)
            })?;
        }
        CollisionShape::Capsule(element) => {
            let capsule = element.to_capsule(&primitive.transform);
            mark_intersecting_cells(&mut local, |cell| {
                intersection_test_aabb_capsule(cell, &capsule)
            })?;
        }
        CollisionShape::Convex(element) => {
            let triangles = element.to_triangles(&primitive.transform);
            trace!("rasterizing convex element with {} triangles", triangles.len());
            mark_intersecting_cells(&mut local, |cell| {
                triangles
                    .iter()
                    .any(|triangle| intersection_test_aabb_triangle(cell, triangle))
            })?;
        }
        CollisionShape::HeightField(data) => {
            let heightfield = data.to_heightfield(&primitive.transform);
            mark_intersecting_cells(&mut local, |cell| {
                // A heightfield column occupies a cell when the cell's
                // vertical range crosses the height range of the quad under
                // the cell's center.
                match heightfield.height_range_at(&cell.center()) {
                    Some((min_height, max_height)) => {
                        max_height >= cell.mins.z && min_height <= cell.maxs.z
                    }
                    None => false,
                }
            })?;
        }
    }

    out.merge(merge, &local)
}

/// Runs `test` on the bounds of every cell of `data`'s grid and marks the
/// intersecting cells occupied.
///
/// Cells already occupied are skipped, so a test short-circuits as soon as
/// any earlier pass over the same store marked the cell.
fn mark_intersecting_cells(
    data: &mut VoxelData,
    mut test: impl FnMut(&Aabb) -> bool,
) -> Result<(), GridError> {
    let grid = data.grid().clone();
    let cells = grid.cells();

    for y in 0..cells.y {
        for x in 0..cells.x {
            for z in 0..cells.z {
                let coordinate = Point3::new(x, y, z);
                let index = grid.cell_index(&coordinate)?;

                if data.occupancy(index)? {
                    continue;
                }

                let cell = grid.cell_aabb_at_coordinate(&coordinate)?;

                if test(&cell) {
                    data.set_occupancy(index, true)?;
                }
            }
        }
    }

    Ok(())
}
