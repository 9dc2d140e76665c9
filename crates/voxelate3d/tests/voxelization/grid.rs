use na::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxelate3d::bounding_volume::Aabb;
use voxelate3d::grid::{GridError, VoxelGrid};
use voxelate3d::voxelization::HeightFieldData;

fn unit_grid() -> VoxelGrid {
    VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)),
    )
}

#[test]
fn two_by_two_grid_layout() {
    let grid = unit_grid();

    assert_eq!(grid.cells(), Vector3::new(2, 2, 2));
    assert_eq!(grid.len(), 8);

    let cell0 = grid.cell_aabb(0).unwrap();
    assert_eq!(cell0.mins, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(cell0.maxs, Point3::new(1.0, 1.0, 1.0));

    assert_eq!(grid.cell_coordinate(7).unwrap(), Point3::new(1, 1, 1));
    let cell7 = grid.cell_aabb(7).unwrap();
    assert_eq!(cell7.mins, Point3::new(1.0, 1.0, 1.0));
    assert_eq!(cell7.maxs, Point3::new(2.0, 2.0, 2.0));
}

#[test]
fn partially_covered_cells_are_included() {
    let grid = VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.2, 0.2, 0.2), Point3::new(1.8, 1.8, 1.8)),
    );

    assert_eq!(grid.bounds().mins, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(grid.bounds().maxs, Point3::new(2.0, 2.0, 2.0));
    assert_eq!(grid.len(), 8);
}

#[test]
fn cell_enumeration_of_own_bounds_is_exhaustive() {
    // Enumerating the cells of the bounds the grid was built from must return
    // every cell exactly once, in flattening order.
    let original = Aabb::new(Point3::new(0.2, 0.2, 0.2), Point3::new(1.8, 1.8, 1.8));
    let grid = VoxelGrid::new(Vector3::repeat(1.0), original);

    let indices = grid.cell_indices_in_bounds(&original).unwrap();
    assert_eq!(indices, (0..grid.len()).collect::<Vec<_>>());

    let coordinates = grid.cell_coordinates_in_bounds(&original).unwrap();
    assert_eq!(coordinates.len() as u32, grid.len());
    for (i, coordinate) in coordinates.iter().enumerate() {
        assert_eq!(grid.cell_index(coordinate).unwrap(), i as u32);
    }
}

#[test]
fn index_coordinate_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let cell_size = Vector3::new(
            rng.gen_range(0.1..2.0),
            rng.gen_range(0.1..2.0),
            rng.gen_range(0.1..2.0),
        );
        let mins = Point3::new(
            rng.gen_range(-10.0..0.0),
            rng.gen_range(-10.0..0.0),
            rng.gen_range(-10.0..0.0),
        );
        let maxs = mins
            + Vector3::new(
                rng.gen_range(0.5..6.0),
                rng.gen_range(0.5..6.0),
                rng.gen_range(0.5..6.0),
            );
        let grid = VoxelGrid::new(cell_size, Aabb::new(mins, maxs));

        for index in 0..grid.len() {
            let coordinate = grid.cell_coordinate(index).unwrap();
            assert_eq!(grid.cell_index(&coordinate).unwrap(), index);
        }
    }
}

#[test]
fn locations_map_to_their_cell() {
    let grid = unit_grid();

    assert_eq!(
        grid.cell_index_at_point(&Point3::new(0.5, 0.5, 0.5)).unwrap(),
        0
    );
    assert_eq!(
        grid.cell_index_at_point(&Point3::new(1.5, 1.5, 1.5)).unwrap(),
        7
    );
    // The inclusive max corner belongs to the last cell.
    assert_eq!(
        grid.cell_index_at_point(&Point3::new(2.0, 2.0, 2.0)).unwrap(),
        7
    );
}

#[test]
fn out_of_bounds_locations_are_rejected() {
    let grid = unit_grid();

    assert_eq!(
        grid.cell_index_at_point(&Point3::new(2.5, 0.5, 0.5)),
        Err(GridError::OutOfBounds)
    );
    assert_eq!(
        grid.cell_coordinate_at_point(&Point3::new(0.5, -0.1, 0.5)),
        Err(GridError::OutOfBounds)
    );
}

#[test]
fn invalid_indices_and_coordinates_are_rejected() {
    let grid = unit_grid();

    assert_eq!(
        grid.cell_coordinate(8),
        Err(GridError::InvalidIndex { index: 8, len: 8 })
    );
    assert_eq!(
        grid.cell_index(&Point3::new(0, 2, 0)),
        Err(GridError::InvalidCoordinate {
            coordinate: Point3::new(0, 2, 0),
            cell_count: Vector3::new(2, 2, 2),
        })
    );
}

#[test]
fn cell_enumeration_outside_the_grid_is_rejected() {
    let grid = unit_grid();

    // Rounded outward, this region reaches one cell past the grid.
    let region = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.5, 2.0, 2.0));
    assert_eq!(
        grid.cell_indices_in_bounds(&region),
        Err(GridError::OutOfBounds)
    );
}

#[test]
fn location_based_accessors_resolve_through_the_grid() {
    let grid = unit_grid();
    let mut data = voxelate3d::grid::VoxelData::new(grid);

    let location = Point3::new(1.5, 0.5, 1.5);
    data.set_occupancy_at_point(&location, true).unwrap();

    assert!(data.occupancy_at_point(&location).unwrap());
    // (1, 0, 1) flattens to 1 + 0 * 2 + 1 * 4.
    assert!(data.occupancy(5).unwrap());
    assert!(!data.occupancy_at_point(&Point3::new(0.5, 0.5, 0.5)).unwrap());
}

#[test]
fn sub_grid_records_its_offset() {
    let grid = VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0)),
    );

    let sub = grid
        .sub_grid(&Aabb::new(Point3::new(1.0, 2.0, 3.0), Point3::new(3.0, 4.0, 4.0)))
        .unwrap();

    assert_eq!(sub.offset(), Some(Vector3::new(1, 2, 3)));
    assert_eq!(sub.cell_size(), grid.cell_size());
    assert!(grid.bounds().contains(sub.bounds()));
    assert!(grid.contains_grid(&sub));

    // Every sub-grid cell lands on a valid parent cell through the offset.
    for index in 0..sub.len() {
        let coordinate = sub.cell_coordinate(index).unwrap() + sub.offset().unwrap();
        assert!(grid.is_coordinate_valid(&coordinate));
    }
}

#[test]
fn sub_grid_of_full_bounds_equals_parent() {
    let grid = unit_grid();
    let sub = grid.sub_grid(grid.bounds()).unwrap();

    assert_eq!(sub.offset(), Some(Vector3::new(0, 0, 0)));
    // Grid equality compares cell size and bounds only, not the offset.
    assert_eq!(sub, grid);
}

#[test]
fn sub_grid_outside_parent_is_rejected() {
    let grid = unit_grid();

    assert_eq!(
        grid.sub_grid(&Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 2.0, 2.0)))
            .err(),
        Some(GridError::OutOfBounds)
    );
}

#[test]
fn heightfield_grid_matches_native_resolution() {
    let heightfield = HeightFieldData {
        samples: vec![0; 9],
        resolution: 2,
        bounds: Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(6.0, 6.0, 3.0)),
    };

    let grid = VoxelGrid::from_heightfield(&heightfield);

    // sqrt(9) = 3 samples per axis over a 6x6 footprint: cells of 2x2x3.
    assert_eq!(grid.cell_size(), &Vector3::new(2.0, 2.0, 3.0));
    assert_eq!(grid.cells(), Vector3::new(3, 3, 1));
}
