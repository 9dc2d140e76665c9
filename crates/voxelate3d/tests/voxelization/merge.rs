use na::{Point3, Vector3};
use voxelate3d::bounding_volume::Aabb;
use voxelate3d::grid::{GridError, VoxelData, VoxelGrid};

fn grid(mins: [f32; 3], maxs: [f32; 3], cell: f32) -> VoxelGrid {
    VoxelGrid::new(
        Vector3::repeat(cell),
        Aabb::new(Point3::from(mins), Point3::from(maxs)),
    )
}

#[test]
fn positional_merge_without_offset() {
    let mut lhs = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));
    let mut rhs = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));

    lhs.set_occupancy(0, true).unwrap();
    lhs.set_occupancy(3, true).unwrap();
    rhs.set_occupancy(3, true).unwrap();
    rhs.set_occupancy(5, true).unwrap();

    let mut or = lhs.clone();
    or.or(&rhs).unwrap();
    assert_eq!(or.occupied_indices(), vec![0, 3, 5]);

    let mut and = lhs.clone();
    and.and(&rhs).unwrap();
    assert_eq!(and.occupied_indices(), vec![3]);

    let mut xor = lhs.clone();
    xor.xor(&rhs).unwrap();
    assert_eq!(xor.occupied_indices(), vec![0, 5]);
}

#[test]
fn offset_merge_scatters_into_the_parent() {
    let parent_grid = grid([0.0; 3], [4.0; 3], 1.0);
    let sub_grid = parent_grid
        .sub_grid(&Aabb::new(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0)))
        .unwrap();

    let mut parent = VoxelData::new(parent_grid.clone());
    let mut local = VoxelData::new(sub_grid);
    local.set_occupancy(0, true).unwrap();

    parent.or(&local).unwrap();

    let expected = parent_grid.cell_index(&Point3::new(2, 2, 2)).unwrap();
    assert_eq!(parent.occupied_indices(), vec![expected]);
}

#[test]
fn or_merge_is_monotone() {
    let parent_grid = grid([0.0; 3], [4.0; 3], 1.0);
    let sub_grid = parent_grid
        .sub_grid(&Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0)))
        .unwrap();

    let mut parent = VoxelData::new(parent_grid.clone());
    parent.set_occupancy(0, true).unwrap();
    parent.set_occupancy(21, true).unwrap();
    let before = parent.occupied_indices();

    let mut local = VoxelData::new(sub_grid.clone());
    for index in 0..local.len() {
        if index % 2 == 0 {
            local.set_occupancy(index, true).unwrap();
        }
    }

    parent.or(&local).unwrap();

    // No previously occupied cell was cleared.
    for index in before {
        assert!(parent.occupancy(index).unwrap());
    }

    // Every occupied local cell is occupied in the parent through the offset.
    let offset = sub_grid.offset().unwrap();
    for index in local.occupied_indices() {
        let coordinate = sub_grid.cell_coordinate(index).unwrap() + offset;
        assert!(parent.occupancy_at_coordinate(&coordinate).unwrap());
    }
}

#[test]
fn xor_merge_is_self_inverse() {
    let mut data = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));
    data.set_occupancy(1, true).unwrap();
    data.set_occupancy(6, true).unwrap();

    let copy = data.clone();
    data.xor(&copy).unwrap();

    assert!(data.occupied_indices().is_empty());
}

#[test]
fn merge_requires_containment() {
    let mut lhs = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));
    let rhs = VoxelData::new(grid([1.0; 3], [3.0; 3], 1.0));

    assert_eq!(lhs.or(&rhs), Err(GridError::IncompatibleGrids));
}

#[test]
fn merge_rejects_oversized_data() {
    // The right-hand grid fits inside the left-hand bounds but holds more
    // cells (finer lattice), which the positional protocol cannot express.
    let mut lhs = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));
    let rhs = VoxelData::new(grid([0.0; 3], [2.0; 3], 0.5));

    assert_eq!(
        lhs.or(&rhs),
        Err(GridError::SizeMismatch {
            len: 8,
            other_len: 64,
        })
    );
}

#[test]
fn occupied_cell_aabbs_follow_the_grid() {
    let mut data = VoxelData::new(grid([0.0; 3], [2.0; 3], 1.0));
    data.set_occupancy(7, true).unwrap();

    let aabbs = data.occupied_cell_aabbs();
    assert_eq!(aabbs.len(), 1);
    assert_eq!(aabbs[0].mins, Point3::new(1.0, 1.0, 1.0));
    assert_eq!(aabbs[0].maxs, Point3::new(2.0, 2.0, 2.0));
}
