extern crate nalgebra as na;

use na::{Point3, Vector3};
use voxelate3d::bounding_volume::Aabb;
use voxelate3d::grid::{VoxelData, VoxelGrid};

fn main() {
    let grid = VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0)),
    );

    // Fill one octant of the grid through a sub-grid store.
    let octant = grid
        .sub_grid(&Aabb::new(Point3::new(2.0, 2.0, 2.0), Point3::new(4.0, 4.0, 4.0)))
        .expect("octant lies inside the grid");
    let mut local = VoxelData::new(octant);

    for index in 0..local.len() {
        local.set_occupancy(index, true).unwrap();
    }

    let mut data = VoxelData::new(grid);
    data.or(&local).expect("sub-grid merge failed");
    println!("after OR: {} occupied cells", data.occupied_indices().len());

    // XOR against itself clears everything again.
    let copy = data.clone();
    data.xor(&copy).expect("positional merge failed");
    println!("after XOR: {} occupied cells", data.occupied_indices().len());
}
