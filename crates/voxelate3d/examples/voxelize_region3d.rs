extern crate nalgebra as na;

use na::{Point3, UnitQuaternion, Vector3};
use voxelate3d::bounding_volume::Aabb;
use voxelate3d::grid::{BoolOp, VoxelGrid};
use voxelate3d::voxelization::{
    BoxElement, CollisionShape, InstanceTransform, ScenePrimitive, SceneQuery, SphereElement,
    Voxelator,
};

/// A scene made of a fixed list of primitives.
struct StaticScene {
    primitives: Vec<ScenePrimitive>,
}

impl SceneQuery for StaticScene {
    type ObjectId = usize;

    fn primitives_in(&self, region: &Aabb) -> Vec<ScenePrimitive> {
        self.primitives
            .iter()
            .filter(|primitive| primitive.bounds.intersects(region))
            .cloned()
            .collect()
    }

    fn object_primitives(&self, object: &usize) -> Vec<ScenePrimitive> {
        vec![self.primitives[*object].clone()]
    }
}

fn main() {
    let transform = InstanceTransform::identity();

    let box_element = BoxElement {
        center: Point3::new(2.0, 2.0, 1.0),
        rotation: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.6),
        half_extents: Vector3::new(1.5, 0.5, 0.5),
    };
    let sphere_element = SphereElement {
        center: Point3::new(5.0, 5.0, 2.0),
        radius: 1.25,
    };

    let scene = StaticScene {
        primitives: vec![
            ScenePrimitive {
                bounds: box_element.to_obb(&transform).aabb(),
                transform,
                shape: CollisionShape::Box(box_element),
            },
            ScenePrimitive {
                bounds: Aabb::from_half_extents(
                    sphere_element.center,
                    Vector3::repeat(sphere_element.radius),
                ),
                transform,
                shape: CollisionShape::Sphere(sphere_element),
            },
        ],
    };

    let grid = VoxelGrid::new(
        Vector3::repeat(0.5),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(8.0, 8.0, 4.0)),
    );

    let data = Voxelator::new(&scene)
        .voxelize_region(&grid, BoolOp::Or)
        .expect("voxelization failed");

    println!(
        "occupied {} of {} cells",
        data.occupied_indices().len(),
        data.len()
    );

    for aabb in data.occupied_cell_aabbs() {
        println!("solid cell at {:?}", aabb.center());
    }
}
