use na::{Point3, UnitQuaternion, Vector3};
use voxelate3d::bounding_volume::Aabb;
use voxelate3d::grid::{BoolOp, VoxelGrid};
use voxelate3d::voxelization::{
    BoxElement, CapsuleElement, CollisionShape, ConvexElement, HeightFieldData,
    InstanceTransform, ScenePrimitive, SceneQuery, SphereElement, Voxelator,
};

/// A scene holding a flat list of objects, each with its own primitives.
struct TestScene {
    objects: Vec<Vec<ScenePrimitive>>,
}

impl TestScene {
    fn with_primitives(primitives: Vec<ScenePrimitive>) -> Self {
        TestScene {
            objects: vec![primitives],
        }
    }
}

impl SceneQuery for TestScene {
    type ObjectId = usize;

    fn primitives_in(&self, region: &Aabb) -> Vec<ScenePrimitive> {
        self.objects
            .iter()
            .flatten()
            .filter(|primitive| primitive.bounds.intersects(region))
            .cloned()
            .collect()
    }

    fn object_primitives(&self, object: &usize) -> Vec<ScenePrimitive> {
        self.objects[*object].clone()
    }
}

fn unit_grid() -> VoxelGrid {
    VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)),
    )
}

fn box_primitive(center: [f32; 3], half_extents: [f32; 3]) -> ScenePrimitive {
    let element = BoxElement {
        center: Point3::from(center),
        rotation: UnitQuaternion::identity(),
        half_extents: Vector3::from(half_extents),
    };
    let transform = InstanceTransform::identity();

    ScenePrimitive {
        bounds: element.to_obb(&transform).aabb(),
        transform,
        shape: CollisionShape::Box(element),
    }
}

#[test]
fn centered_box_marks_every_cell() {
    let scene = TestScene::with_primitives(vec![box_primitive([1.0; 3], [0.5; 3])]);
    let voxelator = Voxelator::new(&scene);

    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::Or).unwrap();

    assert_eq!(data.occupied_indices(), (0..8).collect::<Vec<_>>());
}

#[test]
fn small_sphere_marks_only_its_cell() {
    let element = SphereElement {
        center: Point3::new(0.1, 0.1, 0.1),
        radius: 0.1,
    };
    let transform = InstanceTransform::identity();
    let primitive = ScenePrimitive {
        bounds: Aabb::from_half_extents(element.center, Vector3::repeat(element.radius)),
        transform,
        shape: CollisionShape::Sphere(element),
    };

    let scene = TestScene::with_primitives(vec![primitive]);
    let voxelator = Voxelator::new(&scene);

    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::Or).unwrap();

    assert_eq!(data.occupied_indices(), vec![0]);
}

#[test]
fn scaled_sphere_uses_the_smallest_scale_component() {
    let element = SphereElement {
        center: Point3::origin(),
        radius: 1.0,
    };
    // The smallest |scale| component is 0.1: the sphere shrinks well inside
    // its cell and cannot reach the neighbors.
    let transform = InstanceTransform::new(
        na::Isometry3::translation(0.5, 0.5, 0.5),
        Vector3::new(2.0, 0.1, 1.0),
    );
    let primitive = ScenePrimitive {
        bounds: Aabb::from_half_extents(Point3::new(0.5, 0.5, 0.5), Vector3::repeat(1.0)),
        transform,
        shape: CollisionShape::Sphere(element),
    };

    let scene = TestScene::with_primitives(vec![primitive]);
    let voxelator = Voxelator::new(&scene);
    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::Or).unwrap();

    assert_eq!(data.occupied_indices(), vec![0]);
}

#[test]
fn convex_cube_matches_the_equivalent_box() {
    // The 12 face triangles of the cube spanning [0.5, 1.5]^3.
    let vertices = vec![
        Point3::new(0.5, 0.5, 0.5),
        Point3::new(1.5, 0.5, 0.5),
        Point3::new(1.5, 1.5, 0.5),
        Point3::new(0.5, 1.5, 0.5),
        Point3::new(0.5, 0.5, 1.5),
        Point3::new(1.5, 0.5, 1.5),
        Point3::new(1.5, 1.5, 1.5),
        Point3::new(0.5, 1.5, 1.5),
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, // bottom
        4, 5, 6, 4, 6, 7, // top
        0, 1, 5, 0, 5, 4, // front
        3, 7, 6, 3, 6, 2, // back
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];
    let transform = InstanceTransform::identity();
    let convex = ScenePrimitive {
        bounds: Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 1.5, 1.5)),
        transform,
        shape: CollisionShape::Convex(ConvexElement { vertices, indices }),
    };

    let convex_scene = TestScene::with_primitives(vec![convex]);
    let box_scene = TestScene::with_primitives(vec![box_primitive([1.0; 3], [0.5; 3])]);

    let grid = unit_grid();
    let from_convex = Voxelator::new(&convex_scene)
        .voxelize_region(&grid, BoolOp::Or)
        .unwrap();
    let from_box = Voxelator::new(&box_scene)
        .voxelize_region(&grid, BoolOp::Or)
        .unwrap();

    assert_eq!(from_convex.occupied_indices(), from_box.occupied_indices());
}

#[test]
fn capsule_marks_a_column_of_cells() {
    let grid = VoxelGrid::new(
        Vector3::repeat(1.0),
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 4.0)),
    );

    let element = CapsuleElement {
        center: Point3::new(0.5, 0.5, 2.0),
        rotation: UnitQuaternion::identity(),
        radius: 0.4,
        half_length: 1.5,
    };
    let transform = InstanceTransform::identity();
    let primitive = ScenePrimitive {
        bounds: Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 4.0)),
        transform,
        shape: CollisionShape::Capsule(element),
    };

    let scene = TestScene::with_primitives(vec![primitive]);
    let data = Voxelator::new(&scene)
        .voxelize_region(&grid, BoolOp::Or)
        .unwrap();

    // The capsule spans z in [0.1, 3.9]: all four cells of the column.
    assert_eq!(data.occupied_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn flat_heightfield_marks_the_cells_crossing_its_surface() {
    let grid = unit_grid();

    // A flat heightfield decoded at roughly z = 0 relative to its origin,
    // lifted to z = 0.5 by the instance translation: it crosses the lower
    // layer of cells only.
    let data = HeightFieldData {
        samples: vec![32768; 9],
        resolution: 2,
        bounds: Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 1.0)),
    };
    let transform = InstanceTransform::from_isometry(na::Isometry3::translation(0.0, 0.0, 0.5));
    let primitive = ScenePrimitive {
        bounds: data.bounds,
        transform,
        shape: CollisionShape::HeightField(data),
    };

    let scene = TestScene::with_primitives(vec![primitive]);
    let result = Voxelator::new(&scene)
        .voxelize_region(&grid, BoolOp::Or)
        .unwrap();

    // The lower layer is the cells with z-coordinate 0: indices 0..4.
    assert_eq!(result.occupied_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn primitives_outside_the_region_are_skipped() {
    let scene = TestScene::with_primitives(vec![box_primitive([10.0; 3], [0.5; 3])]);
    let voxelator = Voxelator::new(&scene);

    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::Or).unwrap();

    assert!(data.occupied_indices().is_empty());
}

#[test]
fn object_voxelization_uses_the_requested_primitives() {
    let scene = TestScene {
        objects: vec![
            vec![box_primitive([1.0; 3], [0.5; 3])],
            vec![box_primitive([10.0; 3], [0.5; 3])],
        ],
    };
    let voxelator = Voxelator::new(&scene);

    let data = voxelator
        .voxelize_object(&0, &unit_grid(), BoolOp::Or)
        .unwrap();
    assert_eq!(data.occupied_indices().len(), 8);
}

#[test]
fn and_merge_against_an_empty_target_stays_empty() {
    // The AND operator intersects with the (initially empty) target: this is
    // the call-site decision the operator parameter exists for.
    let scene = TestScene::with_primitives(vec![box_primitive([1.0; 3], [0.5; 3])]);
    let voxelator = Voxelator::new(&scene);

    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::And).unwrap();

    assert!(data.occupied_indices().is_empty());
}

#[test]
fn straddling_primitives_are_clipped_to_the_grid() {
    // A box centered on the grid's corner: only the overlapping octant is
    // rasterized, without tripping the sub-grid containment contract.
    let scene = TestScene::with_primitives(vec![box_primitive([0.0; 3], [0.75; 3])]);
    let voxelator = Voxelator::new(&scene);

    let data = voxelator.voxelize_region(&unit_grid(), BoolOp::Or).unwrap();

    assert_eq!(data.occupied_indices(), vec![0]);
}
