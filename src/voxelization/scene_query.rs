use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Rotation, Vector};
use crate::shape::{Capsule, HeightField, Obb, Sphere, Triangle};

/// The transform applied to a primitive's local-space collision shapes.
///
/// Host engines position collision shapes with a rotation, a translation,
/// and a non-uniform scale. The scale is applied to local coordinates first,
/// then the isometry, which matches the engine convention the shape elements
/// come from. Isometries alone cannot represent the scale, hence this small
/// wrapper.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    /// The rotation and translation parts of the transform.
    pub isometry: Isometry<Real>,
    /// The non-uniform scale, applied in local space before the isometry.
    pub scale: Vector<Real>,
}

impl InstanceTransform {
    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::from_isometry(Isometry::identity())
    }

    /// Creates a transform from an isometry and a scale.
    #[inline]
    pub fn new(isometry: Isometry<Real>, scale: Vector<Real>) -> Self {
        InstanceTransform { isometry, scale }
    }

    /// Creates an unscaled transform from an isometry.
    #[inline]
    pub fn from_isometry(isometry: Isometry<Real>) -> Self {
        InstanceTransform {
            isometry,
            scale: Vector::repeat(1.0),
        }
    }

    /// Transforms a local-space point into world space.
    #[inline]
    pub fn transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.isometry * Point::from(pt.coords.component_mul(&self.scale))
    }

    /// The rotation part of this transform.
    #[inline]
    pub fn rotation(&self) -> Rotation<Real> {
        self.isometry.rotation
    }

    /// The translation part of this transform, as a point.
    #[inline]
    pub fn translation(&self) -> Point<Real> {
        self.isometry.translation.vector.into()
    }
}

/// A box collision element in local space.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxElement {
    /// The center of the box in local space.
    pub center: Point<Real>,
    /// The local rotation of the box.
    pub rotation: Rotation<Real>,
    /// The half-extents of the box.
    pub half_extents: Vector<Real>,
}

impl BoxElement {
    /// The world-space oriented box of this element under `transform`.
    ///
    /// The element's half-extents are scaled by the absolute instance scale
    /// (handling negative, mirroring scales) and its local rotation composes
    /// with the instance rotation.
    pub fn to_obb(&self, transform: &InstanceTransform) -> Obb {
        Obb::new(
            transform.transform_point(&self.center),
            self.half_extents.component_mul(&transform.scale.abs()),
            transform.rotation() * self.rotation,
        )
    }
}

/// A sphere collision element in local space.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereElement {
    /// The center of the sphere in local space.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl SphereElement {
    /// The world-space sphere of this element under `transform`.
    ///
    /// A sphere cannot represent a non-uniform scale, so the radius is scaled
    /// by the smallest absolute scale component: a conservative uniform
    /// approximation.
    pub fn to_sphere(&self, transform: &InstanceTransform) -> Sphere {
        let scale = transform.scale.abs();
        let radius = self.radius * scale.x.min(scale.y).min(scale.z);

        Sphere::new(transform.transform_point(&self.center), radius)
    }
}

/// A capsule collision element in local space.
///
/// The capsule's axis is aligned with the local Z axis before its own
/// rotation is applied.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleElement {
    /// The center of the capsule in local space.
    pub center: Point<Real>,
    /// The local rotation of the capsule.
    pub rotation: Rotation<Real>,
    /// The radius of the capsule.
    ///
    /// The radius is not affected by the instance scale.
    pub radius: Real,
    /// Half the distance between the capsule's segment endpoints.
    pub half_length: Real,
}

impl CapsuleElement {
    /// The world-space capsule of this element under `transform`.
    pub fn to_capsule(&self, transform: &InstanceTransform) -> Capsule {
        let center = transform.transform_point(&self.center);
        let axis = (transform.rotation() * self.rotation) * Vector::z();
        let half = axis * self.half_length;

        Capsule::new(center + half, center - half, self.radius)
    }
}

/// A convex-mesh collision element in local space, as a triangle list.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexElement {
    /// The vertex buffer of the convex mesh.
    pub vertices: Vec<Point<Real>>,
    /// The index buffer of the convex mesh; every consecutive triple of
    /// indices describes one face triangle.
    pub indices: Vec<u32>,
}

impl ConvexElement {
    /// The world-space face triangles of this element under `transform`.
    ///
    /// Trailing indices that do not form a full triple are ignored.
    ///
    /// # Panics
    ///
    /// Panics if an index exceeds the vertex buffer.
    pub fn to_triangles(&self, transform: &InstanceTransform) -> Vec<Triangle> {
        self.indices
            .chunks_exact(3)
            .map(|idx| {
                Triangle::new(
                    transform.transform_point(&self.vertices[idx[0] as usize]),
                    transform.transform_point(&self.vertices[idx[1] as usize]),
                    transform.transform_point(&self.vertices[idx[2] as usize]),
                )
            })
            .collect()
    }
}

/// The raw data of a heightfield collision component.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HeightFieldData {
    /// The packed 16-bit height samples, row-major with a stride of
    /// `resolution + 1`.
    pub samples: Vec<u16>,
    /// The number of collision quads along each axis.
    pub resolution: u32,
    /// The world bounds of the component.
    pub bounds: Aabb,
}

impl HeightFieldData {
    /// The number of height samples along each axis.
    #[inline]
    pub fn sample_stride(&self) -> u32 {
        self.resolution + 1
    }

    /// The decoded world-space heightfield of this data under `transform`.
    pub fn to_heightfield(&self, transform: &InstanceTransform) -> HeightField {
        HeightField::from_raw_samples(
            &self.samples,
            self.resolution,
            transform.translation(),
            transform.scale,
            self.bounds,
        )
    }
}

/// The collision shape of a scene primitive.
///
/// The set of shapes is closed: the rasterizer dispatches on this enum, so a
/// new shape kind is a compile-time extension, not a runtime downcast.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum CollisionShape {
    /// A box element.
    Box(BoxElement),
    /// A sphere element.
    Sphere(SphereElement),
    /// A capsule element.
    Capsule(CapsuleElement),
    /// A convex mesh element.
    Convex(ConvexElement),
    /// A heightfield component.
    HeightField(HeightFieldData),
}

/// One collision primitive of the scene, as returned by a [`SceneQuery`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePrimitive {
    /// The world bounds of the component owning this primitive.
    pub bounds: Aabb,
    /// The transform from the shape's local space to world space.
    pub transform: InstanceTransform,
    /// The collision shape itself, in local space.
    pub shape: CollisionShape,
}

/// Read-only access to the collision primitives of a scene.
///
/// This is the voxelizer's only window into the host scene: an immutable
/// snapshot of the primitives relevant to a region or to a single object.
/// Implementations typically wrap the host engine's broad-phase; the
/// voxelizer never mutates or retains scene state through it.
pub trait SceneQuery {
    /// The handle type identifying one scene object.
    type ObjectId;

    /// All collision primitives overlapping the given world-space region.
    fn primitives_in(&self, region: &Aabb) -> Vec<ScenePrimitive>;

    /// All collision primitives of one scene object.
    fn object_primitives(&self, object: &Self::ObjectId) -> Vec<ScenePrimitive>;
}
