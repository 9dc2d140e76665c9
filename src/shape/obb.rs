use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Rotation, Vector};

/// An oriented bounding box positioned in world space.
///
/// An OBB is a box free to rotate: it stores its world center, its
/// half-extents along its own local axes, and its orientation. An
/// axis-aligned box is the special case with an identity orientation, which
/// lets grid cells reuse the same intersection routine
/// ([`crate::query::intersection_test_obb_obb`]) as rotated boxes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Obb {
    /// The center of the box in world space.
    pub center: Point<Real>,
    /// The half-extents of the box along each of its local axes.
    pub half_extents: Vector<Real>,
    /// The orientation of the box.
    pub orientation: Rotation<Real>,
}

impl Obb {
    /// Creates a new OBB from its world center, half-extents, and
    /// orientation.
    #[inline]
    pub fn new(center: Point<Real>, half_extents: Vector<Real>, orientation: Rotation<Real>) -> Obb {
        Obb {
            center,
            half_extents,
            orientation,
        }
    }

    /// Wraps a world-space AABB as a degenerate (axis-aligned) OBB.
    #[inline]
    pub fn from_aabb(aabb: &Aabb) -> Obb {
        Obb {
            center: aabb.center(),
            half_extents: aabb.half_extents(),
            orientation: Rotation::identity(),
        }
    }

    /// The three local axes of this OBB expressed in world space.
    #[inline]
    pub fn axes(&self) -> [Vector<Real>; 3] {
        [
            self.orientation * Vector::x(),
            self.orientation * Vector::y(),
            self.orientation * Vector::z(),
        ]
    }

    /// The eight corners of this OBB in world space.
    pub fn corners(&self) -> [Point<Real>; 8] {
        let [ax, ay, az] = self.axes();
        let hx = ax * self.half_extents.x;
        let hy = ay * self.half_extents.y;
        let hz = az * self.half_extents.z;

        [
            self.center + hx + hy + hz,
            self.center + hx + hy - hz,
            self.center + hx - hy + hz,
            self.center + hx - hy - hz,
            self.center - hx + hy + hz,
            self.center - hx + hy - hz,
            self.center - hx - hy + hz,
            self.center - hx - hy - hz,
        ]
    }

    /// Does this OBB contain the given world-space point?
    ///
    /// The point is un-rotated into the box's local frame and compared
    /// component-wise against the half-extents; points exactly on a face are
    /// considered contained.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        let local = self.orientation.inverse_transform_vector(&(pt - self.center));

        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }

    /// Does this OBB fully contain `other`?
    ///
    /// `other` is contained when all eight of its corners are inside or on
    /// this box.
    pub fn contains_obb(&self, other: &Obb) -> bool {
        other.corners().iter().all(|corner| self.contains_point(corner))
    }

    /// The smallest OBB with this box's orientation containing both `self`
    /// and `other`.
    ///
    /// `other`'s corners are brought into this box's local frame and the
    /// extents grown to cover them; the center shifts accordingly. The
    /// orientation is kept, so the result is generally not the tightest
    /// enclosing box.
    pub fn merged(&self, other: &Obb) -> Obb {
        let mut mins = -self.half_extents;
        let mut maxs = self.half_extents;

        for corner in other.corners() {
            let local = self
                .orientation
                .inverse_transform_vector(&(corner - self.center));
            mins = mins.inf(&local);
            maxs = maxs.sup(&local);
        }

        let local_center = (maxs + mins) * 0.5;

        Obb {
            center: self.center + self.orientation * local_center,
            half_extents: (maxs - mins) * 0.5,
            orientation: self.orientation,
        }
    }

    /// The smallest AABB containing this OBB.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.corners())
    }
}
