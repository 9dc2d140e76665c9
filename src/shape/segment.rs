//! Definition of the segment shape.

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use na::Unit;

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

/// Logical description of the location of a point on a segment.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentPointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on the segment interior.
    OnEdge([Real; 2]),
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The unit direction of this segment.
    ///
    /// Points from `self.a` toward `self.b`.
    /// Returns `None` if both points are equal.
    pub fn direction(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_direction(), DEFAULT_EPSILON)
    }

    /// Applies the isometry `m` to the vertices of this segment and returns
    /// the resulting segment.
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Segment::new(m * self.a, m * self.b)
    }

    /// Computes the point at the given location.
    pub fn point_at(&self, location: &SegmentPointLocation) -> Point<Real> {
        match *location {
            SegmentPointLocation::OnVertex(0) => self.a,
            SegmentPointLocation::OnVertex(_) => self.b,
            SegmentPointLocation::OnEdge(bcoords) => {
                self.a * bcoords[0] + self.b.coords * bcoords[1]
            }
        }
    }

    /// Projects `pt` on this segment, clamped to the segment's extent.
    ///
    /// Also returns the location of the projection on the segment: clamping
    /// to an endpoint yields `OnVertex`, an interior projection yields
    /// `OnEdge` with the barycentric coordinates of the projected point. A
    /// degenerate (zero-length) segment projects everything on its first
    /// vertex.
    pub fn project_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, SegmentPointLocation) {
        let ab = self.b - self.a;
        let ap = pt - self.a;
        let ab_ap = ab.dot(&ap);
        let sqnab = ab.norm_squared();

        if ab_ap <= 0.0 || ulps_eq!(sqnab, 0.0) {
            // Voronoï region of the vertex 'a', or degenerate segment.
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if ab_ap >= sqnab {
            // Voronoï region of the vertex 'b'.
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            // Voronoï region of the segment interior.
            let u = ab_ap / sqnab;
            let location = SegmentPointLocation::OnEdge([1.0 - u, u]);
            (self.point_at(&location), location)
        }
    }
}
