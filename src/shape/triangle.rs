//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use na::Unit;

/// A triangle shape with world-space vertices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

/// Description of the winding of a triangle as seen from the origin.
///
/// Convex collision meshes keep their vertices in a frame centered inside the
/// hull, so a face triangle whose normal points away from the origin winds
/// counter-clockwise when looked at from outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleOrientation {
    /// The triangle winds counter-clockwise as seen from the origin side of
    /// its plane.
    CounterClockwise,
    /// The triangle winds clockwise as seen from the origin side of its
    /// plane.
    Clockwise,
    /// The triangle is degenerate or its plane passes through the origin.
    Degenerate,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// Reference to an array containing the three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [&Point<Real>; 3] {
        [&self.a, &self.b, &self.c]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×`
    /// denotes the cross product). Returns `None` when the triangle is
    /// degenerate (zero area).
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle, with a length equal to twice the
    /// triangle's area.
    ///
    /// The vector points such that it is collinear to `AB × AC`.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() / 2.0
    }

    /// Computes the center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        let third: Real = na::convert::<f64, Real>(1.0 / 3.0);
        (self.a + self.b.coords + self.c.coords) * third
    }

    /// Returns a new triangle with all its vertices shifted by `translation`.
    #[inline]
    pub fn translated(&self, translation: &Vector<Real>) -> Triangle {
        Triangle::new(
            self.a + translation,
            self.b + translation,
            self.c + translation,
        )
    }

    /// Applies the isometry `m` to the vertices of this triangle and returns
    /// the resulting triangle.
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// The winding of this triangle as seen from the origin side of its
    /// plane.
    pub fn orientation(&self) -> TriangleOrientation {
        let signed = self.scaled_normal().dot(&self.a.coords);

        if signed > 0.0 {
            TriangleOrientation::CounterClockwise
        } else if signed < 0.0 {
            TriangleOrientation::Clockwise
        } else {
            TriangleOrientation::Degenerate
        }
    }

    /// Returns this triangle with the requested winding, swapping two
    /// vertices when needed.
    ///
    /// A degenerate triangle is returned unchanged.
    pub fn with_orientation(&self, orientation: TriangleOrientation) -> Triangle {
        if self.orientation() == orientation || self.orientation() == TriangleOrientation::Degenerate
        {
            *self
        } else {
            Triangle::new(self.a, self.c, self.b)
        }
    }

    /// Returns this triangle grown by pushing every vertex away from the
    /// centroid by `delta`.
    ///
    /// Vertices coinciding with the centroid stay in place (their outward
    /// direction is undefined), so degenerate triangles never produce NaN.
    pub fn expanded(&self, delta: Real) -> Triangle {
        let center = self.center();
        let push = |vertex: Point<Real>| {
            let outward = Unit::try_new(vertex - center, DEFAULT_EPSILON)
                .map(|dir| *dir)
                .unwrap_or_else(Vector::zeros);
            vertex + outward * delta
        };

        Triangle::new(push(self.a), push(self.b), push(self.c))
    }

    /// The barycentric coordinates of the given point in the plane of this
    /// triangle.
    ///
    /// Returns `None` when the triangle is degenerate (the barycentric matrix
    /// is singular), which callers must treat as "no meaningful coordinates"
    /// rather than an error.
    pub fn barycentric_coordinates(&self, pt: &Point<Real>) -> Option<[Real; 3]> {
        let v02 = self.a - self.c;
        let v12 = self.b - self.c;
        let vp2 = pt - self.c;

        let m00 = v02.dot(&v02);
        let m01 = v02.dot(&v12);
        let m11 = v12.dot(&v12);
        let r0 = v02.dot(&vp2);
        let r1 = v12.dot(&vp2);

        let det = m00 * m11 - m01 * m01;

        if ulps_eq!(det, 0.0) {
            return None;
        }

        let inv_det = 1.0 / det;
        let bary0 = (m11 * r0 - m01 * r1) * inv_det;
        let bary1 = (m00 * r1 - m01 * r0) * inv_det;

        Some([bary0, bary1, 1.0 - bary0 - bary1])
    }
}
