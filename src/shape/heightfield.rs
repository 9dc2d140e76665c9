use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use na::DMatrix;

/// A heightfield collision surface positioned in world space.
///
/// Heights are decoded once, at construction, from the packed unsigned 16-bit
/// samples exposed by the heightfield data source. A sample maps to a height
/// relative to the heightfield's origin by linear interpolation over the
/// fixed range `[-256.0, 255.992]`, scaled by the instance's vertical scale:
///
/// ```text
/// height = lerp(-256.0, 255.992, sample / 65535) * scale.z
/// ```
///
/// Samples are laid out row-major with a stride of `resolution + 1`: a
/// heightfield of `resolution × resolution` collision quads carries
/// `(resolution + 1)²` samples. The sample at `(row, col)` sits at the world
/// position `origin + (col * scale.x, row * scale.y, height)`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    heights: DMatrix<Real>,
    scale: Vector<Real>,
    origin: Point<Real>,
    bounds: Aabb,
}

fn decode_height(sample: u16, scale_z: Real) -> Real {
    let min: Real = -256.0;
    let max: Real = 255.992;
    let t = Real::from(sample) / Real::from(u16::MAX);
    (min + (max - min) * t) * scale_z
}

impl HeightField {
    /// Decodes a heightfield from its raw 16-bit samples.
    ///
    /// `samples` must hold `(resolution + 1)²` values in row-major order;
    /// `origin` is the world position of the sample `(0, 0)`; `scale` gives
    /// the world extent of one quad along X and Y and the vertical scaling
    /// factor along Z; `bounds` is the world bounds of the whole component.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is zero or the sample count does not match the
    /// resolution.
    pub fn from_raw_samples(
        samples: &[u16],
        resolution: u32,
        origin: Point<Real>,
        scale: Vector<Real>,
        bounds: Aabb,
    ) -> HeightField {
        assert!(
            resolution > 0,
            "A heightfield must have at least one collision quad per axis."
        );
        let stride = (resolution + 1) as usize;
        assert!(
            samples.len() == stride * stride,
            "A heightfield of resolution {} requires {} samples, got {}.",
            resolution,
            stride * stride,
            samples.len()
        );

        let heights = DMatrix::from_fn(stride, stride, |row, col| {
            decode_height(samples[col + row * stride], scale.z)
        });

        HeightField {
            heights,
            scale,
            origin,
            bounds,
        }
    }

    /// The number of collision quads along each axis.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.heights.nrows() as u32 - 1
    }

    /// The world bounds of the heightfield component.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The world position of the sample `(0, 0)`.
    #[inline]
    pub fn origin(&self) -> &Point<Real> {
        &self.origin
    }

    /// The instance scale the heights were decoded with.
    #[inline]
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }

    /// The decoded height of the sample at `(row, col)`, relative to the
    /// heightfield's origin.
    ///
    /// # Panics
    ///
    /// Panics if the sample coordinates exceed the sample counts.
    #[inline]
    pub fn height(&self, row: u32, col: u32) -> Real {
        self.heights[(row as usize, col as usize)]
    }

    /// The heights of the four samples bounding the quad at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the quad coordinates exceed the quad counts.
    pub fn quad_heights(&self, row: u32, col: u32) -> [Real; 4] {
        [
            self.height(row, col),
            self.height(row, col + 1),
            self.height(row + 1, col),
            self.height(row + 1, col + 1),
        ]
    }

    /// The vertical range `[min, max]` of the quad under the given world
    /// location, in world coordinates.
    ///
    /// The range covers the four samples bounding the XY footprint of the
    /// location. Returns `None` when the location's XY projection falls
    /// outside of the heightfield's sampled rectangle. Locations exactly on
    /// the far edges map to the last quad.
    pub fn height_range_at(&self, location: &Point<Real>) -> Option<(Real, Real)> {
        let local = *location - self.origin;
        let fx = local.x / self.scale.x;
        let fy = local.y / self.scale.y;
        let resolution = self.resolution() as Real;

        if fx < 0.0 || fx > resolution || fy < 0.0 || fy > resolution {
            return None;
        }

        let col = (fx.floor() as u32).min(self.resolution() - 1);
        let row = (fy.floor() as u32).min(self.resolution() - 1);
        let heights = self.quad_heights(row, col);

        let mut min = heights[0];
        let mut max = heights[0];
        for h in &heights[1..] {
            min = min.min(*h);
            max = max.max(*h);
        }

        Some((self.origin.z + min, self.origin.z + max))
    }

    /// The decoded heights of every sample whose world XY position falls
    /// inside `region`, in row-major order.
    ///
    /// Heights are relative to the heightfield's origin; the region's Z range
    /// is ignored.
    pub fn heights_in(&self, region: &Aabb) -> Vec<Real> {
        let stride = self.heights.nrows();
        let mut result = Vec::new();

        for row in 0..stride {
            for col in 0..stride {
                let x = self.origin.x + col as Real * self.scale.x;
                let y = self.origin.y + row as Real * self.scale.y;

                if x >= region.mins.x
                    && x <= region.maxs.x
                    && y >= region.mins.y
                    && y <= region.maxs.y
                {
                    result.push(self.heights[(row, col)]);
                }
            }
        }

        result
    }

    /// The mean height of the quad under the given world location, in world
    /// coordinates.
    pub fn mean_height_at(&self, location: &Point<Real>) -> Option<Real> {
        let local = *location - self.origin;
        let fx = local.x / self.scale.x;
        let fy = local.y / self.scale.y;
        let resolution = self.resolution() as Real;

        if fx < 0.0 || fx > resolution || fy < 0.0 || fy > resolution {
            return None;
        }

        let col = (fx.floor() as u32).min(self.resolution() - 1);
        let row = (fy.floor() as u32).min(self.resolution() - 1);
        let heights = self.quad_heights(row, col);
        let quarter: Real = 0.25;

        Some(self.origin.z + heights.iter().sum::<Real>() * quarter)
    }
}
