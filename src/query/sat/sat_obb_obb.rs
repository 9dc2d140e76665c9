use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::shape::Obb;

/// Searches for an axis separating the two given oriented boxes.
///
/// Tests the 15 candidate axes of the box pair: the three face normals of
/// each box and the nine cross products of their edge directions. Returns
/// `true` as soon as one axis separates the projections, `false` when none
/// does (the boxes intersect).
///
/// All the arithmetic happens in `obb1`'s local frame: the rotation matrix
/// expressing `obb2`'s axes in that frame is computed once, and its absolute
/// value is padded by an epsilon so near-parallel edge pairs do not produce a
/// spurious null separating axis.
pub fn obb_obb_separating_axis_exists(obb1: &Obb, obb2: &Obb) -> bool {
    let axes1 = obb1.axes();
    let axes2 = obb2.axes();
    let e1 = obb1.half_extents;
    let e2 = obb2.half_extents;

    // Rotation matrix expressing obb2 in obb1's coordinate frame, and its
    // epsilon-padded absolute value.
    let mut r: [[Real; 3]; 3] = [[0.0; 3]; 3];
    let mut abs_r: [[Real; 3]; 3] = [[0.0; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = axes1[i].dot(&axes2[j]);
            abs_r[i][j] = r[i][j].abs() + DEFAULT_EPSILON;
        }
    }

    // Translation vector, brought into obb1's coordinate frame.
    let t = obb2.center - obb1.center;
    let t1 = Vector::new(t.dot(&axes1[0]), t.dot(&axes1[1]), t.dot(&axes1[2]));

    // Face normals of obb1.
    for i in 0..3 {
        let ra = e1[i];
        let rb = e2.x * abs_r[i][0] + e2.y * abs_r[i][1] + e2.z * abs_r[i][2];

        if t1[i].abs() > ra + rb {
            return true;
        }
    }

    // Face normals of obb2.
    for j in 0..3 {
        let ra = e1.x * abs_r[0][j] + e1.y * abs_r[1][j] + e1.z * abs_r[2][j];
        let rb = e2[j];

        if (t1[0] * r[0][j] + t1[1] * r[1][j] + t1[2] * r[2][j]).abs() > ra + rb {
            return true;
        }
    }

    // Cross products of the edge directions: axes1[i] × axes2[j].
    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;

        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;

            let ra = e1[i1] * abs_r[i2][j] + e1[i2] * abs_r[i1][j];
            let rb = e2[j1] * abs_r[i][j2] + e2[j2] * abs_r[i][j1];

            if (t1[i2] * r[i1][j] - t1[i1] * r[i2][j]).abs() > ra + rb {
                return true;
            }
        }
    }

    false
}
