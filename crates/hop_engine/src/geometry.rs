//! Joint angles from landmark triangles.
//!
//! Landmark roles (pt1..pt6 in table order):
//! pt1 body reference, pt2 shoulder, pt3 torso reference, pt4 upper
//! arm, pt5 elbow, pt6 lower arm.
//!
//! Each angle is the vertex angle of one triangle via the law of
//! cosines. The two humeral angles use a projected-point construction:
//! the elbow is translated by the offset between two reference
//! landmarks, reconstructing where it sits relative to the moving
//! segment, and the anatomical convention reports the supplement of
//! the raw triangle angle.

use contracts::{AngleFrame, LandmarkFrame};
use nalgebra::Point3;

/// Compute the three joint angles for one landmark frame.
///
/// Any missing landmark yields an all-missing frame; a degenerate
/// triangle (zero-length segment at the vertex) yields 0.0 for that
/// angle. Pure per-frame function, no cross-frame state.
pub fn compute_angles(frame: &LandmarkFrame) -> AngleFrame {
    let Some([pt1, pt2, pt3, pt4, pt5, pt6]) = all_points(frame) else {
        return AngleFrame::missing();
    };

    let elbow = vertex_angle(&pt4, &pt5, &pt6);

    // Elbow projected along the pt2-pt4 offset
    let projected = translate(&pt5, &pt2, &pt4);
    let pro_ret = 180.0 - vertex_angle(&pt1, &pt2, &projected);

    // Elbow projected along the pt3-pt4 offset
    let projected = translate(&pt5, &pt3, &pt4);
    let dep_ele = 180.0 - vertex_angle(&pt2, &pt3, &projected);

    AngleFrame {
        elbow_flex_ext: Some(elbow),
        humeral_pro_ret: Some(pro_ret),
        humeral_dep_ele: Some(dep_ele),
    }
}

/// Unpack the six landmarks, converting to nalgebra points.
fn all_points(frame: &LandmarkFrame) -> Option<[Point3<f64>; 6]> {
    let mut out = [Point3::origin(); 6];
    for (slot, point) in out.iter_mut().zip(frame.points.iter()) {
        let p = (*point)?;
        *slot = Point3::new(p.x, p.y, p.z);
    }
    Some(out)
}

/// `point + (to - from)`, the projected-point construction.
fn translate(point: &Point3<f64>, to: &Point3<f64>, from: &Point3<f64>) -> Point3<f64> {
    point + (to - from)
}

/// Angle at `vertex` of the triangle `a`-`vertex`-`c`, in degrees.
///
/// A zero-length segment at the vertex makes the angle undefined; the
/// rig convention maps that to 0.0.
fn vertex_angle(a: &Point3<f64>, vertex: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let left = nalgebra::distance(vertex, a);
    let right = nalgebra::distance(vertex, c);
    if left == 0.0 || right == 0.0 {
        return 0.0;
    }

    let opposite = nalgebra::distance(a, c);
    let cos = (left * left + right * right - opposite * opposite) / (2.0 * left * right);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}
