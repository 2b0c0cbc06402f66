use nalgebra::Point3;

/// Euclidean distance between two points, in the units of the coordinates (Angstroms).
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Angle at vertex `b` between the arms `b→a` and `b→c`, in degrees.
///
/// The cosine is clamped to `[-1, 1]` before `acos`, so (nearly) colinear points yield 0° or
/// 180° instead of NaN.
///
/// # Return
///
/// Returns `None` if either arm has zero length, in which case the angle is undefined.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    let denom = ba.norm() * bc.norm();
    if denom == 0.0 {
        return None;
    }
    let cos_theta = (ba.dot(&bc) / denom).clamp(-1.0, 1.0);
    Some(cos_theta.acos().to_degrees())
}

/// Signed torsion angle about the `b–c` axis, in degrees, in the range `(-180, 180]`.
///
/// Uses the atan2 form `atan2(|b2| b1·(b2×b3), (b1×b2)·(b2×b3))` with `b1 = b-a`,
/// `b2 = c-b`, `b3 = d-c`. Positive values mean the front bond `a–b` must be rotated
/// clockwise, looking along `b→c`, to eclipse the back bond `c–d` (IUPAC convention).
/// Degenerate (colinear) input yields 0°.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let x = n1.dot(&n2);
    let y = b1.dot(&n2) * b2.norm();
    let degrees = y.atan2(x).to_degrees();

    // atan2 may return -180 for anti-periplanar input; fold it onto +180.
    if degrees <= -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}
