//! Floating point unit quaternion.
//!
//! This is the ground truth that the fixed-point arithmetic is checked
//! against on the host.  It is not meant for the target.

use crate::quaternion::Quat;
use vector3d::Vector3d;

/// A unit quaternion.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct UnitQuaternion {
    // vector part
    pub x: f64,
    pub y: f64,
    pub z: f64,
    // scalar part
    pub w: f64,
}

impl UnitQuaternion {
    /// No rotation.
    pub fn identity() -> Self {
        UnitQuaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }

    /// The rotation by `angle` radians about `axis`, which must not be
    /// null.
    pub fn from_axis_angle(axis: Vector3d<f64>, angle: f64) -> Self {
        let (s, c) = (0.5 * angle).sin_cos();
        let u = axis * (s / axis.norm2().sqrt());
        UnitQuaternion { x: u.x, y: u.y, z: u.z, w: c }
    }

    /// The vector part.
    pub fn vector(self) -> Vector3d<f64> {
        Vector3d::new(self.x, self.y, self.z)
    }

    /// The inverse rotation.
    pub fn conjugate(self) -> Self {
        UnitQuaternion { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// The squared norm.
    pub fn norm2(self) -> f64 {
        self.w * self.w + self.vector().norm2()
    }

    /// Rescale to exactly unit norm.
    pub fn normalized(self) -> Self {
        let n = self.norm2().sqrt();
        UnitQuaternion { x: self.x / n, y: self.y / n, z: self.z / n, w: self.w / n }
    }

    /// Rotate a vector.
    pub fn rotate(self, v: Vector3d<f64>) -> Vector3d<f64> {
        // https://gamedev.stackexchange.com/a/50545
        let u = self.vector();
        let s = self.w;
        u * u.dot(v) * 2.0 + v * (s * s - u.norm2()) + u.cross(v) * s * 2.0
    }

    /// The angle in radians of the rotation taking `self` to `other`,
    /// in [0, pi].  Neither needs to be normalized.
    pub fn angle_to(self, other: Self) -> f64 {
        let dot = self.w * other.w + self.vector().dot(other.vector());
        let cos_half = dot.abs() / (self.norm2() * other.norm2()).sqrt();
        2.0 * cos_half.min(1.0).acos()
    }

    /// Round to the nearest fixed-point quaternion.
    pub fn quantize(self) -> Quat {
        Quat::from_f64(self.w, self.x, self.y, self.z)
    }
}

impl From<Quat> for UnitQuaternion {
    fn from(q: Quat) -> Self {
        let [w, x, y, z] = q.to_f64();
        UnitQuaternion { x, y, z, w }
    }
}

impl std::ops::Mul for UnitQuaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let a = self.w;
        let b = self.x;
        let c = self.y;
        let d = self.z;
        let e = rhs.w;
        let f = rhs.x;
        let g = rhs.y;
        let h = rhs.z;
        Self {
            w: a * e - b * f - c * g - d * h,
            x: a * f + b * e + c * h - d * g,
            y: a * g - b * h + c * e + d * f,
            z: a * h + b * g - c * f + d * e,
        }
    }
}

#[test]
fn quarter_turn_about_z() {
    let q = UnitQuaternion::from_axis_angle(Vector3d::new(0.0, 0.0, 3.0), std::f64::consts::FRAC_PI_2);
    let r = q.rotate(Vector3d::new(1.0, 0.0, 0.0));
    assert!(r.x.abs() < 1e-12);
    assert!((r.y - 1.0).abs() < 1e-12);
    assert!(r.z.abs() < 1e-12);
}

#[test]
fn angle_between_rotations() {
    let axis = Vector3d::new(1.0, -1.0, 2.0);
    let a = UnitQuaternion::from_axis_angle(axis, 0.3);
    let b = UnitQuaternion::from_axis_angle(axis, 1.0);
    assert!((a.angle_to(b) - 0.7).abs() < 1e-12);
    assert!(a.angle_to(a) < 1e-6);
    assert!((b.angle_to(a * a.conjugate()) - 1.0).abs() < 1e-12);
}

#[test]
fn quantize_round_trip() {
    let a = UnitQuaternion::from_axis_angle(Vector3d::new(0.2, 0.5, -1.0), 2.0);
    let b = UnitQuaternion::from(a.quantize());
    assert!(a.angle_to(b) < 1e-3);
    assert_eq!(b.quantize(), a.quantize());
}
