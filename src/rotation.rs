//! 3D rotation type.

use crate::quaternion::Quat;
use crate::unit_quaternion::UnitQuaternion;
use crate::vector::Vec3;
use vector3d::Vector3d;

/// 3D rotation, held as a fixed-point quaternion whose norm is kept
/// close to 1 by the caller.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Rotation {
    /// The underlying quaternion.
    pub q: Quat,
}

impl Rotation {
    /// No rotation.
    pub fn identity() -> Self {
        Rotation { q: Quat::identity() }
    }

    /// The rotation by `angle` radians about `axis`.
    pub fn about(axis: Vector3d<f64>, angle: f64) -> Self {
        Rotation { q: Quat::from_axis_angle(axis, angle) }
    }

    /// The opposite rotation.
    pub fn inverse(self) -> Self {
        Rotation { q: self.q.conjugate() }
    }

    /// Pull the norm of the quaternion back toward 1.
    pub fn renormalized(self) -> Self {
        Rotation { q: self.q.renormalize() }
    }
}

impl From<UnitQuaternion> for Rotation {
    fn from(u: UnitQuaternion) -> Self {
        Rotation { q: u.quantize() }
    }
}

impl std::ops::Mul<Vec3> for Rotation {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        self.q.rotate(v)
    }
}

/// Composition: `(a * b) * v` rotates by `b` first, then `a`.
impl std::ops::Mul for Rotation {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Rotation { q: self.q.multiply(rhs.q) }
    }
}
