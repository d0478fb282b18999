//! Three component fixed-point vectors.

use crate::scalar::{self, Frac, Fractional};
use vector3d::Vector3d;

/// A single precision 3D vector.
pub type Vec3 = Vector3d<Frac>;

/// Selects one component of a vector.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x component.
    X,
    /// The y component.
    Y,
    /// The z component.
    Z,
}

impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// The null vector.
pub fn zero<S: Fractional>() -> Vector3d<S> {
    Vector3d::new(S::ZERO, S::ZERO, S::ZERO)
}

/// Read the component selected by `axis`.
pub fn component<S: Copy>(v: Vector3d<S>, axis: Axis) -> S {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

/// A vector that is zero except for `value` on `axis`.
pub fn on_axis<S: Fractional>(axis: Axis, value: S) -> Vector3d<S> {
    let mut v = zero();
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
    v
}

/// Multiply every component by a fractional.
pub fn scale(v: Vec3, f: Frac) -> Vec3 {
    Vector3d::new(scalar::mul(v.x, f), scalar::mul(v.y, f), scalar::mul(v.z, f))
}

/// Multiply every component by an integer, saturating.
pub fn scale_int(v: Vec3, i: i16) -> Vec3 {
    Vector3d::new(
        v.x.saturating_mul_int(i),
        v.y.saturating_mul_int(i),
        v.z.saturating_mul_int(i),
    )
}

/// Convert from floats, saturating out of range components.
pub fn from_f64(v: Vector3d<f64>) -> Vec3 {
    Vector3d::new(
        scalar::from_f64(v.x),
        scalar::from_f64(v.y),
        scalar::from_f64(v.z),
    )
}

/// Convert to floats.
pub fn to_f64(v: Vec3) -> Vector3d<f64> {
    Vector3d::new(scalar::to_f64(v.x), scalar::to_f64(v.y), scalar::to_f64(v.z))
}
