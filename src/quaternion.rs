//! Fixed-point quaternion algebra.
//!
//! [`Quat`] holds single precision components and is what attitudes
//! are stored as.  [`DQuat`] holds double precision components and
//! is used to carry products and sums before narrowing.  The two are
//! the same generic container, so the precision in play is always
//! visible in the types at the call site.
//!
//! No operation here fails.  Two kinds of silent degradation exist:
//!
//! * [`Quat::norm_error`], [`Quat::renormalize`] and
//!   [`Quat::decompose_axis`] linearize the square root around a norm
//!   of 1.  They are only accurate for quaternions whose norm is
//!   already close to 1, and renormalization diverges far from it.
//! * Rounding and saturation of the scalar type are inherited as-is.
//!   Use the `_wide` variants where overflow in a four term sum is a
//!   concern.

use crate::scalar::{self, DFrac, Frac, Fractional, HALF, ONE, ZERO};
use crate::vector::{self, Axis, Vec3};
use vector3d::Vector3d;

/// A quaternion with real part `r` and vector part `v`.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Quaternion<S> {
    /// The real (scalar) part.
    pub r: S,
    /// The vector (imaginary) part.
    pub v: Vector3d<S>,
}

/// A single precision quaternion.
pub type Quat = Quaternion<Frac>;

/// A double precision quaternion.
pub type DQuat = Quaternion<DFrac>;

impl<S> Quaternion<S> {
    /// Build a quaternion from its four components.
    pub fn new(r: S, x: S, y: S, z: S) -> Self {
        Quaternion {
            r,
            v: Vector3d::new(x, y, z),
        }
    }

    /// Build a quaternion from its real and vector parts.
    pub fn from_parts(r: S, v: Vector3d<S>) -> Self {
        Quaternion { r, v }
    }

    /// Apply `f` to each component.
    fn map<T>(self, f: impl Fn(S) -> T) -> Quaternion<T> {
        Quaternion::new(f(self.r), f(self.v.x), f(self.v.y), f(self.v.z))
    }
}

impl<S: Fractional> Quaternion<S> {
    /// The zero quaternion.
    pub fn zero() -> Self {
        Quaternion::from_parts(S::ZERO, vector::zero())
    }

    /// Componentwise addition.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, p: Self) -> Self {
        Quaternion::new(
            self.r.add_sat(p.r),
            self.v.x.add_sat(p.v.x),
            self.v.y.add_sat(p.v.y),
            self.v.z.add_sat(p.v.z),
        )
    }
}

impl<S: Fractional> std::ops::Add for Quaternion<S> {
    type Output = Self;
    fn add(self, p: Self) -> Self {
        Quaternion::add(self, p)
    }
}

/// The Hamilton product `q * p`, with each term produced by `mul` and
/// accumulated at the width `mul` returns.
///
/// Every component is a left to right chain of four terms, in this
/// order, so that fixed-point rounding is the same whichever width is
/// used.
#[inline]
fn hamilton<S: Fractional>(q: Quat, p: Quat, mul: impl Fn(Frac, Frac) -> S) -> Quaternion<S> {
    let r = mul(q.r, p.r)
        .sub_sat(mul(q.v.x, p.v.x))
        .sub_sat(mul(q.v.y, p.v.y))
        .sub_sat(mul(q.v.z, p.v.z));
    let x = mul(p.r, q.v.x)
        .add_sat(mul(p.v.x, q.r))
        .sub_sat(mul(p.v.y, q.v.z))
        .add_sat(mul(p.v.z, q.v.y));
    let y = mul(p.r, q.v.y)
        .add_sat(mul(p.v.x, q.v.z))
        .add_sat(mul(p.v.y, q.r))
        .sub_sat(mul(p.v.z, q.v.x));
    let z = mul(p.r, q.v.z)
        .sub_sat(mul(p.v.x, q.v.y))
        .add_sat(mul(p.v.y, q.v.x))
        .add_sat(mul(p.v.z, q.r));
    Quaternion::new(r, x, y, z)
}

impl Quaternion<Frac> {
    /// The identity rotation `(1, 0, 0, 0)`.
    pub fn identity() -> Self {
        Quaternion::from_parts(ONE, vector::zero())
    }

    /// Build from float components, saturating out of range values.
    pub fn from_f64(r: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion::new(r, x, y, z).map(scalar::from_f64)
    }

    /// The components as floats, in `[r, x, y, z]` order.
    pub fn to_f64(self) -> [f64; 4] {
        let q = self.map(scalar::to_f64);
        [q.r, q.v.x, q.v.y, q.v.z]
    }

    /// The rotation by `angle` radians about `axis`.  The axis need
    /// not be normalized, but must not be null.
    ///
    /// This is computed in floating point and meant for setup, not for
    /// the control loop.
    pub fn from_axis_angle(axis: Vector3d<f64>, angle: f64) -> Self {
        let n = axis.norm2().sqrt();
        let (s, c) = (0.5 * angle).sin_cos();
        let k = s / n;
        Quaternion::from_f64(c, axis.x * k, axis.y * k, axis.z * k)
    }

    /// Widen every component to double precision.  Exact.
    pub fn widen(self) -> DQuat {
        self.map(scalar::widen)
    }

    /// The squared norm `r² + x² + y² + z²`, accumulated in double
    /// precision.
    pub fn norm2_wide(self) -> DFrac {
        scalar::mul_wide(self.r, self.r)
            .add_sat(scalar::mul_wide(self.v.x, self.v.x))
            .add_sat(scalar::mul_wide(self.v.y, self.v.y))
            .add_sat(scalar::mul_wide(self.v.z, self.v.z))
    }

    /// An approximation of `1 - |q|`, computed as `0.5 - |q|²/2`.
    ///
    /// This is `1 - sqrt(s)` with `sqrt(s) ≈ 0.5(s + 1)`, which only
    /// holds for `s` near 1.  No range check is made.
    pub fn norm_error(self) -> Frac {
        HALF.sub_sat(scalar::narrow(self.norm2_wide().idiv(2)))
    }

    /// Multiply every component by `f`.
    pub fn scale(self, f: Frac) -> Quat {
        self.map(|c| scalar::mul(c, f))
    }

    /// Multiply every component by `f`, keeping the double precision
    /// products.
    pub fn scale_wide(self, f: Frac) -> DQuat {
        self.map(|c| scalar::mul_wide(c, f))
    }

    /// Negate the vector part.
    pub fn conjugate(self) -> Quat {
        Quaternion::new(
            self.r,
            self.v.x.neg_sat(),
            self.v.y.neg_sat(),
            self.v.z.neg_sat(),
        )
    }

    /// The Hamilton product `self * p`, computed entirely in single
    /// precision.  Each of the four terms per component is rounded
    /// before it is summed, and the sums can saturate.
    pub fn multiply(self, p: Quat) -> Quat {
        hamilton(self, p, scalar::mul)
    }

    /// The Hamilton product `self * p`, with every term exact and the
    /// sums carried in double precision.
    pub fn multiply_wide(self, p: Quat) -> DQuat {
        hamilton(self, p, scalar::mul_wide)
    }

    /// `(self * p) / divisor`, in double precision.  Each accumulated
    /// component is divided by `divisor` before it is returned.
    pub fn multiply_scaled_wide(self, p: Quat, divisor: i32) -> DQuat {
        self.multiply_wide(p).map(|c| c.idiv(divisor))
    }

    /// Rotate `v` by this quaternion, returning the vector part of
    /// `q * (0, v) * q'`.
    ///
    /// `q` must have a norm close to 1 for this to be a rotation.  It
    /// is not normalized here.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let pure = Quaternion::from_parts(ZERO, v);
        self.multiply(pure.multiply(self.conjugate())).v
    }

    /// Nudge the norm toward 1, returning `q + q * norm_error(q)`.
    ///
    /// Call this periodically (e.g. once per control cycle) to undo the
    /// drift that repeated multiplication accumulates.  It diverges for
    /// quaternions whose norm is far from 1.
    pub fn renormalize(self) -> Quat {
        let err = self.norm_error();
        self.add(self.scale(err))
    }

    /// Extract the rotation about a single axis from a unit
    /// quaternion.
    ///
    /// Returns a quaternion whose vector part is null except on `axis`.
    /// The real part and the selected component are rescaled with the
    /// same linear norm correction as [`Quat::renormalize`], restricted
    /// to those two components.  If `self` is not a unit quaternion the
    /// result is of undefined quality.
    pub fn decompose_axis(self, axis: Axis) -> Quat {
        let a = vector::component(self.v, axis);
        let s = scalar::narrow(scalar::mul_wide(self.r, self.r).add_sat(scalar::mul_wide(a, a)));
        let err = HALF.sub_sat(s.idiv(2));
        let r = self.r.add_sat(scalar::mul(err, self.r));
        let a = a.add_sat(scalar::mul(err, a));
        Quaternion::from_parts(r, vector::on_axis(axis, a))
    }

    /// The rotation from `current` to `setpoint`, as `c = current' *
    /// setpoint`, expressed in the frame of `current`.
    fn rotation_error(setpoint: Quat, current: Quat) -> Quat {
        current.conjugate().multiply(setpoint)
    }

    /// Attitude error `c.v * c.r`, where `c` is the rotation from
    /// `current` to `setpoint`.
    ///
    /// Its magnitude is zero at 0 and 180 degrees and peaks at 90.  It
    /// is continuous, but does not resolve which way to turn near 180
    /// degrees.
    pub fn error(setpoint: Quat, current: Quat) -> Vec3 {
        let c = Quat::rotation_error(setpoint, current);
        vector::scale(c.v, c.r)
    }

    /// Attitude error `c.v * sign(c.r)`, where `c` is the rotation from
    /// `current` to `setpoint`.
    ///
    /// Below 90 degrees this has about twice the gain of
    /// [`Quat::error`].  It jumps at 180 degrees, and is zero when `c.r`
    /// is exactly zero.
    pub fn error_signed(setpoint: Quat, current: Quat) -> Vec3 {
        let c = Quat::rotation_error(setpoint, current);
        vector::scale_int(c.v, scalar::sign(c.r))
    }
}

impl Quaternion<DFrac> {
    /// Narrow every component to single precision.
    pub fn narrow(self) -> Quat {
        self.map(scalar::narrow)
    }

    /// Nudge the norm toward 1, keeping double precision.
    ///
    /// The error estimate and the correction are computed from the
    /// narrowed quaternion, but the correction is added at full width,
    /// so repeated calls do not throw away the accumulator's low bits.
    pub fn renormalize(self) -> DQuat {
        let q = self.narrow();
        let err = q.norm_error();
        self.add(q.scale_wide(err))
    }
}

impl std::ops::Mul for Quaternion<Frac> {
    type Output = Self;
    fn mul(self, p: Self) -> Self {
        self.multiply(p)
    }
}
