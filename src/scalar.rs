//! Fixed-point fractional scalars.
//!
//! Two widths are used throughout the crate.  [`Frac`] is the compact
//! single precision value that quaternions are stored and exchanged
//! in.  [`DFrac`] is the double precision accumulator: the product of
//! two `Frac` values is exact in a `DFrac`, so multiply-accumulate
//! chains can be carried wide and narrowed back once at the end.
//!
//! Every primitive here saturates on overflow rather than wrapping.

use fixed::types::extra::{U14, U28};
use fixed::{FixedI16, FixedI32};

/// Single precision fractional: 14 fractional bits, range [-2, 2).
pub type Frac = FixedI16<U14>;

/// Double precision fractional: 28 fractional bits, range [-8, 8).
pub type DFrac = FixedI32<U28>;

/// Zero.
pub const ZERO: Frac = Frac::from_bits(0);

/// One half.
pub const HALF: Frac = Frac::from_bits(1 << 13);

/// One.
pub const ONE: Frac = Frac::from_bits(1 << 14);

/// The operations shared by both widths, which is all the generic
/// quaternion container needs.
pub trait Fractional: Copy + PartialEq + std::fmt::Debug {
    /// Zero at this width.
    const ZERO: Self;
    /// The integer type that `idiv` divides by.
    type Int;
    /// Saturating addition.
    fn add_sat(self, other: Self) -> Self;
    /// Saturating subtraction.
    fn sub_sat(self, other: Self) -> Self;
    /// Saturating negation.
    fn neg_sat(self) -> Self;
    /// Division by an integer, truncating toward zero.  Dividing by
    /// zero saturates toward the sign of the dividend.
    fn idiv(self, divisor: Self::Int) -> Self;
}

macro_rules! impl_fractional {
    ($t:ty, $int:ty) => {
        impl Fractional for $t {
            const ZERO: Self = <$t>::from_bits(0);
            type Int = $int;

            #[inline]
            fn add_sat(self, other: Self) -> Self {
                self.saturating_add(other)
            }
            #[inline]
            fn sub_sat(self, other: Self) -> Self {
                self.saturating_sub(other)
            }
            #[inline]
            fn neg_sat(self) -> Self {
                self.saturating_neg()
            }
            #[inline]
            fn idiv(self, divisor: $int) -> Self {
                if divisor == 0 {
                    if self.is_negative() {
                        <$t>::MIN
                    } else if self == Self::ZERO {
                        self
                    } else {
                        <$t>::MAX
                    }
                } else {
                    self.saturating_div_int(divisor)
                }
            }
        }
    };
}

impl_fractional!(Frac, i16);
impl_fractional!(DFrac, i32);

/// Widen to double precision.  Exact.
#[inline]
pub fn widen(a: Frac) -> DFrac {
    DFrac::from_num(a)
}

/// Narrow to single precision, truncating toward negative infinity and
/// saturating at the range of `Frac`.
#[inline]
pub fn narrow(a: DFrac) -> Frac {
    Frac::saturating_from_num(a)
}

/// Multiply, producing the exact double precision product.
#[inline]
pub fn mul_wide(a: Frac, b: Frac) -> DFrac {
    a.wide_mul(b)
}

/// Multiply in single precision.  The product is truncated toward
/// negative infinity, which is the same as narrowing [`mul_wide`].
#[inline]
pub fn mul(a: Frac, b: Frac) -> Frac {
    narrow(mul_wide(a, b))
}

/// The sign of `a` as an integer: -1, 0 or 1.
#[inline]
pub fn sign(a: Frac) -> i16 {
    a.to_bits().signum()
}

/// Convert from a float, saturating out of range values.
///
/// Panics if `x` is NaN.
pub fn from_f64(x: f64) -> Frac {
    Frac::saturating_from_num(x)
}

/// Convert to a float.  Exact.
pub fn to_f64(a: Frac) -> f64 {
    a.to_num::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(to_f64(ONE), 1.0);
        assert_eq!(to_f64(HALF), 0.5);
        assert_eq!(to_f64(ZERO), 0.0);
        assert_eq!(<Frac as Fractional>::ZERO, ZERO);
    }

    #[test]
    fn widen_then_narrow_is_identity() {
        for &bits in &[i16::MIN, -16384, -1, 0, 1, 8192, 16384, i16::MAX] {
            let a = Frac::from_bits(bits);
            assert_eq!(narrow(widen(a)), a);
        }
    }

    #[test]
    fn mul_by_one_is_exact() {
        for &x in &[-1.5, -0.3, 0.0, 0.25, 0.70710678, 1.0, 1.99] {
            let a = from_f64(x);
            assert_eq!(mul(a, ONE), a);
            assert_eq!(narrow(mul_wide(ONE, a)), a);
        }
    }

    #[test]
    fn mul_wide_is_exact() {
        let a = from_f64(0.3);
        let b = from_f64(-0.7);
        let exact = to_f64(a) * to_f64(b);
        assert_eq!(mul_wide(a, b).to_num::<f64>(), exact);
    }

    #[test]
    fn narrow_truncates_down() {
        let tiny = DFrac::from_bits(1);
        assert_eq!(narrow(tiny), ZERO);
        assert_eq!(narrow(-tiny), Frac::from_bits(-1));
    }

    #[test]
    fn narrow_drops_low_bits() {
        for &bits in &[-(1 << 20) - 1, -16385, -16384, -1, 0, 1, 16383, 16384, (1 << 20) + 5] {
            let narrowed = narrow(DFrac::from_bits(bits));
            assert_eq!(i32::from(narrowed.to_bits()), bits >> 14, "bits {}", bits);
        }
    }

    #[test]
    fn narrow_saturates() {
        assert_eq!(narrow(DFrac::from_num(5)), Frac::MAX);
        assert_eq!(narrow(DFrac::from_num(-5)), Frac::MIN);
    }

    #[test]
    fn add_saturates() {
        assert_eq!(Frac::MAX.add_sat(ONE), Frac::MAX);
        assert_eq!(Frac::MIN.sub_sat(ONE), Frac::MIN);
        assert_eq!(Frac::MIN.neg_sat(), Frac::MAX);
    }

    #[test]
    fn idiv_truncates_toward_zero() {
        let a = Frac::from_bits(7);
        assert_eq!(a.idiv(2), Frac::from_bits(3));
        assert_eq!((-a).idiv(2), Frac::from_bits(-3));
        assert_eq!(DFrac::from_num(3).idiv(4), DFrac::from_num(0.75));
    }

    #[test]
    fn idiv_by_zero_saturates() {
        assert_eq!(HALF.idiv(0), Frac::MAX);
        assert_eq!((-HALF).idiv(0), Frac::MIN);
        assert_eq!(ZERO.idiv(0), ZERO);
        assert_eq!(DFrac::from_num(-1).idiv(0), DFrac::MIN);
    }

    #[test]
    fn idiv_min_by_minus_one_saturates() {
        assert_eq!(Frac::MIN.idiv(-1), Frac::MAX);
        assert_eq!(DFrac::MIN.idiv(-1), DFrac::MAX);
    }

    #[test]
    fn signs() {
        assert_eq!(sign(HALF), 1);
        assert_eq!(sign(-HALF), -1);
        assert_eq!(sign(ZERO), 0);
    }
}
