//! This module attempts to provide a %g formatter.

use crate::scalar::{self, Frac};
use std::fmt::{Display, Formatter, Result};

/// Wrap this type around an `f64` in order to print it nicely.
#[derive(Copy, Clone, Debug)]
pub struct PrettyFloat(pub f64);

impl From<Frac> for PrettyFloat {
    fn from(f: Frac) -> Self {
        PrettyFloat(scalar::to_f64(f))
    }
}

fn n_decimals(value: f64, digits: usize) -> usize {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    let log10 = value.abs().log10();
    if log10 > digits as f64 {
        0
    } else {
        (digits as f64 - log10) as usize + 1
    }
}

/// The first of the shortest candidates.
fn shortest(candidates: &[String]) -> &str {
    let mut best = &candidates[0];
    for c in candidates.iter().skip(1) {
        if c.len() < best.len() {
            best = c;
        }
    }
    best
}

impl Display for PrettyFloat {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let x = self.0;
        let candidates = if let Some(precision) = f.precision() {
            vec![
                format!("{}", x),
                format!("{:e}", x),
                format!("{:.*}", n_decimals(x, precision), x),
                format!("{:.*e}", precision, x),
            ]
        } else {
            vec![format!("{}", x), format!("{:e}", x)]
        };
        f.write_str(shortest(&candidates))
    }
}

#[test]
fn short_representation_with_prec() {
    for &prec in &[1, 3, 6, 16] {
        for &f in &[0.1_f64, 1e-100, 0.1111111111111111, 6.103515625e-5] {
            let s = format!("{:.*}", prec, PrettyFloat(f));
            assert!(s.len() <= format!("{:.*e}", prec, f).len());
            let back: f64 = s.parse().expect("pretty float should parse");
            assert!(((back - f) / f).abs() < 10_f64.powf(-(prec as f64)));
        }
    }
}

#[test]
fn short_representation() {
    for &f in &[0.1_f64, 1e-100, 0.1111111111111111] {
        let s = format!("{}", PrettyFloat(f));
        assert!(s.len() <= format!("{}", f).len());
        assert!(s.len() <= format!("{:e}", f).len());
        assert_eq!(s.parse::<f64>(), Ok(f));
    }
}

#[test]
fn zero_and_non_finite_with_prec() {
    for &prec in &[0, 3, 16] {
        let s = format!("{:.*}", prec, PrettyFloat(0.0));
        assert_eq!(s.parse::<f64>(), Ok(0.0));
        assert_eq!(format!("{:.*}", prec, PrettyFloat(-0.0)).parse::<f64>(), Ok(0.0));
    }
    assert_eq!(format!("{:.3}", PrettyFloat(std::f64::INFINITY)), "inf");
    assert_eq!(format!("{:.3}", PrettyFloat(std::f64::NAN)), "NaN");
}

#[test]
fn fractions_print_exactly() {
    assert_eq!(format!("{}", PrettyFloat::from(scalar::HALF)), "0.5");
    assert_eq!(format!("{}", PrettyFloat::from(Frac::from_bits(-1))), "-6.103515625e-5");
}
