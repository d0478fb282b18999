//! This crate is for fixed-point quaternion arithmetic.
//!
//! It is meant for attitude representation and control on processors
//! without a floating point unit.  The kernel lives in [`quaternion`]
//! and works over the fractional types in [`scalar`]; everything that
//! touches floating point ([`unit_quaternion`], [`rng`], [`drift`]) is
//! host-side tooling for setting up, checking and exercising it.

#![cfg_attr(feature = "strict", deny(warnings))]
#![deny(missing_docs)]

#[macro_use]
extern crate serde_derive;

pub mod atomicfile;
pub mod drift;
pub mod prettyfloat;
pub mod quaternion;
pub mod rng;
pub mod rotation;
pub mod scalar;
pub mod unit_quaternion;
pub mod vector;

pub use quaternion::{DQuat, Quat, Quaternion};
pub use scalar::{DFrac, Frac};
pub use vector::{Axis, Vec3};
