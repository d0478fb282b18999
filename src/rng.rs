//! Random attitudes for tests, benchmarks and the drift driver.

use crate::unit_quaternion::UnitQuaternion;
use rand::Rng;
use rand_distr::StandardNormal;
use vector3d::Vector3d;

/// Our random number generator.
pub type MyRng = rand_xoshiro::Xoshiro256Plus;

/// A uniformly distributed unit vector.
pub fn vector<R: Rng>(rng: &mut R) -> Vector3d<f64> {
    loop {
        let v = Vector3d::new(
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        );
        let n2 = v.norm2();
        if n2 > 1e-12 {
            return v * (1.0 / n2.sqrt());
        }
    }
}

/// A rotation about a random axis by an angle uniform in
/// [0, `max_angle`) radians.
pub fn rotation<R: Rng>(rng: &mut R, max_angle: f64) -> UnitQuaternion {
    let axis = vector(rng);
    let angle = rng.gen::<f64>() * max_angle;
    UnitQuaternion::from_axis_angle(axis, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn vectors_are_unit() {
        let mut rng = MyRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!((vector(&mut rng).norm2() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rotations_are_bounded() {
        let mut rng = MyRng::seed_from_u64(2);
        for _ in 0..100 {
            let q = rotation(&mut rng, 0.5);
            assert!(q.angle_to(UnitQuaternion::identity()) <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = MyRng::seed_from_u64(7);
        let mut b = MyRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(rotation(&mut a, 3.0), rotation(&mut b, 3.0));
        }
    }
}
