#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use rand::SeedableRng;

use fxquat::rng::{self, MyRng};
use fxquat::{vector, Axis, Quat};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = MyRng::seed_from_u64(0);
    let q = rng::rotation(&mut rng, 3.0).quantize();
    let p = rng::rotation(&mut rng, 3.0).quantize();
    let v = vector::from_f64(rng::vector(&mut rng) * 0.9);

    c.bench_function("multiply", move |b| b.iter(|| black_box(q).multiply(black_box(p))));
    c.bench_function("multiply_wide", move |b| {
        b.iter(|| black_box(q).multiply_wide(black_box(p)))
    });
    c.bench_function("multiply_scaled_wide", move |b| {
        b.iter(|| black_box(q).multiply_scaled_wide(black_box(p), black_box(3)))
    });
    c.bench_function("rotate", move |b| b.iter(|| black_box(q).rotate(black_box(v))));
    c.bench_function("renormalize", move |b| b.iter(|| black_box(q).renormalize()));
    c.bench_function("renormalize_wide", move |b| {
        let w = q.widen();
        b.iter(|| black_box(w).renormalize())
    });
    c.bench_function("decompose_axis", move |b| {
        b.iter(|| black_box(q).decompose_axis(black_box(Axis::Z)))
    });
    c.bench_function("error", move |b| b.iter(|| Quat::error(black_box(p), black_box(q))));
    c.bench_function("error_signed", move |b| {
        b.iter(|| Quat::error_signed(black_box(p), black_box(q)))
    });

    c.bench_function("integrate_and_renormalize", move |b| {
        b.iter(|| {
            let mut a = Quat::identity();
            for _ in 0..100 {
                a = a.multiply(p).renormalize();
            }
            a
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
