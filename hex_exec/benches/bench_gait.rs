//! # Gait Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use hex_lib::{
    delay::NoDelay,
    gait_ctrl::{GaitCtrl, GaitCtrlParams},
    leg::SimLegStore,
    ripple_gait::RippleGait,
};

fn gait_benchmark(c: &mut Criterion) {
    // ---- Build the engines ----

    let mut gait_ctrl = GaitCtrl::new(GaitCtrlParams::default(), NoDelay);
    let mut ripple_gait = RippleGait::new(NoDelay);
    let mut legs = SimLegStore::new(gait_ctrl.canonical_stance());

    c.bench_function("GaitCtrl::wave_walk", |b| {
        b.iter(|| {
            gait_ctrl.wave_walk(&mut legs, 30.0, 1, 25.0, 20.0, None).unwrap();
            gait_ctrl.reset_positions(&mut legs);
        })
    });

    c.bench_function("GaitCtrl::walk", |b| {
        b.iter(|| {
            gait_ctrl.walk(&mut legs, 30.0, 1, 35.0, 25.0, None).unwrap();
            gait_ctrl.reset_positions(&mut legs);
        })
    });

    let config = gait_ctrl.config;
    c.bench_function("RippleGait::walk", |b| {
        b.iter(|| {
            ripple_gait.walk(&mut legs, &config, 30.0, 1, 22.0, 18.0, None).unwrap();
            gait_ctrl.reset_positions(&mut legs);
        })
    });
}

criterion_group!(benches, gait_benchmark);
criterion_main!(benches);
