use std::time::Instant;

use crate::simulation::integrator::{euler_step, ForceBuffers};
use crate::simulation::states::{Body, Universe, NVec2};

/// Helper to build a manual universe of size `n`
/// Deterministic positions, no rand needed
pub fn make_universe(n: usize) -> Universe {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new((i_f * 0.37).sin() * 5.0e10, (i_f * 0.13).cos() * 5.0e10);
        bodies.push(Body::new(x, NVec2::zeros(), 1.0e24, format!("b{i}")));
    }

    Universe::new(1.0e11, bodies)
}

/// Time `steps` Euler steps for a universe of `n` bodies, in ms per step
fn time_steps(n: usize, steps: usize) -> f64 {
    let mut universe = make_universe(n);
    let mut forces = ForceBuffers::new(n);
    let dt = 60.0;

    // Warm up
    euler_step(&mut universe, &mut forces, dt);

    let t0 = Instant::now();
    for _ in 0..steps {
        euler_step(&mut universe, &mut forces, dt);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

pub fn bench_step() {
    // Different universe sizes to test
    let ns = [50, 100, 200, 400, 800, 1600, 3200];
    let steps = 5;

    for n in ns {
        let ms = time_steps(n, steps);
        println!("N = {n:5}, step = {ms:10.4} ms");
    }
}

/// Step cost for a range of n as CSV
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (100..=3200).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 10 } else { 2 };
        println!("{},{:.6}", n, time_steps(n, steps));
    }
}
