//! Fixed-step semi-implicit Euler integrator
//!
//! Velocity is kicked first and the *updated* velocity drifts the position,
//! all within the same step. Forces for the whole universe are computed
//! before any body moves.

use super::forces::accumulate_net_forces;
use super::states::{Body, Universe};

impl Body {
    /// Advance this body by `dt` under the net force (`fx`, `fy`)
    pub fn advance(&mut self, dt: f64, fx: f64, fy: f64) {
        // a = F / m
        let ax = fx / self.mass();
        let ay = fy / self.mass();

        // v_n+1 = v_n + dt * a
        self.v.x += dt * ax;
        self.v.y += dt * ay;

        // x_n+1 = x_n + dt * v_n+1
        self.x.x += dt * self.v.x;
        self.x.y += dt * self.v.y;
    }
}

/// Per-step force buffers, one entry per body in collection order
#[derive(Debug, Clone, Default)]
pub struct ForceBuffers {
    pub fx: Vec<f64>,
    pub fy: Vec<f64>,
}

impl ForceBuffers {
    pub fn new(n: usize) -> Self {
        Self {
            fx: vec![0.0; n],
            fy: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.fx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fx.is_empty()
    }
}

/// Advance every body in `universe` by one step of `dt`
///
/// Phase one fills `forces` from the snapshot at the start of the step,
/// phase two applies them. `forces` is resized if the body count differs.
pub fn euler_step(universe: &mut Universe, forces: &mut ForceBuffers, dt: f64) {
    let n = universe.bodies.len();
    if n == 0 { // no bodies, nothing to move
        return;
    }
    if forces.len() != n {
        *forces = ForceBuffers::new(n);
    }

    // Compute all
    accumulate_net_forces(&universe.bodies, &mut forces.fx, &mut forces.fy);

    // Apply all
    for (b, (fx, fy)) in universe.bodies.iter_mut().zip(forces.fx.iter().zip(forces.fy.iter())) {
        b.advance(dt, *fx, *fy);
    }
}
