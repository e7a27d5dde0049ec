//! Pairwise Newtonian gravity between bodies
//!
//! Per-body force queries (`distance_to`, `force_from`, per-axis components and
//! net force sums) plus [`accumulate_net_forces`], which fills the per-step
//! force buffers for a whole universe from one consistent snapshot.
//!
//! No softening is applied. Two bodies at the same point give a zero distance
//! and the resulting NaN/inf propagate through every later sum and update.

use crate::simulation::params::G;
use crate::simulation::states::Body;

impl Body {
    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Body) -> f64 {
        let dx = (self.x.x - other.x.x).abs();
        let dy = (self.x.y - other.x.y).abs();
        (dx * dx + dy * dy).sqrt()
    }

    /// Magnitude of the gravitational force `other` exerts on `self`
    /// F = G * m_self * m_other / r^2
    pub fn force_from(&self, other: &Body) -> f64 {
        let r = self.distance_to(other);
        G * self.mass() * other.mass() / (r * r)
    }

    /// Signed x component of the force, positive when `other` lies at larger x
    pub fn force_from_x(&self, other: &Body) -> f64 {
        let r = self.distance_to(other);
        let dx = other.x.x - self.x.x;
        self.force_from(other) * dx / r
    }

    /// Signed y component of the force, positive when `other` lies at larger y
    pub fn force_from_y(&self, other: &Body) -> f64 {
        let r = self.distance_to(other);
        let dy = other.x.y - self.x.y;
        self.force_from(other) * dy / r
    }

    /// Net x force from every body in `bodies` except the one at `index`,
    /// which must be `self`'s own position in the collection.
    /// Summed in collection order.
    pub fn net_force_x(&self, index: usize, bodies: &[Body]) -> f64 {
        let mut net = 0.0;
        for (j, other) in bodies.iter().enumerate() {
            if j != index {
                net += self.force_from_x(other);
            }
        }
        net
    }

    /// Net y force, same exclusion and order as [`Body::net_force_x`]
    pub fn net_force_y(&self, index: usize, bodies: &[Body]) -> f64 {
        let mut net = 0.0;
        for (j, other) in bodies.iter().enumerate() {
            if j != index {
                net += self.force_from_y(other);
            }
        }
        net
    }
}

/// Compute the net force on every body against the current snapshot
/// - `fx[i]`, `fy[i]` are overwritten with the net force on `bodies[i]`
///
/// Nothing in `bodies` is written, so every entry sees the same positions.
/// With the `parallel` feature bodies are spread over the rayon pool; each
/// body's own sum is still taken in collection order, so the output does not
/// depend on the feature.
pub fn accumulate_net_forces(bodies: &[Body], fx: &mut [f64], fy: &mut [f64]) {
    debug_assert_eq!(bodies.len(), fx.len());
    debug_assert_eq!(bodies.len(), fy.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        fx.par_iter_mut()
            .zip(fy.par_iter_mut())
            .enumerate()
            .for_each(|(i, (fxi, fyi))| {
                *fxi = bodies[i].net_force_x(i, bodies);
                *fyi = bodies[i].net_force_y(i, bodies);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, body) in bodies.iter().enumerate() {
            fx[i] = body.net_force_x(i, bodies);
            fy[i] = body.net_force_y(i, bodies);
        }
    }
}
