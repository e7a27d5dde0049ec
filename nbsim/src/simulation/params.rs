//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the run settings:
//! - total simulated duration `t_end`,
//! - fixed step size `dt`.
//!
//! The gravitational constant is shared by every body and is not configurable.

use anyhow::{ensure, Result};

/// Gravitational constant in SI units (m^3 kg^-1 s^-2)
pub const G: f64 = 6.674e-11;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub dt: f64, // step size
}

impl Parameters {
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self { t_end, dt }
    }

    /// Reject durations and step sizes that would loop zero, negative or
    /// undefined numbers of times
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.t_end.is_finite() && self.t_end > 0.0,
            "total duration T must be a finite number greater than 0, got {}",
            self.t_end
        );
        ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "time step dt must be a finite number greater than 0, got {}",
            self.dt
        );
        Ok(())
    }
}
