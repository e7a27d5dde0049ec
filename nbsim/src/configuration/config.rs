//! Configuration types for loading universes from YAML.
//!
//! A thin, `serde`-deserializable representation of a starting universe:
//!
//! - [`BodyConfig`]     – initial state for each body
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! radius: 2.50e+11          # universe radius, display bounds only
//!
//! bodies:
//!   - x: [ 1.4960e+11, 0.0 ]
//!     v: [ 0.0, 2.9800e+04 ]
//!     m: 5.9740e+24
//!     tag: earth.gif
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.9890e+30
//!     tag: sun.gif
//! ```
//!
//! Positions and velocities are fixed-size pairs, so a 3-component vector is
//! rejected by the deserializer instead of being silently truncated. Tags follow
//! the planets format: one non-empty token without whitespace.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::configuration::planets::check_tag;
use crate::simulation::states::{Body, Universe};

/// Configuration for a single body's initial state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass
    pub tag: String, // visual tag, e.g. an image file name
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub radius: f64, // universe radius
    pub bodies: Vec<BodyConfig>, // bodies in simulation order
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s).context("parsing YAML scenario")?;
        Ok(cfg)
    }

    /// Map the config into the runtime universe, keeping body order
    pub fn build_universe(self) -> Result<Universe> {
        ensure!(self.radius.is_finite(), "universe radius must be finite, got {}", self.radius);

        let bodies = self
            .bodies
            .into_iter()
            .enumerate()
            .map(|(i, bc)| {
                check_tag(&bc.tag).with_context(|| format!("body {} in YAML scenario", i + 1))?;
                Ok(Body::from_components(bc.x[0], bc.x[1], bc.v[0], bc.v[1], bc.m, bc.tag))
            })
            .collect::<Result<Vec<Body>>>()?;

        Ok(Universe::new(self.radius, bodies))
    }
}

impl From<&Universe> for ScenarioConfig {
    fn from(u: &Universe) -> Self {
        Self {
            radius: u.radius,
            bodies: u
                .bodies
                .iter()
                .map(|b| BodyConfig {
                    x: [b.x.x, b.x.y],
                    v: [b.v.x, b.v.y],
                    m: b.mass(),
                    tag: b.tag().to_owned(),
                })
                .collect(),
        }
    }
}
