//! Core state types for the 2D gravity simulation.
//!
//! - `Body`     a point mass with position, velocity, mass and a visual tag
//! - `Universe` the display radius plus the ordered list of bodies
//!
//! Body order inside a `Universe` is fixed for the whole run. The index of a
//! body is its identity: net force sums skip a body by index, never by value.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    m: f64, // mass, fixed after construction
    tag: String, // opaque visual identifier (image name, colour key, ...)
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, tag: impl Into<String>) -> Self {
        Self {
            x,
            v,
            m,
            tag: tag.into(),
        }
    }

    /// Build a body from raw components, in input-file order
    pub fn from_components(px: f64, py: f64, vx: f64, vy: f64, m: f64, tag: impl Into<String>) -> Self {
        Self::new(NVec2::new(px, py), NVec2::new(vx, vy), m, tag)
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    pub radius: f64, // rendering bounds only, never clamps motion
    pub bodies: Vec<Body>, // stable order for the lifetime of the run
}

impl Universe {
    pub fn new(radius: f64, bodies: Vec<Body>) -> Self {
        Self { radius, bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
