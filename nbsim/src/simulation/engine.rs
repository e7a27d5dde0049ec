//! Fixed-step simulation driver
//!
//! `Simulation` owns the universe, the run parameters and the per-step force
//! buffers. It starts `Running` at `t = 0` and moves to `Done` once
//! `t >= t_end`. A `t_end` shorter than one `dt` takes no steps. Every step is:
//! 1. net forces for all bodies from one snapshot,
//! 2. semi-implicit Euler update of all bodies,
//! 3. one frame drawn into the [`FrameSink`],
//! 4. `t += dt`.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::simulation::integrator::{euler_step, ForceBuffers};
use crate::simulation::params::Parameters;
use crate::simulation::states::Universe;
use crate::visualization::sink::FrameSink;

/// Slack on `t_end / dt` so that e.g. `0.3 / 0.1` still plans three steps, not four
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Steps needed to bring `t` from 0 up to at least `t_end`
fn plan_steps(parameters: &Parameters) -> u64 {
    if parameters.t_end < parameters.dt {
        return 0;
    }
    (parameters.t_end / parameters.dt * (1.0 - STEP_COUNT_SLACK)).ceil() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Done,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Steps taken
    pub steps: u64,
    /// Simulated time reached
    pub t: f64,
    /// Wall clock time of the run
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    universe: Universe,
    parameters: Parameters,
    forces: ForceBuffers,
    t: f64, // simulated time
    steps: u64, // steps taken so far
    planned: u64, // steps until t reaches t_end
    state: RunState,
}

impl Simulation {
    /// Fails fast on a non-positive or non-finite `t_end` or `dt`
    pub fn new(universe: Universe, parameters: Parameters) -> Result<Self> {
        parameters.validate()?;

        let planned = plan_steps(&parameters);
        let forces = ForceBuffers::new(universe.len());

        log::debug!(
            "simulation ready: {} bodies, T = {}, dt = {}, {} steps planned",
            universe.len(),
            parameters.t_end,
            parameters.dt,
            planned
        );

        Ok(Self {
            universe,
            parameters,
            forces,
            t: 0.0,
            steps: 0,
            planned,
            state: RunState::Running,
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn into_universe(self) -> Universe {
        self.universe
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Simulated time so far
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total number of steps this run will take
    pub fn planned_steps(&self) -> u64 {
        self.planned
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Take one step if one remains, drawing the new positions into `sink`.
    /// Returns the state after the step; a `Done` simulation is left untouched.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> Result<RunState> {
        if self.state == RunState::Done {
            return Ok(RunState::Done);
        }
        if self.steps >= self.planned {
            self.state = RunState::Done;
            return Ok(RunState::Done);
        }

        let dt = self.parameters.dt;
        euler_step(&mut self.universe, &mut self.forces, dt);

        for b in &self.universe.bodies {
            sink.draw_body(b.x.x, b.x.y, b.tag())?;
        }
        sink.present()?;

        self.t += dt;
        self.steps += 1;

        if self.steps >= self.planned {
            self.state = RunState::Done;
        }
        Ok(self.state)
    }

    /// Hand the initial state to `sink`, step until `Done`, then finish the sink
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> Result<RunSummary> {
        let start = Instant::now();

        sink.begin(self.universe.radius, &self.universe.bodies)?;
        log::info!(
            "running {} bodies for T = {} with dt = {} ({} steps)",
            self.universe.len(),
            self.parameters.t_end,
            self.parameters.dt,
            self.planned
        );

        while self.step(sink)? == RunState::Running {}
        sink.finish()?;

        let summary = RunSummary {
            steps: self.steps,
            t: self.t,
            elapsed: start.elapsed(),
        };
        log::info!(
            "done: {} steps, t = {}, {:.3} s wall clock",
            summary.steps,
            summary.t,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}
