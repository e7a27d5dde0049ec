pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Universe, NVec2};
pub use simulation::params::{Parameters, G};
pub use simulation::forces::accumulate_net_forces;
pub use simulation::integrator::{euler_step, ForceBuffers};
pub use simulation::engine::{Simulation, RunState, RunSummary};
pub use simulation::scenario::{Scenario, ScenarioFormat};

pub use configuration::config::{BodyConfig, ScenarioConfig};
pub use configuration::planets::{parse_planets, write_planets};

pub use visualization::sink::{FrameSink, NullSink, LogSink, FrameBuffer, RecordingSink, DrawnBody, TrajectoryWriter, Paced, Tee};
#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;

pub use benchmark::benchmark::{bench_step, bench_step_curve};
