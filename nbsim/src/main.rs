use nbsim::{Parameters, Scenario, Simulation};
use nbsim::{FrameSink, LogSink, Paced, Tee, TrajectoryWriter};
use nbsim::write_planets;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "nbsim", about = "2D gravitational n-body simulation")]
struct Args {
    /// Total simulated time T, in seconds
    #[arg(allow_negative_numbers = true)]
    t_end: f64,

    /// Fixed time step dt, in seconds
    #[arg(allow_negative_numbers = true)]
    dt: f64,

    /// Scenario file (planets text or .yaml); bare names are also looked up in scenarios/
    file: PathBuf,

    /// Run without a window, reporting frames through the logger
    #[arg(long)]
    headless: bool,

    /// Wall-clock pause after each frame in milliseconds (window default 10, headless default 0)
    #[arg(long)]
    pause_ms: Option<u64>,

    /// Write the final universe here instead of stdout (headless only)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write every frame as CSV (headless only)
    #[arg(long)]
    trajectory: Option<PathBuf>,
}

fn run_headless(sim: &mut Simulation, args: &Args) -> Result<()> {
    let pause = Duration::from_millis(args.pause_ms.unwrap_or(0));
    let log_sink = Paced::new(LogSink::default(), pause);

    let mut sink: Box<dyn FrameSink> = match &args.trajectory {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create trajectory file {}", path.display()))?;
            Box::new(Tee::new(log_sink, TrajectoryWriter::new(BufWriter::new(file))))
        }
        None => Box::new(log_sink),
    };

    sim.run(sink.as_mut())?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            write_planets(sim.universe(), BufWriter::new(file))?;
            log::info!("final state written to {}", path.display());
        }
        None => write_planets(sim.universe(), io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let parameters = Parameters::new(args.t_end, args.dt);

    // load and validate everything before the loop starts
    let scenario = Scenario::load(&args.file)?;
    let mut sim = scenario.into_simulation(parameters)?;

    #[cfg(feature = "viewer")]
    {
        if !args.headless {
            if args.output.is_some() || args.trajectory.is_some() {
                log::warn!("--output and --trajectory are only honoured with --headless");
            }
            return nbsim::run_2d(sim, Duration::from_millis(args.pause_ms.unwrap_or(10)));
        }
    }

    #[cfg(not(feature = "viewer"))]
    {
        if !args.headless {
            log::info!("built without the viewer feature, running headless");
        }
    }

    run_headless(&mut sim, &args)
}
