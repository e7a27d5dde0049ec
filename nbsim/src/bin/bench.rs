use clap::Parser;
use nbsim::{bench_step, bench_step_curve};

#[derive(Parser, Debug)]
#[command(name = "nbsim-bench", about = "Time one direct-summation step for growing N")]
struct Args {
    /// Print a CSV curve instead of the short table
    #[arg(long)]
    curve: bool,
}

fn main() {
    let args = Args::parse();
    if args.curve {
        bench_step_curve();
    } else {
        bench_step();
    }
}
