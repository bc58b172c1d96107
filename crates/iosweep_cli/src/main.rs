use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use iosweep_core::{
    plan_invocations, run_sweep, run_sweep_parallel, stable_plan_json, BenchVariant, SweepConfig,
    DEFAULT_QUEUE_DEPTH,
};

#[derive(Parser)]
#[command(
    name = "iosweep",
    about = "Fail-fast parameter sweep for an external I/O benchmark binary",
    long_about = "Runs the benchmark once per sweep point with REQUESTS, BUFSIZE,\n\
                  and Q_DEPTH exported to the child, and aborts the sweep with the\n\
                  child's own exit code at the first failure."
)]
struct Cli {
    /// Benchmark executable to run
    binary: PathBuf,
    /// Target path forwarded to the benchmark unchanged
    path: String,
    /// Queue depth exported as Q_DEPTH on every point
    #[arg(default_value_t = DEFAULT_QUEUE_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,
    /// Drive the multithreaded build (binary name plus "mt") instead
    #[arg(long)]
    multithreaded: bool,
    /// Run sweep points concurrently on this many workers
    #[arg(long)]
    jobs: Option<usize>,
    /// Print the planned invocations as JSON lines without running anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = SweepConfig::new(cli.binary, cli.path).with_depth(cli.depth);
    let variant = if cli.multithreaded {
        BenchVariant::Multithreaded
    } else {
        BenchVariant::SingleThreaded
    };

    if cli.dry_run {
        for invocation in plan_invocations(&config, variant) {
            println!("{}", stable_plan_json(&invocation));
        }
        return;
    }

    let result = match cli.jobs {
        Some(jobs) => run_sweep_parallel(&config, variant, jobs),
        None => run_sweep(&config, variant),
    };

    match result {
        Ok(outcome) => exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("iosweep: {error}");
            exit(1);
        }
    }
}
