//! Fail-fast parameter sweep driver for an external I/O benchmark binary.
//!
//! Drives a benchmark executable through eight (requests, bufsize)
//! configurations, exporting each one to the child through the `REQUESTS`,
//! `BUFSIZE`, and `Q_DEPTH` environment variables, and stops at the first
//! non-zero child exit, keeping that exact code.
//!
//! # Quick Start
//!
//! ```no_run
//! use iosweep_core::{run_sweep, BenchVariant, SweepConfig};
//!
//! let config = SweepConfig::new("./bench", "/dev/vda");
//! let outcome = run_sweep(&config, BenchVariant::SingleThreaded)?;
//! assert_eq!(outcome.exit_code(), 0);
//! # Ok::<(), iosweep_core::SweepError>(())
//! ```
//!
//! # Architecture
//!
//! - [`plan`]: the deterministic eight-point sweep plan
//! - [`config`]: validated, immutable sweep inputs
//! - [`invocation`]: the child-process contract (argv + environment)
//! - [`runner`]: sequential and opt-in parallel execution

pub mod config;
pub mod error;
pub mod invocation;
pub mod plan;
pub mod runner;

pub use config::SweepConfig;
pub use error::SweepError;
pub use invocation::{
    plan_invocations, planned_invocation, stable_plan_json, BenchVariant, PlannedInvocation,
};
pub use plan::{sweep_plan, sweep_point, SweepPoint, DEFAULT_QUEUE_DEPTH, SWEEP_STEPS};
pub use runner::{run_point, run_sweep, run_sweep_parallel, RunOutcome, SweepOutcome};
