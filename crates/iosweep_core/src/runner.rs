//! Sequential and parallel sweep execution.
//!
//! The default mode runs points one at a time in ascending step order and
//! stops at the first failure. The parallel mode fans points out over a rayon
//! pool; it is opt-in and keeps the same propagated exit code as a sequential
//! run of the same plan.

use std::process::ExitStatus;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::invocation::{planned_invocation, BenchVariant, PlannedInvocation};
use crate::plan::{sweep_plan, SweepPoint};

/// Exit status of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure(i32),
}

impl RunOutcome {
    fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            // Signal-terminated children have no exit code; they still abort
            // the sweep.
            Self::Failure(status.code().unwrap_or(1))
        }
    }
}

/// Result of a whole sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    Completed { points_run: usize },
    Failed { point: SweepPoint, code: i32 },
}

impl SweepOutcome {
    /// Process exit code matching the fail-fast contract: 0 when every point
    /// passed, otherwise the first failing child's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::Failed { code, .. } => *code,
        }
    }
}

/// Run one planned invocation to completion, inheriting standard streams.
///
/// The benchmark owns stdout; the runner blocks until the child exits.
pub fn run_point(invocation: &PlannedInvocation) -> Result<RunOutcome, SweepError> {
    let status = invocation
        .command()
        .status()
        .map_err(|source| SweepError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;
    Ok(RunOutcome::from_status(status))
}

/// Drive all eight points in ascending step order, stopping at the first
/// failure.
pub fn run_sweep(config: &SweepConfig, variant: BenchVariant) -> Result<SweepOutcome, SweepError> {
    let plan = sweep_plan(config.depth);
    for point in &plan {
        let invocation = planned_invocation(point, config, variant);
        eprintln!("+ {}", invocation.echo());
        if let RunOutcome::Failure(code) = run_point(&invocation)? {
            report_failure(point, code);
            return Ok(SweepOutcome::Failed {
                point: *point,
                code,
            });
        }
    }
    Ok(SweepOutcome::Completed {
        points_run: plan.len(),
    })
}

/// Run every point concurrently on a rayon pool of `jobs` workers.
///
/// Points past a failing one may already be running when it fails, so this
/// trades strict fail-fast for throughput. Outcomes are still examined in
/// plan order and the lowest failing step's code is the one propagated.
pub fn run_sweep_parallel(
    config: &SweepConfig,
    variant: BenchVariant,
    jobs: usize,
) -> Result<SweepOutcome, SweepError> {
    let plan = sweep_plan(config.depth);
    let invocations: Vec<PlannedInvocation> = plan
        .iter()
        .map(|point| planned_invocation(point, config, variant))
        .collect();

    let pb = ProgressBar::new(invocations.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .expect("Failed to create thread pool");

    let pb_clone = pb.clone();
    let outcomes: Vec<Result<RunOutcome, SweepError>> = pool.install(|| {
        invocations
            .par_iter()
            .map(|invocation| {
                let outcome = run_point(invocation);
                pb_clone.inc(1);
                outcome
            })
            .collect()
    });
    pb.finish_and_clear();

    let mut points_run = 0usize;
    for (point, outcome) in plan.iter().zip(outcomes) {
        match outcome? {
            RunOutcome::Success => points_run += 1,
            RunOutcome::Failure(code) => {
                report_failure(point, code);
                return Ok(SweepOutcome::Failed {
                    point: *point,
                    code,
                });
            }
        }
    }
    Ok(SweepOutcome::Completed { points_run })
}

fn report_failure(point: &SweepPoint, code: i32) {
    eprintln!(
        "sweep failed at step {} (REQUESTS={} BUFSIZE={} Q_DEPTH={}) with exit code {code}",
        point.step, point.requests, point.bufsize, point.depth
    );
}
