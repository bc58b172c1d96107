//! Deterministic sweep plan over request count and buffer size.
//!
//! The plan is fixed at eight points: the buffer size doubles at every step
//! while the request count halves every third step, so total bytes written
//! keep growing as buffers get larger. Queue depth stays constant across the
//! whole sweep.

use serde::{Deserialize, Serialize};

/// Number of points in one sweep.
pub const SWEEP_STEPS: usize = 8;

/// Queue depth used when the caller does not supply one.
pub const DEFAULT_QUEUE_DEPTH: u32 = 32;

/// A single (requests, bufsize, depth) configuration under test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepPoint {
    /// Sweep index this point was derived from.
    pub step: usize,
    /// Number of requests the benchmark should execute.
    pub requests: u64,
    /// I/O buffer size in bytes.
    pub bufsize: u64,
    /// Queue depth passed through unchanged.
    pub depth: u32,
}

/// Compute the sweep point for `step` in `0..SWEEP_STEPS`.
pub fn sweep_point(step: usize, depth: u32) -> SweepPoint {
    debug_assert!(step < SWEEP_STEPS);
    SweepPoint {
        step,
        requests: 1u64 << (18 - step / 3),
        bufsize: 1u64 << (9 + step),
        depth,
    }
}

/// The full eight-point plan in ascending step order.
///
/// Order is significant: anyone diffing sweep output across runs relies on
/// seeing the same (requests, bufsize) sequence.
pub fn sweep_plan(depth: u32) -> Vec<SweepPoint> {
    (0..SWEEP_STEPS)
        .map(|step| sweep_point(step, depth))
        .collect()
}
