//! Validated, immutable sweep inputs.

use std::path::PathBuf;

use crate::plan::DEFAULT_QUEUE_DEPTH;

/// Everything a sweep needs, parsed once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Benchmark executable to drive.
    pub binary: PathBuf,
    /// Forwarded verbatim as the benchmark's sole positional argument.
    pub path: String,
    /// Queue depth shared by every sweep point.
    pub depth: u32,
}

impl SweepConfig {
    /// Create a config with the default queue depth.
    pub fn new(binary: impl Into<PathBuf>, path: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            path: path.into(),
            depth: DEFAULT_QUEUE_DEPTH,
        }
    }

    /// Override the queue depth for the whole sweep.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_queue_depth_32() {
        let config = SweepConfig::new("bench", "target");
        assert_eq!(config.depth, DEFAULT_QUEUE_DEPTH);
        assert_eq!(config.binary, PathBuf::from("bench"));
        assert_eq!(config.path, "target");
    }

    #[test]
    fn with_depth_overrides_the_default() {
        let config = SweepConfig::new("bench", "target").with_depth(64);
        assert_eq!(config.depth, 64);
    }
}
