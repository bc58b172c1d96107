use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to drive the sweep itself, as opposed to a benchmark run that
/// completed and reported non-zero (that is a [`crate::runner::RunOutcome`]).
#[derive(Debug)]
pub enum SweepError {
    /// The benchmark binary could not be launched at all.
    Spawn { program: PathBuf, source: io::Error },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "failed to launch '{}': {source}", program.display())
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
        }
    }
}
