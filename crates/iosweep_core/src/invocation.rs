//! The child-process contract: which binary runs, with which argument, and
//! which environment variables the benchmark reads.
//!
//! Values are passed structurally (argv plus an explicit env map), never
//! through a shell string, so paths with spaces or metacharacters need no
//! quoting.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::config::SweepConfig;
use crate::plan::{sweep_plan, SweepPoint};

pub const ENV_REQUESTS: &str = "REQUESTS";
pub const ENV_BUFSIZE: &str = "BUFSIZE";
pub const ENV_QUEUE_DEPTH: &str = "Q_DEPTH";

/// Which benchmark build a sweep drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchVariant {
    SingleThreaded,
    Multithreaded,
}

impl BenchVariant {
    /// Resolve the binary this variant invokes. The multithreaded build lives
    /// next to the single-threaded one under the same name plus a literal
    /// `mt` suffix, no separator (`srv` -> `srvmt`).
    pub fn resolve_binary(self, binary: &Path) -> PathBuf {
        match self {
            Self::SingleThreaded => binary.to_path_buf(),
            Self::Multithreaded => {
                let mut name = OsString::from(binary.as_os_str());
                name.push("mt");
                PathBuf::from(name)
            }
        }
    }
}

/// Exactly what one sweep point will spawn.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlannedInvocation {
    pub step: usize,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl PlannedInvocation {
    /// Build the process invocation: explicit argv and env map, no shell in
    /// between.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).envs(&self.env);
        command
    }

    /// One-line rendering for the stderr echo, environment first the way the
    /// command would be typed in a shell.
    pub fn echo(&self) -> String {
        let env = [ENV_REQUESTS, ENV_BUFSIZE, ENV_QUEUE_DEPTH]
            .iter()
            .map(|key| {
                let value = self.env.get(*key).map(String::as_str).unwrap_or("");
                format!("{key}={value}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("{env} {} {}", self.program.display(), self.args.join(" "))
    }
}

/// Plan the invocation for one sweep point.
pub fn planned_invocation(
    point: &SweepPoint,
    config: &SweepConfig,
    variant: BenchVariant,
) -> PlannedInvocation {
    let mut env = BTreeMap::new();
    env.insert(ENV_REQUESTS.to_string(), point.requests.to_string());
    env.insert(ENV_BUFSIZE.to_string(), point.bufsize.to_string());
    env.insert(ENV_QUEUE_DEPTH.to_string(), point.depth.to_string());

    PlannedInvocation {
        step: point.step,
        program: variant.resolve_binary(&config.binary),
        args: vec![config.path.clone()],
        env,
    }
}

/// Plan every invocation of a sweep, in ascending step order.
pub fn plan_invocations(config: &SweepConfig, variant: BenchVariant) -> Vec<PlannedInvocation> {
    sweep_plan(config.depth)
        .iter()
        .map(|point| planned_invocation(point, config, variant))
        .collect()
}

/// Render a plan value as JSON.
pub fn stable_plan_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of plan value should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::sweep_point;

    #[test]
    fn multithreaded_variant_appends_suffix_without_separator() {
        let resolved = BenchVariant::Multithreaded.resolve_binary(Path::new("srv"));
        assert_eq!(resolved, PathBuf::from("srvmt"));

        let nested = BenchVariant::Multithreaded.resolve_binary(Path::new("build/bench"));
        assert_eq!(nested, PathBuf::from("build/benchmt"));
    }

    #[test]
    fn single_threaded_variant_keeps_binary_untouched() {
        let resolved = BenchVariant::SingleThreaded.resolve_binary(Path::new("build/bench"));
        assert_eq!(resolved, PathBuf::from("build/bench"));
    }

    #[test]
    fn planned_invocation_exports_decimal_environment() {
        let config = SweepConfig::new("bench", "/dev/vda");
        let point = sweep_point(0, config.depth);
        let invocation = planned_invocation(&point, &config, BenchVariant::SingleThreaded);

        assert_eq!(
            invocation.env.get(ENV_REQUESTS).map(String::as_str),
            Some("262144")
        );
        assert_eq!(
            invocation.env.get(ENV_BUFSIZE).map(String::as_str),
            Some("512")
        );
        assert_eq!(
            invocation.env.get(ENV_QUEUE_DEPTH).map(String::as_str),
            Some("32")
        );
        assert_eq!(invocation.args, vec!["/dev/vda".to_string()]);
        assert_eq!(invocation.program, PathBuf::from("bench"));
    }

    #[test]
    fn plan_invocations_covers_every_step_once() {
        let config = SweepConfig::new("bench", "target").with_depth(8);
        let invocations = plan_invocations(&config, BenchVariant::SingleThreaded);
        assert_eq!(invocations.len(), 8);
        for (step, invocation) in invocations.iter().enumerate() {
            assert_eq!(invocation.step, step);
            assert_eq!(
                invocation.env.get(ENV_QUEUE_DEPTH).map(String::as_str),
                Some("8")
            );
        }
    }

    #[test]
    fn echo_lists_environment_before_the_command() {
        let config = SweepConfig::new("bench", "/dev/vda");
        let point = sweep_point(0, config.depth);
        let invocation = planned_invocation(&point, &config, BenchVariant::SingleThreaded);
        assert_eq!(
            invocation.echo(),
            "REQUESTS=262144 BUFSIZE=512 Q_DEPTH=32 bench /dev/vda"
        );
    }

    #[test]
    fn stable_plan_json_round_trips_points() {
        let point = sweep_point(4, 32);
        let json = stable_plan_json(point);
        let parsed: SweepPoint = serde_json::from_str(&json).expect("json should parse");
        assert_eq!(parsed, point);
    }
}
