// src/scheduler/runner.rs — Simulator invocation
//
// Builds the simulator command line for a (design point, workload) pair and
// runs it to completion, capturing exit status and both output streams.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::design::DesignPoint;
use crate::infra::config::{InvocationShape, SchedulerConfig, WorkloadConfig};
use crate::infra::errors::SweepError;

/// A fully built simulator command.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Workload options appended verbatim to a shell command line.
    pub shell_tail: Option<String>,
    pub out_dir: PathBuf,
}

impl Invocation {
    /// The command line as a shell would see it.
    pub fn command_line(&self) -> String {
        let mut line = shell_quote(&self.program.to_string_lossy());
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        if let Some(tail) = &self.shell_tail {
            line.push(' ');
            line.push_str(tail);
        }
        line
    }
}

/// Quote a word for `sh` only when it needs it.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Build the simulator command for one pair.
pub fn build_invocation(
    config: &SchedulerConfig,
    point: &DesignPoint,
    workload: &WorkloadConfig,
    out_dir: &Path,
) -> Invocation {
    let mut args = vec![
        "-d".to_string(),
        out_dir.to_string_lossy().into_owned(),
        config.config_script.to_string_lossy().into_owned(),
        "-n".to_string(),
        point.cores.to_string(),
        format!("--cpu-type={}", config.cpu_type),
        format!("--cpu-clock={}GHz", point.clock),
        format!("--mem-type={}", config.mem_type),
        "--caches".to_string(),
        "--l2cache".to_string(),
        format!("--l1d_size={}kB", point.small_kb),
        format!("--l1d_assoc={}", point.small_assoc),
        format!("--l2_size={}kB", point.shared_kb),
        format!("--l2_assoc={}", point.shared_assoc),
        format!("--l2_latency={}", point.latency),
        "-c".to_string(),
        workload.command.clone(),
    ];

    let options = workload.render_options(point.cores);
    let shell_tail = match workload.invocation {
        InvocationShape::Args => {
            args.push("-o".to_string());
            args.push(options);
            None
        }
        InvocationShape::Shell => Some(options),
    };

    Invocation {
        program: config.simulator.clone(),
        args,
        shell_tail,
        out_dir: out_dir.to_path_buf(),
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a simulator invocation to completion.
#[async_trait]
pub trait SimulatorRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput>;
}

/// Launches real processes. Shell-shaped invocations go through `shell -c`.
pub struct ProcessRunner {
    shell: PathBuf,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
        }
    }

    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

#[async_trait]
impl SimulatorRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
        let output = if invocation.shell_tail.is_some() {
            let line = invocation.command_line();
            tracing::debug!("Running via {}: {}", self.shell.display(), line);
            Command::new(&self.shell).arg("-c").arg(line).output().await?
        } else {
            tracing::debug!("Running: {}", invocation.command_line());
            Command::new(&invocation.program)
                .args(&invocation.args)
                .output()
                .await?
        };

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Resolve a program path: anything with a separator must exist on disk,
/// bare names are looked up on PATH.
fn resolve(path: &Path) -> Option<PathBuf> {
    if path.components().count() > 1 || path.is_absolute() {
        path.exists().then(|| path.to_path_buf())
    } else {
        which::which(path).ok()
    }
}

/// Fail before scheduling anything if the simulator or its script is missing.
pub fn check_prerequisites(config: &SchedulerConfig) -> Result<(), SweepError> {
    if resolve(&config.simulator).is_none() {
        return Err(SweepError::MissingExecutable {
            path: config.simulator.clone(),
        });
    }
    if !config.config_script.exists() {
        return Err(SweepError::MissingInput {
            path: config.config_script.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{ClockGhz, Latency};
    use crate::infra::config::Config;

    fn point() -> DesignPoint {
        DesignPoint {
            cores: 8,
            clock: ClockGhz::from_tenths(7),
            small_kb: 16,
            small_assoc: 4,
            shared_kb: 1024,
            shared_assoc: 8,
            latency: Latency::Cycles(7),
            total_cost: 48,
        }
    }

    #[test]
    fn test_args_invocation() {
        let c = Config::default();
        let radix = c.workload("radix").unwrap();
        let inv = build_invocation(&c.scheduler, &point(), radix, Path::new("out/run"));

        assert_eq!(inv.program, PathBuf::from("./build/ALPHA/gem5.opt"));
        assert!(inv.shell_tail.is_none());
        assert_eq!(
            inv.args,
            vec![
                "-d",
                "out/run",
                "./configs/example/se.py",
                "-n",
                "8",
                "--cpu-type=detailed",
                "--cpu-clock=0.7GHz",
                "--mem-type=SimpleMemory",
                "--caches",
                "--l2cache",
                "--l1d_size=16kB",
                "--l1d_assoc=4",
                "--l2_size=1024kB",
                "--l2_assoc=8",
                "--l2_latency=7",
                "-c",
                "./splash2/radix/RADIX",
                "-o",
                "-p8",
            ]
        );
    }

    #[test]
    fn test_shell_invocation_keeps_redirect() {
        let c = Config::default();
        let fmm = c.workload("fmm").unwrap();
        let inv = build_invocation(&c.scheduler, &point(), fmm, Path::new("out/run"));

        assert_eq!(
            inv.shell_tail.as_deref(),
            Some("< ./splash2/fmm/inputs/input.2048.p8")
        );
        assert!(!inv.args.contains(&"-o".to_string()));
        let line = inv.command_line();
        assert!(line.starts_with("./build/ALPHA/gem5.opt -d out/run ./configs/example/se.py -n 8"));
        assert!(line.ends_with("-c ./splash2/fmm/FMM < ./splash2/fmm/inputs/input.2048.p8"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("--l2_size=1024kB"), "--l2_size=1024kB");
        assert_eq!(shell_quote("my dir"), "'my dir'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_missing_simulator_is_fatal() {
        let cfg = SchedulerConfig {
            simulator: PathBuf::from("./no/such/gem5.opt"),
            ..SchedulerConfig::default()
        };
        let err = check_prerequisites(&cfg).unwrap_err();
        assert!(matches!(err, SweepError::MissingExecutable { .. }));
    }

    #[test]
    fn test_missing_script_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let sim = dir.path().join("gem5.opt");
        std::fs::write(&sim, "").unwrap();
        let cfg = SchedulerConfig {
            simulator: sim,
            config_script: dir.path().join("se.py"),
            ..SchedulerConfig::default()
        };
        let err = check_prerequisites(&cfg).unwrap_err();
        assert!(matches!(err, SweepError::MissingInput { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_failure() {
        let runner = ProcessRunner::with_shell("/bin/sh");
        let inv = Invocation {
            program: PathBuf::from("echo"),
            args: vec!["oops".into()],
            shell_tail: Some(">&2; exit 3".into()),
            out_dir: PathBuf::from("."),
        };
        let out = runner.run(&inv).await.unwrap();
        assert!(!out.success);
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stderr.trim(), "oops");
    }
}
