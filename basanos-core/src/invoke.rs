//! Command construction and process execution for the implementation
//! under test.
//!
//! Each parameter set maps to one binary under the build root, invoked as
//! `acvp_mldsa<level> <operation> key=value...`. An optional wrapper command
//! (e.g. an emulator) can be prepended without the harness knowing what it
//! does. Execution is synchronous: one child process per case, all output
//! captured before the next case starts.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// The three conformance operations, named as the vector documents and the
/// implementation binaries name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Key generation.
    KeyGen,
    /// Signature generation.
    SigGen,
    /// Signature verification.
    SigVer,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::KeyGen => write!(f, "keyGen"),
            Operation::SigGen => write!(f, "sigGen"),
            Operation::SigVer => write!(f, "sigVer"),
        }
    }
}

/// ML-DSA parameter sets with a registered implementation binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSet {
    /// ML-DSA-44 (NIST Security Level 2).
    MlDsa44,
    /// ML-DSA-65 (NIST Security Level 3).
    MlDsa65,
    /// ML-DSA-87 (NIST Security Level 5).
    MlDsa87,
}

impl ParameterSet {
    /// Resolve a vector document's parameter set name.
    ///
    /// Unknown names are a fatal configuration defect: there is no binary
    /// to dispatch such a group to.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ML-DSA-44" => Ok(ParameterSet::MlDsa44),
            "ML-DSA-65" => Ok(ParameterSet::MlDsa65),
            "ML-DSA-87" => Ok(ParameterSet::MlDsa87),
            _ => Err(Error::UnknownParameterSet(name.to_string())),
        }
    }

    /// Security level number used in binary and directory names.
    pub fn level(self) -> u32 {
        match self {
            ParameterSet::MlDsa44 => 44,
            ParameterSet::MlDsa65 => 65,
            ParameterSet::MlDsa87 => 87,
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSet::MlDsa44 => write!(f, "ML-DSA-44"),
            ParameterSet::MlDsa65 => write!(f, "ML-DSA-65"),
            ParameterSet::MlDsa87 => write!(f, "ML-DSA-87"),
        }
    }
}

/// Configuration of a conformance run, injected explicitly rather than read
/// from the environment, so the protocol stays testable.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root directory of the per-level implementation builds.
    pub builds: PathBuf,
    /// Optional command prepended verbatim to every invocation, e.g. an
    /// emulator. Always a single argument; wrappers needing their own
    /// arguments must be wrapped in a script.
    pub exec_wrapper: Option<String>,
    /// Echo each command line to stderr before running it.
    pub verbose: bool,
}

impl HarnessConfig {
    /// Configuration with the given build root, no wrapper, quiet output.
    pub fn new(builds: impl Into<PathBuf>) -> Self {
        Self {
            builds: builds.into(),
            exec_wrapper: None,
            verbose: false,
        }
    }

    /// Path of the implementation binary for a parameter set:
    /// `<builds>/mldsa<level>/bin/acvp_mldsa<level>`.
    pub fn binary_for(&self, set: ParameterSet) -> PathBuf {
        let level = set.level();
        self.builds
            .join(format!("mldsa{level}"))
            .join("bin")
            .join(format!("acvp_mldsa{level}"))
    }
}

/// A fully built command line, inspectable before it is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    argv: Vec<String>,
}

impl Invocation {
    /// Build a keyGen invocation: `keyGen seed=<hex>`.
    pub fn key_gen(config: &HarnessConfig, set: ParameterSet, seed: &str) -> Self {
        Self::build(config, set, Operation::KeyGen, &[("seed", seed)])
    }

    /// Build a sigGen invocation:
    /// `sigGen message=<hex> rnd=<hex> sk=<hex> context=<hex>`.
    pub fn sig_gen(
        config: &HarnessConfig,
        set: ParameterSet,
        message: &str,
        rnd: &str,
        sk: &str,
        context: &str,
    ) -> Self {
        Self::build(
            config,
            set,
            Operation::SigGen,
            &[
                ("message", message),
                ("rnd", rnd),
                ("sk", sk),
                ("context", context),
            ],
        )
    }

    /// Build a sigVer invocation:
    /// `sigVer message=<hex> context=<hex> signature=<hex> pk=<hex>`.
    pub fn sig_ver(
        config: &HarnessConfig,
        set: ParameterSet,
        message: &str,
        context: &str,
        signature: &str,
        pk: &str,
    ) -> Self {
        Self::build(
            config,
            set,
            Operation::SigVer,
            &[
                ("message", message),
                ("context", context),
                ("signature", signature),
                ("pk", pk),
            ],
        )
    }

    fn build(
        config: &HarnessConfig,
        set: ParameterSet,
        operation: Operation,
        fields: &[(&str, &str)],
    ) -> Self {
        let mut argv = Vec::with_capacity(fields.len() + 3);
        if let Some(wrapper) = &config.exec_wrapper {
            argv.push(wrapper.clone());
        }
        argv.push(config.binary_for(set).to_string_lossy().into_owned());
        argv.push(operation.to_string());
        for (key, value) in fields {
            argv.push(format!("{key}={value}"));
        }
        Self { argv }
    }

    /// Program to execute: the wrapper when one is configured, otherwise
    /// the implementation binary.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments following the program.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Full argument vector including the program.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Captured result of one implementation invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl RawOutput {
    /// Whether the process exited normally with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<Output> for RawOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Executes built invocations.
///
/// The driver is generic over this seam so tests can substitute a recording
/// stub for the real child-process executor.
pub trait Executor {
    /// Run one invocation to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] when the program cannot be started. A
    /// nonzero exit is not an error at this layer; classifying it is the
    /// verifier's job.
    fn execute(&self, invocation: &Invocation) -> Result<RawOutput>;
}

/// The real executor: spawns the invocation as a child process and blocks
/// until it exits, with stdout and stderr piped back to the harness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<RawOutput> {
        let output = Command::new(invocation.program())
            .args(invocation.args())
            .output()
            .map_err(|source| Error::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;
        Ok(RawOutput::from(output))
    }
}
