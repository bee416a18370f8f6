//! Error types for conformance runs.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::invoke::Operation;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that abort a conformance run.
///
/// Every variant is fatal: the driver stops at the first one and the
/// process exits nonzero. Unimplemented mode combinations are not errors,
/// they are reported as skips and the run continues.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A vector document could not be read.
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A vector document is not valid JSON of the expected shape.
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A test group names a parameter set with no registered binary.
    UnknownParameterSet(String),

    /// A test group carries a test type other than "AFT".
    UnsupportedTestType {
        /// Operation the group belongs to.
        operation: Operation,
        /// Group identifier from the document.
        tg_id: u32,
        /// The offending test type.
        test_type: String,
    },

    /// A test case requests a hash algorithm other than "none".
    UnsupportedHashAlg {
        /// Case identifier from the document.
        tc_id: u32,
        /// The offending hash algorithm.
        hash_alg: String,
    },

    /// A hex field exceeds the limit baked into the implementation binaries.
    OversizedField {
        /// Case identifier from the document.
        tc_id: u32,
        /// Name of the offending field.
        field: &'static str,
        /// Maximum length in hex characters.
        max: usize,
        /// Actual length in hex characters.
        actual: usize,
    },

    /// A non-deterministic signing case carries no randomness value.
    MissingRandomness {
        /// Case identifier from the document.
        tc_id: u32,
    },

    /// The implementation binary (or its wrapper) could not be started.
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The implementation exited nonzero where success was required.
    ImplementationFailure {
        /// The full command line that was run.
        invocation: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error of the process.
        stderr: String,
    },

    /// An output line did not have the `key=value` shape.
    MalformedOutput {
        /// The offending line.
        line: String,
    },

    /// The implementation printed a field the operation does not define.
    UnexpectedField {
        /// The offending key.
        field: String,
    },

    /// The implementation never printed an expected field.
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A returned field differs from the expected value.
    FieldMismatch {
        /// Name of the field.
        field: String,
        /// Expected value from the vector document.
        expected: String,
        /// Value returned by the implementation.
        actual: String,
    },

    /// The observed verification outcome differs from the expected verdict.
    VerdictMismatch {
        /// Expected verdict from the vector document.
        expected: bool,
        /// Verdict observed from the exit code.
        actual: bool,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read { path, .. } => {
                write!(f, "failed to read {}", path.display())
            }
            Error::Parse { path, .. } => {
                write!(f, "failed to parse {}", path.display())
            }
            Error::UnknownParameterSet(name) => {
                write!(f, "unknown parameter set {name:?}")
            }
            Error::UnsupportedTestType {
                operation,
                tg_id,
                test_type,
            } => {
                write!(
                    f,
                    "{operation} test group {tg_id} has test type {test_type:?}, expected \"AFT\""
                )
            }
            Error::UnsupportedHashAlg { tc_id, hash_alg } => {
                write!(
                    f,
                    "test case {tc_id} has hash algorithm {hash_alg:?}, expected \"none\""
                )
            }
            Error::OversizedField {
                tc_id,
                field,
                max,
                actual,
            } => {
                write!(
                    f,
                    "test case {tc_id}: {field} is {actual} hex characters, limit is {max}"
                )
            }
            Error::MissingRandomness { tc_id } => {
                write!(
                    f,
                    "test case {tc_id} carries no rnd value and its group is not deterministic"
                )
            }
            Error::Spawn { program, .. } => {
                write!(f, "failed to execute {program}")
            }
            Error::ImplementationFailure {
                invocation,
                code,
                stderr,
            } => {
                write!(f, "{invocation} failed with ")?;
                match code {
                    Some(code) => write!(f, "error code {code}")?,
                    None => write!(f, "no exit code (terminated by signal)")?,
                }
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim_end())?;
                }
                Ok(())
            }
            Error::MalformedOutput { line } => {
                write!(f, "malformed output line {line:?}, expected key=value")
            }
            Error::UnexpectedField { field } => {
                write!(f, "unexpected output field {field:?}")
            }
            Error::MissingField { field } => {
                write!(f, "expected output field {field} was never returned")
            }
            Error::FieldMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "mismatching result for {field}: expected {expected}, got {actual}"
                )
            }
            Error::VerdictMismatch { expected, actual } => {
                write!(
                    f,
                    "mismatching verification result: expected {expected}, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { source, .. } | Error::Spawn { source, .. } => Some(source),
            Error::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
