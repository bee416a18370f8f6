//! # Basanos Core
//!
//! Conformance harness for ML-DSA implementations, driven by official
//! NIST ACVP test vectors.
//!
//! This crate provides:
//! - A typed model of the `internalProjection.json` vector documents
//! - Applicability rules deciding which cases run, skip, or abort
//! - The command-line invocation protocol of the implementation binaries
//! - Operation-specific result verification with fail-fast semantics
//! - A driver that streams per-case progress and stops on first mismatch
//!
//! The implementation under test is an external executable; the harness
//! treats it as a black box reachable only through its argument and
//! output contract.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod driver;
mod error;
mod filter;
mod invoke;
mod vectors;
mod verify;

pub use driver::{Harness, RunSummary, SuiteSummary};
pub use error::{Error, Result};
pub use filter::{
    effective_rnd, ensure_aft, filter_sig_gen, filter_sig_ver, validate_sig_gen_case,
    validate_sig_ver_case, Disposition, SkipReason, DETERMINISTIC_RND,
};
pub use invoke::{
    Executor, HarnessConfig, Invocation, Operation, ParameterSet, ProcessExecutor, RawOutput,
};
pub use vectors::{
    KeyGenCase, KeyGenGroup, KeyGenSuite, SigGenCase, SigGenGroup, SigGenSuite, SigVerCase,
    SigVerGroup, SigVerSuite, VectorSet, KEY_GEN_FILE, SIG_GEN_FILE, SIG_VER_FILE,
};
pub use verify::{verify_key_gen, verify_sig_gen, verify_sig_ver};
