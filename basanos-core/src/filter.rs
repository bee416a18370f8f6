//! Applicability rules deciding which cases run, skip, or abort the run.
//!
//! The rules mirror what the implementation binaries support: algorithm
//! functional tests ("AFT") of the pure, external-interface signing flow.
//! Unsupported mode combinations are skipped; violated assumptions about
//! the vector data are fatal.

use std::fmt;

use crate::error::{Error, Result};
use crate::invoke::Operation;
use crate::vectors::{SigGenCase, SigGenGroup, SigVerCase, SigVerGroup};

/// Randomness substituted for every case of a deterministic signing group,
/// 64 hexadecimal zero characters (32 zero bytes).
pub const DETERMINISTIC_RND: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Context strings are capped at 255 bytes by the implementation binaries.
const MAX_CONTEXT_HEX: usize = 2 * 255;

/// Messages are capped at 65536 bytes by the implementation binaries.
const MAX_MESSAGE_HEX: usize = 2 * 65536;

/// Why a case was not dispatched to the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The group uses a pre-hash signing mode.
    PreHash,
    /// The group uses the internal signature interface.
    InternalInterface,
    /// The group uses the external-mu signing mode.
    ExternalMu,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PreHash => write!(f, "preHash"),
            SkipReason::InternalInterface => write!(f, "internal"),
            SkipReason::ExternalMu => write!(f, "externalMu"),
        }
    }
}

/// Whether a case is dispatched to the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The case is executable and must be run.
    Run,
    /// The case exercises an unimplemented mode and is reported as skipped.
    Skip(SkipReason),
}

/// Require a group's test type to be "AFT".
///
/// Any other value is a defect in the vector set or an unimplemented test
/// category, and aborts the run.
pub fn ensure_aft(operation: Operation, tg_id: u32, test_type: &str) -> Result<()> {
    if test_type == "AFT" {
        return Ok(());
    }
    Err(Error::UnsupportedTestType {
        operation,
        tg_id,
        test_type: test_type.to_string(),
    })
}

/// Decide whether a sigGen group's cases run or skip.
///
/// Asserts the "AFT" test type before looking at the mode flags, so an
/// unexpected test type is fatal even for a group that would otherwise
/// be skipped.
pub fn filter_sig_gen(group: &SigGenGroup) -> Result<Disposition> {
    ensure_aft(Operation::SigGen, group.tg_id, &group.test_type)?;
    Ok(mode_disposition(
        &group.pre_hash,
        &group.signature_interface,
        group.external_mu,
    ))
}

/// Decide whether a sigVer group's cases run or skip.
///
/// Verification groups carry no test-type assumption, so this never fails.
pub fn filter_sig_ver(group: &SigVerGroup) -> Disposition {
    mode_disposition(
        &group.pre_hash,
        &group.signature_interface,
        group.external_mu,
    )
}

// Skip rules in fixed order: preHash, then interface, then externalMu.
fn mode_disposition(pre_hash: &str, signature_interface: &str, external_mu: bool) -> Disposition {
    if pre_hash != "pure" {
        return Disposition::Skip(SkipReason::PreHash);
    }
    if signature_interface != "external" {
        return Disposition::Skip(SkipReason::InternalInterface);
    }
    if external_mu {
        return Disposition::Skip(SkipReason::ExternalMu);
    }
    Disposition::Run
}

/// Check the per-case assumptions of an executable sigGen case.
pub fn validate_sig_gen_case(case: &SigGenCase) -> Result<()> {
    ensure_no_hash(case.tc_id, &case.hash_alg)?;
    ensure_bounded(case.tc_id, "context", &case.context, MAX_CONTEXT_HEX)?;
    ensure_bounded(case.tc_id, "message", &case.message, MAX_MESSAGE_HEX)
}

/// Check the per-case assumptions of an executable sigVer case.
pub fn validate_sig_ver_case(case: &SigVerCase) -> Result<()> {
    ensure_no_hash(case.tc_id, &case.hash_alg)?;
    ensure_bounded(case.tc_id, "context", &case.context, MAX_CONTEXT_HEX)?;
    ensure_bounded(case.tc_id, "message", &case.message, MAX_MESSAGE_HEX)
}

fn ensure_no_hash(tc_id: u32, hash_alg: &str) -> Result<()> {
    if hash_alg == "none" {
        return Ok(());
    }
    Err(Error::UnsupportedHashAlg {
        tc_id,
        hash_alg: hash_alg.to_string(),
    })
}

fn ensure_bounded(tc_id: u32, field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() <= max {
        return Ok(());
    }
    Err(Error::OversizedField {
        tc_id,
        field,
        max,
        actual: value.len(),
    })
}

/// Randomness to use when invoking a sigGen case.
///
/// Deterministic groups always get [`DETERMINISTIC_RND`], regardless of any
/// rnd value the document carries. Non-deterministic groups must supply one.
pub fn effective_rnd<'a>(group: &SigGenGroup, case: &'a SigGenCase) -> Result<&'a str> {
    if group.deterministic {
        return Ok(DETERMINISTIC_RND);
    }
    match &case.rnd {
        Some(rnd) => Ok(rnd.as_str()),
        None => Err(Error::MissingRandomness { tc_id: case.tc_id }),
    }
}
