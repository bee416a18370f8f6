//! Comparison of implementation output against expected vector values.
//!
//! keyGen and sigGen binaries print `key=value` lines and must exit 0;
//! every line is checked against a fixed per-operation field table, and
//! every expected field must appear. sigVer binaries answer through their
//! exit code alone. All comparisons are exact string equality on the
//! hex-encoded values; any difference aborts the whole run.

use crate::error::{Error, Result};
use crate::invoke::{Invocation, RawOutput};
use crate::vectors::{KeyGenCase, SigGenCase, SigVerCase};

/// Check a keyGen result: exit 0 and matching `pk` and `sk` lines.
pub fn verify_key_gen(invocation: &Invocation, case: &KeyGenCase, raw: &RawOutput) -> Result<()> {
    require_success(invocation, raw)?;
    check_fields(&raw.stdout, &[("pk", &case.pk), ("sk", &case.sk)])
}

/// Check a sigGen result: exit 0 and a matching `signature` line.
pub fn verify_sig_gen(invocation: &Invocation, case: &SigGenCase, raw: &RawOutput) -> Result<()> {
    require_success(invocation, raw)?;
    check_fields(&raw.stdout, &[("signature", &case.signature)])
}

/// Check a sigVer result: the exit code is the verdict.
///
/// Exit 0 means the signature was accepted, anything else means rejected;
/// a nonzero exit is not itself a failure here. The observed verdict must
/// equal the case's `testPassed` expectation.
pub fn verify_sig_ver(case: &SigVerCase, raw: &RawOutput) -> Result<()> {
    let actual = raw.success();
    if actual != case.test_passed {
        return Err(Error::VerdictMismatch {
            expected: case.test_passed,
            actual,
        });
    }
    Ok(())
}

fn require_success(invocation: &Invocation, raw: &RawOutput) -> Result<()> {
    if raw.success() {
        return Ok(());
    }
    Err(Error::ImplementationFailure {
        invocation: invocation.to_string(),
        code: raw.code,
        stderr: raw.stderr.clone(),
    })
}

// Each stdout line must be `key=value` with a key from the fixed table and
// a value equal to the expectation; each expected key must appear at least
// once. Unknown keys and bare lines are defects in the implementation.
fn check_fields(stdout: &str, expected: &[(&'static str, &str)]) -> Result<()> {
    let mut seen = vec![false; expected.len()];
    for line in stdout.lines() {
        let (key, value) = match line.split_once('=') {
            Some(kv) => kv,
            None => {
                return Err(Error::MalformedOutput {
                    line: line.to_string(),
                })
            }
        };
        match expected.iter().position(|(name, _)| *name == key) {
            Some(idx) => {
                let want = expected[idx].1;
                if value != want {
                    return Err(Error::FieldMismatch {
                        field: key.to_string(),
                        expected: want.to_string(),
                        actual: value.to_string(),
                    });
                }
                seen[idx] = true;
            }
            None => {
                return Err(Error::UnexpectedField {
                    field: key.to_string(),
                })
            }
        }
    }
    for (idx, (name, _)) in expected.iter().enumerate() {
        if !seen[idx] {
            return Err(Error::MissingField { field: name });
        }
    }
    Ok(())
}
