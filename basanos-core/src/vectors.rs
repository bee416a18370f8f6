//! Typed model of ACVP `internalProjection.json` vector documents.
//!
//! Official ML-DSA vectors are published at:
//! https://github.com/usnistgov/ACVP-Server/tree/master/gen-val/json-files
//!
//! Only the fields the harness acts on are modeled; everything else in the
//! documents (`vsId`, `algorithm`, `revision`, per-case `reason`, ...) is
//! ignored during deserialization. Suites are immutable once loaded.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// File name of the keyGen vector document inside a vector directory.
pub const KEY_GEN_FILE: &str = "acvp_keygen_internalProjection.json";

/// File name of the sigGen vector document inside a vector directory.
pub const SIG_GEN_FILE: &str = "acvp_sigGen_internalProjection.json";

/// File name of the sigVer vector document inside a vector directory.
pub const SIG_VER_FILE: &str = "acvp_sigVer_internalProjection.json";

/// Key generation vector document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenSuite {
    /// Test groups in document order.
    pub test_groups: Vec<KeyGenGroup>,
}

/// A batch of keyGen cases sharing one parameter set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenGroup {
    /// Group identifier.
    pub tg_id: u32,
    /// Test type; only "AFT" is supported.
    pub test_type: String,
    /// Parameter set name, e.g. "ML-DSA-44".
    pub parameter_set: String,
    /// Test cases in document order.
    pub tests: Vec<KeyGenCase>,
}

/// One keyGen input/output pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenCase {
    /// Case identifier.
    pub tc_id: u32,
    /// Key generation seed, hex-encoded.
    pub seed: String,
    /// Expected public key, hex-encoded.
    pub pk: String,
    /// Expected secret key, hex-encoded.
    pub sk: String,
}

/// Signature generation vector document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigGenSuite {
    /// Test groups in document order.
    pub test_groups: Vec<SigGenGroup>,
}

/// A batch of sigGen cases sharing one parameter set and mode flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigGenGroup {
    /// Group identifier.
    pub tg_id: u32,
    /// Test type; only "AFT" is supported.
    pub test_type: String,
    /// Parameter set name, e.g. "ML-DSA-65".
    pub parameter_set: String,
    /// Whether signing is deterministic; forces an all-zero rnd.
    pub deterministic: bool,
    /// Pre-hash mode; only "pure" is executable, everything else skips.
    pub pre_hash: String,
    /// Signature interface; only "external" is executable.
    pub signature_interface: String,
    /// External-mu mode; `true` skips the group's cases.
    pub external_mu: bool,
    /// Test cases in document order.
    pub tests: Vec<SigGenCase>,
}

/// One sigGen input/output pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigGenCase {
    /// Case identifier.
    pub tc_id: u32,
    /// Message to sign, hex-encoded.
    pub message: String,
    /// Per-case randomness, hex-encoded. Deterministic groups may omit it.
    pub rnd: Option<String>,
    /// Signing key, hex-encoded.
    pub sk: String,
    /// Context string, hex-encoded.
    pub context: String,
    /// Hash algorithm; must be "none".
    pub hash_alg: String,
    /// Expected signature, hex-encoded.
    pub signature: String,
}

/// Signature verification vector document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigVerSuite {
    /// Test groups in document order.
    pub test_groups: Vec<SigVerGroup>,
}

/// A batch of sigVer cases sharing one parameter set and mode flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigVerGroup {
    /// Group identifier.
    pub tg_id: u32,
    /// Test type; not asserted on for verification groups.
    pub test_type: String,
    /// Parameter set name, e.g. "ML-DSA-87".
    pub parameter_set: String,
    /// Pre-hash mode; only "pure" is executable, everything else skips.
    pub pre_hash: String,
    /// Signature interface; only "external" is executable.
    pub signature_interface: String,
    /// External-mu mode; `true` skips the group's cases.
    pub external_mu: bool,
    /// Test cases in document order.
    pub tests: Vec<SigVerCase>,
}

/// One sigVer case with its expected verdict.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigVerCase {
    /// Case identifier.
    pub tc_id: u32,
    /// Signed message, hex-encoded.
    pub message: String,
    /// Context string, hex-encoded.
    pub context: String,
    /// Signature to check, hex-encoded.
    pub signature: String,
    /// Verification key, hex-encoded.
    pub pk: String,
    /// Hash algorithm; must be "none".
    pub hash_alg: String,
    /// Expected verification outcome.
    pub test_passed: bool,
}

impl KeyGenSuite {
    /// Load a keyGen vector document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

impl SigGenSuite {
    /// Load a sigGen vector document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

impl SigVerSuite {
    /// Load a sigVer vector document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn load_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The three vector documents of a full conformance run.
#[derive(Debug, Clone)]
pub struct VectorSet {
    /// Key generation suite.
    pub key_gen: KeyGenSuite,
    /// Signature generation suite.
    pub sig_gen: SigGenSuite,
    /// Signature verification suite.
    pub sig_ver: SigVerSuite,
}

impl VectorSet {
    /// Load all three suite documents from a vector directory.
    ///
    /// Expects the canonical file names [`KEY_GEN_FILE`], [`SIG_GEN_FILE`]
    /// and [`SIG_VER_FILE`] inside `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            key_gen: KeyGenSuite::load(&dir.join(KEY_GEN_FILE))?,
            sig_gen: SigGenSuite::load(&dir.join(SIG_GEN_FILE))?,
            sig_ver: SigVerSuite::load(&dir.join(SIG_VER_FILE))?,
        })
    }
}
