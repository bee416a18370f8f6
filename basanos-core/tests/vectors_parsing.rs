//! Deserialization tests against realistic `internalProjection.json`
//! documents, shaped like the official NIST ACVP files:
//! https://github.com/usnistgov/ACVP-Server/tree/master/gen-val/json-files

use std::env;
use std::fs;
use std::path::Path;

use basanos_core::{
    Error, KeyGenSuite, SigGenSuite, SigVerSuite, VectorSet, KEY_GEN_FILE, SIG_GEN_FILE,
    SIG_VER_FILE,
};

/// Path to the fixture vector documents
const DATA_DIR: &str = "tests/data";

fn data_path(file: &str) -> std::path::PathBuf {
    Path::new(DATA_DIR).join(file)
}

// ============================================================================
// Per-suite documents
// ============================================================================

#[test]
fn keygen_document_parses() {
    let suite = KeyGenSuite::load(&data_path(KEY_GEN_FILE)).expect("keyGen fixture should parse");

    assert_eq!(suite.test_groups.len(), 2);

    let group = &suite.test_groups[0];
    assert_eq!(group.tg_id, 1);
    assert_eq!(group.test_type, "AFT");
    assert_eq!(group.parameter_set, "ML-DSA-44");
    assert_eq!(group.tests.len(), 2);

    let case = &group.tests[0];
    assert_eq!(case.tc_id, 1);
    assert_eq!(case.seed.len(), 64);
    assert!(case.seed.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!case.pk.is_empty());
    assert!(!case.sk.is_empty());

    assert_eq!(suite.test_groups[1].parameter_set, "ML-DSA-87");
    assert_eq!(suite.test_groups[1].tests[0].tc_id, 3);
}

#[test]
fn siggen_document_parses() {
    let suite = SigGenSuite::load(&data_path(SIG_GEN_FILE)).expect("sigGen fixture should parse");

    assert_eq!(suite.test_groups.len(), 5);

    let deterministic = &suite.test_groups[0];
    assert!(deterministic.deterministic);
    assert_eq!(deterministic.pre_hash, "pure");
    assert_eq!(deterministic.signature_interface, "external");
    assert!(!deterministic.external_mu);

    // Deterministic cases may omit rnd entirely, or still carry one.
    assert!(deterministic.tests[0].rnd.is_none());
    assert!(deterministic.tests[1].rnd.is_some());

    let hedged = &suite.test_groups[1];
    assert!(!hedged.deterministic);
    let rnd = hedged.tests[0].rnd.as_deref().expect("hedged case carries rnd");
    assert_eq!(rnd.len(), 64);

    // Unsupported-mode groups still parse; the filter deals with them later.
    assert_eq!(suite.test_groups[2].pre_hash, "preHash");
    assert_eq!(suite.test_groups[2].tests[0].hash_alg, "SHA2-512");
    assert_eq!(suite.test_groups[3].signature_interface, "internal");
    assert!(suite.test_groups[4].external_mu);
}

#[test]
fn sigver_document_parses() {
    let suite = SigVerSuite::load(&data_path(SIG_VER_FILE)).expect("sigVer fixture should parse");

    assert_eq!(suite.test_groups.len(), 2);

    let group = &suite.test_groups[0];
    assert_eq!(group.tests.len(), 3);
    assert!(group.tests[0].test_passed);
    assert!(!group.tests[1].test_passed);
    assert!(group.tests[2].test_passed);

    // The per-case "reason" strings and other extra fields are ignored.
    assert_eq!(group.tests[1].hash_alg, "none");
}

// ============================================================================
// Directory loading
// ============================================================================

#[test]
fn vector_set_loads_all_three_documents() {
    let set = VectorSet::load_dir(Path::new(DATA_DIR)).expect("fixture directory should load");
    assert_eq!(set.key_gen.test_groups.len(), 2);
    assert_eq!(set.sig_gen.test_groups.len(), 5);
    assert_eq!(set.sig_ver.test_groups.len(), 2);
}

#[test]
fn missing_document_reports_the_path() {
    let dir = env::temp_dir().join(format!("basanos-missing-{}", std::process::id()));
    let err = VectorSet::load_dir(&dir).expect_err("empty directory must not load");
    match err {
        Error::Read { path, .. } => {
            assert!(path.ends_with(KEY_GEN_FILE), "unexpected path {path:?}")
        }
        other => panic!("expected Read error, got {other:?}"),
    }
}

#[test]
fn malformed_document_reports_the_path() {
    let dir = env::temp_dir().join(format!("basanos-malformed-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    fs::write(dir.join(KEY_GEN_FILE), "{ not json").expect("write fixture");

    let err = VectorSet::load_dir(&dir).expect_err("garbage must not parse");
    assert!(matches!(err, Error::Parse { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn wrong_shape_is_a_parse_error() {
    let dir = env::temp_dir().join(format!("basanos-shape-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    // Valid JSON, but testGroups is missing.
    fs::write(dir.join(KEY_GEN_FILE), r#"{"vsId": 1}"#).expect("write fixture");

    let err = KeyGenSuite::load(&dir.join(KEY_GEN_FILE)).expect_err("shape must not parse");
    assert!(matches!(err, Error::Parse { .. }));

    let _ = fs::remove_dir_all(&dir);
}
