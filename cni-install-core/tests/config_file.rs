//! Config file loading, error-message, and layering integration tests.

use std::path::PathBuf;

use assert_fs::prelude::*;
use cni_install_core::{config, ConfigError, InstallConfig};
use predicates::prelude::predicate;
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load
// ---------------------------------------------------------------------------

#[test]
fn full_file_overrides_defaults() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("install.yaml");
    file.write_str(
        "cni_bin_source_dir: /opt/istio/bin\n\
         cni_bin_target_dirs:\n  - /host/opt/cni/bin\n  - /host/secondary-bin-dir\n\
         update_cni_binaries: false\n\
         skip_cni_binaries: [istio-iptables]\n\
         cni_binaries_prefix: v2-5-\n",
    )
    .expect("write");

    let cfg = InstallConfig::load_at(file.path()).expect("load");
    assert_eq!(cfg.cni_bin_source_dir, PathBuf::from("/opt/istio/bin"));
    assert_eq!(cfg.cni_bin_target_dirs.len(), 2);
    assert!(!cfg.update_cni_binaries);
    assert_eq!(cfg.skip_cni_binaries, vec!["istio-iptables"]);
    assert_eq!(cfg.cni_binaries_prefix, "v2-5-");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("install.yaml");
    file.write_str("cni_binaries_prefix: p-\n").expect("write");

    let cfg = InstallConfig::load_at(file.path()).expect("load");
    assert_eq!(cfg.cni_binaries_prefix, "p-");
    assert_eq!(
        cfg.cni_bin_source_dir,
        PathBuf::from(config::DEFAULT_SOURCE_DIR)
    );
    assert!(cfg.update_cni_binaries);
}

#[test]
fn missing_file_returns_io_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.yaml");
    let err = InstallConfig::load_at(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("absent.yaml"));
}

#[rstest]
#[case("unknown_field", "cni_bin_dir: /opt\n")]
#[case("wrong_type", "cni_bin_target_dirs: 7\n")]
#[case("corrupt", ": : corrupt : yaml : !!!\n  - broken: [unclosed")]
fn bad_file_returns_parse_error(#[case] label: &str, #[case] body: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("install.yaml");
    file.write_str(body).expect("write");

    let err = InstallConfig::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "[{label}] got: {err}");
    assert!(
        err.to_string().contains("install.yaml"),
        "[{label}] must contain file path, got: {err}"
    );
}

#[test]
fn no_path_yields_defaults() {
    let cfg = InstallConfig::load_or_default(None).expect("defaults");
    assert_eq!(cfg, InstallConfig::default());
}

// ---------------------------------------------------------------------------
// 2. Layering
// ---------------------------------------------------------------------------

#[test]
fn env_wins_over_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("install.yaml");
    file.write_str("cni_binaries_prefix: from-file-\nupdate_cni_binaries: true\n")
        .expect("write");

    let mut cfg = InstallConfig::load_or_default(Some(file.path())).expect("load");
    cfg.apply_env_with(|name| match name {
        config::ENV_BINARIES_PREFIX => Some("from-env-".to_string()),
        config::ENV_UPDATE_BINARIES => Some("0".to_string()),
        _ => None,
    })
    .expect("env");

    assert_eq!(cfg.cni_binaries_prefix, "from-env-");
    assert!(!cfg.update_cni_binaries);
}

#[test]
fn yaml_output_reloads_to_same_config() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = InstallConfig {
        skip_cni_binaries: vec!["istio-iptables".into()],
        cni_binaries_prefix: "v2-4-".into(),
        ..InstallConfig::default()
    };
    let file = dir.child("resolved.yaml");
    file.write_str(&cfg.to_yaml().expect("yaml")).expect("write");
    file.assert(predicate::str::contains("cni_binaries_prefix: v2-4-"));

    let back = InstallConfig::load_at(file.path()).expect("reload");
    assert_eq!(back, cfg);
}
