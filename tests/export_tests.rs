// tests/export_tests.rs
//! Inventory export with material export enabled via config
mod common;

use std::io::Write as _;
use std::sync::Arc;
use std::sync::OnceLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use secure_key_vault::consts::AES_256_KEY_SIZE;
use secure_key_vault::{export_inventory, ExportFormat, InMemoryKeyStore, KeyManager};

// Point the lazy global config at a TOML enabling insecure export, before
// anything in this process touches it
fn enable_insecure_export() {
    static CONFIG_FILE: OnceLock<tempfile::NamedTempFile> = OnceLock::new();
    CONFIG_FILE.get_or_init(|| {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[crypto]
algorithm = "AES-256-GCM"
id_length_hex = 20

[features]
allow_insecure_export = true
"#
        )
        .unwrap();
        std::env::set_var("SKV_CONFIG", file.path());
        file
    });
}

fn manager_with_keys() -> KeyManager {
    let manager = KeyManager::new(Arc::new(InMemoryKeyStore::new())).unwrap();
    manager.generate_key(AES_256_KEY_SIZE, Some("alpha")).unwrap();
    manager.generate_key(AES_256_KEY_SIZE, Some("beta")).unwrap();
    manager
}

#[test]
fn test_export_inventory_metadata_only() {
    enable_insecure_export();
    common::setup();
    let manager = manager_with_keys();

    let out = tempfile::NamedTempFile::new().unwrap();
    let path = out.path().to_str().unwrap().to_string();
    export_inventory(&manager, &path, ExportFormat::JsonV1, false).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(parsed["export_format"], "secure-key-vault-v1");
    assert_eq!(parsed["total_keys"], 2);
    assert!(parsed["warning"].is_null());

    let keys = parsed["keys"].as_array().unwrap();
    assert_eq!(keys[0]["identifier"], "alpha");
    assert_eq!(keys[1]["identifier"], "beta");
    assert_eq!(keys[0]["algorithm"], "AES-256-GCM");
    assert_eq!(keys[0]["bits"], 256);
    assert!(keys[0]["created_at"].is_string());
    assert!(keys[0]["fingerprint"].is_string());
    // No material without the flag
    assert!(keys[0].get("material_base64url").is_none());
}

#[test]
fn test_export_inventory_with_material() {
    enable_insecure_export();
    let manager = manager_with_keys();

    let out = tempfile::NamedTempFile::new().unwrap();
    let path = out.path().to_str().unwrap().to_string();
    export_inventory(&manager, &path, ExportFormat::JsonV1, true).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert!(parsed["warning"].as_str().unwrap().contains("CLEARTEXT"));

    let keys = parsed["keys"].as_array().unwrap();
    let encoded = keys[0]["material_base64url"].as_str().unwrap();
    let material = URL_SAFE_NO_PAD.decode(encoded).unwrap();

    let stored = manager.retrieve_key("alpha").unwrap();
    assert_eq!(material.as_slice(), stored.material().as_bytes());
}
