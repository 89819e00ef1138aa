// src/export/json.rs
use chrono::Utc;
use serde_json::json;

use crate::config;
use crate::error::{CryptoError, Result};
use crate::key::key_representations;
use crate::manager::KeyManager;

/// Export all key metadata to a portable JSON file.
///
/// With `include_material`, the file additionally contains every key in
/// cleartext (Base64URL) and must be protected accordingly. Material export
/// is refused unless `features.allow_insecure_export` is enabled.
pub fn export_inventory_to_json(
    manager: &KeyManager,
    path: &str,
    include_material: bool,
) -> Result<()> {
    if include_material && !config::load().features.allow_insecure_export {
        return Err(CryptoError::UnsupportedOperation(
            "key material export is disabled (features.allow_insecure_export)".into(),
        ));
    }

    let identifiers = manager.list_key_identifiers()?;

    let mut keys = Vec::new();
    for identifier in &identifiers {
        let key = manager.retrieve_key(identifier)?;
        let mut entry = json!({
            "identifier": identifier,
            "algorithm": key.metadata().algorithm,
            "bits": key.metadata().bits,
            "created_at": key
                .metadata()
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "fingerprint": key.fingerprint(),
        });
        if include_material {
            entry["material_base64url"] = json!(key_representations(&key).base64url_no_pad);
        }
        keys.push(entry);
    }

    let warning = include_material.then_some(
        "THIS FILE CONTAINS ALL KEYS IN CLEARTEXT. ENCRYPT OR DELETE IMMEDIATELY AFTER USE.",
    );

    let export = json!({
        "export_format": "secure-key-vault-v1",
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_keys": keys.len(),
        "warning": warning,
        "keys": keys,
    });

    let pretty = serde_json::to_string_pretty(&export)
        .map_err(|e| CryptoError::InternalError(format!("serialize inventory: {e}")))?;
    std::fs::write(path, pretty)
        .map_err(|e| CryptoError::StorageOperationFailed(format!("write {path}: {e}")))?;

    log::info!("exported {} key(s) → {path}", identifiers.len());
    Ok(())
}
