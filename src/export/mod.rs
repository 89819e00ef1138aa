// src/export/mod.rs
//! Key inventory export

mod json;

pub use json::export_inventory_to_json;

use crate::enums::ExportFormat;
use crate::error::Result;
use crate::manager::KeyManager;

/// Export the key inventory in the requested format
pub fn export_inventory(
    manager: &KeyManager,
    path: &str,
    format: ExportFormat,
    include_material: bool,
) -> Result<()> {
    match format {
        ExportFormat::JsonV1 => export_inventory_to_json(manager, path, include_material),
    }
}
