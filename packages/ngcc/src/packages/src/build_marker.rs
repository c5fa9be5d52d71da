// Build Marker
//
// Records in an entry point's package.json which format properties have
// already been processed, so repeated runs skip completed work.

use serde_json::{Map, Value};

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};

use super::entry_point::EntryPoint;

pub const NGCC_VERSION: &str = env!("CARGO_PKG_VERSION");

const MARKER_PROPERTY: &str = "__processed_by_ivy_ngcc__";

/// Whether `property` of this entry point was already processed by this
/// version of the compiler.
pub fn has_been_processed(package_json: &Map<String, Value>, property: &str) -> bool {
    package_json
        .get(MARKER_PROPERTY)
        .and_then(|markers| markers.as_object())
        .and_then(|markers| markers.get(property))
        .and_then(|version| version.as_str())
        .is_some_and(|version| version == NGCC_VERSION)
}

/// Record `properties` as processed and rewrite the entry point's manifest.
pub fn mark_as_processed(
    fs: &dyn FileSystem,
    entry_point: &mut EntryPoint,
    properties: &[&str],
) -> std::io::Result<()> {
    let markers = entry_point
        .package_json
        .entry(MARKER_PROPERTY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(markers) = markers.as_object_mut() {
        for property in properties {
            markers.insert(
                property.to_string(),
                Value::String(NGCC_VERSION.to_string()),
            );
        }
    }

    let path: AbsoluteFsPath = entry_point.package_json_path();
    let contents = serde_json::to_string_pretty(&entry_point.package_json)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs.write_file(&path, &format!("{}\n", contents))
}
