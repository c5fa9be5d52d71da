// Entry Point
//
// An entry point is a directory with a package.json that declares typings and
// at least one bundle format property. Secondary entry points (nested
// directories with their own package.json) are entry points in their own
// right inside the containing package.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::logging::src::logger::Logger;

/// The bundle formats an entry point can be distributed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPointFormat {
    Esm2015,
    Esm5,
    CommonJs,
    Umd,
}

impl EntryPointFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryPointFormat::Esm2015 => "esm2015",
            EntryPointFormat::Esm5 => "esm5",
            EntryPointFormat::CommonJs => "commonjs",
            EntryPointFormat::Umd => "umd",
        }
    }
}

impl std::fmt::Display for EntryPointFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// package.json properties that may point at a bundle, in the order they are
/// considered when no explicit selection is configured.
pub const SUPPORTED_FORMAT_PROPERTIES: &[&str] = &[
    "fesm2015", "fesm5", "es2015", "esm2015", "esm5", "main", "module",
];

/// A package entry point, discovered from its manifest.
#[derive(Debug, Clone)]
pub struct EntryPoint {
    /// Name from the manifest, e.g. `@angular/core`.
    pub name: String,
    /// Directory that contains this entry point.
    pub path: AbsoluteFsPath,
    /// Directory of the containing package (equals `path` for primary
    /// entry points).
    pub package: AbsoluteFsPath,
    /// The declared typings (`.d.ts`) file.
    pub typings: AbsoluteFsPath,
    /// The parsed manifest.
    pub package_json: Map<String, Value>,
    /// Whether the package carries View Engine metadata and so was compiled
    /// with Angular tooling.
    pub compiled_by_angular: bool,
}

impl EntryPoint {
    /// The absolute path of the bundle declared by `property`, if any.
    pub fn format_path(&self, property: &str) -> Option<AbsoluteFsPath> {
        let value = self.package_json.get(property)?.as_str()?;
        Some(self.path.join(value))
    }

    /// The path of the manifest file for this entry point.
    pub fn package_json_path(&self) -> AbsoluteFsPath {
        self.path.join("package.json")
    }
}

/// Try to describe the entry point at `entry_point_path`.
///
/// Returns `None` when the directory has no manifest, the manifest cannot be
/// parsed, or it declares no typings — such directories are simply not entry
/// points, which is not an error.
pub fn get_entry_point_info(
    fs: &dyn FileSystem,
    logger: &dyn Logger,
    package_path: &AbsoluteFsPath,
    entry_point_path: &AbsoluteFsPath,
) -> Option<EntryPoint> {
    let package_json_path = entry_point_path.join("package.json");
    if !fs.is_file(&package_json_path) {
        return None;
    }
    let contents = fs.read_file(&package_json_path).ok()?;
    let package_json: Map<String, Value> = match serde_json::from_str(&contents) {
        Ok(json) => json,
        Err(e) => {
            logger.warn(&format!(
                "Invalid package.json at {}: {}",
                package_json_path, e
            ));
            return None;
        }
    };

    let typings = package_json
        .get("typings")
        .or_else(|| package_json.get("types"))
        .and_then(|value| value.as_str())?;
    let typings = entry_point_path.join(typings);

    let name = package_json
        .get("name")
        .and_then(|value| value.as_str())
        .unwrap_or_else(|| entry_point_path.basename())
        .to_string();

    // View Engine output always shipped a metadata.json next to the typings.
    let metadata_path =
        AbsoluteFsPath::new(typings.as_str().replace(".d.ts", ".metadata.json"));
    let compiled_by_angular = fs.is_file(&metadata_path);

    Some(EntryPoint {
        name,
        path: entry_point_path.clone(),
        package: package_path.clone(),
        typings,
        package_json,
        compiled_by_angular,
    })
}

static UMD_WRAPPER_SNIFF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"typeof\s+(exports|module|define)").unwrap()
});

/// The concrete format of the bundle behind a package.json property.
///
/// Most properties name their format; `main` may hold either a UMD or a
/// CommonJS bundle, so its contents are sniffed.
pub fn get_entry_point_format(
    fs: &dyn FileSystem,
    entry_point: &EntryPoint,
    property: &str,
) -> Option<EntryPointFormat> {
    match property {
        "fesm2015" | "es2015" | "esm2015" => Some(EntryPointFormat::Esm2015),
        "fesm5" | "esm5" | "module" => Some(EntryPointFormat::Esm5),
        "main" => {
            let main_path = entry_point.format_path(property)?;
            let resolved = resolve_file_with_postfixes(fs, &main_path)?;
            let contents = fs.read_file(&resolved).ok()?;
            if UMD_WRAPPER_SNIFF.is_match(&contents) && contents.contains("define") {
                Some(EntryPointFormat::Umd)
            } else {
                Some(EntryPointFormat::CommonJs)
            }
        }
        _ => None,
    }
}

/// Resolve `path` the way a module loader would: the literal path, then with
/// a `.js` extension, then as a directory with an index file.
pub fn resolve_file_with_postfixes(
    fs: &dyn FileSystem,
    path: &AbsoluteFsPath,
) -> Option<AbsoluteFsPath> {
    if fs.is_file(path) {
        return Some(path.clone());
    }
    let with_ext = AbsoluteFsPath::new(format!("{}.js", path.as_str()));
    if fs.is_file(&with_ext) {
        return Some(with_ext);
    }
    let index = path.join("index.js");
    if fs.is_file(&index) {
        return Some(index);
    }
    None
}
