// Source File Loader
//
// Reads a file together with its source map, following inline data URIs and
// external `.map` siblings, and recursively loads the original sources the
// map refers to.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::logging::src::logger::Logger;

use super::content_origin::ContentOrigin;
use super::raw_source_map::RawSourceMap;
use super::source_file::SourceFile;

static SOURCE_MAP_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//#\s*sourceMappingURL=(\S+)").unwrap());

/// Remove any `sourceMappingURL` comments from `contents`.
///
/// Used before appending the regenerated comment so a rewritten file never
/// carries two map pointers.
pub fn remove_source_map_comments(contents: &str) -> String {
    let stripped = SOURCE_MAP_COMMENT.replace_all(contents, "");
    stripped.trim_end_matches([' ', '\t']).to_string()
}

pub struct SourceFileLoader<'a> {
    fs: &'a dyn FileSystem,
    logger: &'a dyn Logger,
}

impl<'a> SourceFileLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem, logger: &'a dyn Logger) -> Self {
        Self { fs, logger }
    }

    /// Load the file at `path` from disk, along with its map and sources.
    pub fn load_source_file(&self, path: &AbsoluteFsPath) -> Option<SourceFile> {
        let contents = self.fs.read_file(path).ok()?;
        Some(self.load_with_contents(path, contents, None))
    }

    /// Load a file whose contents the caller already has in memory.
    ///
    /// When `map` is provided it wins over any map referenced by the text.
    pub fn load_with_contents(
        &self,
        path: &AbsoluteFsPath,
        contents: String,
        map: Option<RawSourceMap>,
    ) -> SourceFile {
        let mut seen = vec![path.clone()];
        self.load_internal(path, contents, map, &mut seen)
    }

    /// Detect and parse the map attached to `contents`, if there is one.
    pub fn read_raw_map(
        &self,
        path: &AbsoluteFsPath,
        contents: &str,
    ) -> Option<(RawSourceMap, ContentOrigin)> {
        let url = SOURCE_MAP_COMMENT
            .captures_iter(contents)
            .last()
            .map(|captures| captures[1].to_string())?;

        if let Some(data) = url.strip_prefix("data:") {
            let encoded = match data.split_once(";base64,") {
                Some((_, encoded)) => encoded,
                None => {
                    self.logger
                        .warn(&format!("Unsupported source map data URI in {}", path));
                    return None;
                }
            };
            let bytes = match BASE64_STANDARD.decode(encoded) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.logger
                        .warn(&format!("Invalid base64 source map in {}: {}", path, e));
                    return None;
                }
            };
            match serde_json::from_slice::<RawSourceMap>(&bytes) {
                Ok(map) => Some((map, ContentOrigin::Inline)),
                Err(e) => {
                    self.logger
                        .warn(&format!("Invalid inline source map in {}: {}", path, e));
                    None
                }
            }
        } else {
            let map_path = path.dirname().join(&url);
            let map_contents = self.fs.read_file(&map_path).ok()?;
            match serde_json::from_str::<RawSourceMap>(&map_contents) {
                Ok(map) => Some((map, ContentOrigin::FileSystem)),
                Err(e) => {
                    self.logger
                        .warn(&format!("Invalid source map at {}: {}", map_path, e));
                    None
                }
            }
        }
    }

    fn load_internal(
        &self,
        path: &AbsoluteFsPath,
        contents: String,
        map: Option<RawSourceMap>,
        seen: &mut Vec<AbsoluteFsPath>,
    ) -> SourceFile {
        let map = map.or_else(|| self.read_raw_map(path, &contents).map(|(map, _)| map));
        let sources = match &map {
            Some(map) => self.load_sources(path, map, seen),
            None => Vec::new(),
        };
        SourceFile::new(path.clone(), contents, map, sources)
    }

    fn load_sources(
        &self,
        path: &AbsoluteFsPath,
        map: &RawSourceMap,
        seen: &mut Vec<AbsoluteFsPath>,
    ) -> Vec<Option<SourceFile>> {
        let base_dir = path.dirname();
        let source_root = map.source_root.clone().unwrap_or_default();

        map.sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let source_path = if source_root.is_empty() {
                    base_dir.join(source)
                } else {
                    base_dir.join(&format!("{}/{}", source_root, source))
                };
                if seen.contains(&source_path) {
                    self.logger.warn(&format!(
                        "Circular source file mapping dependency: {}",
                        source_path
                    ));
                    return None;
                }
                let contents = match map.content_of_source(idx) {
                    Some(content) => content.to_string(),
                    None => self.fs.read_file(&source_path).ok()?,
                };
                seen.push(source_path.clone());
                let loaded = self.load_internal(&source_path, contents, None, seen);
                seen.pop();
                Some(loaded)
            })
            .collect()
    }
}
