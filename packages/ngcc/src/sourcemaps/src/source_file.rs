// Source File
//
// A file plus its source map and loaded original sources. The flattened
// mappings compose every intermediate map away, so the rendered map always
// points at the leaf sources the library author actually wrote.

use std::sync::Arc;

use crate::file_system::src::types::AbsoluteFsPath;
use crate::file_system::src::util::relative_path;

use super::codec::{decode_mappings, encode_mappings, SourceMapSegment};
use super::raw_source_map::RawSourceMap;
use super::segment_marker::SegmentMarker;

/// A leaf source referenced by flattened mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalSource {
    pub path: AbsoluteFsPath,
    pub content: Option<String>,
}

/// One flattened mapping: a generated position tied to a leaf source position.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub generated: SegmentMarker,
    pub source: Arc<OriginalSource>,
    pub original: SegmentMarker,
    pub name: Option<String>,
}

pub struct SourceFile {
    /// Absolute path of this file.
    pub source_path: AbsoluteFsPath,
    /// The contents of this file.
    pub contents: String,
    /// The raw source map of this file, if it has one.
    pub raw_map: Option<RawSourceMap>,
    /// Loaded original sources, parallel to `raw_map.sources`.
    pub sources: Vec<Option<SourceFile>>,
    flattened_mappings: Vec<Mapping>,
}

impl SourceFile {
    pub fn new(
        source_path: AbsoluteFsPath,
        contents: String,
        raw_map: Option<RawSourceMap>,
        sources: Vec<Option<SourceFile>>,
    ) -> Self {
        let mut file = Self {
            source_path,
            contents,
            raw_map,
            sources,
            flattened_mappings: Vec::new(),
        };
        file.flattened_mappings = file.flatten_mappings();
        file
    }

    /// The mappings of this file composed through every intermediate map.
    pub fn flattened_mappings(&self) -> &[Mapping] {
        &self.flattened_mappings
    }

    /// Render the flattened mappings as a complete raw source map, with
    /// `sourcesContent` carried over from the leaf sources.
    pub fn render_flattened_map(&self) -> RawSourceMap {
        let mut sources: Vec<Arc<OriginalSource>> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut lines: Vec<Vec<SourceMapSegment>> = Vec::new();

        let map_dir = self.source_path.dirname();

        for mapping in &self.flattened_mappings {
            let source_index = match sources
                .iter()
                .position(|s| s.path == mapping.source.path)
            {
                Some(idx) => idx,
                None => {
                    sources.push(mapping.source.clone());
                    sources.len() - 1
                }
            };
            let name_index = mapping.name.as_ref().map(|name| {
                match names.iter().position(|n| n == name) {
                    Some(idx) => idx,
                    None => {
                        names.push(name.clone());
                        names.len() - 1
                    }
                }
            });

            while lines.len() <= mapping.generated.line as usize {
                lines.push(Vec::new());
            }
            lines[mapping.generated.line as usize].push(SourceMapSegment {
                generated_column: mapping.generated.column,
                source: Some((
                    source_index as u32,
                    mapping.original.line,
                    mapping.original.column,
                )),
                name: name_index.map(|idx| idx as u32),
            });
        }

        RawSourceMap {
            version: 3,
            file: Some(self.source_path.basename().to_string()),
            source_root: None,
            sources: sources
                .iter()
                .map(|s| relative_path(map_dir.as_str(), s.path.as_str()))
                .collect(),
            names: if names.is_empty() { None } else { Some(names) },
            sources_content: Some(sources.iter().map(|s| s.content.clone()).collect()),
            mappings: encode_mappings(&lines),
        }
    }

    fn flatten_mappings(&self) -> Vec<Mapping> {
        let raw_map = match &self.raw_map {
            Some(map) => map,
            None => return Vec::new(),
        };
        let lines = match decode_mappings(&raw_map.mappings) {
            Ok(lines) => lines,
            Err(_) => return Vec::new(),
        };

        let map_dir = self.source_path.dirname();
        let leaves: Vec<Arc<OriginalSource>> = raw_map
            .sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let loaded = self.sources.get(idx).and_then(|s| s.as_ref());
                let path = loaded
                    .map(|s| s.source_path.clone())
                    .unwrap_or_else(|| map_dir.join(source));
                let content = loaded
                    .map(|s| s.contents.clone())
                    .or_else(|| raw_map.content_of_source(idx).map(|c| c.to_string()));
                Arc::new(OriginalSource { path, content })
            })
            .collect();

        let mut result = Vec::new();
        for (line_idx, segments) in lines.iter().enumerate() {
            for segment in segments {
                let (source_idx, orig_line, orig_column) = match segment.source {
                    Some(source) => source,
                    None => continue,
                };
                let source_idx = source_idx as usize;
                if source_idx >= leaves.len() {
                    continue;
                }
                let generated = SegmentMarker::new(line_idx as u32, segment.generated_column);
                let original = SegmentMarker::new(orig_line, orig_column);
                let name = segment.name.and_then(|n| {
                    raw_map
                        .names
                        .as_ref()
                        .and_then(|names| names.get(n as usize).cloned())
                });

                let loaded = self.sources.get(source_idx).and_then(|s| s.as_ref());
                match loaded {
                    Some(source_file) if !source_file.flattened_mappings.is_empty() => {
                        // Compose through the source file's own flattened map.
                        if let Some(merged) = merge_through(source_file, &original) {
                            result.push(Mapping {
                                generated,
                                source: merged.source,
                                original: merged.original,
                                name: merged.name.or(name),
                            });
                        }
                    }
                    _ => result.push(Mapping {
                        generated,
                        source: leaves[source_idx].clone(),
                        original,
                        name,
                    }),
                }
            }
        }
        result
    }
}

/// Map `position` (a position within `source_file`) through that file's
/// flattened mappings. Positions before the first mapping cannot be
/// attributed and are dropped.
fn merge_through(source_file: &SourceFile, position: &SegmentMarker) -> Option<Mapping> {
    let mappings = &source_file.flattened_mappings;
    let idx = mappings.partition_point(|m| m.generated <= *position);
    if idx == 0 {
        return None;
    }
    let nearest = &mappings[idx - 1];
    Some(Mapping {
        generated: *position,
        source: nearest.source.clone(),
        original: nearest.original.offset_by(&nearest.generated, position),
        name: nearest.name.clone(),
    })
}
