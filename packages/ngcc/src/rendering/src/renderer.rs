// Renderer
//
// Drives the rewrite of one file: applies the provider's edits through the
// format's rendering formatter, then serializes the buffer together with a
// regenerated or source-merged map. The map flavor mirrors the input: an
// inline map stays inline, anything else becomes a sibling `.map` file.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

use crate::analysis::src::api::AnalysisProvider;
use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::host::src::api::SourceAnalysis;
use crate::host::src::reflection::analyze_source;
use crate::logging::src::logger::Logger;
use crate::packages::src::entry_point::EntryPointFormat;
use crate::sourcemaps::src::codec::{encode_mappings, SourceMapSegment};
use crate::sourcemaps::src::content_origin::ContentOrigin;
use crate::sourcemaps::src::raw_source_map::RawSourceMap;
use crate::sourcemaps::src::source_file::SourceFile;
use crate::sourcemaps::src::source_file_loader::{remove_source_map_comments, SourceFileLoader};

use super::magic_string::MagicString;
use super::rendering_formatter::formatter_for;

/// One output file to be written by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FileToWrite {
    pub path: AbsoluteFsPath,
    pub contents: String,
}

pub struct Renderer<'a> {
    fs: &'a dyn FileSystem,
    logger: &'a dyn Logger,
}

impl<'a> Renderer<'a> {
    pub fn new(fs: &'a dyn FileSystem, logger: &'a dyn Logger) -> Self {
        Self { fs, logger }
    }

    /// Rewrite one bundle file of the given format.
    pub fn render_file(
        &self,
        path: &AbsoluteFsPath,
        contents: &str,
        format: EntryPointFormat,
        provider: &dyn AnalysisProvider,
    ) -> Vec<FileToWrite> {
        let analysis = analyze_source(contents);
        let formatter = formatter_for(format, &analysis);
        let file_analysis = provider.analyze_file(path, contents, &analysis);
        let mut output = MagicString::new(contents);

        formatter.add_imports(&mut output, &file_analysis.imports);
        if let Some(constants) = &file_analysis.constants {
            formatter.add_constants(&mut output, constants);
        }
        for class in &file_analysis.classes {
            let Some(symbol) = analysis.class_named(&class.name) else {
                continue;
            };
            if let Some(definitions) = &class.definitions {
                formatter.add_definitions(&mut output, symbol, definitions);
            }
            if let Some(statements) = &class.adjacent_statements {
                formatter.add_adjacent_statements(&mut output, symbol, statements);
            }
            if !class.decorators_to_remove.is_empty() {
                if let Some(decorators) = &symbol.decorators {
                    formatter.remove_decorators(
                        &mut output,
                        decorators,
                        &class.decorators_to_remove,
                    );
                }
            }
        }
        formatter.rewrite_switchable_declarations(&mut output, &analysis.switchable_declarations);
        formatter.add_exports(&mut output, &file_analysis.exports);

        self.render_source_and_map(path, &output)
    }

    /// Rewrite an entry point's typings file.
    pub fn render_dts(
        &self,
        path: &AbsoluteFsPath,
        contents: &str,
        provider: &dyn AnalysisProvider,
    ) -> Vec<FileToWrite> {
        let declarations = provider.module_with_providers(contents);
        if declarations.is_empty() {
            return Vec::new();
        }
        // Typings always use the module syntax, whatever the bundle format.
        let formatter = formatter_for(EntryPointFormat::Esm2015, &SourceAnalysis::default());
        let mut output = MagicString::new(contents);
        formatter.add_module_with_providers_params(&mut output, &declarations);
        self.render_source_and_map(path, &output)
    }

    /// Serialize the buffer: unchanged files round-trip byte-identical, and
    /// edited files get their map merged with whatever map the input had.
    pub fn render_source_and_map(
        &self,
        path: &AbsoluteFsPath,
        output: &MagicString,
    ) -> Vec<FileToWrite> {
        if !output.has_edits() {
            return vec![FileToWrite {
                path: path.clone(),
                contents: output.original().to_string(),
            }];
        }

        let generated = output.generate();
        let loader = SourceFileLoader::new(self.fs, self.logger);
        let origin = loader
            .read_raw_map(path, output.original())
            .map(|(_, origin)| origin);
        let original_file =
            loader.load_with_contents(path, output.original().to_string(), None);

        let file_name = path.basename().to_string();
        let mut lines: Vec<Vec<SourceMapSegment>> = Vec::new();
        for (generated_pos, original_pos) in &generated.mappings {
            while lines.len() <= generated_pos.line as usize {
                lines.push(Vec::new());
            }
            lines[generated_pos.line as usize].push(SourceMapSegment {
                generated_column: generated_pos.column,
                source: Some((0, original_pos.line, original_pos.column)),
                name: None,
            });
        }
        let generated_map = RawSourceMap {
            version: 3,
            file: Some(file_name.clone()),
            source_root: None,
            sources: vec![file_name.clone()],
            names: None,
            sources_content: None,
            mappings: encode_mappings(&lines),
        };

        let generated_file = SourceFile::new(
            path.clone(),
            generated.contents,
            Some(generated_map),
            vec![Some(original_file)],
        );
        let merged_map = generated_file.render_flattened_map();
        let contents = remove_source_map_comments(&generated_file.contents);

        if origin == Some(ContentOrigin::Inline) {
            match serde_json::to_string(&merged_map) {
                Ok(json) => {
                    let encoded = BASE64_STANDARD.encode(json);
                    return vec![FileToWrite {
                        path: path.clone(),
                        contents: format!(
                            "{}\n//# sourceMappingURL=data:application/json;charset=utf-8;base64,{}\n",
                            contents.trim_end(),
                            encoded
                        ),
                    }];
                }
                Err(e) => {
                    self.logger
                        .error(&format!("Unable to serialize map for {}: {}", path, e));
                }
            }
        }

        let map_path = AbsoluteFsPath::new(format!("{}.map", path.as_str()));
        let mut files = vec![FileToWrite {
            path: path.clone(),
            contents: format!(
                "{}\n//# sourceMappingURL={}.map\n",
                contents.trim_end(),
                file_name
            ),
        }];
        match serde_json::to_string(&merged_map) {
            Ok(json) => files.push(FileToWrite {
                path: map_path,
                contents: json,
            }),
            Err(e) => {
                self.logger
                    .error(&format!("Unable to serialize map for {}: {}", path, e));
            }
        }
        files
    }
}
