// Decoration Analyzer
//
// Minimal provider that works purely from the literal decorator arrays in
// the bundle: any class carrying a core Angular decorator has that entry
// scheduled for removal. It injects no definitions of its own.

use crate::file_system::src::types::AbsoluteFsPath;
use crate::host::src::api::SourceAnalysis;

use super::api::{AnalysisProvider, CompiledClass, Decorator, FileAnalysis};

const CORE_DECORATORS: &[&str] = &["Component", "Directive", "Injectable", "NgModule", "Pipe"];

pub struct DecorationAnalyzer;

impl DecorationAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DecorationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProvider for DecorationAnalyzer {
    fn analyze_file(
        &self,
        _path: &AbsoluteFsPath,
        _contents: &str,
        analysis: &SourceAnalysis,
    ) -> FileAnalysis {
        let mut result = FileAnalysis::default();
        for class in &analysis.classes {
            let Some(decorators) = &class.decorators else {
                continue;
            };
            let matched: Vec<String> = decorators
                .elements
                .iter()
                .filter(|element| CORE_DECORATORS.contains(&element.name.as_str()))
                .map(|element| element.name.clone())
                .collect();
            if matched.is_empty() {
                continue;
            }
            result.classes.push(CompiledClass {
                name: class.name.clone(),
                decorators: matched
                    .iter()
                    .map(|name| Decorator {
                        name: name.clone(),
                        args: Vec::new(),
                    })
                    .collect(),
                decorators_to_remove: matched,
                definitions: None,
                adjacent_statements: None,
            });
        }
        result
    }
}
