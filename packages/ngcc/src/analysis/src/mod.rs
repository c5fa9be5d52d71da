pub mod api;
pub mod decoration_analyzer;

pub use api::{AnalysisProvider, CompiledClass, Decorator, FileAnalysis};
pub use decoration_analyzer::DecorationAnalyzer;
