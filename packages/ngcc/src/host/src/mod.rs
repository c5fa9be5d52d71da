pub mod api;
pub mod commonjs_host;
pub mod esm_host;
pub mod reflection;
pub mod umd_host;

pub use api::{
    ClassSymbol, DecoratorElement, DecoratorsArray, SourceAnalysis, SwitchableDeclaration,
    UmdAmdBranch, UmdBranch, UmdWrapper,
};
pub use reflection::analyze_source;
