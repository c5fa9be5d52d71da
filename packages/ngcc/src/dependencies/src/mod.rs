pub mod dependency_host;
pub mod dependency_resolver;
pub mod module_resolver;

pub use dependency_host::{
    has_import_or_reexport_statements, DependencySet, EsmDependencyHost,
};
pub use dependency_resolver::{
    DependencyCycleError, DependencyResolver, InvalidEntryPoint, SortedEntryPointsInfo,
};
pub use module_resolver::{ModuleResolver, PathMappings, ResolvedModule};
