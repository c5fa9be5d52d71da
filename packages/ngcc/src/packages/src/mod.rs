pub mod build_marker;
pub mod entry_point;
pub mod entry_point_finder;
pub mod transformer;

pub use build_marker::{has_been_processed, mark_as_processed, NGCC_VERSION};
pub use entry_point::{
    get_entry_point_format, get_entry_point_info, resolve_file_with_postfixes, EntryPoint,
    EntryPointFormat, SUPPORTED_FORMAT_PROPERTIES,
};
pub use entry_point_finder::EntryPointFinder;
pub use transformer::Transformer;
