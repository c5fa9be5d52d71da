pub mod codec;
pub mod content_origin;
pub mod raw_source_map;
pub mod segment_marker;
pub mod source_file;
pub mod source_file_loader;

pub use codec::{decode_mappings, encode_mappings, CodecError, SourceMapSegment};
pub use content_origin::ContentOrigin;
pub use raw_source_map::RawSourceMap;
pub use segment_marker::SegmentMarker;
pub use source_file::{Mapping, OriginalSource, SourceFile};
pub use source_file_loader::{remove_source_map_comments, SourceFileLoader};
