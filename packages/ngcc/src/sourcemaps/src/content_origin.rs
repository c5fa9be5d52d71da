// Content Origin
//
// Tracks where a source map's content was found.

/// Where the map for a file came from.
///
/// The renderer mirrors this on output: an inline map stays inline, a
/// file-system map stays a sibling `.map` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Map passed in directly by the caller.
    Provided,
    /// Map decoded from an inline data URI comment.
    Inline,
    /// Map read from a sibling file on disk.
    FileSystem,
}
