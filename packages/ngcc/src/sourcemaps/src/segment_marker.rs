// Segment Marker
//
// A zero-indexed line/column position within one file.

/// Position of a mapping segment within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentMarker {
    pub line: u32,
    pub column: u32,
}

impl SegmentMarker {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position `self` advanced by the distance from `from` to `to`.
    ///
    /// Same-line distances move the column, multi-line distances move the
    /// line and keep `to`'s own column, which is what keeps merged maps
    /// line-accurate through intermediate maps.
    pub fn offset_by(&self, from: &SegmentMarker, to: &SegmentMarker) -> SegmentMarker {
        if to.line == from.line {
            SegmentMarker::new(
                self.line,
                self.column + (to.column.saturating_sub(from.column)),
            )
        } else {
            SegmentMarker::new(self.line + (to.line - from.line), to.column)
        }
    }
}
