// Magic String
//
// An append-only rewriting buffer: the original text is immutable, edits are
// offset-anchored insertion records plus explicit removed spans, and
// materialization is a single linear merge that also produces the mapping
// segments for source-map regeneration.

use crate::sourcemaps::src::segment_marker::SegmentMarker;

/// Which side of the anchor offset an insertion binds to.
///
/// All left-biased insertions at an offset render before the right-biased
/// ones; within one side, insertion order is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InsertionSide {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Insertion {
    offset: usize,
    side: InsertionSide,
    text: String,
}

/// Output of [`MagicString::generate`]: the rewritten text plus generated
/// position to original position segments.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    pub contents: String,
    pub mappings: Vec<(SegmentMarker, SegmentMarker)>,
}

pub struct MagicString {
    original: String,
    insertions: Vec<Insertion>,
    removals: Vec<(usize, usize)>,
}

impl MagicString {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            insertions: Vec::new(),
            removals: Vec::new(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Insert `text` at `offset`, binding to the content before the offset.
    pub fn append_left(&mut self, offset: usize, text: impl Into<String>) {
        self.insertions.push(Insertion {
            offset,
            side: InsertionSide::Left,
            text: text.into(),
        });
    }

    /// Insert `text` at `offset`, binding to the content after the offset.
    pub fn append_right(&mut self, offset: usize, text: impl Into<String>) {
        self.insertions.push(Insertion {
            offset,
            side: InsertionSide::Right,
            text: text.into(),
        });
    }

    /// Remove the original span `[start, end)`.
    pub fn remove(&mut self, start: usize, end: usize) {
        if start < end {
            self.removals.push((start, end.min(self.original.len())));
        }
    }

    pub fn has_edits(&self) -> bool {
        !self.insertions.is_empty() || !self.removals.is_empty()
    }

    /// Materialize the buffer: one pass over the original text, splicing
    /// insertions in (left before right at equal offsets, otherwise stable)
    /// and skipping removed spans. Emits a mapping segment wherever output
    /// resumes from original content.
    pub fn generate(&self) -> GeneratedOutput {
        let mut insertions: Vec<&Insertion> = self.insertions.iter().collect();
        insertions.sort_by_key(|ins| (ins.offset, ins.side));

        let mut removals = self.removals.clone();
        removals.sort_unstable();
        let removals = merge_spans(removals);

        let mut contents = String::with_capacity(self.original.len());
        let mut mappings = Vec::new();

        let mut gen_line: u32 = 0;
        let mut gen_column: u32 = 0;
        let mut orig_line: u32 = 0;
        let mut orig_column: u32 = 0;

        let mut next_insertion = 0;
        let mut next_removal = 0;
        let mut skip_until: Option<usize> = None;
        let mut needs_mapping = true;

        for (byte_idx, c) in self.original.char_indices() {
            while next_insertion < insertions.len()
                && insertions[next_insertion].offset <= byte_idx
            {
                let text = &insertions[next_insertion].text;
                contents.push_str(text);
                advance(text, &mut gen_line, &mut gen_column);
                next_insertion += 1;
                needs_mapping = true;
            }

            if skip_until.is_some_and(|end| byte_idx >= end) {
                skip_until = None;
                needs_mapping = true;
            }
            if skip_until.is_none() {
                while next_removal < removals.len() && removals[next_removal].0 <= byte_idx {
                    if byte_idx < removals[next_removal].1 {
                        skip_until = Some(removals[next_removal].1);
                    }
                    next_removal += 1;
                }
            }

            if skip_until.is_some() {
                // Removed content advances only the original position.
                advance_char(c, &mut orig_line, &mut orig_column);
                continue;
            }

            if needs_mapping {
                mappings.push((
                    SegmentMarker::new(gen_line, gen_column),
                    SegmentMarker::new(orig_line, orig_column),
                ));
                needs_mapping = false;
            }
            contents.push(c);
            advance_char(c, &mut gen_line, &mut gen_column);
            advance_char(c, &mut orig_line, &mut orig_column);
            if c == '\n' {
                needs_mapping = true;
            }
        }

        while next_insertion < insertions.len() {
            let text = &insertions[next_insertion].text;
            contents.push_str(text);
            advance(text, &mut gen_line, &mut gen_column);
            next_insertion += 1;
        }

        GeneratedOutput { contents, mappings }
    }
}

fn advance(text: &str, line: &mut u32, column: &mut u32) {
    for c in text.chars() {
        advance_char(c, line, column);
    }
}

fn advance_char(c: char, line: &mut u32, column: &mut u32) {
    if c == '\n' {
        *line += 1;
        *column = 0;
    } else {
        *column += 1;
    }
}

fn merge_spans(spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}
