//! Locates edits in the source text.

use serde::{Deserialize, Serialize};

use crate::{edit::Edit, types::Doc};

/// A character range in the source text. `start == end` for insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CharOffset {
    pub start: usize,
    pub end: usize,
}

impl CharOffset {
    pub fn new(start: usize, end: usize) -> Self {
        CharOffset { start, end }
    }

    /// A zero-width offset.
    pub fn point(position: usize) -> Self {
        CharOffset::new(position, position)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes the [CharOffset] of edits in one source sentence.
#[derive(Debug, Clone, Copy)]
pub struct ErrorMarker<'a> {
    source: &'a Doc,
}

impl<'a> ErrorMarker<'a> {
    pub fn new(source: &'a Doc) -> Self {
        ErrorMarker { source }
    }

    /// The offset of an insertion before the source token at `position`: directly after the preceding token and its
    /// trailing space, or `{0, 0}` if there is no preceding token.
    pub fn insertion_point(&self, position: usize) -> CharOffset {
        let previous = position
            .checked_sub(1)
            .and_then(|i| self.source.tokens().get(i));

        match previous {
            Some(token) => CharOffset::point(token.end_with_space().min(self.source.char_len())),
            None => CharOffset::default(),
        }
    }

    /// The offset of an edit. Spans the source tokens if there are any, otherwise it is the insertion point.
    pub fn mark(&self, edit: &Edit) -> CharOffset {
        let source = edit.source();

        match (source.first(), source.last()) {
            (Some(first), Some(last)) => CharOffset::new(first.char_span.0, last.char_span.1),
            _ => self.insertion_point(source.start()),
        }
    }
}
