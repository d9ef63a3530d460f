//! Aligned pairs of source and target spans.
//!
//! An [Edit] is created by the aligner, combined with its neighbours by the [Merger][crate::merge::Merger] and
//! finally given a [Category] by the [Classifier][crate::rule::Classifier]. Every stage produces new values; an
//! edit is never changed in place.

use itertools::Itertools;
use serde::Serialize;
use std::{fmt, ops::Range};

use crate::{rule::category::Category, types::Token, Error};

/// A contiguous, possibly empty range of tokens from one side of a sentence pair.
/// Keeps a reference to the whole sentence so that an empty segment still knows its position and rules can look at
/// the syntactic context of a token (e.g. its dependents).
#[derive(Clone, Copy, Serialize)]
pub struct Segment<'t> {
    #[serde(skip)]
    sentence: &'t [Token],
    start: usize,
    end: usize,
}

impl<'t> Segment<'t> {
    /// Creates a segment covering `range` of `sentence`.
    ///
    /// # Errors
    /// - If the range is reversed or ends after the sentence.
    pub fn new(sentence: &'t [Token], range: Range<usize>) -> Result<Self, Error> {
        if range.start > range.end || range.end > sentence.len() {
            return Err(Error::SegmentOutOfBounds {
                start: range.start,
                end: range.end,
                len: sentence.len(),
            });
        }

        Ok(Segment {
            sentence,
            start: range.start,
            end: range.end,
        })
    }

    /// The tokens in this segment.
    pub fn tokens(&self) -> &'t [Token] {
        &self.sentence[self.start..self.end]
    }

    /// All tokens of the sentence this segment is drawn from.
    pub fn sentence(&self) -> &'t [Token] {
        self.sentence
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn first(&self) -> Option<&'t Token> {
        self.tokens().first()
    }

    pub fn last(&self) -> Option<&'t Token> {
        self.tokens().last()
    }

    /// The token texts joined by a single space.
    pub fn text(&self) -> String {
        self.tokens().iter().map(|x| x.text.as_str()).join(" ")
    }

    /// Whether `other` is drawn from the same sentence and starts where this segment ends.
    pub fn is_followed_by(&self, other: &Segment) -> bool {
        std::ptr::eq(self.sentence, other.sentence) && self.end == other.start
    }

    fn union(&self, other: &Segment<'t>) -> Segment<'t> {
        Segment {
            sentence: self.sentence,
            start: self.start,
            end: other.end,
        }
    }
}

impl<'t> PartialEq for Segment<'t> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.tokens() == other.tokens()
    }
}

impl<'t> fmt::Debug for Segment<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end, self.text())
    }
}

/// The kind of change an [Edit] represents. Derived from the emptiness and text of its segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    Match,
    Insert,
    Delete,
    Substitute,
}

/// An aligned pair of a source and a target [Segment].
#[derive(Clone, PartialEq, Serialize)]
pub struct Edit<'t> {
    source: Segment<'t>,
    target: Segment<'t>,
    category: Category,
}

impl<'t> Edit<'t> {
    /// Creates an unclassified edit.
    ///
    /// # Errors
    /// - If both segments are empty.
    pub fn new(source: Segment<'t>, target: Segment<'t>) -> Result<Self, Error> {
        if source.is_empty() && target.is_empty() {
            return Err(Error::EmptyEdit {
                position: source.start(),
            });
        }

        Ok(Edit {
            source,
            target,
            category: Category::Unknown,
        })
    }

    pub fn source(&self) -> &Segment<'t> {
        &self.source
    }

    pub fn target(&self) -> &Segment<'t> {
        &self.target
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn operation(&self) -> Operation {
        match (self.source.is_empty(), self.target.is_empty()) {
            (true, _) => Operation::Insert,
            (false, true) => Operation::Delete,
            (false, false) => {
                let same_text = self.source.len() == self.target.len()
                    && self
                        .source
                        .tokens()
                        .iter()
                        .zip(self.target.tokens())
                        .all(|(a, b)| a.text == b.text);

                if same_text {
                    Operation::Match
                } else {
                    Operation::Substitute
                }
            }
        }
    }

    /// The sizes of the source and target segments.
    pub fn size(&self) -> (usize, usize) {
        (self.source.len(), self.target.len())
    }

    /// All source tokens followed by all target tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &'t Token> {
        self.source.tokens().iter().chain(self.target.tokens().iter())
    }

    pub fn matches<P: Fn(&Edit<'t>) -> bool>(&self, predicate: P) -> bool {
        predicate(self)
    }

    pub fn source_text(&self) -> String {
        self.source.text()
    }

    pub fn target_text(&self) -> String {
        self.target.text()
    }

    /// Returns a copy of this edit with the category set.
    pub fn with_category(&self, category: Category) -> Self {
        Edit {
            source: self.source,
            target: self.target,
            category,
        }
    }

    /// Combines this edit with the edit directly following it on both sides.
    /// Returns `None` if `next` is not adjacent. The combined edit is unclassified.
    pub fn merge(&self, next: &Edit<'t>) -> Option<Self> {
        if self.source.is_followed_by(&next.source) && self.target.is_followed_by(&next.target) {
            Some(Edit {
                source: self.source.union(&next.source),
                target: self.target.union(&next.target),
                category: Category::Unknown,
            })
        } else {
            None
        }
    }
}

impl<'t> fmt::Debug for Edit<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edit")
            .field("operation", &self.operation())
            .field("source", &self.source)
            .field("target", &self.target)
            .field("category", &self.category)
            .finish()
    }
}
