//! Rule-based classification of the edits between a sentence and its correction.
//! # Overview
//!
//! errtag has the following core abstractions:
//! - [Doc][types::Doc]s of [Token][types::Token]s carrying the linguistic features (POS, fine-grained tag, lemma,
//!   dependency label and head) computed by an external NLP pipeline.
//! - [Edit][edit::Edit]s pairing a source span with a target span, as produced by an external aligner.
//! - A [Merger][merge::Merger] combining adjacent minimal edits that belong to the same linguistic change.
//! - A [Classifier][rule::Classifier] running an ordered table of [Rules][rule::Rules] over a merged edit and
//!   assigning exactly one [Category][rule::category::Category].
//! - An [ErrorMarker][mark::ErrorMarker] locating the edit in the source text.
//! - An [Annotator][annotate::Annotator] tying everything together.
//!
//! # Examples
//!
//! Classify a single edit:
//!
//! ```
//! use std::sync::Arc;
//! use errtag::edit::{Edit, Segment};
//! use errtag::lexicon::{LemmaTable, WordSet};
//! use errtag::rule::{category::Category, Classifier, Rules, RulesOptions};
//! use errtag::types::{Doc, Pos, Tag, Token};
//!
//! let source = Doc::new(vec![Token::new("recieve").pos(Pos::Noun).tag(Tag::Nn).lemma("recieve")]);
//! let target = Doc::new(vec![Token::new("receive").pos(Pos::Verb).tag(Tag::Vb).lemma("receive")]);
//!
//! let rules = Rules::english(
//!     Arc::new(LemmaTable::default()),
//!     Arc::new(WordSet::new(vec!["receive"])),
//!     &RulesOptions::default(),
//! )?;
//! let classifier = Classifier::new(rules);
//!
//! let edit = Edit::new(
//!     Segment::new(source.tokens(), 0..1)?,
//!     Segment::new(target.tokens(), 0..1)?,
//! )?;
//! assert_eq!(classifier.classify(&edit).category(), Category::Spell);
//! # Ok::<(), errtag::Error>(())
//! ```

// #![warn(missing_docs)]
use std::io;

use thiserror::Error;

pub mod annotate;
pub mod edit;
pub mod lexicon;
pub mod mark;
pub mod merge;
pub mod predicate;
pub mod rule;
pub mod types;
pub(crate) mod utils;

pub use annotate::{Aligner, Annotation, Annotator};
pub use edit::{Edit, Operation, Segment};
pub use rule::{category::Category, Classifier, Rules};

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Category(#[from] rule::category::Error),
    /// An edit with nothing on either side.
    #[error("edit at source position {position} is empty on both sides")]
    EmptyEdit { position: usize },
    #[error("segment {start}..{end} is out of bounds for a sentence of {len} tokens")]
    SegmentOutOfBounds { start: usize, end: usize, len: usize },
    #[error("token {index} is invalid: {reason}")]
    InvalidToken { index: usize, reason: String },
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("rule set is empty")]
    EmptyRules,
}
