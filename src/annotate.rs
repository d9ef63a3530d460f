//! End-to-end annotation of a sentence pair: align, merge, classify and locate the edits.

use log::debug;
use serde::Serialize;

use crate::{
    edit::{Edit, Operation},
    mark::{CharOffset, ErrorMarker},
    merge::Merger,
    rule::{category::Category, Classifier},
    types::{Doc, Token},
    utils::parallelism::MaybeParallelRefIterator,
    Error,
};

/// Computes the minimal edits between two token sequences. The edits must be ordered by position, cover both
/// sequences completely and may include MATCH edits.
pub trait Aligner: Send + Sync {
    fn align<'t>(&self, source: &'t [Token], target: &'t [Token])
        -> Result<Vec<Edit<'t>>, Error>;
}

/// A classified edit and its location in the source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation<'t> {
    edit: Edit<'t>,
    offset: CharOffset,
}

impl<'t> Annotation<'t> {
    pub fn edit(&self) -> &Edit<'t> {
        &self.edit
    }

    pub fn category(&self) -> Category {
        self.edit.category()
    }

    pub fn offset(&self) -> CharOffset {
        self.offset
    }

    pub fn source_text(&self) -> String {
        self.edit.source_text()
    }

    pub fn target_text(&self) -> String {
        self.edit.target_text()
    }

    /// Whether this annotation marks an error. Only `NONE` is not an error, `UNK` is.
    pub fn has_error(&self) -> bool {
        self.category() != Category::None
    }
}

/// Runs the whole pipeline for sentence pairs.
pub struct Annotator<A: Aligner> {
    aligner: A,
    merger: Merger,
    classifier: Classifier,
}

impl<A: Aligner> Annotator<A> {
    pub fn new(aligner: A, merger: Merger, classifier: Classifier) -> Self {
        Annotator {
            aligner,
            merger,
            classifier,
        }
    }

    pub fn merger(&self) -> &Merger {
        &self.merger
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Annotates all changes between `source` and `target`, ordered by position.
    ///
    /// # Errors
    /// - If the aligner fails.
    pub fn annotate<'t>(
        &self,
        source: &'t Doc,
        target: &'t Doc,
    ) -> Result<Vec<Annotation<'t>>, Error> {
        let edits = self.aligner.align(source.tokens(), target.tokens())?;
        let merged = self.merger.merge(&edits);
        let marker = ErrorMarker::new(source);

        let annotations: Vec<_> = merged
            .iter()
            .filter(|edit| edit.operation() != Operation::Match)
            .map(|edit| Annotation {
                edit: self.classifier.classify(edit),
                offset: marker.mark(edit),
            })
            .collect();

        debug!(
            "annotated {:?}: {} aligned edits, {} merged, {} annotations",
            source.text(),
            edits.len(),
            merged.len(),
            annotations.len()
        );

        Ok(annotations)
    }

    /// Annotates many sentence pairs independently. An error only affects the result for its own pair.
    /// Runs in parallel if the `rayon` feature is enabled; the output order is the input order in any case.
    pub fn annotate_batch<'t>(
        &self,
        pairs: &'t [(Doc, Doc)],
    ) -> Vec<Result<Vec<Annotation<'t>>, Error>> {
        pairs
            .maybe_par_iter()
            .map(|(source, target)| self.annotate(source, target))
            .collect()
    }
}
