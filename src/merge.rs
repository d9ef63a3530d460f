//! Combines adjacent minimal edits which together express one linguistic change.
//!
//! The aligner produces the smallest possible edits, e.g. `[to -> eating] [eat -> ]`. The [Merger] joins these into
//! `[to eat -> eating]` before classification. MATCH edits are boundaries: nothing is merged across them.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    edit::{Edit, Operation},
    predicate::{
        all_tokens, is_delete, is_insert, of_size_one_to_one, one_sided_single, pos_in, tag_in,
    },
    types::{Pos, Tag, Token},
    utils, Error,
};

/// Options for a [Merger].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Maximum number of tokens on either side of a merged edit.
    pub max_span: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions { max_span: 6 }
    }
}

/// Why two edits were merged. The variants are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeReason {
    /// Every token is a particle, auxiliary or verb, e.g. `[to eat -> eating]`.
    VerbPhrase,
    /// The sides only differ in case, whitespace, apostrophes or hyphens, e.g. `[do n't -> dont]`.
    Orthography,
    /// A possessive suffix joining the noun change it attaches to, e.g. `[friends -> friend 's]`.
    Possessive,
    /// Consecutive insertions or consecutive deletions.
    OneSidedRun,
}

impl fmt::Display for MergeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeReason::VerbPhrase => "verb phrase",
            MergeReason::Orthography => "orthography",
            MergeReason::Possessive => "possessive",
            MergeReason::OneSidedRun => "one-sided run",
        };
        write!(f, "{}", name)
    }
}

const PART_AUX_OR_VERB: &[Pos] = &[Pos::Part, Pos::Aux, Pos::Verb];

fn is_verb_phrase(union: &Edit) -> bool {
    let (source, target) = union.size();
    source > 0 && target > 0 && all_tokens(pos_in(PART_AUX_OR_VERB))(union)
}

fn folded_equal(edit: &Edit) -> bool {
    let fold =
        |tokens: &[Token]| utils::folded_concat_without(tokens, utils::is_apostrophe_or_hyphen);
    fold(edit.source().tokens()) == fold(edit.target().tokens())
}

/// The union is an orthographic variant while neither part is one on its own. A part which already is, e.g.
/// `[Cat -> cat]`, is a finished edit and stays apart from its neighbour.
fn is_orthography(first: &Edit, second: &Edit, union: &Edit) -> bool {
    folded_equal(union) && !folded_equal(first) && !folded_equal(second)
}

/// `second` is a lone possessive suffix and `first` the single word it attaches to, so the union is one word against
/// word plus suffix.
fn is_possessive(first: &Edit, second: &Edit, union: &Edit) -> bool {
    one_sided_single(second)
        && all_tokens(tag_in(&[Tag::Pos]))(second)
        && of_size_one_to_one(first)
        && matches!(union.size(), (1, 2) | (2, 1))
}

/// Merges runs of adjacent non-MATCH edits.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Creates a new merger.
    ///
    /// # Errors
    /// - If `max_span` is zero.
    pub fn new(options: MergeOptions) -> Result<Self, Error> {
        if options.max_span == 0 {
            return Err(Error::InvalidOption(
                "max_span must be at least one".into(),
            ));
        }

        Ok(Merger { options })
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Determines why `first` and `second` should be merged into `union`, if at all.
    fn reason(&self, first: &Edit, second: &Edit, union: &Edit) -> Option<MergeReason> {
        let (source, target) = union.size();
        if source > self.options.max_span || target > self.options.max_span {
            return None;
        }

        if is_verb_phrase(union) {
            Some(MergeReason::VerbPhrase)
        } else if is_orthography(first, second, union) {
            Some(MergeReason::Orthography)
        } else if is_possessive(first, second, union) {
            Some(MergeReason::Possessive)
        } else if (is_insert(first) && is_insert(second)) || (is_delete(first) && is_delete(second))
        {
            Some(MergeReason::OneSidedRun)
        } else {
            None
        }
    }

    /// One greedy left-to-right pass. Returns the new edits and whether anything was merged.
    fn pass<'t>(&self, edits: &[Edit<'t>]) -> (Vec<Edit<'t>>, bool) {
        let mut output = Vec::with_capacity(edits.len());
        let mut current: Option<Edit<'t>> = None;
        let mut changed = false;

        for edit in edits {
            if edit.operation() == Operation::Match {
                output.extend(current.take());
                output.push(edit.clone());
                continue;
            }

            let acc = match current.take() {
                Some(acc) => acc,
                None => {
                    current = Some(edit.clone());
                    continue;
                }
            };

            let merged = acc
                .merge(edit)
                .and_then(|union| self.reason(&acc, edit, &union).map(|reason| (union, reason)));

            match merged {
                Some((union, reason)) => {
                    debug!("merging {:?} and {:?} ({})", acc, edit, reason);
                    changed = true;

                    // a merge can cancel out, e.g. deleting and inserting the same word
                    if union.operation() == Operation::Match {
                        output.push(union);
                    } else {
                        current = Some(union);
                    }
                }
                None => {
                    output.push(acc);
                    current = Some(edit.clone());
                }
            }
        }

        output.extend(current);
        (output, changed)
    }

    /// Merges the edits of one sentence pair. The edits must be ordered by position.
    /// The result covers the same tokens in the same order and merging it again is a no-op.
    pub fn merge<'t>(&self, edits: &[Edit<'t>]) -> Vec<Edit<'t>> {
        let (mut edits, mut changed) = self.pass(edits);

        while changed {
            let (next, next_changed) = self.pass(&edits);
            edits = next;
            changed = next_changed;
        }

        edits
    }
}
