//! Reusable tests over [Edit]s and [Token]s which the rules are built from.
//!
//! All predicates are pure. A predicate depending on a feature the NLP pipeline did not set is `false`.
//! Rules chain predicates with `&&` so evaluation stops at the first failing one and later predicates can rely on the
//! shape guaranteed by earlier ones.

use std::collections::HashSet;

use crate::{
    edit::{Edit, Operation},
    lexicon::Lemmatizer,
    types::{DepLabel, Pos, Tag, Token},
    utils,
};

/// Conjunction of two predicates. `b` is only evaluated if `a` holds.
pub fn and<T: ?Sized>(a: impl Fn(&T) -> bool, b: impl Fn(&T) -> bool) -> impl Fn(&T) -> bool {
    move |x| a(x) && b(x)
}

/// Disjunction of two predicates. `b` is only evaluated if `a` does not hold.
pub fn or<T: ?Sized>(a: impl Fn(&T) -> bool, b: impl Fn(&T) -> bool) -> impl Fn(&T) -> bool {
    move |x| a(x) || b(x)
}

pub fn not<T: ?Sized>(a: impl Fn(&T) -> bool) -> impl Fn(&T) -> bool {
    move |x| !a(x)
}

// shape

pub fn of_size(source: usize, target: usize) -> impl Fn(&Edit) -> bool {
    move |edit| edit.size() == (source, target)
}

pub fn of_max_size(source: usize, target: usize) -> impl Fn(&Edit) -> bool {
    move |edit| {
        let (s, t) = edit.size();
        s <= source && t <= target
    }
}

pub fn of_size_one_to_one(edit: &Edit) -> bool {
    edit.size() == (1, 1)
}

/// Exactly one token on exactly one side.
pub fn one_sided_single(edit: &Edit) -> bool {
    matches!(edit.size(), (1, 0) | (0, 1))
}

pub fn is_substitute(edit: &Edit) -> bool {
    edit.operation() == Operation::Substitute
}

pub fn is_insert(edit: &Edit) -> bool {
    edit.operation() == Operation::Insert
}

pub fn is_delete(edit: &Edit) -> bool {
    edit.operation() == Operation::Delete
}

// token features

pub fn pos_in(set: &'static [Pos]) -> impl Fn(&Token) -> bool {
    move |token| token.pos.map_or(false, |pos| set.contains(&pos))
}

pub fn tag_in(set: &'static [Tag]) -> impl Fn(&Token) -> bool {
    move |token| token.tag.map_or(false, |tag| set.contains(&tag))
}

pub fn dep_in(set: &'static [DepLabel]) -> impl Fn(&Token) -> bool {
    move |token| token.dep.map_or(false, |dep| set.contains(&dep))
}

pub fn is_gerund_or_participle(token: &Token) -> bool {
    tag_in(&[Tag::Vbg, Tag::Vbn])(token)
}

/// Whether some token of `sentence` before `token` is an auxiliary whose head is `token`.
pub fn preceded_by_dependent_aux(token: &Token, sentence: &[Token]) -> bool {
    sentence[..token.index.min(sentence.len())]
        .iter()
        .any(|other| other.head == Some(token.index) && other.dep.map_or(false, |x| x.is_aux()))
}

/// Whether both tokens have a POS and the POS differ.
pub fn different_pos(a: &Token, b: &Token) -> bool {
    matches!((a.pos, b.pos), (Some(x), Some(y)) if x != y)
}

// edit features

pub fn all_tokens(predicate: impl Fn(&Token) -> bool) -> impl Fn(&Edit) -> bool {
    move |edit| edit.tokens().all(|x| predicate(x))
}

pub fn any_token(predicate: impl Fn(&Token) -> bool) -> impl Fn(&Edit) -> bool {
    move |edit| edit.tokens().any(|x| predicate(x))
}

/// The set of POS of all tokens on both sides, or `None` if any token lacks a POS.
pub fn pos_set(edit: &Edit) -> Option<HashSet<Pos>> {
    edit.tokens().map(|x| x.pos).collect()
}

pub fn pos_set_equals(expected: &'static [Pos]) -> impl Fn(&Edit) -> bool {
    move |edit| {
        pos_set(edit).map_or(false, |set| {
            set.len() == expected.len() && expected.iter().all(|x| set.contains(x))
        })
    }
}

/// Whether the last tokens on both sides have the same feature lemma.
pub fn last_tokens_same_lemma(edit: &Edit) -> bool {
    match (edit.source().last(), edit.target().last()) {
        (Some(a), Some(b)) => a.same_lemma(b),
        _ => false,
    }
}

/// Whether the last tokens on both sides have a different feature lemma.
pub fn last_tokens_differ_lemma(edit: &Edit) -> bool {
    match (edit.source().last(), edit.target().last()) {
        (Some(a), Some(b)) => a.different_lemma(b),
        _ => false,
    }
}

/// Whether the first tokens of both sides have the same feature lemma.
pub fn first_tokens_same_lemma(edit: &Edit) -> bool {
    match (edit.source().first(), edit.target().first()) {
        (Some(a), Some(b)) => a.same_lemma(b),
        _ => false,
    }
}

/// Candidate lemmas of a token: its own lemma feature plus whatever the lemmatizer knows about its text.
pub fn lemma_candidates(token: &Token, lemmatizer: &dyn Lemmatizer) -> HashSet<String> {
    let mut lemmas = lemmatizer.lemmas(&token.lower);
    if let Some(lemma) = &token.lemma {
        lemmas.insert(lemma.to_lowercase());
    }
    lemmas
}

/// Whether the lemma candidates of all source tokens and of all target tokens intersect.
pub fn lemmas_intersect(lemmatizer: &dyn Lemmatizer) -> impl Fn(&Edit) -> bool + '_ {
    move |edit| {
        let collect = |tokens: &[Token]| -> HashSet<String> {
            tokens
                .iter()
                .flat_map(|x| lemma_candidates(x, lemmatizer))
                .collect()
        };

        !collect(edit.source().tokens()).is_disjoint(&collect(edit.target().tokens()))
    }
}

/// Whether the lemma candidates of the last source and last target token intersect.
pub fn last_tokens_lemmas_intersect(lemmatizer: &dyn Lemmatizer) -> impl Fn(&Edit) -> bool + '_ {
    move |edit| match (edit.source().last(), edit.target().last()) {
        (Some(a), Some(b)) => {
            !lemma_candidates(a, lemmatizer).is_disjoint(&lemma_candidates(b, lemmatizer))
        }
        _ => false,
    }
}

// text

/// Case-folded, trimmed concatenations of both sides are equal, e.g. `[Bestfriend -> best friend]`.
pub fn folded_text_equal(edit: &Edit) -> bool {
    utils::folded_concat(edit.source().tokens()) == utils::folded_concat(edit.target().tokens())
}

/// Like [folded_text_equal] but ignoring apostrophes, e.g. `[dont -> do n't]`.
pub fn folded_text_equal_without_apostrophes(edit: &Edit) -> bool {
    utils::folded_concat_without(edit.source().tokens(), utils::is_apostrophe)
        == utils::folded_concat_without(edit.target().tokens(), utils::is_apostrophe)
}

/// Whether the first source and first target token have a character edit ratio strictly above `threshold`.
pub fn char_ratio_above(threshold: f32) -> impl Fn(&Edit) -> bool {
    move |edit| match (edit.source().first(), edit.target().first()) {
        (Some(a), Some(b)) => utils::char_edit_ratio(&a.text, &b.text) > threshold,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edit::Segment, lexicon::LemmaTable, types::Doc};

    fn fixture() -> (Doc, Doc) {
        let source = Doc::new(vec![
            Token::new("He").pos(Pos::Pron).dep(DepLabel::Nsubj, 2),
            Token::new("has").pos(Pos::Aux).tag(Tag::Vbz).dep(DepLabel::Aux, 2),
            Token::new("eating").pos(Pos::Verb).tag(Tag::Vbg).lemma("eat"),
        ]);
        let target = Doc::new(vec![
            Token::new("He").pos(Pos::Pron).dep(DepLabel::Nsubj, 2),
            Token::new("has").pos(Pos::Aux).tag(Tag::Vbz).dep(DepLabel::Aux, 2),
            Token::new("eaten").pos(Pos::Verb).tag(Tag::Vbn).lemma("eat"),
        ]);
        (source, target)
    }

    #[test]
    fn shape_predicates() {
        let (source, target) = fixture();
        let edit = Edit::new(
            Segment::new(source.tokens(), 2..3).unwrap(),
            Segment::new(target.tokens(), 2..3).unwrap(),
        )
        .unwrap();

        assert!(of_size_one_to_one(&edit));
        assert!(of_size(1, 1)(&edit));
        assert!(of_max_size(2, 2)(&edit));
        assert!(!of_max_size(0, 2)(&edit));
        assert!(is_substitute(&edit));
        assert!(!is_insert(&edit) && !is_delete(&edit));
        assert!(and(is_substitute, of_size_one_to_one)(&edit));
        assert!(or(is_insert, of_size_one_to_one)(&edit));
        assert!(not(is_insert)(&edit));
    }

    #[test]
    fn dependent_aux_is_found() {
        let (source, _) = fixture();
        let tokens = source.tokens();

        assert!(preceded_by_dependent_aux(&tokens[2], tokens));
        assert!(!preceded_by_dependent_aux(&tokens[1], tokens));
    }

    #[test]
    fn missing_features_are_false() {
        let doc = Doc::new(vec![Token::new("run"), Token::new("runs")]);
        let edit = Edit::new(
            Segment::new(doc.tokens(), 0..1).unwrap(),
            Segment::new(doc.tokens(), 1..2).unwrap(),
        )
        .unwrap();

        assert!(!pos_in(&[Pos::Verb])(&doc.tokens()[0]));
        assert!(!last_tokens_same_lemma(&edit));
        assert!(!last_tokens_differ_lemma(&edit));
        assert!(pos_set(&edit).is_none());
        assert!(!different_pos(&doc.tokens()[0], &doc.tokens()[1]));
    }

    #[test]
    fn lemma_intersection_uses_lemmatizer() {
        let doc = Doc::new(vec![Token::new("saw"), Token::new("seeing")]);
        let edit = Edit::new(
            Segment::new(doc.tokens(), 0..1).unwrap(),
            Segment::new(doc.tokens(), 1..2).unwrap(),
        )
        .unwrap();

        let empty = LemmaTable::default();
        let table = LemmaTable::new(vec![("saw", "see"), ("saw", "saw"), ("seeing", "see")]);

        assert!(!lemmas_intersect(&empty)(&edit));
        assert!(lemmas_intersect(&table)(&edit));
        assert!(last_tokens_lemmas_intersect(&table)(&edit));
    }
}
