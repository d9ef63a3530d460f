//! Rules which look at the surface of the tokens: pronoun choice, orthography, spelling, contractions, possessives and
//! word order.

use derivative::Derivative;
use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use super::{
    category::{Category, RuleId},
    Classify,
};
use crate::{
    edit::Edit,
    lexicon::WordList,
    predicate::*,
    types::{DepLabel, Pos, Tag, Token},
};

lazy_static! {
    static ref CONTRACTIONS: HashSet<&'static str> =
        ["'d", "'ll", "'m", "n't", "'re", "'s", "'ve"].iter().copied().collect();
    static ref EXPANSIONS: HashMap<&'static str, &'static [&'static str]> = {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert("'d", &["would", "had"]);
        map.insert("'ll", &["will", "shall"]);
        map.insert("'m", &["am"]);
        map.insert("n't", &["not"]);
        map.insert("'re", &["are"]);
        map.insert("'s", &["is", "has", "us"]);
        map.insert("'ve", &["have"]);
        map
    };
}

/// The case-folded text with typographic apostrophes replaced by `'`.
fn normalized(token: &Token) -> String {
    token
        .lower
        .chars()
        .map(|c| if crate::utils::is_apostrophe(c) { '\'' } else { c })
        .collect()
}

fn is_contraction(token: &Token) -> bool {
    !token.is_tag(Tag::Pos) && CONTRACTIONS.contains(normalized(token).as_str())
}

fn is_expansion_of(contraction: &Token, word: &Token) -> bool {
    EXPANSIONS
        .get(normalized(contraction).as_str())
        .map_or(false, |words| words.iter().any(|x| *x == word.lower))
}

/// A substitution between a determiner and a pronoun, e.g. `[His -> his]`. The target's syntactic role decides the
/// category. If the role is neither possessive nor an argument the edit is `UNK` and no later rule is tried.
#[derive(Debug)]
pub struct DeterminerPronoun;

impl Classify for DeterminerPronoun {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Det, "det_pron")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let shape = of_size_one_to_one(edit) && is_substitute(edit);
        if !shape || !pos_set_equals(&[Pos::Det, Pos::Pron])(edit) {
            return None;
        }

        let target = edit.target().first()?;
        let possessive = dep_in(&[DepLabel::Poss, DepLabel::NmodPoss, DepLabel::Nmod]);
        let argument = dep_in(&[
            DepLabel::Nsubj,
            DepLabel::NsubjPass,
            DepLabel::Dobj,
            DepLabel::Obj,
            DepLabel::Pobj,
        ]);

        Some(if possessive(target) {
            Category::Det
        } else if argument(target) {
            Category::Pron
        } else {
            Category::Unknown
        })
    }
}

/// Differences only in case or whitespace, e.g. `[Bestfriend -> best friend]`, or a missing contraction apostrophe,
/// e.g. `[dont -> do n't]`.
#[derive(Debug)]
pub struct Orthography;

impl Classify for Orthography {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Orth, "case_whitespace")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if !is_substitute(edit) {
            return None;
        }

        let apostrophe_shape = matches!(edit.size(), (1, 1) | (1, 2) | (2, 1));

        if folded_text_equal(edit)
            || (apostrophe_shape && folded_text_equal_without_apostrophes(edit))
        {
            Some(Category::Orth)
        } else {
            None
        }
    }
}

/// A misspelled word, e.g. `[recieve -> receive]`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Spelling {
    #[derivative(Debug = "ignore")]
    word_list: Arc<dyn WordList>,
    threshold: f32,
}

impl Spelling {
    /// Creates the rule. Words must have a character edit ratio strictly above `threshold`.
    pub fn new(word_list: Arc<dyn WordList>, threshold: f32) -> Self {
        Spelling {
            word_list,
            threshold,
        }
    }
}

impl Classify for Spelling {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Spell, "non_word")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if !(of_size_one_to_one(edit) && is_substitute(edit)) {
            return None;
        }

        let source = edit.source().first()?;
        let target = edit.target().first()?;

        if source.is_alpha
            && !self.word_list.contains(&source.text)
            && !self.word_list.contains(&source.lower)
            && source.different_lemma(target)
            && char_ratio_above(self.threshold)(edit)
        {
            Some(Category::Spell)
        } else {
            None
        }
    }
}

/// A missing or unnecessary contraction, or a contraction used instead of the full form, e.g. `[n't -> not]`.
#[derive(Debug)]
pub struct Contraction;

impl Classify for Contraction {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Contr, "contraction")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let one_sided = is_insert(edit) || is_delete(edit);

        let matched = if one_sided {
            all_tokens(is_contraction)(edit)
        } else if of_size_one_to_one(edit) && is_substitute(edit) {
            let source = edit.source().first()?;
            let target = edit.target().first()?;
            is_expansion_of(source, target) || is_expansion_of(target, source)
        } else {
            false
        };

        if matched {
            Some(Category::Contr)
        } else {
            None
        }
    }
}

/// Any edit involving a possessive suffix, e.g. `[friends -> friend 's]`.
#[derive(Debug)]
pub struct Possessive;

impl Classify for Possessive {
    fn id(&self) -> RuleId {
        RuleId::new(Category::NounPoss, "possessive")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if any_token(tag_in(&[Tag::Pos]))(edit) {
            Some(Category::NounPoss)
        } else {
            None
        }
    }
}

/// The same words in a different order, e.g. `[only can -> can only]`.
#[derive(Debug)]
pub struct WordOrder;

impl Classify for WordOrder {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Wo, "word_order")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source_len, target_len) = edit.size();
        if source_len < 2 || target_len < 2 || edit.source_text() == edit.target_text() {
            return None;
        }

        let sorted = |tokens: &[Token]| {
            let mut words: Vec<_> = tokens.iter().map(|x| x.lower.clone()).collect();
            words.sort_unstable();
            words
        };

        if sorted(edit.source().tokens()) == sorted(edit.target().tokens()) {
            Some(Category::Wo)
        } else {
            None
        }
    }
}
