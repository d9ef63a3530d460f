//! Fallback rules for edits within one word class, e.g. `[in -> on]` is a preposition error.

use super::{
    category::{Category, RuleId},
    Classify,
};
use crate::{edit::Edit, predicate::*, types::Pos};

/// All tokens of the edit belong to one word class. There is one instance of this rule per class, each filed under
/// the category it assigns.
#[derive(Debug, Clone)]
pub struct PartOfSpeech {
    category: Category,
    pos: &'static [Pos],
}

impl PartOfSpeech {
    pub fn new(category: Category, pos: &'static [Pos]) -> Self {
        PartOfSpeech { category, pos }
    }

    /// One rule per word class.
    pub fn all() -> Vec<Self> {
        vec![
            PartOfSpeech::new(Category::Adj, &[Pos::Adj]),
            PartOfSpeech::new(Category::Adv, &[Pos::Adv]),
            PartOfSpeech::new(Category::Conj, &[Pos::Cconj, Pos::Sconj]),
            PartOfSpeech::new(Category::Det, &[Pos::Det]),
            PartOfSpeech::new(Category::Noun, &[Pos::Noun, Pos::Propn]),
            PartOfSpeech::new(Category::Part, &[Pos::Part]),
            PartOfSpeech::new(Category::Prep, &[Pos::Adp]),
            PartOfSpeech::new(Category::Pron, &[Pos::Pron]),
            PartOfSpeech::new(Category::Punct, &[Pos::Punct]),
            PartOfSpeech::new(Category::Verb, &[Pos::Verb, Pos::Aux]),
        ]
    }
}

impl Classify for PartOfSpeech {
    fn id(&self) -> RuleId {
        RuleId::new(self.category, "part_of_speech")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if all_tokens(pos_in(self.pos))(edit) {
            Some(self.category)
        } else {
            None
        }
    }
}
