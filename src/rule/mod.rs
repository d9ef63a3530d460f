//! The rule table mapping a merged [Edit] to exactly one [Category].
//!
//! Rules are evaluated in a fixed order and the first rule returning a category wins. Reordering the table changes
//! classification results.

use enum_dispatch::enum_dispatch;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    edit::{Edit, Operation},
    lexicon::{Lemmatizer, WordList},
    Error,
};
use category::{Category, RuleId, Selector};

pub mod category;
pub mod morph;
pub mod pos;
pub mod token;

use morph::*;
use pos::PartOfSpeech;
use token::*;

/// A single classification rule.
#[enum_dispatch]
pub trait Classify: Send + Sync {
    /// The id of this rule. Its category is the one the rule usually assigns.
    fn id(&self) -> RuleId;

    /// Returns the category of `edit` if this rule applies to it.
    fn apply(&self, edit: &Edit) -> Option<Category>;
}

#[enum_dispatch(Classify)]
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Rule {
    VerbForm,
    InfinitivalTo,
    InfinitivalPhrase,
    VerbPhrasal,
    Inflection,
    ComparativeForm,
    AdjectiveNounNumber,
    DeterminerPronoun,
    Orthography,
    Spelling,
    Contraction,
    Possessive,
    WordOrder,
    NounNumber,
    AdjectiveDegree,
    SubjectVerbAgreement,
    VerbTense,
    Derivation,
    PartOfSpeech,
}

/// Options for a [Rules] table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesOptions {
    /// Minimum character edit ratio (exclusive) for an edit to count as a misspelling.
    pub spelling_threshold: f32,
    /// Rules to use. All rules are used if this is empty.
    pub ids: Vec<Selector>,
    /// Rules to ignore.
    pub ignore_ids: Vec<Selector>,
}

impl Default for RulesOptions {
    fn default() -> Self {
        RulesOptions {
            spelling_threshold: 0.5,
            ids: Vec::new(),
            ignore_ids: Vec::new(),
        }
    }
}

/// An ordered table of rules.
#[derive(Debug)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// Creates a table from rules in priority order.
    ///
    /// # Errors
    /// - If `rules` is empty.
    pub fn new(rules: Vec<Rule>) -> Result<Self, Error> {
        if rules.is_empty() {
            return Err(Error::EmptyRules);
        }

        Ok(Rules { rules })
    }

    /// The English rule table, filtered by the selectors in `options`.
    ///
    /// # Errors
    /// - If the spelling threshold is not in `[0, 1]`.
    /// - If the selectors leave no rule.
    pub fn english(
        lemmatizer: Arc<dyn Lemmatizer>,
        word_list: Arc<dyn WordList>,
        options: &RulesOptions,
    ) -> Result<Self, Error> {
        if !(0.0f32..=1.0).contains(&options.spelling_threshold) {
            return Err(Error::InvalidOption(format!(
                "spelling threshold must be in [0, 1], got {}",
                options.spelling_threshold
            )));
        }

        let mut rules: Vec<Rule> = vec![
            VerbForm::new(lemmatizer.clone()).into(),
            InfinitivalTo.into(),
            InfinitivalPhrase.into(),
            VerbPhrasal.into(),
            Inflection::verb(word_list.clone()).into(),
            ComparativeForm::new(lemmatizer.clone()).into(),
            AdjectiveNounNumber.into(),
            DeterminerPronoun.into(),
            Orthography.into(),
            Spelling::new(word_list.clone(), options.spelling_threshold).into(),
            Contraction.into(),
            Possessive.into(),
            WordOrder.into(),
            Inflection::noun(word_list).into(),
            NounNumber.into(),
            AdjectiveDegree.into(),
            SubjectVerbAgreement.into(),
            VerbTense::new(lemmatizer.clone()).into(),
            Derivation::new(lemmatizer).into(),
        ];
        rules.extend(PartOfSpeech::all().into_iter().map(Rule::from));

        for selector in options.ids.iter().chain(options.ignore_ids.iter()) {
            if !rules.iter().any(|rule| selector.is_match(&rule.id())) {
                warn!("selector {:?} does not match any rule", selector);
            }
        }

        rules.retain(|rule| {
            let id = rule.id();
            (options.ids.is_empty() || options.ids.iter().any(|x| x.is_match(&id)))
                && !options.ignore_ids.iter().any(|x| x.is_match(&id))
        });

        Rules::new(rules)
    }

    /// All rules ordered by priority.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns an iterator over all rules matching the selector.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = &'a Rule> {
        self.rules
            .iter()
            .filter(move |rule| selector.is_match(&rule.id()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Assigns categories to edits using a [Rules] table.
#[derive(Debug)]
pub struct Classifier {
    rules: Rules,
}

impl Classifier {
    pub fn new(rules: Rules) -> Self {
        Classifier { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Determines the category of an edit. MATCH edits are `NONE`, edits no rule applies to are `UNK`.
    pub fn category(&self, edit: &Edit) -> Category {
        if edit.operation() == Operation::Match {
            return Category::None;
        }

        self.rules
            .rules
            .iter()
            .find_map(|rule| {
                rule.apply(edit).map(|category| {
                    trace!("{} classified {:?} as {}", rule.id(), edit, category);
                    category
                })
            })
            .unwrap_or(Category::Unknown)
    }

    /// Returns a copy of `edit` with its category set.
    pub fn classify<'t>(&self, edit: &Edit<'t>) -> Edit<'t> {
        edit.with_category(self.category(edit))
    }
}
