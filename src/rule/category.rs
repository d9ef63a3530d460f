//! The closed set of error [Category]s and a [Selector] to pick rules by category or by rule id.
//!
//! Rule ids have two levels:
//! ```text
//! VERB_FORM/infinitival_to
//! ^^^^^^^^^ ^^^^^^^^^^^^^^
//! category  rule name
//! ```

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("error parsing selector from string: {0:?}")]
    ParseSelector(String),
}

/// A grammatical error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Adj,
    AdjForm,
    Adv,
    Conj,
    Contr,
    Det,
    Morph,
    Noun,
    NounInfl,
    NounNum,
    NounPoss,
    Orth,
    Part,
    Prep,
    Pron,
    Punct,
    Spell,
    Verb,
    VerbForm,
    VerbInfl,
    VerbSva,
    VerbTense,
    Wo,
    /// No rule applies.
    Unknown,
    /// Not an error, e.g. a match.
    None,
}

impl Category {
    /// All categories except the sentinels, in alphabetical order.
    pub fn all_errors() -> impl Iterator<Item = Category> {
        [
            Category::Adj,
            Category::AdjForm,
            Category::Adv,
            Category::Conj,
            Category::Contr,
            Category::Det,
            Category::Morph,
            Category::Noun,
            Category::NounInfl,
            Category::NounNum,
            Category::NounPoss,
            Category::Orth,
            Category::Part,
            Category::Prep,
            Category::Pron,
            Category::Punct,
            Category::Spell,
            Category::Verb,
            Category::VerbForm,
            Category::VerbInfl,
            Category::VerbSva,
            Category::VerbTense,
            Category::Wo,
        ]
        .iter()
        .copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adj => "ADJ",
            Category::AdjForm => "ADJ_FORM",
            Category::Adv => "ADV",
            Category::Conj => "CONJ",
            Category::Contr => "CONTR",
            Category::Det => "DET",
            Category::Morph => "MORPH",
            Category::Noun => "NOUN",
            Category::NounInfl => "NOUN_INFL",
            Category::NounNum => "NOUN_NUM",
            Category::NounPoss => "NOUN_POSS",
            Category::Orth => "ORTH",
            Category::Part => "PART",
            Category::Prep => "PREP",
            Category::Pron => "PRON",
            Category::Punct => "PUNCT",
            Category::Spell => "SPELL",
            Category::Verb => "VERB",
            Category::VerbForm => "VERB_FORM",
            Category::VerbInfl => "VERB_INFL",
            Category::VerbSva => "VERB_SVA",
            Category::VerbTense => "VERB_TENSE",
            Category::Wo => "WO",
            Category::Unknown => "UNK",
            Category::None => "NONE",
        }
    }

    /// Whether this is one of the two sentinels `UNK` and `NONE`.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Category::Unknown | Category::None)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.to_uppercase().replace(':', "_").as_str() {
            "ADJ" => Category::Adj,
            "ADJ_FORM" => Category::AdjForm,
            "ADV" => Category::Adv,
            "CONJ" => Category::Conj,
            "CONTR" => Category::Contr,
            "DET" => Category::Det,
            "MORPH" => Category::Morph,
            "NOUN" => Category::Noun,
            "NOUN_INFL" => Category::NounInfl,
            "NOUN_NUM" => Category::NounNum,
            "NOUN_POSS" => Category::NounPoss,
            "ORTH" => Category::Orth,
            "PART" => Category::Part,
            "PREP" => Category::Prep,
            "PRON" => Category::Pron,
            "PUNCT" => Category::Punct,
            "SPELL" => Category::Spell,
            "VERB" => Category::Verb,
            "VERB_FORM" => Category::VerbForm,
            "VERB_INFL" => Category::VerbInfl,
            "VERB_SVA" => Category::VerbSva,
            "VERB_TENSE" => Category::VerbTense,
            "WO" => Category::Wo,
            "UNK" | "UNKNOWN" => Category::Unknown,
            "NONE" => Category::None,
            _ => return Err(Error::UnknownCategory(value.to_owned())),
        })
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_owned()
    }
}

/// Identifies a rule: the category it is filed under and its name within that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId {
    category: Category,
    name: &'static str,
}

impl RuleId {
    pub const fn new(category: Category, name: &'static str) -> Self {
        RuleId { category, name }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// A *selector* to filter rules by checking if a [RuleId] matches it.
/// (De)serializes as `"CATEGORY"` or `"CATEGORY/name"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    /// A category-level selector.
    Category(Category),
    /// A selector for one rule.
    Rule(Category, String),
}

impl From<Category> for Selector {
    fn from(category: Category) -> Self {
        Selector::Category(category)
    }
}

impl From<RuleId> for Selector {
    fn from(id: RuleId) -> Self {
        Selector::Rule(id.category, id.name.to_owned())
    }
}

impl TryFrom<&str> for Selector {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value.split('/').collect::<Vec<_>>().as_slice() {
            [category] => Selector::Category(category.parse()?),
            [category, name] if !name.is_empty() => {
                Selector::Rule(category.parse()?, (*name).to_owned())
            }
            _ => return Err(Error::ParseSelector(value.to_owned())),
        })
    }
}

impl TryFrom<String> for Selector {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Selector::try_from(value.as_str())
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match &selector {
            Selector::Category(x) => format!("{}", x),
            Selector::Rule(x, name) => format!("{}/{}", x, name),
        }
    }
}

impl Selector {
    /// Determines whether a [RuleId] matches this selector. It matches iff:
    /// 1. the category is the same (if this selector is at category-level)
    /// 2. the category and the name are the same (if this selector is at rule-level)
    pub fn is_match(&self, id: &RuleId) -> bool {
        match &self {
            Selector::Category(category) => id.category == *category,
            Selector::Rule(category, name) => id.category == *category && id.name == name.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_string() {
        assert_eq!("VERB_FORM".parse::<Category>(), Ok(Category::VerbForm));
        assert_eq!("verb:form".parse::<Category>(), Ok(Category::VerbForm));
        assert_eq!("UNKNOWN".parse::<Category>(), Ok(Category::Unknown));
        assert_eq!(Category::Unknown.to_string(), "UNK");
        assert!("VERB_COLOR".parse::<Category>().is_err());

        for category in Category::all_errors() {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
            assert!(!category.is_sentinel());
        }
    }

    #[test]
    fn selector_matches_by_level() {
        let id = RuleId::new(Category::VerbForm, "infinitival_to");

        let category = Selector::try_from("VERB_FORM").unwrap();
        let rule = Selector::try_from("VERB_FORM/infinitival_to").unwrap();
        let other = Selector::try_from("VERB_FORM/one_to_one").unwrap();

        assert!(category.is_match(&id));
        assert!(rule.is_match(&id));
        assert!(!other.is_match(&id));
        assert!(Selector::try_from("VERB_FORM/a/b").is_err());
    }
}
