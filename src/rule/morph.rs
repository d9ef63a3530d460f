//! Rules for changes to the form of a word which keep its lemma: verb forms, inflections, number, degree and tense.

use derivative::Derivative;
use std::sync::Arc;

use super::{
    category::{Category, RuleId},
    Classify,
};
use crate::{
    edit::Edit,
    lexicon::{Lemmatizer, WordList},
    predicate::*,
    types::{Pos, Tag, Token},
};

const PART_AUX_OR_VERB: &[Pos] = &[Pos::Part, Pos::Aux, Pos::Verb];
const AUX_OR_VERB: &[Pos] = &[Pos::Aux, Pos::Verb];
const OPEN_CLASS: &[Pos] = &[Pos::Adj, Pos::Adv, Pos::Noun, Pos::Verb];

fn one_to_one<'t>(edit: &Edit<'t>) -> Option<(&'t Token, &'t Token)> {
    if of_size_one_to_one(edit) && is_substitute(edit) {
        Some((edit.source().first()?, edit.target().first()?))
    } else {
        None
    }
}

fn both(a: &Token, b: &Token, pos: Pos) -> bool {
    a.is_pos(pos) && b.is_pos(pos)
}

/// Auxiliaries count as verbs.
fn both_verbs(a: &Token, b: &Token) -> bool {
    let verb = pos_in(AUX_OR_VERB);
    verb(a) && verb(b)
}

/// A single verb replaced by another form of the same verb, e.g. `[eat -> eating]` or `[has eat -> has eaten]`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct VerbForm {
    #[derivative(Debug = "ignore")]
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl VerbForm {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        VerbForm { lemmatizer }
    }
}

impl Classify for VerbForm {
    fn id(&self) -> RuleId {
        RuleId::new(Category::VerbForm, "one_to_one")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;
        if !lemmas_intersect(self.lemmatizer.as_ref())(edit) {
            return None;
        }

        let verbs = both_verbs(source, target);
        let with_aux = verbs
            && preceded_by_dependent_aux(source, edit.source().sentence())
            && preceded_by_dependent_aux(target, edit.target().sentence());
        let participle = verbs
            && (is_gerund_or_participle(source) || is_gerund_or_participle(target));
        let changed_class = different_pos(source, target) && is_gerund_or_participle(target);

        if with_aux || participle || changed_class {
            Some(Category::VerbForm)
        } else {
            None
        }
    }
}

/// A missing or unnecessary infinitival "to".
#[derive(Debug)]
pub struct InfinitivalTo;

impl Classify for InfinitivalTo {
    fn id(&self) -> RuleId {
        RuleId::new(Category::VerbForm, "infinitival_to")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if !one_sided_single(edit) {
            return None;
        }

        let token = edit.tokens().next()?;
        let is_infinitival = token.lower == "to"
            && token.is_pos(Pos::Part)
            && matches!(token.tag, Some(tag) if tag != Tag::In);

        if is_infinitival {
            Some(Category::VerbForm)
        } else {
            None
        }
    }
}

fn is_short_verb_phrase(edit: &Edit) -> bool {
    is_substitute(edit) && of_max_size(2, 2)(edit) && all_tokens(pos_in(PART_AUX_OR_VERB))(edit)
}

/// A verb phrase of up to two tokens replaced by another form of the same verb, e.g. `[to eat -> eating]`.
#[derive(Debug)]
pub struct InfinitivalPhrase;

impl Classify for InfinitivalPhrase {
    fn id(&self) -> RuleId {
        RuleId::new(Category::VerbForm, "infinitival_phrase")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if is_short_verb_phrase(edit) && !of_size_one_to_one(edit) && last_tokens_same_lemma(edit) {
            Some(Category::VerbForm)
        } else {
            None
        }
    }
}

/// A verb phrase of up to two tokens replaced by a different verb, e.g. `[to eat -> drink]`.
#[derive(Debug)]
pub struct VerbPhrasal;

impl Classify for VerbPhrasal {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Verb, "phrasal")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if is_short_verb_phrase(edit) && last_tokens_differ_lemma(edit) {
            Some(Category::Verb)
        } else {
            None
        }
    }
}

/// A misspelled inflection of a noun or verb, e.g. `[eated -> ate]` or `[childs -> children]`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Inflection {
    category: Category,
    pos: Pos,
    #[derivative(Debug = "ignore")]
    word_list: Arc<dyn WordList>,
}

impl Inflection {
    pub fn verb(word_list: Arc<dyn WordList>) -> Self {
        Inflection {
            category: Category::VerbInfl,
            pos: Pos::Verb,
            word_list,
        }
    }

    pub fn noun(word_list: Arc<dyn WordList>) -> Self {
        Inflection {
            category: Category::NounInfl,
            pos: Pos::Noun,
            word_list,
        }
    }
}

impl Classify for Inflection {
    fn id(&self) -> RuleId {
        RuleId::new(self.category, "non_word")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;

        let is_inflection = source.is_alpha
            && !self.word_list.contains(&source.text)
            && !self.word_list.contains(&source.lower)
            && source.same_lemma(target)
            && both(source, target, self.pos);

        if is_inflection {
            Some(self.category)
        } else {
            None
        }
    }
}

/// A comparative or superlative formed with "more" / "most" instead of the suffix, or vice versa,
/// e.g. `[more big -> bigger]`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct ComparativeForm {
    #[derivative(Debug = "ignore")]
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl ComparativeForm {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        ComparativeForm { lemmatizer }
    }
}

impl Classify for ComparativeForm {
    fn id(&self) -> RuleId {
        RuleId::new(Category::AdjForm, "more_most")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        if !is_substitute(edit) || !of_max_size(2, 2)(edit) {
            return None;
        }

        let is_more_most = |token: Option<&Token>| {
            token.map_or(false, |x| x.lower == "more" || x.lower == "most")
        };

        if (is_more_most(edit.source().first()) || is_more_most(edit.target().first()))
            && last_tokens_lemmas_intersect(self.lemmatizer.as_ref())(edit)
        {
            Some(Category::AdjForm)
        } else {
            None
        }
    }
}

/// An adjective used where a plural noun was needed, e.g. `[musical -> musicals]`.
#[derive(Debug)]
pub struct AdjectiveNounNumber;

impl Classify for AdjectiveNounNumber {
    fn id(&self) -> RuleId {
        RuleId::new(Category::NounNum, "adj_confusion")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;

        if source.same_lemma(target) && source.is_pos(Pos::Adj) && target.is_tag(Tag::Nns) {
            Some(Category::NounNum)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct NounNumber;

impl Classify for NounNumber {
    fn id(&self) -> RuleId {
        RuleId::new(Category::NounNum, "number")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;

        let different_tags = matches!((source.tag, target.tag), (Some(a), Some(b)) if a != b);
        if source.same_lemma(target) && both(source, target, Pos::Noun) && different_tags {
            Some(Category::NounNum)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct AdjectiveDegree;

impl Classify for AdjectiveDegree {
    fn id(&self) -> RuleId {
        RuleId::new(Category::AdjForm, "degree")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;
        let degree = tag_in(&[Tag::Jj, Tag::Jjr, Tag::Jjs]);

        if source.same_lemma(target)
            && both(source, target, Pos::Adj)
            && degree(source)
            && degree(target)
        {
            Some(Category::AdjForm)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct SubjectVerbAgreement;

impl Classify for SubjectVerbAgreement {
    fn id(&self) -> RuleId {
        RuleId::new(Category::VerbSva, "agreement")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;

        if source.same_lemma(target)
            && both_verbs(source, target)
            && (source.is_tag(Tag::Vbz) || target.is_tag(Tag::Vbz))
        {
            Some(Category::VerbSva)
        } else {
            None
        }
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct VerbTense {
    #[derivative(Debug = "ignore")]
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl VerbTense {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        VerbTense { lemmatizer }
    }
}

impl Classify for VerbTense {
    fn id(&self) -> RuleId {
        RuleId::new(Category::VerbTense, "tense")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;

        if both_verbs(source, target) && lemmas_intersect(self.lemmatizer.as_ref())(edit)
        {
            Some(Category::VerbTense)
        } else {
            None
        }
    }
}

/// The same lemma used as a different open word class, e.g. `[quick -> quickly]`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Derivation {
    #[derivative(Debug = "ignore")]
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl Derivation {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Derivation { lemmatizer }
    }
}

impl Classify for Derivation {
    fn id(&self) -> RuleId {
        RuleId::new(Category::Morph, "derivation")
    }

    fn apply(&self, edit: &Edit) -> Option<Category> {
        let (source, target) = one_to_one(edit)?;
        let open_class = pos_in(OPEN_CLASS);

        if open_class(source)
            && open_class(target)
            && different_pos(source, target)
            && lemmas_intersect(self.lemmatizer.as_ref())(edit)
        {
            Some(Category::Morph)
        } else {
            None
        }
    }
}
