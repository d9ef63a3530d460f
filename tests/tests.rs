use std::{ops::Range, sync::Arc};

use errtag::{
    annotate::{Aligner, Annotator},
    edit::{Edit, Operation, Segment},
    lexicon::{LemmaTable, WordSet},
    mark::{CharOffset, ErrorMarker},
    merge::{MergeOptions, Merger},
    rule::{category::Category, Classifier, Classify, Rules, RulesOptions},
    types::{DepLabel, Doc, Pos, Tag, Token},
    Error,
};
use lazy_static::lazy_static;
use quickcheck_macros::quickcheck;

lazy_static! {
    static ref LEMMATIZER: Arc<LemmaTable> = Arc::new(LemmaTable::new(vec![
        ("ate", "eat"),
        ("eaten", "eat"),
        ("eated", "eat"),
        ("eating", "eat"),
        ("cats", "cat"),
    ]));
    static ref WORDS: Arc<WordSet> = Arc::new(WordSet::new(vec![
        "I", "like", "to", "eat", "eating", "ate", "eaten", "food", "receive", "his", "cat", "cats",
        "the", "in", "on",
    ]));
    static ref CLASSIFIER: Classifier = Classifier::new(
        Rules::english(LEMMATIZER.clone(), WORDS.clone(), &RulesOptions::default()).unwrap()
    );
    static ref MERGER: Merger = Merger::default();
}

/// Replays a fixed alignment given as source and target ranges.
struct Fixed(Vec<(Range<usize>, Range<usize>)>);

impl Aligner for Fixed {
    fn align<'t>(
        &self,
        source: &'t [Token],
        target: &'t [Token],
    ) -> Result<Vec<Edit<'t>>, Error> {
        self.0
            .iter()
            .map(|(s, t)| {
                Edit::new(
                    Segment::new(source, s.clone())?,
                    Segment::new(target, t.clone())?,
                )
            })
            .collect()
    }
}

fn annotator(ranges: Vec<(Range<usize>, Range<usize>)>) -> Annotator<Fixed> {
    let rules =
        Rules::english(LEMMATIZER.clone(), WORDS.clone(), &RulesOptions::default()).unwrap();
    Annotator::new(Fixed(ranges), Merger::default(), Classifier::new(rules))
}

fn edit<'t>(source: &'t Doc, s: Range<usize>, target: &'t Doc, t: Range<usize>) -> Edit<'t> {
    Edit::new(
        Segment::new(source.tokens(), s).unwrap(),
        Segment::new(target.tokens(), t).unwrap(),
    )
    .unwrap()
}

fn i_like_to_eat() -> (Doc, Doc) {
    let source = Doc::new(vec![
        Token::new("I").pos(Pos::Pron).tag(Tag::Prp).lemma("I"),
        Token::new("like").pos(Pos::Verb).tag(Tag::Vbp).lemma("like"),
        Token::new("to").pos(Pos::Part).tag(Tag::To).lemma("to"),
        Token::new("eat").pos(Pos::Verb).tag(Tag::Vb).lemma("eat"),
        Token::new("food").pos(Pos::Noun).tag(Tag::Nn).lemma("food").no_space_after(),
        Token::new(".").pos(Pos::Punct).tag(Tag::Period).lemma("."),
    ]);
    let target = Doc::new(vec![
        Token::new("I").pos(Pos::Pron).tag(Tag::Prp).lemma("I"),
        Token::new("like").pos(Pos::Verb).tag(Tag::Vbp).lemma("like"),
        Token::new("eating").pos(Pos::Verb).tag(Tag::Vbg).lemma("eat"),
        Token::new("food").pos(Pos::Noun).tag(Tag::Nn).lemma("food").no_space_after(),
        Token::new(".").pos(Pos::Punct).tag(Tag::Period).lemma("."),
    ]);
    (source, target)
}

#[test]
fn infinitive_to_gerund_is_verb_form() {
    let (source, target) = i_like_to_eat();

    for alignment in vec![
        vec![(0..2, 0..2), (2..4, 2..3), (4..6, 3..5)],
        vec![(0..2, 0..2), (2..3, 2..3), (3..4, 3..3), (4..6, 3..5)],
    ] {
        let annotations = annotator(alignment).annotate(&source, &target).unwrap();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].edit().source().range(), 2..4);
        assert_eq!(annotations[0].source_text(), "to eat");
        assert_eq!(annotations[0].target_text(), "eating");
        assert_eq!(annotations[0].category(), Category::VerbForm);
    }
}

#[test]
fn missing_auxiliary_is_verb_form() {
    let source = Doc::new(vec![
        Token::new("I").pos(Pos::Pron).tag(Tag::Prp).lemma("I"),
        Token::new("eated").pos(Pos::Verb).tag(Tag::Vbd).lemma("eat"),
        Token::new("dinner").pos(Pos::Noun).tag(Tag::Nn).lemma("dinner"),
        Token::new("yesterday").pos(Pos::Noun).tag(Tag::Nn).lemma("yesterday"),
    ]);

    // taggers differ on whether "have" is AUX or VERB
    for have in vec![Pos::Aux, Pos::Verb] {
        let target = Doc::new(vec![
            Token::new("I").pos(Pos::Pron).tag(Tag::Prp).lemma("I"),
            Token::new("have").pos(have).tag(Tag::Vbp).lemma("have"),
            Token::new("eaten").pos(Pos::Verb).tag(Tag::Vbn).lemma("eat"),
            Token::new("dinner").pos(Pos::Noun).tag(Tag::Nn).lemma("dinner"),
            Token::new("yesterday").pos(Pos::Noun).tag(Tag::Nn).lemma("yesterday"),
        ]);

        let annotations = annotator(vec![(0..1, 0..1), (1..1, 1..2), (1..2, 2..3), (2..4, 3..5)])
            .annotate(&source, &target)
            .unwrap();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].source_text(), "eated");
        assert_eq!(annotations[0].target_text(), "have eaten");
        assert_eq!(annotations[0].category(), Category::VerbForm);
    }
}

#[test]
fn misspelling_is_spell() {
    let source = Doc::new(vec![Token::new("recieve")
        .pos(Pos::Noun)
        .tag(Tag::Nn)
        .lemma("recieve")]);
    let target = Doc::new(vec![Token::new("receive")
        .pos(Pos::Verb)
        .tag(Tag::Vb)
        .lemma("receive")]);

    let classified = CLASSIFIER.classify(&edit(&source, 0..1, &target, 0..1));
    assert_eq!(classified.category(), Category::Spell);

    // VERB/phrasal comes first, so a misspelled verb tagged VERB is a verb choice edit
    let source = Doc::new(vec![Token::new("recieve")
        .pos(Pos::Verb)
        .tag(Tag::Vb)
        .lemma("recieve")]);
    let classified = CLASSIFIER.classify(&edit(&source, 0..1, &target, 0..1));
    assert_eq!(classified.category(), Category::Verb);
}

#[test]
fn determiner_pronoun_depends_on_role() {
    let source = Doc::new(vec![Token::new("His").pos(Pos::Det).tag(Tag::PrpPoss).lemma("his")]);
    let target = |dep: DepLabel| {
        Doc::new(vec![Token::new("his")
            .pos(Pos::Pron)
            .tag(Tag::PrpPoss)
            .lemma("his")
            .dep(dep, 1)])
    };

    let category = |target: &Doc| CLASSIFIER.category(&edit(&source, 0..1, target, 0..1));

    assert_eq!(category(&target(DepLabel::Poss)), Category::Det);
    assert_eq!(category(&target(DepLabel::NmodPoss)), Category::Det);
    assert_eq!(category(&target(DepLabel::Nsubj)), Category::Pron);
    // terminal: no later rule is consulted
    assert_eq!(category(&target(DepLabel::Conj)), Category::Unknown);
}

#[test]
fn insertion_into_empty_source_is_at_start() {
    let source = Doc::new(vec![]);
    assert_eq!(ErrorMarker::new(&source).insertion_point(2), CharOffset::point(0));
}

#[test]
fn insertion_is_marked_after_previous_token() {
    let source = Doc::new(vec![
        Token::new("My").pos(Pos::Pron).tag(Tag::PrpPoss),
        Token::new("name").pos(Pos::Noun).tag(Tag::Nn),
        Token::new("guy").pos(Pos::Noun).tag(Tag::Nn).no_space_after(),
        Token::new(".").pos(Pos::Punct).tag(Tag::Period),
    ]);
    let target = Doc::new(vec![
        Token::new("My").pos(Pos::Pron).tag(Tag::PrpPoss),
        Token::new("name").pos(Pos::Noun).tag(Tag::Nn),
        Token::new("is").pos(Pos::Aux).tag(Tag::Vbz).lemma("be"),
        Token::new("guy").pos(Pos::Noun).tag(Tag::Nn).no_space_after(),
        Token::new(".").pos(Pos::Punct).tag(Tag::Period),
    ]);

    let annotations = annotator(vec![(0..2, 0..2), (2..2, 2..3), (2..4, 3..5)])
        .annotate(&source, &target)
        .unwrap();

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].offset(), CharOffset::point(8));
    assert_eq!(annotations[0].category(), Category::Verb);
}

#[test]
fn options_deserialize_from_json() {
    let options: RulesOptions =
        serde_json::from_str(r#"{"ignore_ids": ["SPELL", "VERB_FORM/infinitival_to"]}"#).unwrap();

    assert!((options.spelling_threshold - 0.5).abs() < f32::EPSILON);
    assert_eq!(options.ignore_ids.len(), 2);

    let rules = Rules::english(LEMMATIZER.clone(), WORDS.clone(), &options).unwrap();
    assert!(rules
        .rules()
        .iter()
        .all(|rule| rule.id().category() != Category::Spell
            && rule.id().name() != "infinitival_to"));

    let merge: MergeOptions = serde_json::from_str(r#"{"max_span": 2}"#).unwrap();
    assert_eq!(Merger::new(merge).unwrap().options().max_span, 2);

    assert!(serde_json::from_str::<RulesOptions>(r#"{"ids": ["COLOR"]}"#).is_err());
}

// property tests over randomly aligned sentence pairs

const VOCABULARY: &[(&str, Pos, Tag, &str)] = &[
    ("to", Pos::Part, Tag::To, "to"),
    ("eat", Pos::Verb, Tag::Vb, "eat"),
    ("eating", Pos::Verb, Tag::Vbg, "eat"),
    ("ate", Pos::Verb, Tag::Vbd, "eat"),
    ("cat", Pos::Noun, Tag::Nn, "cat"),
    ("Cat", Pos::Noun, Tag::Nn, "cat"),
    ("cats", Pos::Noun, Tag::Nns, "cat"),
    ("the", Pos::Det, Tag::Dt, "the"),
    ("His", Pos::Det, Tag::PrpPoss, "his"),
    ("his", Pos::Pron, Tag::PrpPoss, "his"),
    ("'s", Pos::Part, Tag::Pos, "'s"),
    ("n't", Pos::Part, Tag::Rb, "not"),
    ("do", Pos::Aux, Tag::Vbp, "do"),
    ("in", Pos::Adp, Tag::In, "in"),
    ("-", Pos::Punct, Tag::Hyph, "-"),
    (".", Pos::Punct, Tag::Period, "."),
];

fn word(seed: u8) -> Token {
    let (text, pos, tag, lemma) = VOCABULARY[seed as usize % VOCABULARY.len()];
    Token::new(text).pos(pos).tag(tag).lemma(lemma)
}

type Alignment = Vec<(Range<usize>, Range<usize>)>;

/// Builds a sentence pair and a complete alignment from random operations.
fn random_pair(ops: &[(u8, u8, u8)]) -> (Doc, Doc, Alignment) {
    let mut source = Vec::new();
    let mut target = Vec::new();
    let mut alignment = Vec::new();

    for (op, a, b) in ops.iter().take(24) {
        let (s, t) = (source.len(), target.len());

        match op % 4 {
            0 => {
                source.push(word(*a));
                target.push(word(*a));
            }
            1 => target.push(word(*a)),
            2 => source.push(word(*a)),
            _ => {
                source.push(word(*a));
                // shifting by less than the vocabulary size picks a different word
                target.push(word(a.wrapping_add(1 + b % 15)));
            }
        }

        alignment.push((s..source.len(), t..target.len()));
    }

    (Doc::new(source), Doc::new(target), alignment)
}

fn covered(edits: &[Edit]) -> (Vec<usize>, Vec<usize>) {
    (
        edits.iter().flat_map(|x| x.source().range()).collect(),
        edits.iter().flat_map(|x| x.target().range()).collect(),
    )
}

#[quickcheck]
fn merge_is_idempotent(ops: Vec<(u8, u8, u8)>, max_span: u8) -> bool {
    let (source, target, alignment) = random_pair(&ops);
    let edits = Fixed(alignment)
        .align(source.tokens(), target.tokens())
        .unwrap();
    let merger = Merger::new(MergeOptions {
        max_span: max_span as usize % 8 + 1,
    })
    .unwrap();

    let merged = merger.merge(&edits);
    merger.merge(&merged) == merged
}

#[quickcheck]
fn merge_conserves_coverage(ops: Vec<(u8, u8, u8)>) -> bool {
    let (source, target, alignment) = random_pair(&ops);
    let edits = Fixed(alignment)
        .align(source.tokens(), target.tokens())
        .unwrap();

    let merged = MERGER.merge(&edits);
    let spans_fit = merged.iter().all(|x| {
        let (s, t) = x.size();
        x.operation() == Operation::Match || (s <= 6 && t <= 6) || edits.contains(x)
    });

    let complete = (
        (0..source.tokens().len()).collect::<Vec<_>>(),
        (0..target.tokens().len()).collect::<Vec<_>>(),
    );

    covered(&merged) == covered(&edits) && covered(&edits) == complete && spans_fit
}

#[quickcheck]
fn classification_is_total_and_deterministic(ops: Vec<(u8, u8, u8)>) -> bool {
    let (source, target, alignment) = random_pair(&ops);
    let edits = Fixed(alignment)
        .align(source.tokens(), target.tokens())
        .unwrap();

    MERGER.merge(&edits).iter().all(|edit| {
        let first = CLASSIFIER.classify(edit);
        let second = CLASSIFIER.classify(edit);

        first == second
            && first.source() == edit.source()
            && first.target() == edit.target()
            && (edit.operation() == Operation::Match) == (first.category() == Category::None)
    })
}

#[quickcheck]
fn offsets_are_within_source(ops: Vec<(u8, u8, u8)>) -> bool {
    let (source, target, alignment) = random_pair(&ops);
    let _ = env_logger::builder().is_test(true).try_init();

    match annotator(alignment).annotate(&source, &target) {
        Ok(annotations) => annotations.iter().all(|x| {
            let offset = x.offset();
            offset.start <= offset.end && offset.end <= source.char_len() && x.has_error()
        }),
        Err(_) => false,
    }
}
