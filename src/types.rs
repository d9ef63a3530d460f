//! Fundamental token-level types used by this crate.
//!
//! The feature values are computed by an external NLP pipeline. This crate only reads them; any feature can be
//! absent (`None`), in which case every rule depending on it evaluates to `false`.

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::Error;

/// Error returned when a string does not name a known feature value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseFeatureError {
    kind: &'static str,
    value: String,
}

/// Defines a closed enum whose variants map one-to-one to conventional strings.
/// Extra aliases are accepted when parsing but never produced.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $string:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// The conventional string form of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $string,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseFeatureError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($string $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(ParseFeatureError {
                        kind: $kind,
                        value: value.to_owned(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseFeatureError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

string_enum! {
    /// Coarse-grained part-of-speech (Universal Dependencies).
    Pos, "part-of-speech" {
        Adj => "ADJ",
        Adp => "ADP",
        Adv => "ADV",
        Aux => "AUX",
        Cconj => "CCONJ" | "CONJ",
        Det => "DET",
        Intj => "INTJ",
        Noun => "NOUN",
        Num => "NUM",
        Part => "PART",
        Pron => "PRON",
        Propn => "PROPN",
        Punct => "PUNCT",
        Sconj => "SCONJ",
        Sym => "SYM",
        Verb => "VERB",
        X => "X",
        Space => "SPACE",
    }
}

string_enum! {
    /// Fine-grained part-of-speech (Penn Treebank).
    Tag, "tag" {
        Cc => "CC",
        Cd => "CD",
        Dt => "DT",
        Ex => "EX",
        Fw => "FW",
        /// Preposition or subordinating conjunction.
        In => "IN",
        Jj => "JJ",
        Jjr => "JJR",
        Jjs => "JJS",
        Ls => "LS",
        Md => "MD",
        Nn => "NN",
        Nns => "NNS",
        Nnp => "NNP",
        Nnps => "NNPS",
        Pdt => "PDT",
        /// Possessive ending.
        Pos => "POS",
        Prp => "PRP",
        PrpPoss => "PRP$",
        Rb => "RB",
        Rbr => "RBR",
        Rbs => "RBS",
        Rp => "RP",
        Sym => "SYM",
        To => "TO",
        Uh => "UH",
        Vb => "VB",
        Vbd => "VBD",
        /// Gerund or present participle.
        Vbg => "VBG",
        /// Past participle.
        Vbn => "VBN",
        Vbp => "VBP",
        Vbz => "VBZ",
        Wdt => "WDT",
        Wp => "WP",
        WpPoss => "WP$",
        Wrb => "WRB",
        Comma => ",",
        Period => ".",
        Colon => ":",
        OpenQuote => "``",
        CloseQuote => "''",
        Dollar => "$",
        Hash => "#",
        Lrb => "-LRB-",
        Rrb => "-RRB-",
        Hyph => "HYPH",
        Nfp => "NFP",
        Add => "ADD",
        Afx => "AFX",
        Xx => "XX",
        Space => "_SP",
    }
}

string_enum! {
    /// Dependency relation of a token to its head (ClearNLP / spaCy English and Universal Dependencies).
    DepLabel, "dependency label" {
        Acl => "acl",
        Acomp => "acomp",
        Advcl => "advcl",
        Advmod => "advmod",
        Agent => "agent",
        Amod => "amod",
        Appos => "appos",
        Attr => "attr",
        Aux => "aux",
        AuxPass => "auxpass" | "aux:pass",
        Case => "case",
        Cc => "cc",
        Ccomp => "ccomp",
        Compound => "compound",
        Conj => "conj",
        Cop => "cop",
        Csubj => "csubj",
        CsubjPass => "csubjpass" | "csubj:pass",
        Dative => "dative",
        Dep => "dep",
        Det => "det",
        Dobj => "dobj",
        Expl => "expl",
        Fixed => "fixed",
        Flat => "flat",
        Iobj => "iobj",
        Intj => "intj",
        Mark => "mark",
        Meta => "meta",
        Neg => "neg",
        Nmod => "nmod",
        NmodPoss => "nmod:poss",
        Npadvmod => "npadvmod",
        Nsubj => "nsubj",
        NsubjPass => "nsubjpass" | "nsubj:pass",
        Nummod => "nummod",
        Obj => "obj",
        Obl => "obl",
        Oprd => "oprd",
        Parataxis => "parataxis",
        Pcomp => "pcomp",
        Pobj => "pobj",
        Poss => "poss",
        Preconj => "preconj",
        Predet => "predet",
        Prep => "prep",
        Prt => "prt",
        Punct => "punct",
        Quantmod => "quantmod",
        Relcl => "relcl",
        Root => "ROOT" | "root",
        Xcomp => "xcomp",
    }
}

impl DepLabel {
    /// Whether this relation marks an auxiliary (active or passive).
    pub fn is_aux(&self) -> bool {
        matches!(self, DepLabel::Aux | DepLabel::AuxPass)
    }
}

/// A token of a [Doc] with all linguistic features the rules read.
///
/// Tokens are built with [Token::new] and the feature setters, then laid out by [Doc::new]
/// which assigns `index` and `char_span`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// The case-folded text.
    pub lower: String,
    pub is_alpha: bool,
    pub pos: Option<Pos>,
    pub tag: Option<Tag>,
    pub lemma: Option<String>,
    pub dep: Option<DepLabel>,
    /// Index of the syntactic head in the same sentence.
    pub head: Option<usize>,
    /// Position of this token in its sentence.
    pub index: usize,
    /// Start (inclusive) and end (exclusive) character offsets in the text of the [Doc].
    pub char_span: (usize, usize),
    pub has_space_after: bool,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

impl Token {
    /// Creates a token without any linguistic features.
    pub fn new<S: Into<String>>(text: S) -> Self {
        let text = text.into();

        Token {
            lower: text.to_lowercase(),
            is_alpha: !text.is_empty() && text.chars().all(char::is_alphabetic),
            text,
            pos: None,
            tag: None,
            lemma: None,
            dep: None,
            head: None,
            index: 0,
            char_span: (0, 0),
            has_space_after: true,
        }
    }

    pub fn pos(mut self, pos: Pos) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Sets the dependency label and the index of the head token.
    pub fn dep(mut self, label: DepLabel, head: usize) -> Self {
        self.dep = Some(label);
        self.head = Some(head);
        self
    }

    /// Marks this token as directly followed by the next one, e.g. "guy" in "guy.".
    pub fn no_space_after(mut self) -> Self {
        self.has_space_after = false;
        self
    }

    pub fn is_pos(&self, pos: Pos) -> bool {
        self.pos == Some(pos)
    }

    pub fn is_tag(&self, tag: Tag) -> bool {
        self.tag == Some(tag)
    }

    /// Whether the *feature* lemmas of `self` and `other` are both set and equal.
    pub fn same_lemma(&self, other: &Token) -> bool {
        matches!((&self.lemma, &other.lemma), (Some(a), Some(b)) if a == b)
    }

    /// Whether the *feature* lemmas of `self` and `other` are both set and different.
    pub fn different_lemma(&self, other: &Token) -> bool {
        matches!((&self.lemma, &other.lemma), (Some(a), Some(b)) if a != b)
    }

    /// Number of characters this token occupies including the trailing space, if any.
    pub(crate) fn end_with_space(&self) -> usize {
        self.char_span.1 + if self.has_space_after { 1 } else { 0 }
    }
}

/// A sentence: the text and its tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
}

impl Doc {
    /// Lays out the tokens one after the other, separated by a space unless [Token::no_space_after] was set.
    /// Assigns each token its `index` and `char_span` and builds the text. The text never ends with a space.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut text = String::new();
        let mut current_char = 0;
        let n_tokens = tokens.len();

        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(index, mut token)| {
                let n_chars = token.text.chars().count();

                token.index = index;
                token.char_span = (current_char, current_char + n_chars);
                text.push_str(&token.text);
                current_char += n_chars;

                if index + 1 == n_tokens {
                    token.has_space_after = false;
                } else if token.has_space_after {
                    text.push(' ');
                    current_char += 1;
                }

                token
            })
            .collect();

        Doc { text, tokens }
    }

    /// Creates a doc from a text and tokens whose `index` and `char_span` were computed elsewhere.
    ///
    /// # Errors
    /// - If a token's `index` is not its position.
    /// - If a token's `char_span` is reversed, out of order or exceeds the text.
    pub fn from_parts<S: Into<String>>(text: S, tokens: Vec<Token>) -> Result<Self, Error> {
        let text = text.into();
        let n_chars = text.chars().count();
        let mut last_end = 0;

        for (i, token) in tokens.iter().enumerate() {
            let invalid = |reason: &str| Error::InvalidToken {
                index: i,
                reason: reason.to_owned(),
            };

            if token.index != i {
                return Err(invalid("index does not match position"));
            }
            let (start, end) = token.char_span;
            if start > end || end > n_chars {
                return Err(invalid("char span outside of text"));
            }
            if start < last_end {
                return Err(invalid("char span overlaps previous token"));
            }
            last_end = end;
        }

        Ok(Doc { text, tokens })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
