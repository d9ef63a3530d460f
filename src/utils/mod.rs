use crate::types::Token;

pub mod parallelism;

/// Concatenates the case-folded, trimmed texts of the tokens.
pub fn folded_concat(tokens: &[Token]) -> String {
    tokens.iter().map(|x| x.lower.trim()).collect()
}

/// Like [folded_concat] but also drops every char for which `remove` is true.
pub fn folded_concat_without<F>(tokens: &[Token], remove: F) -> String
where
    F: Fn(char) -> bool,
{
    tokens
        .iter()
        .flat_map(|x| x.lower.chars())
        .filter(|c| !c.is_whitespace() && !remove(*c))
        .collect()
}

#[inline]
pub fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '’' | '`' | '´')
}

#[inline]
pub fn is_apostrophe_or_hyphen(c: char) -> bool {
    is_apostrophe(c) || c == '-'
}

/// Character-level similarity: `1 - levenshtein(a, b) / max(len(a), len(b))`, lengths in chars.
/// Two empty strings are identical.
pub fn char_edit_ratio(a: &str, b: &str) -> f32 {
    let max_len = std::cmp::max(a.chars().count(), b.chars().count());

    if max_len == 0 {
        return 1.;
    }

    1. - strsim::levenshtein(a, b) as f32 / max_len as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_edit_ratio_matches_definition() {
        // one transposition = two substitutions
        assert!((char_edit_ratio("recieve", "receive") - (1. - 2. / 7.)).abs() < 1e-6);
        assert!((char_edit_ratio("", "") - 1.).abs() < 1e-6);
        assert!(char_edit_ratio("cat", "dog").abs() < 1e-6);
    }

    #[test]
    fn folding_drops_apostrophes_and_whitespace() {
        let tokens = vec![Token::new("Do"), Token::new("n't")];
        assert_eq!(folded_concat(&tokens), "don't");
        assert_eq!(folded_concat_without(&tokens, is_apostrophe), "dont");
    }
}
