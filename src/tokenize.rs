// src/tokenize.rs
//! Word n-gram tokenizer.
//!
//! Emits every contiguous window of `n` words for `n` in `min_len..=max_len`,
//! all windows of one length (in position order) before the next length.
//! The result is materialized because the matcher rescans it once per
//! lexicon entry.

use crate::error::{Result, SentimentError};

/// An n-gram and the 0-based index of its first word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
}

/// `max_len` defaults to `min_len`. Either bound being 0 is an error.
pub fn tokenize<S: AsRef<str>>(
    words: &[S],
    min_len: usize,
    max_len: Option<usize>,
) -> Result<Vec<Token>> {
    let max_len = max_len.unwrap_or(min_len);
    if min_len == 0 || max_len == 0 {
        return Err(SentimentError::InvalidTokenLength { min_len, max_len });
    }

    let mut out = Vec::with_capacity(expected_count(words.len(), min_len, max_len));
    for n in min_len..=max_len {
        if n > words.len() {
            break;
        }
        for (start, window) in words.windows(n).enumerate() {
            let text = window
                .iter()
                .map(|w| w.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            out.push(Token { text, start });
        }
    }
    Ok(out)
}

/// `sum over n of max(0, word_count - n + 1)`.
pub fn expected_count(word_count: usize, min_len: usize, max_len: usize) -> usize {
    (min_len..=max_len)
        .map(|n| (word_count + 1).saturating_sub(n))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn unigrams_pair_each_word_with_its_index() {
        let w = words("a b c");
        let toks = tokenize(&w, 1, None).unwrap();
        let got: Vec<(&str, usize)> = toks.iter().map(|t| (t.text.as_str(), t.start)).collect();
        assert_eq!(got, vec![("a", 0), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn lengths_then_positions() {
        let w = words("a b c");
        let toks = tokenize(&w, 1, Some(3)).unwrap();
        let got: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(got, vec!["a", "b", "c", "a b", "b c", "a b c"]);
        assert_eq!(toks[4].start, 1);
    }

    #[test]
    fn window_longer_than_document() {
        let w = words("only two");
        let toks = tokenize(&w, 1, Some(5)).unwrap();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks.len(), expected_count(2, 1, 5));
        assert!(tokenize(&Vec::<String>::new(), 1, Some(3)).unwrap().is_empty());
    }

    #[test]
    fn zero_bounds_fail() {
        let w = words("a b");
        assert!(matches!(
            tokenize(&w, 0, Some(2)),
            Err(SentimentError::InvalidTokenLength { .. })
        ));
        assert!(matches!(
            tokenize(&w, 1, Some(0)),
            Err(SentimentError::InvalidTokenLength { .. })
        ));
        assert!(tokenize(&w, 0, None).is_err());
    }

    #[test]
    fn inverted_bounds_yield_nothing() {
        let w = words("a b c");
        assert!(tokenize(&w, 3, Some(2)).unwrap().is_empty());
        assert_eq!(expected_count(3, 3, 2), 0);
    }
}
