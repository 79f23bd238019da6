// src/matcher.rs
//! Phrase matching with phrase-level negation precedence.
//!
//! For each lexicon phrase, negated occurrences are collected first. If any
//! exist, plain occurrences of that phrase are not counted anywhere in the
//! document: "not good ... good" yields a single negative hit. This is a
//! whole-document rule, not a per-occurrence one, and callers depend on it.

use std::collections::BTreeMap;

use crate::lexicon::{Lexicon, NegationLexicon};
use crate::tokenize::Token;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchHit {
    pub start: usize,
    pub score: f64,
    pub rule_index: usize,
}

/// Token text -> hits in discovery order.
pub type Matches = BTreeMap<String, Vec<MatchHit>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub matches: Matches,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

impl MatchOutcome {
    pub fn total_hits(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn record(&mut self, token: &Token, score: i64, rule_index: usize) {
        match score.signum() {
            1 => self.positive_hits += 1,
            -1 => self.negative_hits += 1,
            _ => {}
        }
        self.matches
            .entry(token.text.clone())
            .or_default()
            .push(MatchHit {
                start: token.start,
                score: score as f64,
                rule_index,
            });
    }
}

/// Intersect `tokens` with both lexicons.
///
/// Positive/negative counts follow the sign of the recorded score, so a
/// negated negative phrase ("not bad") counts as positive.
pub fn find_matches(
    tokens: &[Token],
    lexicon: &Lexicon,
    negations: &NegationLexicon,
) -> MatchOutcome {
    let mut out = MatchOutcome::default();

    for entry in lexicon.iter() {
        let mut found_negated = false;
        if let Some(neg) = negations.for_rule(entry.rule_index) {
            for tok in tokens.iter().filter(|t| neg.matches(&t.text)) {
                out.record(tok, neg.score, neg.rule_index);
                found_negated = true;
            }
        }
        if found_negated {
            continue;
        }
        for tok in tokens.iter().filter(|t| t.text == entry.phrase) {
            out.record(tok, entry.score, entry.rule_index);
        }
    }
    out
}
