// src/lexicon.rs
//! Phrase lexicon and its derived negation lexicon.
//!
//! Source table: one `<phrase>\t<integer score>` record per line. The 0-based
//! record position becomes the entry's `rule_index`, carried through to the
//! verbose report for traceability only.
//!
//! Negation wraps a phrase with a fixed marker alternation followed by up to
//! `K` filler words:
//!
//! ```text
//! negate("good") = "(?:not|dont|...)(?: \w+){0,2} good"
//! ```
//!
//! `negate` strips that prefix when it is already present, so it is its own
//! inverse.

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SentimentError};

/// Closed set of negation markers (post-normalization, so no apostrophes).
pub const NEGATION_MARKERS: [&str; 7] = [
    "not", "dont", "cant", "wont", "couldnt", "shouldnt", "never",
];

pub const DEFAULT_NEGATION_WINDOW: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub phrase: String,
    pub score: i64,
    pub rule_index: usize,
}

impl LexiconEntry {
    pub fn word_len(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

/// Read-only phrase table, built once per run.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    by_phrase: HashMap<String, usize>,
}

impl Lexicon {
    /// Build from `(phrase, score)` pairs; position becomes `rule_index`.
    pub fn from_entries<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut lex = Self::default();
        for (i, (phrase, score)) in pairs.into_iter().enumerate() {
            lex.push(phrase.into(), score, i + 1)?;
        }
        Ok(lex)
    }

    /// Parse a TSV table. Blank lines are skipped and take no rule index.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lex = Self::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let (phrase, raw_score) = line
                .split_once('\t')
                .ok_or_else(|| SentimentError::lexicon(line_no, "missing score field"))?;
            let score = raw_score.trim().parse::<i64>().map_err(|e| {
                SentimentError::lexicon(line_no, format!("score {raw_score:?} is not an integer: {e}"))
            })?;
            lex.push(phrase.to_string(), score, line_no)?;
        }
        Ok(lex)
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn push(&mut self, phrase: String, score: i64, line_no: usize) -> Result<()> {
        let phrase = phrase.trim().to_string();
        if phrase.is_empty() {
            return Err(SentimentError::lexicon(line_no, "empty phrase"));
        }
        if self.by_phrase.contains_key(&phrase) {
            return Err(SentimentError::lexicon(
                line_no,
                format!("duplicate phrase {phrase:?}"),
            ));
        }
        let rule_index = self.entries.len();
        self.by_phrase.insert(phrase.clone(), rule_index);
        self.entries.push(LexiconEntry {
            phrase,
            score,
            rule_index,
        });
        Ok(())
    }

    pub fn get(&self, phrase: &str) -> Option<&LexiconEntry> {
        self.by_phrase.get(phrase).map(|&i| &self.entries[i])
    }

    /// Entries in `rule_index` order.
    pub fn iter(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest phrase measured in words (0 for an empty lexicon).
    pub fn max_phrase_words(&self) -> usize {
        self.entries
            .iter()
            .map(LexiconEntry::word_len)
            .max()
            .unwrap_or(0)
    }
}

/// The negation prefix for a given filler-word window `K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegationPattern {
    prefix: String,
}

impl Default for NegationPattern {
    fn default() -> Self {
        Self::new(DEFAULT_NEGATION_WINDOW)
    }
}

impl NegationPattern {
    pub fn new(window: usize) -> Self {
        let prefix = format!(
            r"(?:{})(?: \w+){{0,{}}} ",
            NEGATION_MARKERS.join("|"),
            window
        );
        Self { prefix }
    }

    pub fn is_negated(&self, phrase: &str) -> bool {
        phrase.starts_with(&self.prefix)
    }

    /// Wrap `phrase` with the negation prefix, or strip it if already wrapped.
    pub fn negate(&self, phrase: &str) -> String {
        match phrase.strip_prefix(&self.prefix) {
            Some(bare) => bare.to_string(),
            None => format!("{}{}", self.prefix, phrase),
        }
    }

    /// Anchored matcher for `negate(phrase)`; the phrase part matches literally.
    fn compile(&self, phrase: &str) -> std::result::Result<Regex, regex::Error> {
        Regex::new(&format!("^{}{}$", self.prefix, regex::escape(phrase)))
    }
}

#[derive(Debug, Clone)]
pub struct NegatedEntry {
    /// `negate(phrase)` in its textual pattern form.
    pub key: String,
    pub score: i64,
    pub rule_index: usize,
    matcher: Regex,
}

impl NegatedEntry {
    /// Whole-token match: marker, up to `K` fillers, then the exact phrase.
    pub fn matches(&self, token_text: &str) -> bool {
        self.matcher.is_match(token_text)
    }
}

/// One negated entry per lexicon entry, in the same order.
#[derive(Debug, Clone)]
pub struct NegationLexicon {
    pattern: NegationPattern,
    entries: Vec<NegatedEntry>,
}

impl NegationLexicon {
    /// Derive `negate(phrase) -> (-score, rule_index)` for every entry.
    pub fn build(lexicon: &Lexicon, pattern: NegationPattern) -> Result<Self> {
        let entries = lexicon
            .iter()
            .map(|e| {
                let matcher = pattern.compile(&e.phrase).map_err(|err| {
                    SentimentError::lexicon(
                        e.rule_index + 1,
                        format!("cannot build negation for {:?}: {err}", e.phrase),
                    )
                })?;
                let score = e.score.checked_neg().ok_or_else(|| {
                    SentimentError::lexicon(
                        e.rule_index + 1,
                        format!("score {} of {:?} cannot be negated", e.score, e.phrase),
                    )
                })?;
                Ok(NegatedEntry {
                    key: pattern.negate(&e.phrase),
                    score,
                    rule_index: e.rule_index,
                    matcher,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { pattern, entries })
    }

    pub fn pattern(&self) -> &NegationPattern {
        &self.pattern
    }

    /// Negated entry derived from the lexicon entry with this `rule_index`.
    pub fn for_rule(&self, rule_index: usize) -> Option<&NegatedEntry> {
        self.entries.get(rule_index)
    }

    pub fn get(&self, key: &str) -> Option<&NegatedEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NegatedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
