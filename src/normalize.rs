// src/normalize.rs
//! Text normalization for `<id>\t<free text>` records.
//!
//! Lowercases, drops every character that is neither a word character nor
//! whitespace, and folds newline/tab/carriage-return runs into one space.
//! Punctuation inside words is removed without a gap, so "yellow-green"
//! becomes "yellowgreen"; matching downstream relies on that exact shape.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SentimentError};

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word regex"));
static RE_CONTROL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t]+").expect("control ws regex"));

/// One cleaned input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub words: Vec<String>,
}

impl Document {
    /// Split a raw record and normalize its text.
    pub fn from_record(raw: &str) -> Result<Self> {
        let (id, text) = clean_row(raw)?;
        Ok(Self::new(id, &text))
    }

    /// Build from an id and already-normalized text.
    pub fn new(id: impl Into<String>, cleaned: &str) -> Self {
        Self {
            id: id.into(),
            words: cleaned.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Split on the first tab into `(id, cleaned_text)`.
pub fn clean_row(raw: &str) -> Result<(String, String)> {
    let (id, text) = raw
        .split_once('\t')
        .ok_or_else(|| SentimentError::malformed_record(raw))?;
    Ok((id.to_string(), normalize_text(text)))
}

/// Normalize free text. Applying it twice is the same as applying it once.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = RE_NON_WORD.replace_all(&lowered, "");
    RE_CONTROL_WS.replace_all(&stripped, " ").into_owned()
}
