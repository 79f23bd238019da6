// src/error.rs
//! Error taxonomy for the scoring engine.
//!
//! All variants are hard failures at the point of detection. The engine never
//! substitutes a default score; the batch runner decides whether an
//! `UndefinedScore` document is skipped or aborts the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// Input record without the `<id>\t<text>` separator.
    #[error("malformed record (no tab separator): {preview:?}")]
    MalformedRecord { preview: String },

    /// Bad lexicon row. `line` is 1-based in the source table.
    #[error("lexicon line {line}: {reason}")]
    LexiconFormat { line: usize, reason: String },

    #[error("invalid token window {min_len}..={max_len}: bounds must be at least 1")]
    InvalidTokenLength { min_len: usize, max_len: usize },

    /// No phrase matched, so the average has a zero denominator.
    #[error("document {id:?} has no lexicon matches; score is undefined")]
    UndefinedScore { id: String },

    #[error("malformed summary block: {reason}")]
    MalformedSummary { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SentimentError {
    pub(crate) fn malformed_record(raw: &str) -> Self {
        Self::MalformedRecord {
            preview: raw.chars().take(60).collect(),
        }
    }

    pub(crate) fn lexicon(line: usize, reason: impl Into<String>) -> Self {
        Self::LexiconFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn summary(reason: impl Into<String>) -> Self {
        Self::MalformedSummary {
            reason: reason.into(),
        }
    }

    /// True for the one error a batch caller may choose to skip past.
    pub fn is_undefined_score(&self) -> bool {
        matches!(self, Self::UndefinedScore { .. })
    }
}

pub type Result<T, E = SentimentError> = std::result::Result<T, E>;
