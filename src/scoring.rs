// src/scoring.rs
//! Position-weighted aggregation of match hits.
//!
//! A hit whose relative start position (`start / word_count`) is at or past
//! `end_threshold` is multiplied by `end_weight`. The text score is the plain
//! mean of all contributing (weighted or unweighted) hit scores.

use crate::error::{Result, SentimentError};
use crate::matcher::Matches;

pub const DEFAULT_END_WEIGHT: f64 = 1.5;
pub const DEFAULT_END_THRESHOLD: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndWeighting {
    pub end_weight: f64,
    pub end_threshold: f64,
}

impl Default for EndWeighting {
    fn default() -> Self {
        Self {
            end_weight: DEFAULT_END_WEIGHT,
            end_threshold: DEFAULT_END_THRESHOLD,
        }
    }
}

impl EndWeighting {
    pub fn applies(&self, start: usize, word_count: usize) -> bool {
        word_count > 0 && (start as f64 / word_count as f64) >= self.end_threshold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub text_score: f64,
    /// Same shape as the input matches, with end weighting applied in place.
    pub matches_weighted: Matches,
}

/// Score one document's matches. Zero hits is `UndefinedScore`.
pub fn score(
    doc_id: &str,
    matches: &Matches,
    word_count: usize,
    weighting: EndWeighting,
) -> Result<ScoreResult> {
    let mut matches_weighted = matches.clone();
    let mut sum = 0.0_f64;
    let mut n = 0_usize;

    for hit in matches_weighted.values_mut().flatten() {
        if weighting.applies(hit.start, word_count) {
            hit.score *= weighting.end_weight;
        }
        sum += hit.score;
        n += 1;
    }

    if n == 0 {
        return Err(SentimentError::UndefinedScore {
            id: doc_id.to_string(),
        });
    }

    Ok(ScoreResult {
        text_score: sum / n as f64,
        matches_weighted,
    })
}
