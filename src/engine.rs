// src/engine.rs
//! # Scoring Engine
//! Per-document pipeline: normalize -> tokenize -> match -> score.
//! No I/O. The lexicon and its negation lexicon are built once in
//! [`Engine::new`] and only read afterwards.

use tracing::{debug, info};

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::lexicon::{Lexicon, NegationLexicon, NegationPattern};
use crate::matcher::{find_matches, MatchOutcome};
use crate::normalize::Document;
use crate::report::{render, ReportMode, RunSummary};
use crate::scoring::{score, EndWeighting, ScoreResult};
use crate::tokenize::tokenize;

/// Shortest token window: single words.
pub const MIN_TOKEN_LEN: usize = 1;

#[derive(Debug)]
pub struct Engine {
    lexicon: Lexicon,
    negations: NegationLexicon,
    weighting: EndWeighting,
    mode: ReportMode,
    max_len: usize,
}

/// Everything computed for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRun {
    pub id: String,
    pub word_count: usize,
    pub outcome: MatchOutcome,
    pub score: ScoreResult,
}

impl DocumentRun {
    pub fn text_score(&self) -> f64 {
        self.score.text_score
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            id: self.id.clone(),
            text_score: self.score.text_score,
            word_count: self.word_count,
            total_hits: self.outcome.total_hits(),
            positive_hits: self.outcome.positive_hits,
            negative_hits: self.outcome.negative_hits,
        }
    }

    pub fn render(&self, mode: ReportMode) -> Result<String> {
        render(mode, &self.summary(), &self.score.matches_weighted)
    }
}

impl Engine {
    pub fn new(lexicon: Lexicon, config: &ScoringConfig) -> Result<Self> {
        let pattern = NegationPattern::new(config.negation_window);
        let negations = NegationLexicon::build(&lexicon, pattern)?;
        // marker + up to K fillers + the longest phrase
        let max_len = lexicon.max_phrase_words() + config.negation_window + 1;

        info!(
            phrases = lexicon.len(),
            negation_window = config.negation_window,
            max_token_len = max_len,
            end_weight = config.end_weight,
            end_threshold = config.end_threshold,
            "scoring engine ready"
        );

        Ok(Self {
            lexicon,
            negations,
            weighting: config.weighting(),
            mode: config.report_mode(),
            max_len,
        })
    }

    pub fn negations(&self) -> &NegationLexicon {
        &self.negations
    }

    /// `(min_len, max_len)` passed to the tokenizer.
    pub fn token_window(&self) -> (usize, usize) {
        (MIN_TOKEN_LEN, self.max_len)
    }

    /// Score one raw `<id>\t<text>` record.
    pub fn analyze(&self, raw: &str) -> Result<DocumentRun> {
        let doc = Document::from_record(raw)?;
        self.analyze_document(&doc)
    }

    pub fn analyze_document(&self, doc: &Document) -> Result<DocumentRun> {
        let tokens = tokenize(&doc.words, MIN_TOKEN_LEN, Some(self.max_len))?;
        let outcome = find_matches(&tokens, &self.lexicon, &self.negations);

        debug!(
            id = %doc.id,
            fingerprint = %doc_fingerprint(doc),
            words = doc.word_count(),
            tokens = tokens.len(),
            hits = outcome.total_hits(),
            positive = outcome.positive_hits,
            negative = outcome.negative_hits,
            "document matched"
        );

        let score = score(&doc.id, &outcome.matches, doc.word_count(), self.weighting)?;
        Ok(DocumentRun {
            id: doc.id.clone(),
            word_count: doc.word_count(),
            outcome,
            score,
        })
    }

    /// Render a run in this engine's configured mode.
    pub fn report(&self, run: &DocumentRun) -> Result<String> {
        run.render(self.mode)
    }
}

/// Short fingerprint of a cleaned document, so debug events can correlate
/// documents without carrying their text.
pub(crate) fn doc_fingerprint(doc: &Document) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(doc.id.as_bytes());
    for word in &doc.words {
        hasher.update(b"\t");
        hasher.update(word.as_bytes());
    }
    hasher.finalize()[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
