// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod scoring;
pub mod suite;
pub mod tokenize;

// ---- Re-exports for stable public API ----
pub use crate::config::ScoringConfig;
pub use crate::engine::{DocumentRun, Engine};
pub use crate::error::SentimentError;
pub use crate::lexicon::{Lexicon, LexiconEntry, NegationLexicon, NegationPattern};
pub use crate::matcher::{find_matches, MatchHit, MatchOutcome, Matches};
pub use crate::normalize::{clean_row, normalize_text, Document};
pub use crate::report::{ReportMode, RunSummary};
pub use crate::scoring::{score, EndWeighting, ScoreResult};
pub use crate::suite::{run_files, run_suite, SuitePaths, SuiteStats, UnscoredPolicy};
pub use crate::tokenize::{tokenize, Token};
