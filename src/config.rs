// src/config.rs
//! Scoring configuration: defaults, optional TOML file, env overrides.
//!
//! TOML shape (all keys optional):
//! ```toml
//! [scoring]
//! negation_window = 2
//! end_weight = 1.5
//! end_threshold = 0.75
//! verbose = false
//! ```
//!
//! Resolution: defaults < file < env < CLI flags (CLI handled by the binary).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::lexicon::DEFAULT_NEGATION_WINDOW;
use crate::report::ReportMode;
use crate::scoring::{EndWeighting, DEFAULT_END_THRESHOLD, DEFAULT_END_WEIGHT};

// --- env defaults & names ---
pub const DEFAULT_SCORING_CONFIG_PATH: &str = "config/scoring.toml";
/// Upper bound on filler words between a negation marker and its phrase.
pub const MAX_NEGATION_WINDOW: usize = 16;

pub const ENV_SCORING_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_NEGATION_WINDOW: &str = "SENTIMENT_NEGATION_WINDOW";
pub const ENV_END_WEIGHT: &str = "SENTIMENT_END_WEIGHT";
pub const ENV_END_THRESHOLD: &str = "SENTIMENT_END_THRESHOLD";
pub const ENV_VERBOSE: &str = "SENTIMENT_VERBOSE";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub negation_window: usize,
    pub end_weight: f64,
    pub end_threshold: f64,
    pub verbose: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            negation_window: DEFAULT_NEGATION_WINDOW,
            end_weight: DEFAULT_END_WEIGHT,
            end_threshold: DEFAULT_END_THRESHOLD,
            verbose: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigRoot {
    #[serde(default)]
    scoring: ScoringConfig,
}

impl ScoringConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let root: ConfigRoot = toml::from_str(s)?;
        Ok(root.scoring)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scoring config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scoring config {}", path.display()))
    }

    /// Resolve the file (explicit path, then $SENTIMENT_CONFIG_PATH, then the
    /// default path if present), apply env overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_SCORING_CONFIG_PATH).ok().map(PathBuf::from));

        let mut cfg = match named {
            Some(p) => Self::from_path(&p)?,
            None => {
                let default = PathBuf::from(DEFAULT_SCORING_CONFIG_PATH);
                if default.exists() {
                    Self::from_path(&default)?
                } else {
                    Self::default()
                }
            }
        };

        cfg.apply_env_from(|k| std::env::var(k).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Override fields from `lookup`; unparseable values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(k) = parse_env(lookup(ENV_NEGATION_WINDOW)) {
            self.negation_window = k;
        }
        if let Some(w) = parse_env::<f64>(lookup(ENV_END_WEIGHT)).filter(|w| w.is_finite()) {
            self.end_weight = w;
        }
        if let Some(t) = parse_threshold_env(lookup(ENV_END_THRESHOLD)) {
            self.end_threshold = t;
        }
        if let Some(v) = lookup(ENV_VERBOSE) {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.verbose = true,
                "0" | "false" | "no" | "off" => self.verbose = false,
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.negation_window > MAX_NEGATION_WINDOW {
            return Err(anyhow!(
                "negation_window must be at most {MAX_NEGATION_WINDOW}, got {}",
                self.negation_window
            ));
        }
        if !self.end_weight.is_finite() {
            return Err(anyhow!("end_weight must be finite, got {}", self.end_weight));
        }
        if !self.end_threshold.is_finite() {
            return Err(anyhow!(
                "end_threshold must be finite, got {}",
                self.end_threshold
            ));
        }
        Ok(())
    }

    pub fn weighting(&self) -> EndWeighting {
        EndWeighting {
            end_weight: self.end_weight,
            end_threshold: self.end_threshold,
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        ReportMode::from_verbose(self.verbose)
    }
}

fn parse_env<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|s| s.trim().parse::<T>().ok())
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    parse_env::<f64>(raw)
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}
