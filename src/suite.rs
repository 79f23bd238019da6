// src/suite.rs
//! Batch runner: stream `<id>\t<text>` lines through the engine and append
//! one formatted block per document to an output sink.
//!
//! Documents are processed strictly in input order, one at a time, so the
//! output order matches the input order.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::ScoringConfig;
use crate::engine::Engine;
use crate::lexicon::Lexicon;

pub const DEFAULT_OUTPUT_FILE: &str = "sentiment_output.tsv";

/// What to do with a document that has no lexicon matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnscoredPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteStats {
    pub documents: usize,
    pub scored: usize,
    pub skipped: usize,
}

/// Run every non-blank input line through `engine`, writing blocks to `output`.
pub fn run_suite<R, W>(
    engine: &Engine,
    input: R,
    mut output: W,
    policy: UnscoredPolicy,
) -> Result<SuiteStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = SuiteStats::default();

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("reading input line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        stats.documents += 1;

        let run = match engine.analyze(&line) {
            Ok(run) => run,
            Err(e) if e.is_undefined_score() && policy == UnscoredPolicy::Skip => {
                warn!(line = line_no, error = %e, "skipping unscored document");
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("input line {line_no}")),
        };

        let block = engine
            .report(&run)
            .with_context(|| format!("formatting document {:?}", run.id))?;
        output
            .write_all(block.as_bytes())
            .context("writing result block")?;
        stats.scored += 1;
    }

    output.flush().context("flushing output")?;
    info!(
        documents = stats.documents,
        scored = stats.scored,
        skipped = stats.skipped,
        "suite finished"
    );
    Ok(stats)
}

/// File locations for one batch run.
#[derive(Debug, Clone)]
pub struct SuitePaths {
    pub text_path: PathBuf,
    pub lexicon_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
}

impl SuitePaths {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Load the lexicon, open the output in append mode and run the suite.
pub fn run_files(
    paths: &SuitePaths,
    config: &ScoringConfig,
    policy: UnscoredPolicy,
) -> Result<SuiteStats> {
    config.validate().context("invalid scoring config")?;
    let lexicon = Lexicon::from_path(&paths.lexicon_path)
        .with_context(|| format!("loading lexicon {}", paths.lexicon_path.display()))?;
    let engine = Engine::new(lexicon, config).context("building scoring engine")?;

    let input = fs::File::open(&paths.text_path)
        .with_context(|| format!("opening input {}", paths.text_path.display()))?;

    if !paths.output_dir.as_os_str().is_empty() {
        fs::create_dir_all(&paths.output_dir)
            .with_context(|| format!("creating {}", paths.output_dir.display()))?;
    }
    let out_path = paths.output_path();
    let out = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&out_path)
        .with_context(|| format!("opening output {}", out_path.display()))?;

    info!(
        input = %paths.text_path.display(),
        output = %out_path.display(),
        "starting suite"
    );
    run_suite(&engine, BufReader::new(input), BufWriter::new(out), policy)
}
