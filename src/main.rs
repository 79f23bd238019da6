//! Phrase sentiment CLI: score a TSV of documents against a TSV lexicon and
//! append the result blocks to an output file.

use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use phrase_sentiment::suite::DEFAULT_OUTPUT_FILE;
use phrase_sentiment::{run_files, ScoringConfig, SuitePaths, UnscoredPolicy};

#[derive(Debug, Parser)]
#[command(name = "phrase-sentiment")]
#[command(about = "Score documents against a weighted phrase lexicon with negation handling")]
struct Cli {
    /// Lexicon table: `<phrase>\t<integer score>` per line.
    #[arg(long, short = 'l')]
    lexicon: PathBuf,

    /// Documents: `<id>\t<free text>` per line.
    #[arg(long, short = 'i')]
    input: PathBuf,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// TOML config; overrides $SENTIMENT_CONFIG_PATH and config/scoring.toml.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// One row per phrase match instead of the one-line summary.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Max filler words between a negation marker and the phrase.
    #[arg(long)]
    negation_window: Option<usize>,

    #[arg(long)]
    end_weight: Option<f64>,

    /// Relative word position from which end weighting applies.
    #[arg(long)]
    end_threshold: Option<f64>,

    /// Skip documents without any lexicon match instead of failing the run.
    #[arg(long)]
    skip_unscored: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut ScoringConfig) {
        if self.verbose {
            cfg.verbose = true;
        }
        if let Some(k) = self.negation_window {
            cfg.negation_window = k;
        }
        if let Some(w) = self.end_weight {
            cfg.end_weight = w;
        }
        if let Some(t) = self.end_threshold {
            cfg.end_threshold = t;
        }
    }
}

/// Compact logs on stderr; JSON when SENTIMENT_LOG_JSON=1.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("phrase_sentiment=info,warn"));
    let json = std::env::var("SENTIMENT_LOG_JSON").ok().as_deref() == Some("1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = ScoringConfig::load(cli.config.as_deref())?;
    cli.apply(&mut cfg);
    cfg.validate()?;

    let policy = if cli.skip_unscored {
        UnscoredPolicy::Skip
    } else {
        UnscoredPolicy::Abort
    };
    let paths = SuitePaths {
        text_path: cli.input,
        lexicon_path: cli.lexicon,
        output_dir: cli.output_dir,
        output_file: cli.output_file,
    };
    run_files(&paths, &cfg, policy)?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    // Load .env if present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("run failed: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ARGS: [&str; 5] = ["phrase-sentiment", "--lexicon", "l.tsv", "--input", "t.tsv"];

    fn file_config() -> (tempfile::TempDir, ScoringConfig) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scoring.toml");
        std::fs::write(
            &path,
            "[scoring]\nnegation_window = 1\nend_weight = 2.0\nend_threshold = 0.6\n",
        )
        .unwrap();
        let cfg = ScoringConfig::from_path(&path).unwrap();
        (tmp, cfg)
    }

    #[test]
    fn flags_override_file_config() {
        let (_tmp, mut cfg) = file_config();
        let args = BASE_ARGS.iter().copied().chain([
            "--end-threshold",
            "0.3",
            "--negation-window",
            "4",
            "--verbose",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        cli.apply(&mut cfg);

        assert_eq!(cfg.end_threshold, 0.3);
        assert_eq!(cfg.negation_window, 4);
        assert!(cfg.verbose);
        // not given on the command line
        assert_eq!(cfg.end_weight, 2.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn absent_flags_keep_file_config() {
        let (_tmp, mut cfg) = file_config();
        let loaded = cfg;
        let cli = Cli::try_parse_from(BASE_ARGS).unwrap();
        cli.apply(&mut cfg);
        assert_eq!(cfg, loaded);
        assert!(!cli.skip_unscored);
        assert_eq!(cli.output_file, DEFAULT_OUTPUT_FILE);
    }

    #[test]
    fn oversized_window_flag_fails_validation() {
        let (_tmp, mut cfg) = file_config();
        let args = BASE_ARGS.iter().copied().chain(["--negation-window", "1000"]);
        let cli = Cli::try_parse_from(args).unwrap();
        cli.apply(&mut cfg);
        assert!(cfg.validate().is_err());
    }
}
