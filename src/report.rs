// src/report.rs
//! Tab-separated result blocks.
//!
//! - Simple: header + one row of the run summary, columns in alphabetical
//!   field order.
//! - Verbose: fixed header + one row per weighted hit, sorted by
//!   `(id, phrase, word pos, weighted score, rule num)`.
//!
//! Every row is tab-joined and newline-terminated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::error::{Result, SentimentError};
use crate::matcher::Matches;

pub const VERBOSE_HEADER: [&str; 5] = ["text id", "phrase", "word pos", "weighted score", "rule num"];

/// Columns kept as text when re-parsing a simple block.
const TEXT_FIELDS: [&str; 1] = ["id"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    #[default]
    Simple,
    Verbose,
}

impl ReportMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Simple
        }
    }
}

/// Per-document summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: String,
    pub text_score: f64,
    pub word_count: usize,
    pub total_hits: usize,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

impl RunSummary {
    /// Field name -> value, sorted by field name.
    fn columns(&self) -> Result<BTreeMap<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
            Ok(other) => Err(SentimentError::summary(format!(
                "expected an object, got {other}"
            ))),
            Err(e) => Err(SentimentError::summary(e.to_string())),
        }
    }

    /// Header line + value line.
    pub fn to_tsv(&self) -> Result<String> {
        let cols = self.columns()?;
        let header: Vec<&str> = cols.keys().map(String::as_str).collect();
        let row: Vec<String> = cols.values().map(cell).collect();
        Ok(format!("{}\n{}\n", header.join("\t"), row.join("\t")))
    }

    /// Re-parse a block produced by [`RunSummary::to_tsv`].
    pub fn from_tsv(block: &str) -> Result<Self> {
        let mut lines = block.lines().filter(|l| !l.is_empty());
        let header = lines
            .next()
            .ok_or_else(|| SentimentError::summary("missing header row"))?;
        let row = lines
            .next()
            .ok_or_else(|| SentimentError::summary("missing value row"))?;

        let names: Vec<&str> = header.split('\t').collect();
        let cells: Vec<&str> = row.split('\t').collect();
        if names.len() != cells.len() {
            return Err(SentimentError::summary(format!(
                "{} columns in header, {} in row",
                names.len(),
                cells.len()
            )));
        }

        let mut map = Map::new();
        for (name, raw) in names.into_iter().zip(cells) {
            let value = if TEXT_FIELDS.contains(&name) {
                Value::String(raw.to_string())
            } else {
                raw.parse::<Number>()
                    .map(Value::Number)
                    .map_err(|e| SentimentError::summary(format!("{name}={raw:?}: {e}")))?
            };
            map.insert(name.to_string(), value);
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| SentimentError::summary(e.to_string()))
    }
}

fn cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shortest float form that still reads back as a float (`-1.0`, `-1.25`).
pub fn format_score(x: f64) -> String {
    Number::from_f64(x)
        .map(|n| n.to_string())
        .unwrap_or_else(|| x.to_string())
}

/// One verbose row per weighted hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VerboseRow<'a> {
    pub id: &'a str,
    pub phrase: &'a str,
    pub start: usize,
    pub score: f64,
    pub rule_index: usize,
}

pub fn verbose_rows<'a>(id: &'a str, matches_weighted: &'a Matches) -> Vec<VerboseRow<'a>> {
    let mut rows: Vec<VerboseRow<'a>> = matches_weighted
        .iter()
        .flat_map(|(phrase, hits)| {
            hits.iter().map(move |h| VerboseRow {
                id,
                phrase,
                start: h.start,
                score: h.score,
                rule_index: h.rule_index,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.id.cmp(b.id)
            .then_with(|| a.phrase.cmp(b.phrase))
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.score.total_cmp(&b.score))
            .then_with(|| a.rule_index.cmp(&b.rule_index))
    });
    rows
}

pub fn render_verbose(id: &str, matches_weighted: &Matches) -> String {
    let mut out = VERBOSE_HEADER.join("\t");
    out.push('\n');
    for r in verbose_rows(id, matches_weighted) {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            r.id,
            r.phrase,
            r.start,
            format_score(r.score),
            r.rule_index
        ));
    }
    out
}

/// Render the block for one document in the requested mode.
pub fn render(mode: ReportMode, summary: &RunSummary, matches_weighted: &Matches) -> Result<String> {
    match mode {
        ReportMode::Simple => summary.to_tsv(),
        ReportMode::Verbose => Ok(render_verbose(&summary.id, matches_weighted)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchHit;

    fn summary() -> RunSummary {
        RunSummary {
            id: "100".into(),
            text_score: -1.25,
            word_count: 7,
            total_hits: 2,
            positive_hits: 0,
            negative_hits: 2,
        }
    }

    #[test]
    fn simple_block_is_alphabetical() {
        let tsv = summary().to_tsv().unwrap();
        assert_eq!(
            tsv,
            "id\tnegative_hits\tpositive_hits\ttext_score\ttotal_hits\tword_count\n\
             100\t2\t0\t-1.25\t2\t7\n"
        );
    }

    #[test]
    fn simple_block_reparses() {
        let s = RunSummary {
            text_score: -1.0,
            ..summary()
        };
        let back = RunSummary::from_tsv(&s.to_tsv().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn reparse_rejects_ragged_rows() {
        let err = RunSummary::from_tsv("id\ttext_score\n1\n").unwrap_err();
        assert!(matches!(err, SentimentError::MalformedSummary { .. }));
        assert!(RunSummary::from_tsv("id\ttext_score\n1\tabc\n").is_err());
        assert!(RunSummary::from_tsv("").is_err());
    }

    #[test]
    fn verbose_rows_sorted_by_phrase_then_position() {
        let mut m = Matches::new();
        m.insert(
            "not very good".into(),
            vec![MatchHit { start: 4, score: -1.5, rule_index: 0 }],
        );
        m.insert(
            "great".into(),
            vec![
                MatchHit { start: 9, score: 3.0, rule_index: 2 },
                MatchHit { start: 1, score: 2.0, rule_index: 2 },
            ],
        );
        let out = render_verbose("a1", &m);
        assert_eq!(
            out,
            "text id\tphrase\tword pos\tweighted score\trule num\n\
             a1\tgreat\t1\t2.0\t2\n\
             a1\tgreat\t9\t3.0\t2\n\
             a1\tnot very good\t4\t-1.5\t0\n"
        );
    }

    #[test]
    fn mode_selects_block() {
        let m = Matches::new();
        let simple = render(ReportMode::from_verbose(false), &summary(), &m).unwrap();
        assert!(simple.starts_with("id\t"));
        let verbose = render(ReportMode::Verbose, &summary(), &m).unwrap();
        assert_eq!(verbose, "text id\tphrase\tword pos\tweighted score\trule num\n");
    }
}
