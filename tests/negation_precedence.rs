// tests/negation_precedence.rs
//
// End-to-end checks of phrase-level negation precedence and end weighting
// through the public API.

use phrase_sentiment::{
    find_matches, score, tokenize, Document, EndWeighting, Engine, Lexicon, MatchHit,
    NegationLexicon, NegationPattern, ScoringConfig,
};

const DOC: &str = "today was not good not very good";

fn lexicon() -> Lexicon {
    Lexicon::from_entries([("good", 1), ("bad", -1)]).unwrap()
}

#[test]
fn negated_forms_found_and_plain_form_suppressed() {
    let lex = lexicon();
    let neg = NegationLexicon::build(&lex, NegationPattern::new(2)).unwrap();
    let doc = Document::new("d", DOC);
    let max_len = lex.max_phrase_words() + 2 + 1;
    let tokens = tokenize(&doc.words, 1, Some(max_len)).unwrap();

    let out = find_matches(&tokens, &lex, &neg);

    assert_eq!(
        out.matches.get("not good"),
        Some(&vec![MatchHit { start: 2, score: -1.0, rule_index: 0 }])
    );
    assert_eq!(
        out.matches.get("not very good"),
        Some(&vec![MatchHit { start: 4, score: -1.0, rule_index: 0 }])
    );
    assert!(out.matches.get("good").is_none());
    assert_eq!(out.negative_hits, 2);
    assert_eq!(out.positive_hits, 0);
}

#[test]
fn score_with_and_without_end_weighting() {
    let lex = lexicon();
    let neg = NegationLexicon::build(&lex, NegationPattern::default()).unwrap();
    let doc = Document::new("d", DOC);
    let tokens = tokenize(&doc.words, 1, Some(4)).unwrap();
    let out = find_matches(&tokens, &lex, &neg);

    let plain = score("d", &out.matches, doc.word_count(), EndWeighting::default()).unwrap();
    assert_eq!(plain.text_score, -1.0);

    let late = EndWeighting {
        end_weight: 1.5,
        end_threshold: 0.5,
    };
    let weighted = score("d", &out.matches, doc.word_count(), late).unwrap();
    assert!((weighted.text_score - -1.25).abs() < 1e-12);
    assert_eq!(weighted.matches_weighted["not very good"][0].score, -1.5);
}

#[test]
fn one_negation_blinds_every_plain_occurrence() {
    let engine = Engine::new(lexicon(), &ScoringConfig::default()).unwrap();
    let run = engine
        .analyze("x\tgood good good but never good")
        .unwrap();
    assert_eq!(run.outcome.total_hits(), 1);
    assert!(run.outcome.matches.contains_key("never good"));
    assert!(run.text_score() < 0.0);
}

#[test]
fn wider_window_reaches_further() {
    let text = "y\tnot at all really good";
    let narrow = Engine::new(lexicon(), &ScoringConfig::default()).unwrap();
    let run = narrow.analyze(text).unwrap();
    assert_eq!(run.outcome.positive_hits, 1);

    let wide = Engine::new(
        lexicon(),
        &ScoringConfig {
            negation_window: 3,
            ..Default::default()
        },
    )
    .unwrap();
    let run = wide.analyze(text).unwrap();
    assert_eq!(run.outcome.negative_hits, 1);
    assert!(run.outcome.matches.contains_key("not at all really good"));
}
