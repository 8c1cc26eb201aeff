use super::*;
use canonical::normalize;

const PROSE: &str = "Rust gives you memory safety without garbage collection, and the borrow \
checker enforces aliasing rules so data races become compile time errors.";

fn matcher(n: usize, w: usize) -> Matcher {
    Matcher::new(
        PerceptualConfig::new().with_n(n).with_w(w),
        MatchConfig::default(),
    )
    .unwrap()
}

fn phrases(report: &ComparisonReport) -> Vec<(&str, usize)> {
    report
        .ranked_phrases
        .iter()
        .map(|p| (p.phrase.as_str(), p.frequency))
        .collect()
}

#[test]
fn worked_example_every_trigram_selected() {
    let tokens = normalize("the quick brown fox jumps");
    let report = matcher(3, 1).compare(&tokens, &tokens).unwrap();

    assert_eq!(report.total_distinct_reference_fingerprints, 3);
    assert_eq!(report.stats.confirmed_matches, 3);
    assert_eq!(report.similarity_score_percent, 100.0);
    assert_eq!(report.ranked_phrases[0].frequency, 1);
    assert_eq!(report.ranked_phrases[0].rank, 1);

    let mut texts: Vec<&str> = report.ranked_phrases.iter().map(|p| p.phrase.as_str()).collect();
    texts.sort_unstable();
    assert_eq!(texts, vec!["brown fox jumps", "quick brown fox", "the quick brown"]);
}

#[test]
fn identical_documents_score_one_hundred() {
    let tokens = normalize(PROSE);
    let report = matcher(3, 3).compare(&tokens, &tokens).unwrap();
    assert_eq!(report.similarity_score_percent, 100.0);
    assert!(report.total_distinct_reference_fingerprints > 0);
}

#[test]
fn disjoint_vocabulary_scores_zero() {
    let reference = normalize("alpha beta gamma delta epsilon zeta");
    let suspect = normalize("one two three four five six seven");
    let report = matcher(3, 3).compare(&reference, &suspect).unwrap();

    assert_eq!(report.similarity_score_percent, 0.0);
    assert!(report.ranked_phrases.is_empty());
    assert_eq!(report.stats.confirmed_matches, 0);
    assert_eq!(report.stats.distinct_matches, 0);
}

#[test]
fn repeated_suspect_exceeds_one_hundred() {
    let reference = normalize("the quick brown fox jumps");
    let suspect = normalize("the quick brown fox jumps the quick brown fox jumps");
    let report = matcher(3, 1).compare(&reference, &suspect).unwrap();

    assert_eq!(report.stats.confirmed_matches, 6);
    assert_eq!(report.similarity_score_percent, 200.0);
    assert_eq!(
        phrases(&report),
        vec![
            ("the quick brown", 2),
            ("quick brown fox", 2),
            ("brown fox jumps", 2),
        ]
    );
}

#[test]
fn ranking_sorted_by_frequency() {
    let reference = normalize("a b c d e f");
    let suspect = normalize("a b c x a b c x a b c x d e f");
    let report = matcher(3, 1).compare(&reference, &suspect).unwrap();

    assert_eq!(phrases(&report), vec![("a b c", 3), ("d e f", 1)]);
    assert_eq!(report.stats.confirmed_matches, 4);
    assert_eq!(report.total_distinct_reference_fingerprints, 4);
    assert_eq!(report.similarity_score_percent, 100.0);
}

#[test]
fn ranked_list_bounded_by_top_k() {
    let tokens = normalize(PROSE);
    let m = Matcher::new(
        PerceptualConfig::new().with_n(3).with_w(1),
        MatchConfig::default().with_top_k(2),
    )
    .unwrap();
    let report = m.compare(&tokens, &tokens).unwrap();

    assert_eq!(report.ranked_phrases.len(), 2);
    assert!(report.stats.distinct_matches > 2);
    let ranks: Vec<usize> = report.ranked_phrases.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn short_reference_is_empty_signature() {
    let reference = normalize("too short");
    let suspect = normalize(PROSE);
    let err = matcher(3, 3).compare(&reference, &suspect).unwrap_err();
    assert_eq!(err, MatchError::EmptyReferenceSignature);
}

#[test]
fn short_suspect_is_not_an_error() {
    let reference = normalize(PROSE);
    let suspect = normalize("memory");
    let report = matcher(3, 3).compare(&reference, &suspect).unwrap();
    assert_eq!(report.similarity_score_percent, 0.0);
    assert_eq!(report.stats.windows_scanned, 0);
}

#[test]
fn capacity_ceiling_is_reported() {
    let tokens = normalize(PROSE);
    let m = Matcher::new(
        PerceptualConfig::new().with_n(3).with_w(1),
        MatchConfig::default().with_table_capacity(2, 4),
    )
    .unwrap();
    let err = m.compare(&tokens, &tokens).unwrap_err();
    assert_eq!(err, MatchError::CapacityExceeded { capacity: 4 });
}

#[test]
fn scan_stats_account_for_every_window() {
    let reference = normalize(PROSE);
    let suspect = normalize("the borrow checker enforces aliasing rules in every crate you write");
    let m = matcher(3, 3);
    let report = m.compare(&reference, &suspect).unwrap();
    let stats = report.stats;

    assert_eq!(stats.windows_scanned, suspect.len() - 2);
    assert_eq!(
        stats.filter_rejections + stats.filter_false_positives + stats.confirmed_matches,
        stats.windows_scanned
    );
    assert!(stats.confirmed_matches >= 1);
}

#[test]
fn small_filter_never_changes_the_result() {
    let reference = normalize(PROSE);
    let suspect = normalize("the borrow checker enforces aliasing rules so data races vanish");
    let wide = matcher(3, 3).compare(&reference, &suspect).unwrap();

    let narrow = Matcher::new(
        PerceptualConfig::new().with_n(3).with_w(3),
        MatchConfig::default().with_filter_bits(8),
    )
    .unwrap()
    .compare(&reference, &suspect)
    .unwrap();

    assert_eq!(wide.similarity_score_percent, narrow.similarity_score_percent);
    assert_eq!(wide.ranked_phrases, narrow.ranked_phrases);
}

#[test]
fn comparison_is_deterministic() {
    let reference = normalize(PROSE);
    let suspect = normalize("memory safety without garbage collection and the borrow checker");
    let m = matcher(3, 3);
    let first = m.compare(&reference, &suspect).unwrap();
    let second = m.compare(&reference, &suspect).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_fingerprinting_matches_sequential() {
    let reference = normalize(PROSE);
    let seq = matcher(3, 3).compare(&reference, &reference).unwrap();
    let par = Matcher::new(
        PerceptualConfig::new().with_n(3).with_w(3).with_parallel(true),
        MatchConfig::default(),
    )
    .unwrap()
    .compare(&reference, &reference)
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn invalid_configs_rejected() {
    let err = Matcher::new(PerceptualConfig::new().with_n(0), MatchConfig::default()).unwrap_err();
    assert_eq!(err, MatchError::Perceptual(PerceptualError::InvalidConfigN { n: 0 }));

    let err = Matcher::new(PerceptualConfig::new(), MatchConfig::default().with_top_k(0)).unwrap_err();
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn scan_rejects_mismatched_tokens() {
    let m = matcher(3, 1);
    let tokens = normalize("the quick brown fox jumps");
    let sig = m.signature(&tokens).unwrap();
    let index = m.build_reference(&sig).unwrap();

    let err = m.scan(&index, &tokens[..2], &sig).unwrap_err();
    assert!(matches!(
        err,
        MatchError::Perceptual(PerceptualError::WindowOutOfBounds { .. })
    ));
}

#[test]
fn signatures_from_other_parameters_are_rejected() {
    let m = matcher(3, 1);
    let tokens = normalize(PROSE);
    let reference = m.signature(&tokens).unwrap();

    let bigrams =
        perceptual::signature(&tokens, &PerceptualConfig::new().with_n(2).with_w(1)).unwrap();
    let err = m.compare_signatures(&reference, &tokens, &bigrams).unwrap_err();
    assert_eq!(
        err,
        MatchError::IncompatibleSignature {
            role: "suspect",
            detail: "n is 2, matcher expects 3".into(),
        }
    );

    let other_modulus = perceptual::signature(
        &tokens,
        &PerceptualConfig::new()
            .with_n(3)
            .with_w(1)
            .with_moduli(998_244_353, 1_000_000_009),
    )
    .unwrap();
    let err = m.compare_signatures(&other_modulus, &tokens, &reference).unwrap_err();
    assert!(matches!(
        err,
        MatchError::IncompatibleSignature { role: "reference", .. }
    ));

    // Matching parameters still compare cleanly.
    let report = m.compare_signatures(&reference, &tokens, &reference).unwrap();
    assert_eq!(report.similarity_score_percent, 100.0);
}
