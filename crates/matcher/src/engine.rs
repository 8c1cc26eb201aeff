use std::time::Instant;

use perceptual::{PerceptualConfig, PerceptualError, Signature};
use tracing::{debug, info, warn, Level};

use crate::frequency::FrequencyTracker;
use crate::index::{Lookup, MembershipIndex};
use crate::score::similarity_score;
use crate::topk::top_k;
use crate::types::{ComparisonReport, MatchConfig, MatchError, RankedPhrase, ScanStats};

#[cfg(test)]
mod tests;

/// State left behind by one pass over the suspect document.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub tracker: FrequencyTracker,
    pub stats: ScanStats,
}

/// Compares a reference document against a suspect document.
///
/// A `Matcher` only holds configuration; every comparison builds its own
/// index and tracker and drops them when it returns.
#[derive(Debug, Clone)]
pub struct Matcher {
    perceptual_cfg: PerceptualConfig,
    match_cfg: MatchConfig,
}

impl Matcher {
    pub fn new(perceptual_cfg: PerceptualConfig, match_cfg: MatchConfig) -> Result<Self, MatchError> {
        perceptual_cfg.validate()?;
        match_cfg.validate()?;
        Ok(Self {
            perceptual_cfg,
            match_cfg,
        })
    }

    pub fn perceptual_config(&self) -> &PerceptualConfig {
        &self.perceptual_cfg
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.match_cfg
    }

    /// Fingerprint and winnow one token sequence.
    pub fn signature<S>(&self, tokens: &[S]) -> Result<Signature, MatchError>
    where
        S: AsRef<str> + Sync,
    {
        Ok(perceptual::signature(tokens, &self.perceptual_cfg)?)
    }

    /// Build the membership index from the reference's winnowed selections.
    pub fn build_reference(&self, reference: &Signature) -> Result<MembershipIndex, MatchError> {
        self.check_compatible("reference", reference)?;
        let index = MembershipIndex::from_signature(reference, &self.match_cfg)?;
        debug!(
            selections = reference.winnowed.len(),
            distinct = index.distinct_len(),
            filter_bits_set = index.filter().bits_set(),
            "reference_index_built"
        );
        Ok(index)
    }

    /// Check every suspect window, not just its winnowed selections, against
    /// the reference index and count the confirmed matches.
    ///
    /// `suspect_tokens` must be the sequence `suspect` was computed from; the
    /// matched phrase is rebuilt from it.
    pub fn scan<S>(
        &self,
        index: &MembershipIndex,
        suspect_tokens: &[S],
        suspect: &Signature,
    ) -> Result<ScanOutcome, MatchError>
    where
        S: AsRef<str>,
    {
        self.check_compatible("suspect", suspect)?;
        let n = self.perceptual_cfg.n;
        let mut tracker = FrequencyTracker::new(&self.match_cfg)?;
        let mut stats = ScanStats::default();

        for (start, fp) in suspect.fingerprints.iter().enumerate() {
            stats.windows_scanned += 1;
            match index.lookup(fp) {
                Lookup::FilterRejected => stats.filter_rejections += 1,
                Lookup::FalsePositive => stats.filter_false_positives += 1,
                Lookup::Confirmed => {
                    let window = suspect_tokens.get(start..start + n).ok_or(
                        PerceptualError::WindowOutOfBounds {
                            start,
                            n,
                            len: suspect_tokens.len(),
                        },
                    )?;
                    tracker.record(*fp, start, || join_window(window))?;
                    stats.confirmed_matches += 1;
                }
            }
        }
        stats.distinct_matches = tracker.distinct();

        debug!(
            windows = stats.windows_scanned,
            confirmed = stats.confirmed_matches,
            filter_rejections = stats.filter_rejections,
            false_positives = stats.filter_false_positives,
            "suspect_scan_complete"
        );
        Ok(ScanOutcome { tracker, stats })
    }

    /// Top-K over the tracker's final counts, ranks starting at 1.
    pub fn rank(&self, tracker: &FrequencyTracker) -> Vec<RankedPhrase> {
        top_k(tracker.entries(), self.match_cfg.top_k)
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedPhrase {
                rank: i + 1,
                frequency: entry.count,
                phrase: entry.phrase.clone(),
            })
            .collect()
    }

    /// Run the full comparison over two normalized token sequences.
    pub fn compare<R, S>(&self, reference: &[R], suspect: &[S]) -> Result<ComparisonReport, MatchError>
    where
        R: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        let reference_sig = self.signature(reference)?;
        let suspect_sig = self.signature(suspect)?;
        self.compare_signatures(&reference_sig, suspect, &suspect_sig)
    }

    /// Same as [`Matcher::compare`] for signatures computed elsewhere.
    pub fn compare_signatures<S>(
        &self,
        reference: &Signature,
        suspect_tokens: &[S],
        suspect: &Signature,
    ) -> Result<ComparisonReport, MatchError>
    where
        S: AsRef<str>,
    {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "matcher.compare",
            reference_tokens = reference.meta.token_count,
            suspect_tokens = suspect_tokens.len(),
            n = self.perceptual_cfg.n,
            w = self.perceptual_cfg.w
        );
        let _guard = span.enter();

        match self.compare_inner(reference, suspect_tokens, suspect) {
            Ok(report) => {
                info!(
                    score = report.similarity_score_percent,
                    confirmed = report.stats.confirmed_matches,
                    distinct_reference = report.total_distinct_reference_fingerprints,
                    ranked = report.ranked_phrases.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "compare_success"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "compare_failure"
                );
                Err(err)
            }
        }
    }

    /// Signatures hashed with other parameters cannot match ours.
    fn check_compatible(&self, role: &'static str, sig: &Signature) -> Result<(), MatchError> {
        let meta = &sig.meta;
        let cfg = &self.perceptual_cfg;
        let mismatch = [
            ("n", meta.n as u64, cfg.n as u64),
            ("w", meta.w as u64, cfg.w as u64),
            ("base", meta.base, cfg.base),
            ("mod1", meta.mod1, cfg.mod1),
            ("mod2", meta.mod2, cfg.mod2),
        ]
        .into_iter()
        .find(|(_, found, expected)| found != expected);

        match mismatch {
            Some((field, found, expected)) => Err(MatchError::IncompatibleSignature {
                role,
                detail: format!("{field} is {found}, matcher expects {expected}"),
            }),
            None => Ok(()),
        }
    }

    fn compare_inner<S>(
        &self,
        reference: &Signature,
        suspect_tokens: &[S],
        suspect: &Signature,
    ) -> Result<ComparisonReport, MatchError>
    where
        S: AsRef<str>,
    {
        let index = self.build_reference(reference)?;
        if index.is_empty() {
            return Err(MatchError::EmptyReferenceSignature);
        }

        let outcome = self.scan(&index, suspect_tokens, suspect)?;
        let distinct_reference = index.distinct_len();
        let score = similarity_score(outcome.stats.confirmed_matches, distinct_reference)?;

        Ok(ComparisonReport {
            similarity_score_percent: score,
            ranked_phrases: self.rank(&outcome.tracker),
            total_distinct_reference_fingerprints: distinct_reference,
            stats: outcome.stats,
        })
    }
}

fn join_window<S: AsRef<str>>(window: &[S]) -> String {
    let mut phrase = String::new();
    for (i, token) in window.iter().enumerate() {
        if i > 0 {
            phrase.push(' ');
        }
        phrase.push_str(token.as_ref());
    }
    phrase
}
