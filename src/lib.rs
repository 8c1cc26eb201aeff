//! Workspace umbrella crate for TextGuard.
//!
//! This crate stitches together document loading, normalization,
//! fingerprinting and matching so callers can compare two documents with a
//! single API entry point.
//!
//! ```
//! use textguard::{compare_documents, DocumentSource, TextGuardConfig, Verdict};
//!
//! let reference = DocumentSource::text("The quick brown fox jumps over the lazy dog.");
//! let suspect = DocumentSource::text("A quick brown fox jumps over the lazy dog, twice.");
//!
//! let report = compare_documents(&reference, &suspect, &TextGuardConfig::default()).unwrap();
//! assert!(report.score() > 0.0);
//! assert_eq!(report.verdict, Verdict::Critical);
//! ```

pub mod config;
pub mod report;
pub mod source;
pub mod style;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, CanonicalizedDocument, Token, canonicalize, normalize,
};
pub use matcher::{
    ComparisonReport, MatchConfig, MatchError, Matcher, RankedPhrase, ScanStats,
};
pub use perceptual::{Fingerprint, PerceptualConfig, PerceptualError, Signature};

pub use crate::config::{ConfigLoadError, ReportConfig, TextGuardConfig};
pub use crate::report::{DocumentSummary, ForensicReport, Verdict};
pub use crate::source::DocumentSource;
pub use crate::style::StyleProfile;

use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{Level, info, warn};

/// Errors that can occur while comparing two documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A document could not be read; nothing was analyzed.
    #[error("input `{source_name}` unavailable: {reason}")]
    InputUnavailable { source_name: String, reason: String },

    #[error("normalization failure: {0}")]
    Canonical(#[from] CanonicalError),

    #[error("fingerprinting failed: {0}")]
    Perceptual(#[from] PerceptualError),

    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_canonical(&self, latency: Duration, result: Result<(), CanonicalError>);
    fn record_fingerprint(&self, latency: Duration, result: Result<(), PerceptualError>);
    fn record_scan(&self, latency: Duration, result: Result<(), MatchError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_canonical(self, result: Result<(), CanonicalError>) {
        self.recorder.record_canonical(self.start.elapsed(), result);
    }

    fn record_fingerprint(self, result: Result<(), PerceptualError>) {
        self.recorder.record_fingerprint(self.start.elapsed(), result);
    }

    fn record_scan(self, result: Result<(), MatchError>) {
        self.recorder.record_scan(self.start.elapsed(), result);
    }
}

/// A loaded, normalized document ready for fingerprinting.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub source_name: String,
    pub document: CanonicalizedDocument,
    pub style: StyleProfile,
}

impl PreparedDocument {
    fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            source_name: self.source_name.clone(),
            token_count: self.document.len(),
            sha256_hex: self.document.sha256_hex.clone(),
            style: self.style,
        }
    }
}

/// Load and normalize one document. Stylometry runs on the raw text.
pub fn prepare_document(
    doc_id: &str,
    source: &DocumentSource,
    cfg: &CanonicalizeConfig,
) -> Result<PreparedDocument, PipelineError> {
    let text = source.load()?;
    prepare_text(doc_id, source.name(), &text, cfg)
}

fn prepare_text(
    doc_id: &str,
    source_name: String,
    text: &str,
    cfg: &CanonicalizeConfig,
) -> Result<PreparedDocument, PipelineError> {
    let style = StyleProfile::analyze(text);

    let metrics = MetricsSpan::start();
    let result = canonicalize(doc_id, text, cfg);
    if let Some(span) = metrics {
        span.record_canonical(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }

    Ok(PreparedDocument {
        source_name,
        document: result?,
        style,
    })
}

/// Fingerprint and winnow a normalized document.
pub fn fingerprint_document(
    doc: &CanonicalizedDocument,
    cfg: &PerceptualConfig,
) -> Result<Signature, PipelineError> {
    let metrics = MetricsSpan::start();
    let result = perceptual::signature_for_document(doc, cfg);
    if let Some(span) = metrics {
        span.record_fingerprint(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    result.map_err(PipelineError::from)
}

/// Compare `suspect` against `reference` end to end.
///
/// Both documents are loaded before any analysis, so an unreadable input
/// fails with [`PipelineError::InputUnavailable`] and nothing else runs.
/// With `perceptual.use_parallel` set the two documents are fingerprinted
/// concurrently; the reference index is always complete before the scan.
pub fn compare_documents(
    reference: &DocumentSource,
    suspect: &DocumentSource,
    cfg: &TextGuardConfig,
) -> Result<ForensicReport, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "textguard.compare",
        reference = %reference.name(),
        suspect = %suspect.name()
    );
    let _guard = span.enter();

    match compare_inner(reference, suspect, cfg) {
        Ok(report) => {
            info!(
                score = report.score(),
                verdict = %report.verdict,
                reference_tokens = report.reference.token_count,
                suspect_tokens = report.suspect.token_count,
                elapsed_micros = start.elapsed().as_micros(),
                "pipeline_success"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "pipeline_failure"
            );
            Err(err)
        }
    }
}

/// [`compare_documents`] over two in-memory strings.
pub fn compare_texts(
    reference: &str,
    suspect: &str,
    cfg: &TextGuardConfig,
) -> Result<ForensicReport, PipelineError> {
    compare_documents(
        &DocumentSource::text(reference),
        &DocumentSource::text(suspect),
        cfg,
    )
}

fn compare_inner(
    reference: &DocumentSource,
    suspect: &DocumentSource,
    cfg: &TextGuardConfig,
) -> Result<ForensicReport, PipelineError> {
    // Both inputs must be readable before any stage runs.
    let reference_text = reference.load()?;
    let suspect_text = suspect.load()?;

    let canonical_cfg = cfg.canonical_config();
    let perceptual_cfg = cfg.perceptual_config();
    let matcher = Matcher::new(perceptual_cfg.clone(), cfg.match_config())?;

    let reference_doc =
        prepare_text("reference", reference.name(), &reference_text, &canonical_cfg)?;
    let suspect_doc = prepare_text("suspect", suspect.name(), &suspect_text, &canonical_cfg)?;

    let (reference_sig, suspect_sig) = if perceptual_cfg.use_parallel {
        rayon::join(
            || fingerprint_document(&reference_doc.document, &perceptual_cfg),
            || fingerprint_document(&suspect_doc.document, &perceptual_cfg),
        )
    } else {
        (
            fingerprint_document(&reference_doc.document, &perceptual_cfg),
            fingerprint_document(&suspect_doc.document, &perceptual_cfg),
        )
    };
    let (reference_sig, suspect_sig) = (reference_sig?, suspect_sig?);

    let metrics = MetricsSpan::start();
    let result = matcher.compare_signatures(&reference_sig, &suspect_doc.document.tokens, &suspect_sig);
    if let Some(span) = metrics {
        span.record_scan(result.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    let comparison = result?;

    let verdict = Verdict::from_score(
        comparison.similarity_score_percent,
        cfg.report.critical_threshold,
    );

    Ok(ForensicReport {
        reference: reference_doc.summary(),
        suspect: suspect_doc.summary(),
        comparison,
        verdict,
    })
}
