//! # TextGuard Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` compares two fingerprinted documents. The reference document's
//! winnowed fingerprints become a membership index; every window of the
//! suspect document is then checked against it, confirmed matches are
//! counted per fingerprint, and the most frequent matched phrases are ranked.
//!
//! ## Core Types
//!
//! - [`MembershipIndex`]: approximate bit filter in front of an exact
//!   open-addressing set. Only the exact set decides membership.
//! - [`FingerprintTable`]: the growable open-addressing table behind both the
//!   exact set and the [`FrequencyTracker`].
//! - [`TopKSelector`]: bounded min-heap over the tracker's final counts.
//! - [`Matcher`]: runs index build, scan, ranking and scoring in order.
//! - [`ComparisonReport`]: score, ranked phrases, reference size and
//!   [`ScanStats`].
//!
//! ## Example Usage
//!
//! ```
//! use canonical::normalize;
//! use matcher::{MatchConfig, Matcher};
//! use perceptual::PerceptualConfig;
//!
//! let tokens = normalize("The quick brown fox jumps");
//! let matcher = Matcher::new(
//!     PerceptualConfig::new().with_n(3).with_w(1),
//!     MatchConfig::default(),
//! )
//! .expect("valid config");
//!
//! let report = matcher.compare(&tokens, &tokens).expect("compare");
//! assert_eq!(report.similarity_score_percent, 100.0);
//! assert_eq!(report.total_distinct_reference_fingerprints, 3);
//! ```
//!
//! ## Observability
//!
//! Each comparison runs inside a `matcher.compare` tracing span and emits a
//! `compare_success` or `compare_failure` event with timing.

pub mod engine;
pub mod filter;
pub mod frequency;
pub mod index;
pub mod score;
pub mod table;
pub mod topk;
pub mod types;

pub use crate::engine::{Matcher, ScanOutcome};
pub use crate::filter::ApproximateFilter;
pub use crate::frequency::{FrequencyEntry, FrequencyTracker};
pub use crate::index::{Lookup, MembershipIndex};
pub use crate::score::similarity_score;
pub use crate::table::FingerprintTable;
pub use crate::topk::{top_k, TopKSelector};
pub use crate::types::{ComparisonReport, MatchConfig, MatchError, RankedPhrase, ScanStats};
