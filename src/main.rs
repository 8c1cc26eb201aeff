use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textguard::{DocumentSource, ForensicReport, StyleProfile, TextGuardConfig, compare_documents};

/// textguard: near-verbatim overlap detection between two documents.
///
/// The reference document is fingerprinted and indexed; every n-gram window
/// of the suspect document is checked against it. The score is the number
/// of matching suspect windows over the reference's distinct fingerprints,
/// so repeated copying can push it past 100%.
#[derive(Parser)]
#[command(name = "textguard", version, about)]
struct Cli {
    /// Reference (original) document file
    #[arg(long, conflicts_with = "reference_text", required_unless_present = "reference_text")]
    reference: Option<PathBuf>,

    /// Reference document given inline
    #[arg(long)]
    reference_text: Option<String>,

    /// Suspect document file
    #[arg(long, conflicts_with = "suspect_text", required_unless_present = "suspect_text")]
    suspect: Option<PathBuf>,

    /// Suspect document given inline
    #[arg(long)]
    suspect_text: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gram size (tokens per window)
    #[arg(short = 'n', long = "gram")]
    n: Option<usize>,

    /// Winnowing window size
    #[arg(short = 'w', long = "window")]
    w: Option<usize>,

    /// Number of ranked phrases to report
    #[arg(short = 'k', long = "top-k")]
    k: Option<usize>,

    /// Truncate displayed phrases to this many characters
    #[arg(long)]
    max_phrase_chars: Option<usize>,

    /// Fingerprint both documents in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<TextGuardConfig> {
        let mut cfg = match &self.config {
            Some(path) => TextGuardConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TextGuardConfig::default(),
        };

        if let Some(n) = self.n {
            cfg.perceptual.n = n;
        }
        if let Some(w) = self.w {
            cfg.perceptual.w = w;
        }
        if let Some(k) = self.k {
            cfg.matcher.top_k = k;
        }
        if let Some(max) = self.max_phrase_chars {
            cfg.report.max_phrase_display = Some(max);
        }
        if self.parallel {
            cfg.perceptual.use_parallel = true;
        }

        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn source(path: &Option<PathBuf>, text: &Option<String>) -> DocumentSource {
    match (path, text) {
        (Some(path), _) => DocumentSource::file(path),
        (None, Some(text)) => DocumentSource::text(text.as_str()),
        (None, None) => DocumentSource::text(""),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.load_config()?;

    let reference = source(&cli.reference, &cli.reference_text);
    let suspect = source(&cli.suspect, &cli.suspect_text);

    let report = compare_documents(&reference, &suspect, &cfg)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &cfg);
    }

    Ok(())
}

fn print_report(report: &ForensicReport, cfg: &TextGuardConfig) {
    let stats = &report.comparison.stats;

    println!("Reference: {} ({} tokens)", report.reference.source_name, report.reference.token_count);
    println!("Suspect:   {} ({} tokens)", report.suspect.source_name, report.suspect.token_count);
    println!();
    println!("Similarity score: {:.2}%", report.score());
    println!(
        "Distinct reference fingerprints: {}",
        report.comparison.total_distinct_reference_fingerprints
    );
    println!(
        "Windows scanned: {} | confirmed: {} | filter skips: {} | filter false positives: {}",
        stats.windows_scanned,
        stats.confirmed_matches,
        stats.filter_rejections,
        stats.filter_false_positives
    );
    println!();

    if report.ranked_phrases().is_empty() {
        println!("No recurring identical sequences identified.");
    } else {
        println!("Top matched phrases:");
        for phrase in report.ranked_phrases() {
            println!(
                "  [{}] Freq: {} | Phrase: \"{}\"",
                phrase.rank,
                phrase.frequency,
                phrase.display(cfg.report.max_phrase_display)
            );
        }
    }
    println!();

    println!("Stylometry:");
    print_style("reference", &report.reference.style);
    print_style("suspect", &report.suspect.style);
    println!();

    println!("Verdict: {} - {}", report.verdict, report.verdict.description());
}

fn print_style(label: &str, style: &StyleProfile) {
    println!(
        "  {label:<9} avg sentence length {:.2} words, vocabulary richness {:.2}",
        style.avg_sentence_len, style.vocab_richness
    );
}
