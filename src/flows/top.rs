//! Top tokens flow - Most frequent tokens across a corpus
//!
//! Scans the corpus root, reads each document, streams its tokens into a
//! frequency counter and ranks the result.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::CorpusError;
use crate::core::frequency::{FrequencyCounter, FrequencyTable, RankedToken, TieBreak};
use crate::core::model::ResultSet;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::tokenizer::{tokenize_with, TokenFilter};
use crate::corpus::reader::{read_document, EncodingStrategy, FileWarning, ReadOutcome};
use crate::corpus::scan::{scan_documents, CorpusScan, ScanOptions};

/// Default number of tokens to report
pub const DEFAULT_LIMIT: usize = 100;

/// Options for counting and ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopOptions {
    /// How many tokens to report
    pub limit: usize,
    pub tie_break: TieBreak,
    pub filter: TokenFilter,
    pub encoding: EncodingStrategy,
    /// Skip files that cannot be read instead of aborting the run
    pub skip_unreadable: bool,
}

impl Default for TopOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            tie_break: TieBreak::default(),
            filter: TokenFilter::default(),
            encoding: EncodingStrategy::default(),
            skip_unreadable: false,
        }
    }
}

/// Corpus-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Documents read and tokenized
    pub documents: usize,
    /// Documents skipped with a warning
    pub skipped: usize,
    /// Documents decoded with replacement characters
    pub lossy_documents: usize,
    /// Tokens counted, duplicates included
    pub tokens: u64,
    pub distinct_tokens: usize,
}

/// Frequency table of a corpus, with what happened along the way
#[derive(Debug, Clone)]
pub struct CorpusCount {
    pub table: FrequencyTable,
    pub warnings: Vec<FileWarning>,
    pub stats: CorpusStats,
}

/// Read and count every scanned document, in scan order
///
/// Returns the first scan failure or read error unless `skip_unreadable` is
/// set, in which case each one becomes a warning and contributes nothing.
pub fn count_corpus(
    scan: CorpusScan,
    options: &TopOptions,
) -> std::result::Result<CorpusCount, CorpusError> {
    let mut counter = FrequencyCounter::new();
    let mut warnings = Vec::new();
    let mut stats = CorpusStats::default();

    for failure in scan.failures {
        if !options.skip_unreadable {
            return Err(failure.error);
        }
        stats.skipped += 1;
        warnings.push(FileWarning::from_error(&failure.error, failure.relative));
    }

    for entry in &scan.documents {
        log::info!("{}", entry.relative);

        match read_document(&entry.path, &entry.relative, options.encoding) {
            Ok(ReadOutcome::Loaded(document)) => {
                let before = counter.total();
                counter.extend(tokenize_with(&document.text, options.filter));
                log::debug!(
                    "{}: {} tokens",
                    document.path,
                    counter.total() - before
                );
                stats.documents += 1;
                if document.lossy {
                    stats.lossy_documents += 1;
                }
            }
            Ok(ReadOutcome::Skipped(warning)) => {
                log::warn!("skipping {}: {}", warning.path, warning.message);
                stats.skipped += 1;
                warnings.push(warning);
            }
            Err(err) if options.skip_unreadable => {
                log::warn!("skipping {}: {}", entry.relative, err);
                stats.skipped += 1;
                warnings.push(FileWarning::from_error(&err, &entry.relative));
            }
            Err(err) => return Err(err),
        }
    }

    let table = counter.finish();
    stats.tokens = table.total();
    stats.distinct_tokens = table.len();

    Ok(CorpusCount {
        table,
        warnings,
        stats,
    })
}

/// Scan, count and rank the corpus under `root`
pub fn top_tokens(
    root: &Path,
    scan: &ScanOptions,
    options: &TopOptions,
) -> Result<(Vec<RankedToken>, CorpusCount)> {
    let scan = scan_documents(root, scan)?;
    let count = count_corpus(scan, options)
        .with_context(|| format!("failed to count tokens under {}", root.display()))?;
    let ranking = count.table.rank(options.limit, options.tie_break);
    Ok((ranking, count))
}

fn print_stats(stats: &CorpusStats, shown: usize) {
    eprintln!("📊 Corpus Statistics:");
    eprintln!("   Documents: {}", stats.documents);
    if stats.skipped > 0 {
        eprintln!("   ⚠️  Skipped: {}", stats.skipped);
    }
    if stats.lossy_documents > 0 {
        eprintln!("   Lossy decoded: {}", stats.lossy_documents);
    }
    eprintln!("   Tokens: {}", stats.tokens);
    eprintln!("   Distinct tokens: {}", stats.distinct_tokens);
    eprintln!("   Shown: {}", shown);
    eprintln!();
}

/// Run the top command
pub fn run_top(
    root: &Path,
    scan: &ScanOptions,
    options: &TopOptions,
    show_stats: bool,
    config: RenderConfig,
) -> Result<()> {
    let (ranking, count) = top_tokens(root, scan, options)?;

    if show_stats {
        print_stats(&count.stats, ranking.len());
    }

    let mut result_set: ResultSet = count.warnings.iter().map(FileWarning::to_result_item).collect();
    result_set.extend(ResultSet::from_ranking(ranking));

    let renderer = Renderer::with_config(config);
    renderer.render_to(&result_set, std::io::stdout().lock())?;

    Ok(())
}
