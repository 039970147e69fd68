//! Run-level counters.

use std::fmt;

use super::service::Outcome;

/// Counters for one enrichment run.
///
/// `processed_files` counts documents that reached `enriched` or `skipped`;
/// failures only count toward `error_files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub total_files: usize,
    pub processed_files: usize,
    pub enriched_files: usize,
    pub skipped_files: usize,
    pub error_files: usize,
}

impl EnrichmentStats {
    /// Count a finished document.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Enriched { .. } => {
                self.processed_files += 1;
                self.enriched_files += 1;
            }
            Outcome::Skipped(_) => {
                self.processed_files += 1;
                self.skipped_files += 1;
            }
            Outcome::Failed(_) => self.error_files += 1,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_files > 0
    }

    /// Documents finished so far, whatever the outcome
    pub fn finished(&self) -> usize {
        self.processed_files + self.error_files
    }
}

impl fmt::Display for EnrichmentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Total files", self.total_files),
            ("Processed", self.processed_files),
            ("Enriched", self.enriched_files),
            ("Skipped", self.skipped_files),
            ("Errors", self.error_files),
        ];

        writeln!(f, "{:<14} {:>7}", "Metric", "Count")?;
        writeln!(f, "{:-<14} {:->7}", "", "")?;
        for (label, count) in rows {
            writeln!(f, "{label:<14} {count:>7}")?;
        }
        Ok(())
    }
}
