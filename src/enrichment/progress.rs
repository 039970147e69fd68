//! Per-document progress reporting.

use std::path::Path;

use crate::scanner::DocumentKind;

use super::service::Outcome;
use super::stats::EnrichmentStats;

/// A finished document, with the counters as they stand after it.
#[derive(Debug, Clone, Copy)]
pub struct DocumentEvent<'a> {
    pub path: &'a Path,
    pub kind: DocumentKind,
    pub outcome: &'a Outcome,
    pub stats: &'a EnrichmentStats,
}

/// Receives one event per finished document.
pub trait ProgressObserver {
    fn on_document(&mut self, event: DocumentEvent<'_>);
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_document(&mut self, _event: DocumentEvent<'_>) {}
}

/// Observer that keeps every event (tests)
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<(std::path::PathBuf, DocumentKind, Outcome, EnrichmentStats)>,
}

#[cfg(test)]
impl ProgressObserver for RecordingObserver {
    fn on_document(&mut self, event: DocumentEvent<'_>) {
        self.events.push((
            event.path.to_path_buf(),
            event.kind,
            event.outcome.clone(),
            *event.stats,
        ));
    }
}
