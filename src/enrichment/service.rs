//! Enrichment orchestrator - drives the per-note pipeline
//!
//! For every classified note:
//! 1. Skip it when it already has an identifier and genres (unless forced)
//! 2. Resolve its catalog identifier, searching by name when it has none
//! 3. Fetch the full record
//! 4. Merge the record into the header, generate a body for empty notes, write
//!
//! Artists are processed before albums. Notes are handled one at a time; a
//! failure on one note is logged and counted, never fatal to the run.

use std::fmt;
use std::path::Path;
use tracing::{debug, error, info};

use crate::catalog::{CatalogApi, EntityRecord};
use crate::document::Document;
use crate::error::{Result, ResultExt};
use crate::scanner::{self, DocumentKind, ScanResult};

use super::body::generate_body;
use super::identity;
use super::merge::merge_record;
use super::progress::{DocumentEvent, ProgressObserver};
use super::stats::EnrichmentStats;

/// Searches only ever use the top hit
const SEARCH_LIMIT: usize = 1;

/// Run options
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions {
    /// Compute merges but never write notes
    pub dry_run: bool,
    /// Re-fetch notes that already look enriched
    pub force: bool,
}

/// Why a note was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Identifier and genres already present
    AlreadyEnriched,
    /// Search by name found nothing
    SearchMiss { term: String },
    /// Lookup by identifier found nothing
    FetchMiss { id: String },
    /// Neither artist nor album
    Unclassified,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyEnriched => write!(f, "already enriched"),
            SkipReason::SearchMiss { term } => write!(f, "no match for \"{term}\""),
            SkipReason::FetchMiss { id } => write!(f, "no record for {id}"),
            SkipReason::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Terminal outcome of one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Merged; `written` is false in preview mode
    Enriched { written: bool },
    Skipped(SkipReason),
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Enriched { written: true } => write!(f, "enriched"),
            Outcome::Enriched { written: false } => write!(f, "enriched (preview)"),
            Outcome::Skipped(reason) => write!(f, "skipped: {reason}"),
            Outcome::Failed(message) => write!(f, "error: {message}"),
        }
    }
}

/// Enriches vault notes from a catalog
pub struct Enricher<C> {
    catalog: C,
    options: EnrichOptions,
}

impl<C: CatalogApi> Enricher<C> {
    pub fn new(catalog: C, options: EnrichOptions) -> Self {
        Self { catalog, options }
    }

    /// Scan `root` and enrich every classified note.
    ///
    /// Only an invalid vault path fails the run.
    pub async fn enrich_vault(
        &self,
        root: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<EnrichmentStats> {
        let scan = scanner::scan(root)?;
        Ok(self.enrich_scan(scan, observer).await)
    }

    /// Enrich already classified notes: all artists, then all albums.
    pub async fn enrich_scan(
        &self,
        scan: ScanResult,
        observer: &mut dyn ProgressObserver,
    ) -> EnrichmentStats {
        let mut stats = EnrichmentStats {
            total_files: scan.total(),
            ..Default::default()
        };

        info!(
            artists = scan.artists.len(),
            albums = scan.albums.len(),
            dry_run = self.options.dry_run,
            force = self.options.force,
            "Starting enrichment"
        );

        let passes = [
            (DocumentKind::Artist, scan.artists),
            (DocumentKind::Album, scan.albums),
        ];
        for (kind, documents) in passes {
            for doc in documents {
                let path = doc.path.clone();
                let outcome = match self.enrich_document(doc, kind).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "Failed to enrich note");
                        Outcome::Failed(e.to_string())
                    }
                };

                stats.record(&outcome);
                observer.on_document(DocumentEvent {
                    path: &path,
                    kind,
                    outcome: &outcome,
                    stats: &stats,
                });
            }
        }

        info!(
            enriched = stats.enriched_files,
            skipped = stats.skipped_files,
            errors = stats.error_files,
            "Enrichment finished"
        );
        stats
    }

    /// Run the pipeline for one note.
    ///
    /// Misses are `Ok(Outcome::Skipped)`; `Err` means the note could not be
    /// written.
    pub async fn enrich_document(&self, mut doc: Document, kind: DocumentKind) -> Result<Outcome> {
        if kind == DocumentKind::Unknown {
            return Ok(Outcome::Skipped(SkipReason::Unclassified));
        }

        if !self.options.force && identity::is_already_enriched(&doc) {
            debug!(path = %doc.path.display(), "Already enriched");
            return Ok(Outcome::Skipped(SkipReason::AlreadyEnriched));
        }

        let id = match self.resolve_identifier(&doc, kind).await {
            Ok(id) => id,
            Err(reason) => {
                info!(path = %doc.path.display(), "Skipping: {}", reason);
                return Ok(Outcome::Skipped(reason));
            }
        };

        let Some(record) = self.fetch(&id, kind).await else {
            let reason = SkipReason::FetchMiss { id };
            info!(path = %doc.path.display(), "Skipping: {}", reason);
            return Ok(Outcome::Skipped(reason));
        };

        let report = merge_record(&doc.header, &record);

        if self.options.dry_run {
            if report.is_unchanged() {
                info!(path = %doc.path.display(), "Dry run: note already up to date");
            } else {
                info!(
                    path = %doc.path.display(),
                    changes = ?report.changed,
                    "Dry run: would update note"
                );
            }
            return Ok(Outcome::Enriched { written: false });
        }

        doc.header = report.header;
        if doc.body_is_blank() {
            doc.body = generate_body(&record);
        }
        doc.write()
            .with_context(format!("Failed to save {}", record.display_name()))?;

        info!(
            path = %doc.path.display(),
            id = record.catalog_id(),
            changes = report.changed.len(),
            "Enriched note"
        );
        Ok(Outcome::Enriched { written: true })
    }

    /// Identifier from the header, or the top search hit.
    async fn resolve_identifier(
        &self,
        doc: &Document,
        kind: DocumentKind,
    ) -> std::result::Result<String, SkipReason> {
        if let Some(id) = identity::existing_identifier(doc) {
            return Ok(id);
        }

        let term = identity::search_term(doc);
        let top = match kind {
            DocumentKind::Artist => self
                .catalog
                .search_artist(&term, SEARCH_LIMIT)
                .await
                .into_iter()
                .next()
                .map(|hit| hit.id),
            _ => {
                let hint = identity::artist_hint(doc);
                self.catalog
                    .search_album(&term, hint.as_deref(), SEARCH_LIMIT)
                    .await
                    .into_iter()
                    .next()
                    .map(|hit| hit.id)
            }
        };

        top.ok_or(SkipReason::SearchMiss { term })
    }

    async fn fetch(&self, id: &str, kind: DocumentKind) -> Option<EntityRecord> {
        match kind {
            DocumentKind::Artist => self.catalog.fetch_artist(id).await.map(EntityRecord::Artist),
            _ => self.catalog.fetch_album(id).await.map(EntityRecord::Album),
        }
    }
}
