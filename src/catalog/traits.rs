//! The catalog seam used by the enrichment orchestrator.
//!
//! [`CatalogApi`] never fails: not-found and upstream errors are logged and
//! come back as `None` or an empty list. Production code uses
//! [`MusicBrainzClient`]; tests substitute [`mocks::MockCatalog`].
//!
//! # Example
//!
//! ```ignore
//! async fn resolve<C: CatalogApi>(catalog: &C, name: &str) -> Option<String> {
//!     catalog.search_artist(name, 1).await.into_iter().next().map(|hit| hit.id)
//! }
//! ```

use async_trait::async_trait;

use super::client::MusicBrainzClient;
use super::domain::{AlbumHit, AlbumRecord, ArtistHit, ArtistRecord, CatalogError};

/// Identity lookup and fuzzy search over the music catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up an artist by identifier.
    async fn fetch_artist(&self, id: &str) -> Option<ArtistRecord>;

    /// Look up an album (release) by identifier.
    async fn fetch_album(&self, id: &str) -> Option<AlbumRecord>;

    /// Search artists by name, most relevant first.
    async fn search_artist(&self, name: &str, limit: usize) -> Vec<ArtistHit>;

    /// Search albums by title, optionally narrowed by artist name.
    async fn search_album(
        &self,
        title: &str,
        artist_hint: Option<&str>,
        limit: usize,
    ) -> Vec<AlbumHit>;
}

#[async_trait]
impl CatalogApi for MusicBrainzClient {
    async fn fetch_artist(&self, id: &str) -> Option<ArtistRecord> {
        match self.lookup_artist(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                log_failure("artist lookup", id, &e);
                None
            }
        }
    }

    async fn fetch_album(&self, id: &str) -> Option<AlbumRecord> {
        match self.lookup_release(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                log_failure("release lookup", id, &e);
                None
            }
        }
    }

    async fn search_artist(&self, name: &str, limit: usize) -> Vec<ArtistHit> {
        self.find_artists(name, limit).await.unwrap_or_else(|e| {
            log_failure("artist search", name, &e);
            Vec::new()
        })
    }

    async fn search_album(
        &self,
        title: &str,
        artist_hint: Option<&str>,
        limit: usize,
    ) -> Vec<AlbumHit> {
        self.find_releases(title, artist_hint, limit)
            .await
            .unwrap_or_else(|e| {
                log_failure("release search", title, &e);
                Vec::new()
            })
    }
}

fn log_failure(operation: &str, subject: &str, error: &CatalogError) {
    match error {
        CatalogError::NotFound => tracing::info!(operation, subject, "Not found in catalog"),
        _ => tracing::error!(operation, subject, error = %error, "Catalog request failed"),
    }
}
