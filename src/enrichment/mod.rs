//! Vault enrichment - matches notes to catalog entities and merges metadata in.
//!
//! # Architecture
//!
//! - **Identity** (`identity.rs`) - identifier aliases, search terms, artist hints
//! - **Merge** (`merge.rs`) - pure, non-destructive header merge
//! - **Body** (`body.rs`) - Markdown skeleton for empty notes
//! - **Service** (`service.rs`) - the per-note pipeline and run loop
//! - **Stats / Progress** - run counters and the per-note observer
//!
//! The service is generic over [`CatalogApi`](crate::catalog::CatalogApi), so
//! tests run the whole pipeline against a mock catalog.
//!
//! # Usage
//!
//! ```ignore
//! let client = MusicBrainzClient::new(Duration::from_secs(2))?;
//! let enricher = Enricher::new(client, EnrichOptions::default());
//! let stats = enricher.enrich_vault(vault, &mut NoopObserver).await?;
//! println!("{stats}");
//! ```

pub mod body;
pub mod identity;
pub mod links;
pub mod merge;
pub mod progress;
pub mod service;
pub mod stats;

pub use merge::{MergeReport, merge, merge_record};
pub use progress::{DocumentEvent, NoopObserver, ProgressObserver};
pub use service::{EnrichOptions, Enricher, Outcome, SkipReason};
pub use stats::EnrichmentStats;
