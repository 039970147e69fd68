//! Music catalog integration (MusicBrainz).
//!
//! # Architecture
//!
//! Same split as every external integration in this crate:
//! - **Domain models** (`domain.rs`) - records the rest of the app works with
//! - **API DTOs** (`dto.rs`) - exact API response shapes
//! - **Adapter** (`adapter.rs`) - the only DTO to domain conversion
//! - **Client** (`client.rs`) - HTTP access behind a [`RateLimiter`]
//! - **Traits** (`traits.rs`) - the [`CatalogApi`] seam, swallowing failures
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

mod adapter;
mod client;
pub mod coverart;
pub mod domain;
pub mod dto;
pub mod rate_limit;
pub mod traits;

pub use client::MusicBrainzClient;
pub use coverart::CoverSize;
pub use domain::{
    AlbumHit, AlbumRecord, AlbumSummary, ArtistHit, ArtistRecord, CatalogError, EntityRecord,
};
pub use rate_limit::RateLimiter;
pub use traits::CatalogApi;
