//! Internal domain models for catalog lookups.
//!
//! These types are OUR types - they don't change when the catalog API changes.
//! All API responses get converted into these types via the adapter.

use crate::scanner::DocumentKind;

/// Artist metadata fetched by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistRecord {
    /// Catalog identifier (MusicBrainz artist ID)
    pub catalog_id: String,
    /// Primary name
    pub name: String,
    /// Name used for alphabetical sorting (e.g., "Beatles, The")
    pub sort_name: String,
    /// Country of origin (ISO code)
    pub country: Option<String>,
    /// Date the artist was born/formed (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub formed_date: Option<String>,
    /// Date the artist died/dissolved
    pub end_date: Option<String>,
    /// Person, Group, Orchestra, ...
    pub artist_type: Option<String>,
    /// Genres, most voted first, no duplicates
    pub genres: Vec<String>,
    /// Comment distinguishing artists with the same name
    pub disambiguation: Option<String>,
    /// Studio albums, oldest first
    pub albums: Vec<AlbumSummary>,
}

/// Album entry in an artist's discography
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub title: String,
    pub year: Option<i32>,
}

/// Album (release) metadata fetched by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumRecord {
    /// Catalog identifier (MusicBrainz release ID)
    pub catalog_id: String,
    pub title: String,
    /// Credited artist name (joined for collaborations)
    pub artist_name: String,
    /// Catalog identifier of the first credited artist
    pub artist_catalog_id: String,
    pub release_date: Option<String>,
    pub country: Option<String>,
    pub label: Option<String>,
    pub barcode: Option<String>,
    pub track_count: Option<u32>,
    /// Genres, most voted first, no duplicates
    pub genres: Vec<String>,
    /// Official, Promotion, Bootleg, ...
    pub status: Option<String>,
    /// Track titles of the first medium
    pub tracks: Vec<String>,
    /// Front cover image URL
    pub cover_url: Option<String>,
}

/// A fetched record of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Artist(ArtistRecord),
    Album(AlbumRecord),
}

impl EntityRecord {
    pub fn kind(&self) -> DocumentKind {
        match self {
            EntityRecord::Artist(_) => DocumentKind::Artist,
            EntityRecord::Album(_) => DocumentKind::Album,
        }
    }

    pub fn catalog_id(&self) -> &str {
        match self {
            EntityRecord::Artist(a) => &a.catalog_id,
            EntityRecord::Album(a) => &a.catalog_id,
        }
    }

    /// Display name (artist name or album title)
    pub fn display_name(&self) -> &str {
        match self {
            EntityRecord::Artist(a) => &a.name,
            EntityRecord::Album(a) => &a.title,
        }
    }
}

/// Artist search result
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistHit {
    pub id: String,
    pub name: String,
    pub artist_type: Option<String>,
    pub disambiguation: Option<String>,
}

/// Album search result
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumHit {
    pub id: String,
    pub title: String,
    pub artist_name: String,
    pub artist_id: String,
    pub date: Option<String>,
    /// Primary type of the release group (Album, Single, EP, ...)
    pub release_type: Option<String>,
}

/// Errors that can occur talking to the catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Not found in catalog")]
    NotFound,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}
