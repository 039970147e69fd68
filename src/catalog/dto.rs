//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! Endpoints used:
//! - `/artist/{id}` lookup with tags, genres and release groups
//! - `/release/{id}` lookup with artists, recordings, tags, genres and labels
//! - `/artist?query=` and `/release?query=` searches

use serde::{Deserialize, Serialize};

/// Artist lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtistResponse {
    /// MusicBrainz artist ID
    pub id: String,
    pub name: String,
    pub sort_name: Option<String>,
    /// Artist type (Person, Group, etc.)
    #[serde(rename = "type")]
    pub artist_type: Option<String>,
    /// ISO country code
    pub country: Option<String>,
    pub disambiguation: Option<String>,
    pub life_span: Option<LifeSpan>,
    /// Folksonomy tags (only with inc=tags)
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Curated genres (only with inc=genres)
    #[serde(default)]
    pub genres: Vec<Tag>,
    /// Release groups (only with inc=release-groups)
    #[serde(default)]
    pub release_groups: Vec<ReleaseGroup>,
}

/// Life span of an artist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LifeSpan {
    pub begin: Option<String>,
    pub end: Option<String>,
    pub ended: Option<bool>,
}

/// Tag or genre with vote count
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: i32,
}

/// Release group (e.g., "Abbey Road" across all editions)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    pub id: String,
    pub title: Option<String>,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
    /// Secondary types (Compilation, Live, etc.)
    #[serde(default)]
    pub secondary_types: Vec<String>,
    pub first_release_date: Option<String>,
}

/// Release lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseResponse {
    /// MusicBrainz release ID
    pub id: String,
    pub title: String,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    pub country: Option<String>,
    pub barcode: Option<String>,
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(default)]
    pub label_info: Vec<LabelInfo>,
    /// Media (discs) in this release
    #[serde(default)]
    pub media: Vec<Medium>,
    pub release_group: Option<ReleaseGroup>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub genres: Vec<Tag>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    pub artist: Artist,
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

/// Artist reference inside credits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub sort_name: Option<String>,
}

/// Label information on a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelInfo {
    pub catalog_number: Option<String>,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    pub position: Option<u32>,
    /// Format (CD, Vinyl, Digital, etc.)
    pub format: Option<String>,
    pub track_count: Option<u32>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub position: Option<u32>,
    /// Track number (may include disc prefix like "1-5")
    pub number: Option<String>,
    /// Track title (may differ from recording title)
    pub title: Option<String>,
    /// Track length in milliseconds
    pub length: Option<u64>,
    pub recording: Option<Recording>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    pub id: String,
    pub title: String,
}

/// Artist search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSearchResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub artists: Vec<ArtistSearchItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtistSearchItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub artist_type: Option<String>,
    pub disambiguation: Option<String>,
    /// Relevance score (0-100)
    pub score: Option<u32>,
}

/// Release search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseSearchResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub releases: Vec<ReleaseSearchItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseSearchItem {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub score: Option<u32>,
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    pub release_group: Option<ReleaseGroup>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
