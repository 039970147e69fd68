//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If MusicBrainz changes their response format, only this file and dto.rs
//! need to change.

use super::coverart::{self, CoverSize};
use super::dto;
use super::domain::{
    AlbumHit, AlbumRecord, AlbumSummary, ArtistHit, ArtistRecord, CatalogError,
};

/// Convert an artist lookup response to an ArtistRecord
pub fn to_artist_record(response: dto::ArtistResponse) -> ArtistRecord {
    let genres = extract_genres(&response.genres, &response.tags);
    let albums = extract_albums(&response.release_groups);
    let (formed_date, end_date) = match response.life_span {
        Some(span) => (non_empty(span.begin), non_empty(span.end)),
        None => (None, None),
    };

    ArtistRecord {
        sort_name: non_empty(response.sort_name).unwrap_or_else(|| response.name.clone()),
        catalog_id: response.id,
        name: response.name,
        country: non_empty(response.country),
        formed_date,
        end_date,
        artist_type: non_empty(response.artist_type),
        genres,
        disambiguation: non_empty(response.disambiguation),
        albums,
    }
}

/// Convert a release lookup response to an AlbumRecord
///
/// Fails when the release has no artist credit, since the album artist is
/// mandatory.
pub fn to_album_record(
    response: dto::ReleaseResponse,
    cover_size: CoverSize,
) -> Result<AlbumRecord, CatalogError> {
    let artist_name = build_artist_string(&response.artist_credit).ok_or_else(|| {
        CatalogError::InvalidResponse(format!("release {} has no artist credit", response.id))
    })?;
    let artist_catalog_id = response
        .artist_credit
        .first()
        .map(|c| c.artist.id.clone())
        .unwrap_or_default();

    // Track list comes from the first medium only
    let first_medium = response.media.first();
    let tracks: Vec<String> = first_medium
        .map(|m| m.tracks.iter().filter_map(track_title).collect())
        .unwrap_or_default();
    let track_count = first_medium
        .and_then(|m| m.track_count)
        .or_else(|| (!tracks.is_empty()).then_some(tracks.len() as u32));

    let label = response
        .label_info
        .iter()
        .find_map(|info| info.label.as_ref().map(|l| l.name.clone()));

    let genres = extract_genres(&response.genres, &response.tags);
    let cover_url = Some(coverart::front_cover_url(&response.id, cover_size));

    Ok(AlbumRecord {
        catalog_id: response.id,
        title: response.title,
        artist_name,
        artist_catalog_id,
        release_date: non_empty(response.date),
        country: non_empty(response.country),
        label,
        barcode: non_empty(response.barcode),
        track_count,
        genres,
        status: non_empty(response.status),
        tracks,
        cover_url,
    })
}

/// Convert an artist search response to hits, keeping upstream order
pub fn to_artist_hits(response: dto::ArtistSearchResponse) -> Vec<ArtistHit> {
    response
        .artists
        .into_iter()
        .map(|a| ArtistHit {
            id: a.id,
            name: a.name,
            artist_type: non_empty(a.artist_type),
            disambiguation: non_empty(a.disambiguation),
        })
        .collect()
}

/// Convert a release search response to hits, keeping upstream order.
/// Releases without an artist credit are dropped.
pub fn to_album_hits(response: dto::ReleaseSearchResponse) -> Vec<AlbumHit> {
    response
        .releases
        .into_iter()
        .filter_map(|r| {
            let artist_name = build_artist_string(&r.artist_credit)?;
            let artist_id = r.artist_credit.first()?.artist.id.clone();
            Some(AlbumHit {
                id: r.id,
                title: r.title,
                artist_name,
                artist_id,
                date: non_empty(r.date),
                release_type: r.release_group.and_then(|rg| non_empty(rg.primary_type)),
            })
        })
        .collect()
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    if credits.is_empty() {
        return None;
    }

    let mut result = String::new();
    for credit in credits {
        // Use credited name if available, otherwise official name
        let name = credit.name.as_ref().unwrap_or(&credit.artist.name);
        result.push_str(name);

        // Add join phrase if present (e.g., " & ", " feat. ")
        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    Some(result)
}

/// Curated genres when present, otherwise tags; most voted first, de-duplicated
fn extract_genres(genres: &[dto::Tag], tags: &[dto::Tag]) -> Vec<String> {
    let source = if genres.is_empty() { tags } else { genres };

    let mut sorted: Vec<_> = source.iter().collect();
    // Stable sort keeps upstream order for equal counts
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let mut result: Vec<String> = Vec::with_capacity(sorted.len());
    for tag in sorted {
        let name = tag.name.trim();
        if !name.is_empty() && !result.iter().any(|g| g.eq_ignore_ascii_case(name)) {
            result.push(name.to_string());
        }
    }
    result
}

/// Studio albums from release groups, oldest first (undated last)
fn extract_albums(groups: &[dto::ReleaseGroup]) -> Vec<AlbumSummary> {
    let mut albums: Vec<AlbumSummary> = groups
        .iter()
        .filter(|rg| rg.primary_type.as_deref() == Some("Album") && rg.secondary_types.is_empty())
        .filter_map(|rg| {
            let title = rg.title.clone().filter(|t| !t.trim().is_empty())?;
            Some(AlbumSummary {
                title,
                year: parse_year(rg.first_release_date.as_deref()),
            })
        })
        .collect();

    albums.sort_by_key(|a| (a.year.is_none(), a.year));
    albums
}

fn track_title(track: &dto::Track) -> Option<String> {
    track
        .title
        .clone()
        .or_else(|| track.recording.as_ref().map(|r| r.title.clone()))
        .filter(|t| !t.trim().is_empty())
}

/// Parse year from date (YYYY, YYYY-MM, or YYYY-MM-DD)
pub fn parse_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.trim().parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
