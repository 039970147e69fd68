//! Markdown skeleton for notes that have no body yet.
//!
//! Output depends only on the record, so regenerating for the same record
//! yields the same text.

use crate::catalog::{AlbumRecord, ArtistRecord, EntityRecord};

use super::links::to_wiki_link;

const MUSICBRAINZ_URL: &str = "https://musicbrainz.org";

/// Genres shown in the summary line
const MAX_GENRES: usize = 5;

/// Albums listed under "Notable Albums"
const MAX_ALBUMS: usize = 10;

/// Generate a note body for a fetched record.
pub fn generate_body(record: &EntityRecord) -> String {
    let sections = match record {
        EntityRecord::Artist(artist) => artist_sections(artist),
        EntityRecord::Album(album) => album_sections(album),
    };
    format!("\n{}\n", sections.join("\n\n"))
}

fn artist_sections(artist: &ArtistRecord) -> Vec<String> {
    let mut sections = vec![format!("# {}", artist.name)];

    if let Some(genres) = genre_section(&artist.genres) {
        sections.push(genres);
    }

    if !artist.albums.is_empty() {
        let lines: Vec<String> = artist
            .albums
            .iter()
            .take(MAX_ALBUMS)
            .map(|album| match album.year {
                Some(year) => format!("- {} ({year})", to_wiki_link(&album.title)),
                None => format!("- {}", to_wiki_link(&album.title)),
            })
            .collect();
        sections.push(format!("## Notable Albums\n\n{}", lines.join("\n")));
    }

    sections.push(links_section("artist", &artist.catalog_id));
    sections
}

fn album_sections(album: &AlbumRecord) -> Vec<String> {
    let mut sections = vec![
        format!("# {}", album.title),
        format!("**Artist:** {}", to_wiki_link(&album.artist_name)),
    ];

    let mut info = Vec::new();
    if let Some(date) = &album.release_date {
        info.push(format!("- **Released:** {date}"));
    }
    if let Some(country) = &album.country {
        info.push(format!("- **Country:** {country}"));
    }
    if let Some(count) = album.track_count {
        info.push(format!("- **Tracks:** {count}"));
    }
    if !info.is_empty() {
        sections.push(format!("## Information\n\n{}", info.join("\n")));
    }

    if let Some(genres) = genre_section(&album.genres) {
        sections.push(genres);
    }

    if !album.tracks.is_empty() {
        let lines: Vec<String> = album
            .tracks
            .iter()
            .enumerate()
            .map(|(i, title)| format!("{}. {title}", i + 1))
            .collect();
        sections.push(format!("## Tracklist\n\n{}", lines.join("\n")));
    }

    if let Some(url) = &album.cover_url {
        sections.push(format!("## Cover\n\n![Cover]({url})"));
    }

    sections.push(links_section("release", &album.catalog_id));
    sections
}

fn genre_section(genres: &[String]) -> Option<String> {
    if genres.is_empty() {
        return None;
    }
    let top: Vec<&str> = genres.iter().take(MAX_GENRES).map(String::as_str).collect();
    Some(format!("## Genres\n\n{}", top.join(", ")))
}

fn links_section(entity: &str, id: &str) -> String {
    format!("## Links\n\n- [MusicBrainz]({MUSICBRAINZ_URL}/{entity}/{id})")
}
