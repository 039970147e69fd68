//! Test utilities and fixtures for vault-enricher tests.
//!
//! This module provides vault fixtures on disk and catalog record factories
//! to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{sample_vault, jay_z_artist};
//!
//! #[test]
//! fn test_something() {
//!     let vault = sample_vault();
//!     let record = jay_z_artist();
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::coverart::front_cover_url;
use crate::catalog::{AlbumHit, AlbumRecord, AlbumSummary, ArtistHit, ArtistRecord, CoverSize};

/// Creates a small vault in a temporary directory.
///
/// Contents (all at the root):
/// - `Jay-Z.md`, `Beyoncé.md` - `type: artist`
/// - `4-44.md`, `Renaissance.md` - `type: album`
/// - `random_note.md` - no front matter
/// - `incomplete_note.md` - front matter that is never closed
///
/// The vault is deleted when the returned `TempDir` is dropped.
pub fn sample_vault() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = dir.path();

    write_note(root, "Jay-Z.md", "---\ntype: artist\nname: Jay-Z\n---\n");
    write_note(root, "Beyoncé.md", "---\ntype: artist\nname: Beyoncé\n---\n");
    write_note(
        root,
        "4-44.md",
        "---\ntype: album\ntitle: '4:44'\nartist: '[[Jay-Z]]'\n---\n",
    );
    write_note(
        root,
        "Renaissance.md",
        "---\ntype: album\ntitle: Renaissance\nartist: '[[Beyoncé]]'\n---\n",
    );
    write_note(root, "random_note.md", "This is just a regular note.");
    write_note(root, "incomplete_note.md", "---\npartial: frontmatter");

    dir
}

/// Writes a note under `root`, creating parent directories as needed.
///
/// Returns the full path of the note.
pub fn write_note(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create note directory");
    }
    std::fs::write(&path, content).expect("Failed to write note");
    path
}

/// Creates a fully populated artist record (id `X`).
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let artist = ArtistRecord {
///     genres: vec![],
///     ..jay_z_artist()
/// };
/// ```
pub fn jay_z_artist() -> ArtistRecord {
    ArtistRecord {
        catalog_id: "X".to_string(),
        name: "Jay-Z".to_string(),
        sort_name: "Jay-Z".to_string(),
        country: Some("US".to_string()),
        formed_date: Some("1969-12-04".to_string()),
        end_date: None,
        artist_type: Some("Person".to_string()),
        genres: vec!["hip hop".to_string()],
        disambiguation: Some("US rapper".to_string()),
        albums: vec![
            AlbumSummary {
                title: "Reasonable Doubt".to_string(),
                year: Some(1996),
            },
            AlbumSummary {
                title: "The Blueprint".to_string(),
                year: Some(2001),
            },
            AlbumSummary {
                title: "4:44".to_string(),
                year: Some(2017),
            },
        ],
    }
}

/// Creates a fully populated album record (id `R`, artist id `X`).
pub fn four_four_four_album() -> AlbumRecord {
    let tracks = [
        "Kill Jay Z",
        "The Story of O.J.",
        "Smile",
        "Caught Their Eyes",
        "4:44",
        "Family Feud",
        "Bam",
        "Moonlight",
        "Marcy Me",
        "Legacy",
    ];

    AlbumRecord {
        catalog_id: "R".to_string(),
        title: "4:44".to_string(),
        artist_name: "Jay-Z".to_string(),
        artist_catalog_id: "X".to_string(),
        release_date: Some("2017-06-30".to_string()),
        country: Some("US".to_string()),
        label: Some("Roc Nation".to_string()),
        barcode: None,
        track_count: Some(tracks.len() as u32),
        genres: vec!["hip hop".to_string(), "conscious hip hop".to_string()],
        status: Some("Official".to_string()),
        tracks: tracks.iter().map(|t| t.to_string()).collect(),
        cover_url: Some(front_cover_url("R", CoverSize::Medium)),
    }
}

/// Creates an artist search hit.
pub fn artist_hit(id: &str, name: &str) -> ArtistHit {
    ArtistHit {
        id: id.to_string(),
        name: name.to_string(),
        artist_type: Some("Person".to_string()),
        disambiguation: None,
    }
}

/// Creates an album search hit.
pub fn album_hit(id: &str, title: &str, artist: &str) -> AlbumHit {
    AlbumHit {
        id: id.to_string(),
        title: title.to_string(),
        artist_name: artist.to_string(),
        artist_id: "X".to_string(),
        date: None,
        release_type: Some("Album".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_vault_files() {
        let dir = sample_vault();
        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_write_note_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_note(dir.path(), "Artists/Deep/Nas.md", "---\n---\n");
        assert!(path.exists());
    }
}
