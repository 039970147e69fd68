//! Identity resolution inputs read from a note's header.
//!
//! A note is tied to a catalog entity by an identifier stored under one of
//! several header aliases. Notes without one are matched by searching for
//! their name (and, for albums, their artist).

use crate::document::Document;

use super::links::link_target;

/// Header keys that may hold the catalog identifier, highest priority first
pub const IDENTIFIER_KEYS: [&str; 4] = ["musicbrainz_id", "mbid", "musicbrainz", "id"];

/// Header keys holding the note's display name, highest priority first
const NAME_KEYS: [&str; 2] = ["name", "title"];

/// Header key holding an album's artist
const ARTIST_KEY: &str = "artist";

/// First non-empty identifier among [`IDENTIFIER_KEYS`].
pub fn existing_identifier(doc: &Document) -> Option<String> {
    IDENTIFIER_KEYS.iter().find_map(|key| doc.get_text(key))
}

/// A note with both an identifier and a non-empty genre list needs no lookup.
pub fn is_already_enriched(doc: &Document) -> bool {
    existing_identifier(doc).is_some() && !doc.get_string_list("genres").is_empty()
}

/// Text to search the catalog with: the `name`/`title` field, else the file name.
pub fn search_term(doc: &Document) -> String {
    NAME_KEYS
        .iter()
        .find_map(|key| doc.get_text(key))
        .unwrap_or_else(|| doc.file_stem())
}

/// Artist name to narrow an album search, from the `artist` header field.
///
/// Handles wiki links with folders and aliases, and list-valued fields (first
/// entry wins).
pub fn artist_hint(doc: &Document) -> Option<String> {
    doc.get_string_list(ARTIST_KEY)
        .first()
        .map(|value| link_target(value))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn doc(path: &str, front_matter: &str) -> Document {
        Document::parse(Path::new(path), &format!("---\n{front_matter}\n---\n")).unwrap()
    }

    #[test]
    fn test_identifier_priority() {
        let d = doc("a.md", "id: low\nmbid: mid\nmusicbrainz_id: high");
        assert_eq!(existing_identifier(&d).as_deref(), Some("high"));

        let d = doc("a.md", "musicbrainz_id: ''\nmusicbrainz: from-alias\nid: low");
        assert_eq!(existing_identifier(&d).as_deref(), Some("from-alias"));

        let d = doc("a.md", "name: Jay-Z");
        assert_eq!(existing_identifier(&d), None);
    }

    #[test]
    fn test_already_enriched_needs_both() {
        assert!(is_already_enriched(&doc(
            "a.md",
            "mbid: X\ngenres:\n  - hip hop"
        )));
        assert!(!is_already_enriched(&doc("a.md", "mbid: X\ngenres: []")));
        assert!(!is_already_enriched(&doc("a.md", "genres:\n  - hip hop")));
    }

    #[test]
    fn test_search_term_sources() {
        assert_eq!(search_term(&doc("x/Jay-Z.md", "name: Shawn Carter")), "Shawn Carter");
        assert_eq!(search_term(&doc("x/file.md", "title: '4:44'")), "4:44");
        assert_eq!(search_term(&doc("x/Renaissance.md", "year: 2022")), "Renaissance");
    }

    #[test]
    fn test_artist_hint() {
        assert_eq!(
            artist_hint(&doc("a.md", "artist: '[[Artists/Jay-Z|Hova]]'")).as_deref(),
            Some("Jay-Z")
        );
        assert_eq!(
            artist_hint(&doc("a.md", "artist:\n  - '[[Beyoncé]]'\n  - Jay-Z")).as_deref(),
            Some("Beyoncé")
        );
        assert_eq!(artist_hint(&doc("a.md", "artist: ''")), None);
        assert_eq!(artist_hint(&doc("a.md", "name: x")), None);
    }
}
