//! Non-destructive header merge.
//!
//! Rules:
//! - `genres` is a union: existing entries keep their order, unseen incoming
//!   genres are appended.
//! - Any other key is filled only when the incoming value is non-empty and the
//!   existing value is missing or empty. A populated user value always wins.
//! - `type` is always set to the kind of the fetched record.

use serde_yaml::Value;

use crate::catalog::{AlbumRecord, ArtistRecord, EntityRecord};
use crate::document::{Header, is_blank};

use super::links::to_wiki_link;

const GENRES_KEY: &str = "genres";
const TYPE_KEY: &str = "type";

/// Result of merging a fetched record into a header
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// The merged header
    pub header: Header,
    /// Keys whose value was added or changed, in header order
    pub changed: Vec<String>,
}

impl MergeReport {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Merge a fetched record into an existing header and tag it with its kind.
pub fn merge_record(existing: &Header, record: &EntityRecord) -> MergeReport {
    let mut header = merge(existing, &incoming_fields(record));
    header.insert(TYPE_KEY.into(), record.kind().as_str().into());

    let changed = header
        .iter()
        .filter(|(key, value)| existing.get(*key) != Some(*value))
        .filter_map(|(key, _)| key.as_str().map(String::from))
        .collect();

    MergeReport { header, changed }
}

/// Merge `incoming` into a copy of `existing`. Pure, no I/O.
pub fn merge(existing: &Header, incoming: &Header) -> Header {
    let mut merged = existing.clone();

    for (key, value) in incoming {
        if key.as_str() == Some(GENRES_KEY) {
            merge_genres(&mut merged, value);
            continue;
        }

        if is_blank(value) {
            continue;
        }

        // insert() keeps the position of an existing key
        match merged.get(key) {
            Some(current) if !is_blank(current) => {}
            _ => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    merged
}

/// Header fields describing a fetched record.
///
/// Optional fields are omitted when absent; the album artist is a wiki link.
pub fn incoming_fields(record: &EntityRecord) -> Header {
    match record {
        EntityRecord::Artist(artist) => artist_fields(artist),
        EntityRecord::Album(album) => album_fields(album),
    }
}

fn artist_fields(artist: &ArtistRecord) -> Header {
    let mut fields = FieldWriter::default();
    fields.text("musicbrainz_id", &artist.catalog_id);
    fields.text("name", &artist.name);
    fields.text("sort_name", &artist.sort_name);
    fields.opt_text("country", artist.country.as_deref());
    fields.opt_text("formed", artist.formed_date.as_deref());
    fields.opt_text("end_date", artist.end_date.as_deref());
    fields.opt_text("artist_type", artist.artist_type.as_deref());
    fields.opt_text("disambiguation", artist.disambiguation.as_deref());
    fields.list(GENRES_KEY, &artist.genres);
    fields.0
}

fn album_fields(album: &AlbumRecord) -> Header {
    let mut fields = FieldWriter::default();
    fields.text("musicbrainz_id", &album.catalog_id);
    fields.text("title", &album.title);
    if !album.artist_name.trim().is_empty() {
        fields.text("artist", &to_wiki_link(&album.artist_name));
    }
    fields.text("artist_mbid", &album.artist_catalog_id);
    fields.opt_text("release_date", album.release_date.as_deref());
    fields.opt_text("country", album.country.as_deref());
    fields.opt_text("label", album.label.as_deref());
    fields.opt_text("barcode", album.barcode.as_deref());
    if let Some(count) = album.track_count {
        fields.0.insert("track_count".into(), count.into());
    }
    fields.opt_text("status", album.status.as_deref());
    fields.list(GENRES_KEY, &album.genres);
    fields.0
}

#[derive(Default)]
struct FieldWriter(Header);

impl FieldWriter {
    fn text(&mut self, key: &str, value: &str) {
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value.into());
        }
    }

    fn opt_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(key, value);
        }
    }

    fn list(&mut self, key: &str, values: &[String]) {
        let values: Vec<Value> = values.iter().map(|v| Value::from(v.as_str())).collect();
        self.0.insert(key.into(), Value::Sequence(values));
    }
}

/// Union incoming genres into `merged`, existing entries first.
fn merge_genres(merged: &mut Header, incoming: &Value) {
    let incoming = genre_values(incoming);
    if incoming.is_empty() {
        return;
    }

    let existing = match merged.get(GENRES_KEY) {
        Some(Value::Sequence(seq)) => seq.clone(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![Value::from(s.trim())],
        Some(v @ (Value::Number(_) | Value::Bool(_))) if !is_blank(v) => vec![v.clone()],
        _ => Vec::new(),
    };

    let mut union: Vec<Value> = Vec::with_capacity(existing.len());
    for value in existing.into_iter().chain(incoming) {
        if !union.iter().any(|seen| same_genre(seen, &value)) {
            union.push(value);
        }
    }

    merged.insert(GENRES_KEY.into(), Value::Sequence(union));
}

fn genre_values(value: &Value) -> Vec<Value> {
    match value {
        Value::Sequence(seq) => seq.iter().filter(|v| !is_blank(v)).cloned().collect(),
        Value::String(s) if !s.trim().is_empty() => vec![Value::from(s.trim())],
        _ => Vec::new(),
    }
}

/// Genres compare case-insensitively; non-string entries by value.
fn same_genre(a: &Value, b: &Value) -> bool {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{four_four_four_album, jay_z_artist};
    use proptest::prelude::*;

    fn header(yaml: &str) -> Header {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn genres(h: &Header) -> Vec<String> {
        crate::document::string_list(h.get(GENRES_KEY).unwrap())
    }

    #[test]
    fn test_fills_missing_and_empty_keys() {
        let existing = header("name: ''\ncountry: null\nlabel: []\n");
        let incoming = header("name: Jay-Z\ncountry: US\nlabel: Roc Nation\nsort_name: Jay-Z\n");

        let merged = merge(&existing, &incoming);

        assert_eq!(merged.get("name"), Some(&Value::from("Jay-Z")));
        assert_eq!(merged.get("country"), Some(&Value::from("US")));
        assert_eq!(merged.get("label"), Some(&Value::from("Roc Nation")));
        assert_eq!(merged.get("sort_name"), Some(&Value::from("Jay-Z")));
    }

    #[test]
    fn test_never_overwrites_user_values() {
        let existing = header("name: Hova\nrating: 5\nfavorite: true\n");
        let incoming = header("name: Jay-Z\nrating: 3\nfavorite: false\n");

        let merged = merge(&existing, &incoming);

        assert_eq!(merged, existing);
    }

    #[test]
    fn test_blank_incoming_is_ignored() {
        let existing = header("country: ''\n");
        let incoming = header("country: '  '\nlabel: null\n");

        let merged = merge(&existing, &incoming);

        assert_eq!(merged, existing);
        assert!(merged.get("label").is_none());
    }

    #[test]
    fn test_genre_union_keeps_existing_order() {
        let existing = header("genres:\n  - rap\n  - Hip Hop\n");
        let incoming = header("genres:\n  - hip hop\n  - east coast hip hop\n");

        let merged = merge(&existing, &incoming);

        assert_eq!(genres(&merged), vec!["rap", "Hip Hop", "east coast hip hop"]);
    }

    #[test]
    fn test_scalar_genre_becomes_list() {
        let existing = header("genres: jazz\n");
        let incoming = header("genres:\n  - bebop\n");

        let merged = merge(&existing, &incoming);

        assert_eq!(genres(&merged), vec!["jazz", "bebop"]);
    }

    #[test]
    fn test_numeric_genre_is_kept() {
        let existing = header("genres: 1990\n");
        let incoming = header("genres:\n  - hip hop\n");

        let merged = merge(&existing, &incoming);

        let Some(Value::Sequence(seq)) = merged.get(GENRES_KEY) else {
            panic!("genres should be a list");
        };
        assert_eq!(seq, &vec![Value::from(1990), Value::from("hip hop")]);
    }

    #[test]
    fn test_empty_genres_not_added() {
        let merged = merge(&header("name: X\n"), &header("genres: []\n"));
        assert!(merged.get(GENRES_KEY).is_none());
    }

    #[test]
    fn test_preserves_key_order() {
        let existing = header("zeta: 1\ncountry: ''\nalpha: 2\n");
        let incoming = header("new_key: v\ncountry: US\n");

        let merged = merge(&existing, &incoming);
        let keys: Vec<_> = merged.keys().filter_map(|k| k.as_str()).collect();

        assert_eq!(keys, vec!["zeta", "country", "alpha", "new_key"]);
    }

    #[test]
    fn test_artist_incoming_fields() {
        let fields = incoming_fields(&EntityRecord::Artist(jay_z_artist()));

        assert_eq!(fields.get("musicbrainz_id"), Some(&Value::from("X")));
        assert_eq!(fields.get("name"), Some(&Value::from("Jay-Z")));
        assert_eq!(fields.get("country"), Some(&Value::from("US")));
        assert_eq!(fields.get("formed"), Some(&Value::from("1969-12-04")));
        assert!(fields.get("end_date").is_none());
        assert_eq!(genres(&fields), vec!["hip hop"]);
    }

    #[test]
    fn test_album_incoming_fields_link_artist() {
        let fields = incoming_fields(&EntityRecord::Album(four_four_four_album()));

        assert_eq!(fields.get("title"), Some(&Value::from("4:44")));
        assert_eq!(fields.get("artist"), Some(&Value::from("[[Jay-Z]]")));
        assert_eq!(fields.get("artist_mbid"), Some(&Value::from("X")));
        assert_eq!(fields.get("track_count"), Some(&Value::from(10u32)));
    }

    #[test]
    fn test_existing_link_is_not_replaced() {
        let existing = header("artist: '[[JAY-Z]]'\n");
        let report = merge_record(&existing, &EntityRecord::Album(four_four_four_album()));

        assert_eq!(report.header.get("artist"), Some(&Value::from("[[JAY-Z]]")));
    }

    #[test]
    fn test_merge_record_sets_type_and_reports_changes() {
        let existing = header("type: Artist\nname: Jay-Z\nnotes: mine\n");
        let report = merge_record(&existing, &EntityRecord::Artist(jay_z_artist()));

        assert_eq!(report.header.get("type"), Some(&Value::from("artist")));
        assert!(report.changed.contains(&"type".to_string()));
        assert!(report.changed.contains(&"musicbrainz_id".to_string()));
        assert!(!report.changed.contains(&"name".to_string()));
        assert!(!report.changed.contains(&"notes".to_string()));
        assert_eq!(report.header.get("notes"), Some(&Value::from("mine")));
    }

    #[test]
    fn test_merge_record_twice_is_unchanged() {
        let record = EntityRecord::Artist(jay_z_artist());
        let first = merge_record(&header("name: Jay-Z\n"), &record);
        let second = merge_record(&first.header, &record);

        assert!(second.is_unchanged());
        assert_eq!(second.header, first.header);
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            Just(Value::from("")),
            Just(Value::Sequence(vec![])),
            Just(Value::Bool(false)),
            Just(Value::Bool(true)),
            (0i64..5).prop_map(Value::from),
            "[a-z]{1,6}".prop_map(|s| Value::from(s.as_str())),
            prop::collection::vec("[a-z]{1,4}", 0..4).prop_map(|v| {
                Value::Sequence(v.iter().map(|s| Value::from(s.as_str())).collect())
            }),
        ]
    }

    fn header_strategy() -> impl Strategy<Value = Header> {
        let key = prop::sample::select(vec!["name", "country", "label", "genres", "notes", "year"]);
        prop::collection::vec((key, value_strategy()), 0..6).prop_map(|pairs| {
            let mut h = Header::new();
            for (k, v) in pairs {
                h.insert(k.into(), v);
            }
            h
        })
    }

    proptest! {
        #[test]
        fn prop_populated_values_survive(existing in header_strategy(), incoming in header_strategy()) {
            let merged = merge(&existing, &incoming);

            for (key, value) in &existing {
                if key.as_str() == Some(GENRES_KEY) || is_blank(value) {
                    continue;
                }
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }

        #[test]
        fn prop_merge_is_idempotent(existing in header_strategy(), incoming in header_strategy()) {
            let once = merge(&existing, &incoming);
            let twice = merge(&once, &incoming);

            prop_assert_eq!(twice, once);
        }

        #[test]
        fn prop_incoming_genres_are_included(existing in header_strategy(), incoming in header_strategy()) {
            let merged = merge(&existing, &incoming);
            let union = merged.get(GENRES_KEY).map(crate::document::string_list).unwrap_or_default();

            for genre in incoming.get(GENRES_KEY).map(crate::document::string_list).unwrap_or_default() {
                prop_assert!(union.iter().any(|g| g.eq_ignore_ascii_case(&genre)));
            }
        }
    }
}
