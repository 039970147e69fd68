//! Metadata completeness report.

use std::path::Path;
use std::process::ExitCode;

use crate::document::Document;
use crate::enrichment::identity::existing_identifier;
use crate::scanner::{self, DocumentKind};

/// Fields every artist note should carry besides identifier and genres
const ARTIST_FIELDS: [&str; 2] = ["country", "formed"];

/// Fields every album note should carry besides identifier and genres
const ALBUM_FIELDS: [&str; 2] = ["artist", "release_date"];

/// Report notes with missing metadata; fails when any note is incomplete
pub fn cmd_validate(vault: &Path) -> anyhow::Result<ExitCode> {
    let result = scanner::scan(vault)?;
    println!("Validating vault: {}\n", vault.display());

    let mut incomplete = 0;
    let groups = [
        (DocumentKind::Artist, &result.artists),
        (DocumentKind::Album, &result.albums),
    ];
    for (kind, docs) in groups {
        for doc in docs {
            let missing = missing_fields(doc, kind);
            if !missing.is_empty() {
                incomplete += 1;
                println!(
                    "✗ {} {}: missing {}",
                    kind,
                    super::display_path(&doc.path, vault),
                    missing.join(", ")
                );
            }
        }
    }

    let total = result.total();
    println!();
    println!("{} of {} notes complete", total - incomplete, total);

    if incomplete > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Expected header fields that are absent or empty.
pub fn missing_fields(doc: &Document, kind: DocumentKind) -> Vec<&'static str> {
    let mut missing = Vec::new();

    if existing_identifier(doc).is_none() {
        missing.push("musicbrainz_id");
    }
    if doc.get_string_list("genres").is_empty() {
        missing.push("genres");
    }

    let specific: &[&'static str] = match kind {
        DocumentKind::Artist => &ARTIST_FIELDS,
        DocumentKind::Album => &ALBUM_FIELDS,
        DocumentKind::Unknown => &[],
    };
    missing.extend(specific.iter().filter(|key| doc.get_text(key).is_none()));

    missing
}
