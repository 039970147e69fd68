//! Vault classification report.

use std::path::Path;
use std::process::ExitCode;

use crate::enrichment::identity::is_already_enriched;
use crate::scanner::{self, DocumentKind};

/// List classified notes and whether each still needs enrichment
pub fn cmd_scan(vault: &Path) -> anyhow::Result<ExitCode> {
    let result = scanner::scan(vault)?;
    println!("Scanning vault: {}\n", vault.display());

    if result.total() == 0 {
        println!("No artist or album notes found.");
    } else {
        println!("{:<8} {:<10} Note", "Kind", "Status");
        println!("{:-<8} {:-<10} {:-<4}", "", "", "");
    }

    let mut pending = 0;
    let groups = [
        (DocumentKind::Artist, &result.artists),
        (DocumentKind::Album, &result.albums),
    ];
    for (kind, docs) in groups {
        for doc in docs {
            let status = if is_already_enriched(doc) {
                "enriched"
            } else {
                pending += 1;
                "pending"
            };
            println!(
                "{:<8} {:<10} {}",
                kind,
                status,
                super::display_path(&doc.path, vault)
            );
        }
    }

    println!();
    println!(
        "Artists: {}  Albums: {}  Unclassified: {}  Unparsable: {}",
        result.artists.len(),
        result.albums.len(),
        result.unclassified,
        result.unparsable.len()
    );
    for path in &result.unparsable {
        eprintln!("  ! Could not parse front matter: {}", super::display_path(path, vault));
    }
    println!("Eligible for enrichment: {pending}");

    Ok(ExitCode::SUCCESS)
}
