//! Vault enrichment command.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::catalog::{CoverSize, MusicBrainzClient};
use crate::enrichment::{DocumentEvent, EnrichOptions, Enricher, Outcome, ProgressObserver};

/// Enrich every artist and album note in a vault
pub fn cmd_enrich(
    rt: &Runtime,
    vault: &Path,
    options: EnrichOptions,
    rate_limit: Duration,
    cover_size: CoverSize,
) -> anyhow::Result<ExitCode> {
    let client = MusicBrainzClient::new(rate_limit)?.with_cover_size(cover_size);

    println!("Enriching vault: {}", vault.display());
    println!(
        "Catalog requests spaced {:.1}s apart",
        client.min_interval().as_secs_f64()
    );
    if options.dry_run {
        println!("Dry run - no notes will be modified");
    }
    println!();

    let enricher = Enricher::new(client, options);
    let mut progress = ConsoleProgress { vault };
    let stats = rt.block_on(enricher.enrich_vault(vault, &mut progress))?;

    println!();
    println!("{stats}");

    if stats.has_errors() {
        eprintln!(
            "⚠ {} note(s) could not be enriched; see the log for details.",
            stats.error_files
        );
        return Ok(ExitCode::FAILURE);
    }

    println!("✓ Enrichment complete");
    Ok(ExitCode::SUCCESS)
}

/// Prints one line per finished note
struct ConsoleProgress<'a> {
    vault: &'a Path,
}

impl ProgressObserver for ConsoleProgress<'_> {
    fn on_document(&mut self, event: DocumentEvent<'_>) {
        println!("{}", progress_line(&event, self.vault));
    }
}

fn progress_line(event: &DocumentEvent<'_>, vault: &Path) -> String {
    let marker = match event.outcome {
        Outcome::Enriched { .. } => "✓",
        Outcome::Skipped(_) => "-",
        Outcome::Failed(_) => "✗",
    };
    format!(
        "[{}/{}] {} {:<6} {}: {}",
        event.stats.finished(),
        event.stats.total_files,
        marker,
        event.kind,
        super::display_path(event.path, vault),
        event.outcome
    )
}
