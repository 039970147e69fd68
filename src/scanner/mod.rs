//! Vault scanning and note classification.
//!
//! Walks a vault directory, parses every Markdown note and sorts it into
//! artist or album notes. Classification order:
//! 1. an explicit `type: artist|album` header field
//! 2. when `type` is absent, the parent directory name (`artists/`, `albums/`)
//! 3. otherwise the note is left out
//!
//! Notes whose front matter fails to parse are logged and skipped.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::document::Document;
use crate::error::{Error, Result};

/// What kind of entity a note describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Artist,
    Album,
    Unknown,
}

impl DocumentKind {
    /// Header value written to the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Artist => "artist",
            DocumentKind::Album => "album",
            DocumentKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classified notes found in a vault, in traversal order
#[derive(Debug, Default)]
pub struct ScanResult {
    pub artists: Vec<Document>,
    pub albums: Vec<Document>,
    /// Notes that were neither artist nor album
    pub unclassified: usize,
    /// Notes skipped because their front matter could not be parsed
    pub unparsable: Vec<PathBuf>,
}

impl ScanResult {
    /// Number of classified notes
    pub fn total(&self) -> usize {
        self.artists.len() + self.albums.len()
    }
}

/// Scan a vault for artist and album notes.
///
/// Fails only when `root` is not an existing directory.
pub fn scan(root: &Path) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(Error::invalid_vault(root));
    }

    let mut result = ScanResult::default();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to read vault entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_markdown_file(entry.path()) {
            continue;
        }

        let doc = match Document::read(entry.path()) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Skipping unreadable note");
                result.unparsable.push(entry.path().to_path_buf());
                continue;
            }
        };

        match classify(&doc) {
            DocumentKind::Artist => result.artists.push(doc),
            DocumentKind::Album => result.albums.push(doc),
            DocumentKind::Unknown => result.unclassified += 1,
        }
    }

    info!(
        artists = result.artists.len(),
        albums = result.albums.len(),
        unclassified = result.unclassified,
        unparsable = result.unparsable.len(),
        "Scan complete"
    );

    Ok(result)
}

/// Decide what a note describes from its `type` field or parent directory.
pub fn classify(doc: &Document) -> DocumentKind {
    if let Some(value) = doc.header.get("type").filter(|v| !crate::document::is_blank(v)) {
        let declared = value.as_str().map(|s| s.trim().to_lowercase());
        return match declared.as_deref() {
            Some("artist") => DocumentKind::Artist,
            Some("album") => DocumentKind::Album,
            _ => {
                warn!(path = %doc.path.display(), "Unknown note type {:?}, skipping", value);
                DocumentKind::Unknown
            }
        };
    }

    let parent = doc
        .path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_lowercase());

    let kind = match parent.as_deref() {
        Some("artists") => DocumentKind::Artist,
        Some("albums") => DocumentKind::Album,
        _ => DocumentKind::Unknown,
    };

    if kind == DocumentKind::Unknown {
        debug!(path = %doc.path.display(), "No type found and none inferable from directory");
    } else {
        debug!(path = %doc.path.display(), %kind, "Inferred type from directory");
    }
    kind
}

/// Check if a path has a Markdown extension
pub fn is_markdown_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    matches!(ext.as_deref(), Some("md" | "markdown"))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Header;
    use crate::test_utils::{sample_vault, write_note};
    use tempfile::tempdir;

    fn stems(docs: &[Document]) -> Vec<String> {
        let mut stems: Vec<String> = docs.iter().map(|d| d.file_stem()).collect();
        stems.sort();
        stems
    }

    #[test]
    fn test_scan_sample_vault() {
        let dir = sample_vault();

        let result = scan(dir.path()).unwrap();

        assert_eq!(stems(&result.artists), vec!["Beyoncé", "Jay-Z"]);
        assert_eq!(stems(&result.albums), vec!["4-44", "Renaissance"]);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_notes_without_front_matter_are_unclassified() {
        let dir = sample_vault();

        let result = scan(dir.path()).unwrap();

        // random_note.md and incomplete_note.md
        assert_eq!(result.unclassified, 2);
    }

    #[test]
    fn test_invalid_yaml_does_not_break_scan() {
        let dir = sample_vault();
        write_note(
            dir.path(),
            "invalid_yaml.md",
            "---\ntype: album\nname: Broken Album\ninvalid_yaml: [\n---\nSome content",
        );

        let result = scan(dir.path()).unwrap();

        assert_eq!(result.artists.len(), 2);
        assert_eq!(result.albums.len(), 2);
        assert_eq!(result.unparsable.len(), 1);
    }

    #[test]
    fn test_directory_inference() {
        let dir = tempdir().unwrap();
        write_note(dir.path(), "Albums/4-44.md", "---\nname: '4:44'\n---\n");
        write_note(dir.path(), "artists/Jay-Z.md", "---\nname: Jay-Z\n---\n");
        write_note(dir.path(), "misc/Note.md", "---\nname: Note\n---\n");

        let result = scan(dir.path()).unwrap();

        assert_eq!(stems(&result.albums), vec!["4-44"]);
        assert_eq!(stems(&result.artists), vec!["Jay-Z"]);
        assert_eq!(result.unclassified, 1);
    }

    #[test]
    fn test_explicit_type_beats_directory() {
        let dir = tempdir().unwrap();
        write_note(dir.path(), "albums/Jay-Z.md", "---\ntype: artist\n---\n");

        let result = scan(dir.path()).unwrap();

        assert_eq!(result.artists.len(), 1);
        assert!(result.albums.is_empty());
    }

    #[test]
    fn test_unknown_type_is_not_inferred() {
        let dir = tempdir().unwrap();
        write_note(dir.path(), "albums/Note.md", "---\ntype: playlist\n---\n");

        let result = scan(dir.path()).unwrap();

        assert_eq!(result.total(), 0);
        assert_eq!(result.unclassified, 1);
    }

    #[test]
    fn test_hidden_directories_and_other_files_ignored() {
        let dir = tempdir().unwrap();
        write_note(dir.path(), ".obsidian/artists/Ghost.md", "---\ntype: artist\n---\n");
        write_note(dir.path(), "artists/cover.png", "not a note");
        write_note(dir.path(), "artists/Nas.MARKDOWN", "---\nname: Nas\n---\n");

        let result = scan(dir.path()).unwrap();

        assert_eq!(stems(&result.artists), vec!["Nas"]);
    }

    #[test]
    fn test_invalid_vault_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.md");
        std::fs::write(&file, "").unwrap();

        assert!(matches!(
            scan(&dir.path().join("missing")),
            Err(Error::InvalidVaultPath(_))
        ));
        assert!(matches!(scan(&file), Err(Error::InvalidVaultPath(_))));
    }

    #[test]
    fn test_classify_in_memory() {
        let mut header = Header::new();
        header.insert("type".into(), " Album ".into());
        let doc = Document::new("/vault/x.md", header, "");
        assert_eq!(classify(&doc), DocumentKind::Album);

        let doc = Document::new("/vault/ARTISTS/x.md", Header::new(), "");
        assert_eq!(classify(&doc), DocumentKind::Artist);
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("a.MD")));
        assert!(is_markdown_file(Path::new("a.markdown")));
        assert!(!is_markdown_file(Path::new("a.txt")));
        assert!(!is_markdown_file(Path::new("md")));
    }
}
