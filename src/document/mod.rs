//! Markdown note model: YAML front matter header plus free-form body.
//!
//! A note looks like:
//!
//! ```text
//! ---
//! type: album
//! artist: "[[Jay-Z]]"
//! genres:
//!   - hip hop
//! ---
//! Free-form Markdown body.
//! ```
//!
//! The header is kept as an insertion-ordered [`serde_yaml::Mapping`] so a
//! read/write cycle never reorders or drops keys. Writes go through a sibling
//! temp file and a rename, so a note on disk is either the old or the new
//! version, never a partial one.

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Structured header of a note (front matter), in file order.
pub type Header = Mapping;

/// Delimiter line opening and closing the front matter block
const FENCE: &str = "---";

/// Alternative YAML document-end marker accepted as a closing delimiter
const DOC_END: &str = "...";

/// A parsed Markdown note.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Location on disk
    pub path: PathBuf,
    /// Front matter key/value map
    pub header: Header,
    /// Everything after the closing front matter delimiter
    pub body: String,
}

/// Errors reading or writing notes
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid front matter in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize front matter for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

impl Document {
    /// Create a document from parts (nothing is written).
    pub fn new(path: impl Into<PathBuf>, header: Header, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header,
            body: body.into(),
        }
    }

    /// Read and parse a note from disk.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DocumentError::Read(path.to_path_buf(), e))?;
        Self::parse(path, &text)
    }

    /// Parse note text. `path` is only recorded, not touched.
    ///
    /// Text without a complete front matter block (no opening fence, or an
    /// opening fence that is never closed) yields an empty header and the whole
    /// text as body.
    pub fn parse(path: &Path, text: &str) -> Result<Self, DocumentError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let Some((yaml, body)) = split_front_matter(text) else {
            return Ok(Self::new(path, Header::new(), text));
        };

        let header = parse_header(path, yaml)?;
        Ok(Self::new(path, header, body))
    }

    /// Render the note back to text.
    pub fn render(&self) -> Result<String, DocumentError> {
        let yaml = if self.header.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.header).map_err(|e| DocumentError::Serialize {
                path: self.path.clone(),
                message: e.to_string(),
            })?
        };

        let mut out = String::with_capacity(yaml.len() + self.body.len() + 8);
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&yaml);
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&self.body);
        Ok(out)
    }

    /// Write the note back to its path atomically (write temp, then rename).
    ///
    /// The header is re-serialized from the parsed mapping, so YAML comments in
    /// the front matter are not preserved. The body is written as is.
    pub fn write(&self) -> Result<(), DocumentError> {
        let contents = self.render()?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "note".to_string());
        let temp_path = self.path.with_file_name(format!(".{file_name}.tmp"));

        std::fs::write(&temp_path, contents)
            .map_err(|e| DocumentError::Write(temp_path.clone(), e))?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(DocumentError::Rename(temp_path, self.path.clone(), e));
        }

        tracing::debug!(path = %self.path.display(), "Wrote note");
        Ok(())
    }

    /// Non-blank string value for `key`, trimmed.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.header.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    /// String-ish value for `key` rendered as text (numbers included), trimmed.
    ///
    /// Identifiers are sometimes written unquoted and parse as numbers.
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.header.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// List of strings for `key`. A scalar string counts as a one-item list.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.header.get(key).map(string_list).unwrap_or_default()
    }

    /// File name without extension
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// True when the body has no visible content.
    pub fn body_is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Whether a header value counts as empty: null, `false`, zero, a blank
/// string, or an empty list/map.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(tagged) => is_blank(&tagged.value),
    }
}

/// Collect the non-blank strings of a header value.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Value::Sequence(seq) => seq
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Split text into (front matter yaml, body). `None` when there is no
/// complete front matter block.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == FENCE || trimmed == DOC_END {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_header(path: &Path, yaml: &str) -> Result<Header, DocumentError> {
    if yaml.trim().is_empty() {
        return Ok(Header::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Header::new()),
        _ => Err(DocumentError::Parse {
            path: path.to_path_buf(),
            message: "front matter is not a key/value map".to_string(),
        }),
    }
}
