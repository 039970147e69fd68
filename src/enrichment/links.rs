//! Obsidian wiki-link helpers.

/// Wrap a name as a wiki link: `Jay-Z` -> `[[Jay-Z]]`.
///
/// Values that already are a wiki link are returned unchanged.
pub fn to_wiki_link(name: &str) -> String {
    let name = name.trim();
    if is_wiki_link(name) {
        return name.to_string();
    }
    format!("[[{name}]]")
}

/// Reduce a wiki link to the note name it points at.
///
/// `[[Artists/Jay-Z|Hova]]` -> `Jay-Z`. Plain text passes through trimmed.
pub fn link_target(value: &str) -> String {
    let inner = value
        .trim()
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
        .unwrap_or(value.trim());

    // Drop the display alias, then any folder path
    let target = inner.split('|').next().unwrap_or(inner);
    let target = target.rsplit(['/', '\\']).next().unwrap_or(target);
    target.trim().to_string()
}

fn is_wiki_link(value: &str) -> bool {
    value.starts_with("[[") && value.ends_with("]]") && value.len() > 4
}
