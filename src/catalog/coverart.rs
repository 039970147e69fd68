//! Cover Art Archive URLs
//!
//! Album covers are referenced, not downloaded: the archive serves a redirect
//! for the front image of any MusicBrainz release, so the URL can be derived
//! from the release ID without an extra request.
//!
//! API: https://coverartarchive.org

use serde::{Deserialize, Serialize};

const COVER_ART_BASE: &str = "https://coverartarchive.org";

/// Desired cover art size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverSize {
    /// 250px thumbnail
    Small,
    /// 500px thumbnail (default)
    #[default]
    Medium,
    /// 1200px thumbnail
    Large,
    /// Original full-size image
    Original,
}

impl CoverSize {
    fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "-250",
            CoverSize::Medium => "-500",
            CoverSize::Large => "-1200",
            CoverSize::Original => "",
        }
    }
}

/// Front cover URL for a release
pub fn front_cover_url(release_id: &str, size: CoverSize) -> String {
    format!(
        "{}/release/{}/front{}",
        COVER_ART_BASE,
        release_id,
        size.suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_size_default() {
        assert_eq!(CoverSize::default(), CoverSize::Medium);
    }

    #[test]
    fn test_front_cover_url() {
        assert_eq!(
            front_cover_url("rel-1", CoverSize::Medium),
            "https://coverartarchive.org/release/rel-1/front-500"
        );
        assert_eq!(
            front_cover_url("rel-1", CoverSize::Original),
            "https://coverartarchive.org/release/rel-1/front"
        );
    }

    #[test]
    fn test_cover_size_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            size: CoverSize,
        }
        let parsed: Wrapper = toml::from_str(r#"size = "large""#).unwrap();
        assert_eq!(parsed.size, CoverSize::Large);
    }
}
