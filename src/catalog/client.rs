//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits
//! clients. Every request goes through the client's [`RateLimiter`].
//!
//! The methods here return raw `Result`s; the [`CatalogApi`] implementation in
//! `traits.rs` is the boundary that logs failures and turns them into empty
//! results.
//!
//! [`CatalogApi`]: super::traits::CatalogApi

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::coverart::CoverSize;
use super::domain::{AlbumHit, AlbumRecord, ArtistHit, ArtistRecord, CatalogError};
use super::rate_limit::RateLimiter;
use super::{adapter, dto};

/// User agent string - MusicBrainz requires this
const USER_AGENT: &str = concat!(
    "VaultEnricher/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/vault-enricher)"
);

const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
    cover_size: CoverSize,
}

impl MusicBrainzClient {
    /// Create a client enforcing `min_interval` between requests
    pub fn new(min_interval: Duration) -> Result<Self, CatalogError> {
        Self::with_base_url(DEFAULT_BASE_URL, min_interval)
    }

    /// Create a client against a custom base URL (mirrors, tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        min_interval: Duration,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(min_interval),
            cover_size: CoverSize::default(),
        })
    }

    /// Set the cover image size used for derived cover URLs
    pub fn with_cover_size(mut self, cover_size: CoverSize) -> Self {
        self.cover_size = cover_size;
        self
    }

    pub fn min_interval(&self) -> Duration {
        self.limiter.min_interval()
    }

    /// Look up an artist by MusicBrainz ID
    pub async fn lookup_artist(&self, artist_id: &str) -> Result<ArtistRecord, CatalogError> {
        let url = format!(
            "{}/artist/{}?inc=tags+genres+release-groups&fmt=json",
            self.base_url,
            urlencoding::encode(artist_id)
        );
        let response: dto::ArtistResponse = self.get_json(&url).await?;
        Ok(adapter::to_artist_record(response))
    }

    /// Look up a release by MusicBrainz ID
    pub async fn lookup_release(&self, release_id: &str) -> Result<AlbumRecord, CatalogError> {
        let url = format!(
            "{}/release/{}?inc=artists+recordings+tags+genres+labels&fmt=json",
            self.base_url,
            urlencoding::encode(release_id)
        );
        let response: dto::ReleaseResponse = self.get_json(&url).await?;
        adapter::to_album_record(response, self.cover_size)
    }

    /// Search artists by name
    pub async fn find_artists(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<ArtistHit>, CatalogError> {
        let url = self.search_url("artist", &build_query(&[("artist", name)]), limit);
        let response: dto::ArtistSearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_artist_hits(response))
    }

    /// Search releases by title, optionally narrowed by artist name
    pub async fn find_releases(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AlbumHit>, CatalogError> {
        let mut fields = vec![("release", title)];
        if let Some(artist) = artist.filter(|a| !a.trim().is_empty()) {
            fields.push(("artist", artist));
        }
        let url = self.search_url("release", &build_query(&fields), limit);
        let response: dto::ReleaseSearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_album_hits(response))
    }

    fn search_url(&self, entity: &str, query: &str, limit: usize) -> String {
        format!(
            "{}/{}?query={}&limit={}&fmt=json",
            self.base_url,
            entity,
            urlencoding::encode(query),
            limit.max(1)
        )
    }

    /// Send a rate-limited GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        self.limiter.acquire().await;
        tracing::debug!(url, "Catalog request");

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(CatalogError::ApiError(error.error));
            }
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// Build a Lucene query from `field:(terms)` clauses.
///
/// Terms are escaped and lowercased so the search stays fuzzy: words match in
/// any order, and clauses are not forced to all match.
fn build_query(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(field, value)| format!("{}:({})", field, escape_terms(value.trim())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape Lucene special characters. Lowercasing keeps `AND`, `OR` and `NOT`
/// in a title from acting as operators.
fn escape_terms(value: &str) -> String {
    const SPECIAL: &[char] = &[
        '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':',
        '\\', '/',
    ];

    let mut out = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MusicBrainzClient {
        MusicBrainzClient::new(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.base_url, "https://musicbrainz.org/ws/2");
        assert_eq!(client.min_interval(), Duration::from_secs(2));
        assert_eq!(client.cover_size, CoverSize::Medium);
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = MusicBrainzClient::with_base_url("http://localhost:8080/", Duration::ZERO)
            .unwrap()
            .with_cover_size(CoverSize::Large);
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.cover_size, CoverSize::Large);
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("VaultEnricher/"));
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query(&[("artist", "Jay-Z")]), r"artist:(jay\-z)");
        assert_eq!(
            build_query(&[("release", " 4:44 "), ("artist", "Jay-Z")]),
            r"release:(4\:44) artist:(jay\-z)"
        );
    }

    #[test]
    fn test_build_query_multi_word_title_and_loose_hint() {
        // A file stem and an alias-style hint must not become exact phrases
        let query = build_query(&[("release", "Jay-Z - 4_44"), ("artist", "Jay Z")]);
        assert_eq!(query, r"release:(jay\-z \- 4_44) artist:(jay z)");
        assert!(!query.contains('"'));
        assert!(!query.contains(" AND "));
    }

    #[test]
    fn test_escape_terms() {
        assert_eq!(escape_terms(r#"The "Best" \ Of"#), r#"the \"best\" \\ of"#);
        assert_eq!(escape_terms("AC/DC (Live)!"), r"ac\/dc \(live\)\!");
        assert_eq!(escape_terms("Rock AND Roll"), "rock and roll");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = client();
        let url = client.search_url("artist", &build_query(&[("artist", "Sigur Rós")]), 0);

        assert!(url.starts_with("https://musicbrainz.org/ws/2/artist?query="));
        assert!(url.contains("artist%3A%28sigur%20r%C3%B3s%29"));
        assert!(url.ends_with("&limit=1&fmt=json"));
    }
}
