//! URL construction for the campaign service.

use crate::domain::PostId;

/// Default service location used when no `endpoint` is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Builds request URLs relative to a base URL.
///
/// # Examples
///
/// ```
/// use campaign_feed::transport::Endpoints;
///
/// let endpoints = Endpoints::new("http://localhost:8000/");
/// assert_eq!(endpoints.feed(), "http://localhost:8000/campaigns/");
/// assert_eq!(endpoints.like(5), "http://localhost:8000/campaigns/5/like");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Creates endpoints for a base URL, ignoring trailing slashes.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /campaigns/`
    #[must_use]
    pub fn feed(&self) -> String {
        format!("{}/campaigns/", self.base_url)
    }

    /// `POST /campaigns/{id}/like`
    #[must_use]
    pub fn like(&self, id: PostId) -> String {
        format!("{}/campaigns/{id}/like", self.base_url)
    }

    /// `POST /brands/{brand_name}/follow`
    ///
    /// The brand name is percent-encoded as a single path segment.
    #[must_use]
    pub fn follow(&self, brand_name: &str) -> String {
        format!(
            "{}/brands/{}/follow",
            self.base_url,
            urlencoding::encode(brand_name)
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_url_encodes_brand() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.follow("Sprint Style"),
            "http://localhost:8000/brands/Sprint%20Style/follow"
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let endpoints = Endpoints::new("https://feed.example//");
        assert_eq!(endpoints.base_url(), "https://feed.example");
        assert_eq!(endpoints.feed(), "https://feed.example/campaigns/");
    }
}
