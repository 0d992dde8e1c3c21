//! Meta pool: shared default query parameters.

use std::fmt;

use super::params::QueryParams;

/// Name of a parameter that can be supplied by the meta pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::module_name_repetitions)]
pub enum MetaKey {
    /// `api_key`
    ApiKey,
    /// `language`
    Language,
    /// `session_id`
    SessionId,
    /// `guest_session_id`
    GuestSessionId,
    /// `page`
    Page,
    /// `include_image_language`
    IncludeImageLanguage,
}

impl MetaKey {
    /// Returns the query parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::Language => "language",
            Self::SessionId => "session_id",
            Self::GuestSessionId => "guest_session_id",
            Self::Page => "page",
            Self::IncludeImageLanguage => "include_image_language",
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default values injected into every request that recognizes the key.
///
/// Handed to [`TvShows::new`](super::TvShows::new) explicitly; nothing is
/// looked up from process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct MetaPool {
    /// TMDB v3 API key.
    pub api_key: Option<String>,
    /// Preferred response language (e.g. `en-US`).
    pub language: Option<String>,
    /// User session ID.
    pub session_id: Option<String>,
    /// Guest session ID.
    pub guest_session_id: Option<String>,
    /// Default page number.
    pub page: Option<u32>,
    /// Image language filter (e.g. `en,null`).
    pub include_image_language: Option<String>,
}

impl MetaPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the session ID.
    #[must_use]
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Sets the guest session ID.
    #[must_use]
    pub fn guest_session_id(mut self, id: impl Into<String>) -> Self {
        self.guest_session_id = Some(id.into());
        self
    }

    /// Sets the default page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the image language filter.
    #[must_use]
    pub fn include_image_language(mut self, languages: impl Into<String>) -> Self {
        self.include_image_language = Some(languages.into());
        self
    }

    /// Returns the current value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: MetaKey) -> Option<String> {
        match key {
            MetaKey::ApiKey => self.api_key.clone(),
            MetaKey::Language => self.language.clone(),
            MetaKey::SessionId => self.session_id.clone(),
            MetaKey::GuestSessionId => self.guest_session_id.clone(),
            MetaKey::Page => self.page.map(|p| p.to_string()),
            MetaKey::IncludeImageLanguage => self.include_image_language.clone(),
        }
    }

    /// Collects the values present for `keys`, in the order given.
    #[must_use]
    pub fn metas(&self, keys: &[MetaKey]) -> QueryParams {
        let mut params = QueryParams::new();
        for &key in keys {
            if let Some(value) = self.get(key) {
                params.set(key.as_str(), value);
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_metas_skips_absent_keys() {
        // Arrange
        let pool = MetaPool::new().api_key("abc");

        // Act
        let params = pool.metas(&[MetaKey::ApiKey, MetaKey::Language, MetaKey::SessionId]);

        // Assert
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("api_key"), Some("abc"));
        assert_eq!(params.get("language"), None);
    }

    #[test]
    fn test_metas_follows_key_order() {
        // Arrange
        let pool = MetaPool::new()
            .api_key("abc")
            .language("ja-JP")
            .session_id("sess");

        // Act
        let params = pool.metas(&[MetaKey::SessionId, MetaKey::ApiKey, MetaKey::Language]);

        // Assert
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["session_id", "api_key", "language"]);
    }

    #[test]
    fn test_metas_only_returns_requested_keys() {
        // Arrange
        let pool = MetaPool::new()
            .api_key("abc")
            .language("en-US")
            .include_image_language("en,null")
            .page(3);

        // Act
        let params = pool.metas(&[MetaKey::ApiKey]);

        // Assert
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), None);
    }

    #[test]
    fn test_page_is_rendered_as_decimal() {
        // Arrange
        let pool = MetaPool::new().page(12);

        // Act
        let value = pool.get(MetaKey::Page);

        // Assert
        assert_eq!(value.as_deref(), Some("12"));
    }

    #[test]
    fn test_meta_key_display() {
        assert_eq!(MetaKey::IncludeImageLanguage.to_string(), "include_image_language");
        assert_eq!(MetaKey::GuestSessionId.to_string(), "guest_session_id");
    }
}
