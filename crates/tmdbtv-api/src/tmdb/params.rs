//! Request parameter types: query parameters, per-call options, rating body.

use serde::{Deserialize, Serialize};

use super::meta::MetaKey;

/// Ordered query parameters with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Inserts a parameter. An existing parameter with the same name keeps its
    /// position and takes the new value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw pairs, suitable for `reqwest::RequestBuilder::query`.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Overlays `overrides` on `defaults`. Same-named keys take the override
    /// value; defaults come first in the resulting order.
    #[must_use]
    pub fn merge(defaults: Self, overrides: Self) -> Self {
        let mut merged = defaults;
        for (name, value) in overrides.pairs {
            merged.set(name, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Per-call options. Every field that is set overrides the meta pool value of
/// the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct TvOptions {
    /// `api_key`
    pub api_key: Option<String>,
    /// `language`
    pub language: Option<String>,
    /// `session_id`
    pub session_id: Option<String>,
    /// `guest_session_id`
    pub guest_session_id: Option<String>,
    /// `page`
    pub page: Option<u32>,
    /// `include_image_language`
    pub include_image_language: Option<String>,
    /// `append_to_response` (show details only, e.g. `credits,images`).
    pub append_to_response: Option<String>,
    /// `start_date` (changes only, `YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// `end_date` (changes only, `YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Any other parameter, passed through verbatim.
    pub extra: Vec<(String, String)>,
}

impl TvOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `api_key`.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets `language`.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets `session_id`.
    #[must_use]
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Sets `guest_session_id`.
    #[must_use]
    pub fn guest_session_id(mut self, id: impl Into<String>) -> Self {
        self.guest_session_id = Some(id.into());
        self
    }

    /// Sets `page`.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets `include_image_language`.
    #[must_use]
    pub fn include_image_language(mut self, languages: impl Into<String>) -> Self {
        self.include_image_language = Some(languages.into());
        self
    }

    /// Sets `append_to_response`.
    #[must_use]
    pub fn append_to_response(mut self, value: impl Into<String>) -> Self {
        self.append_to_response = Some(value.into());
        self
    }

    /// Sets `start_date`.
    #[must_use]
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Sets `end_date`.
    #[must_use]
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Adds an arbitrary parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Converts the set fields into query parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let typed = [
            (MetaKey::ApiKey.as_str(), self.api_key.clone()),
            (MetaKey::Language.as_str(), self.language.clone()),
            (MetaKey::SessionId.as_str(), self.session_id.clone()),
            (MetaKey::GuestSessionId.as_str(), self.guest_session_id.clone()),
            (MetaKey::Page.as_str(), self.page.map(|p| p.to_string())),
            (
                MetaKey::IncludeImageLanguage.as_str(),
                self.include_image_language.clone(),
            ),
            ("append_to_response", self.append_to_response.clone()),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
        ];

        let mut params: QueryParams = typed
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();
        for (name, value) in &self.extra {
            params.set(name.as_str(), value.as_str());
        }
        params
    }
}

/// Body of `POST tv/{id}/rating`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBody {
    /// Rating value. TMDB accepts 0.5 to 10.0 in 0.5 steps; not checked here.
    pub value: f64,
}

impl RatingBody {
    /// Creates a rating body.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}
