//! TV endpoint catalogue and request construction.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde_json::Value;

use super::meta::{MetaKey, MetaPool};
use super::params::{QueryParams, TvOptions};

/// Path placeholder for the TV show ID.
const ID_SLOT: &str = "{id}";

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read.
    Get,
    /// Write.
    Post,
    /// Removal, sent through the write path.
    Delete,
}

impl HttpMethod {
    /// Returns the method name in upper case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meta keys shared by the details and account state endpoints.
const SESSION_READ_KEYS: &[MetaKey] = &[
    MetaKey::ApiKey,
    MetaKey::Language,
    MetaKey::SessionId,
    MetaKey::GuestSessionId,
];
/// Meta keys of the rating endpoints.
const SESSION_WRITE_KEYS: &[MetaKey] = &[
    MetaKey::ApiKey,
    MetaKey::SessionId,
    MetaKey::GuestSessionId,
];
const LOCALIZED_KEYS: &[MetaKey] = &[MetaKey::ApiKey, MetaKey::Language];
const KEY_ONLY: &[MetaKey] = &[MetaKey::ApiKey];
const IMAGE_KEYS: &[MetaKey] = &[
    MetaKey::ApiKey,
    MetaKey::Language,
    MetaKey::IncludeImageLanguage,
];

/// A TMDB v3 TV endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::module_name_repetitions)]
pub enum TvEndpoint {
    /// `GET tv/{id}`
    Details,
    /// `GET tv/{id}/account_states`
    AccountStates,
    /// `GET tv/{id}/alternative_titles`
    AlternativeTitles,
    /// `GET tv/{id}/changes`
    Changes,
    /// `GET tv/{id}/content_ratings`
    ContentRatings,
    /// `GET tv/{id}/credits`
    Credits,
    /// `GET tv/{id}/episode_groups`
    EpisodeGroups,
    /// `GET tv/{id}/external_ids`
    ExternalIds,
    /// `GET tv/{id}/images`
    Images,
    /// `GET tv/{id}/keywords`
    Keywords,
    /// `GET tv/{id}/recommendations`
    Recommendations,
    /// `GET tv/{id}/reviews`
    Reviews,
    /// `GET tv/{id}/screened_theatrically`
    ScreenedTheatrically,
    /// `GET tv/{id}/similar`
    Similar,
    /// `GET tv/{id}/translations`
    Translations,
    /// `GET tv/{id}/videos`
    Videos,
    /// `POST tv/{id}/rating`
    Rate,
    /// `DELETE tv/{id}/rating`
    DeleteRating,
    /// `GET tv/latest`
    Latest,
    /// `GET tv/airing_today`
    AiringToday,
    /// `GET tv/on_the_air`
    OnTheAir,
    /// `GET tv/popular`
    Popular,
    /// `GET tv/top_rated`
    TopRated,
}

impl TvEndpoint {
    /// Every endpoint, in catalogue order.
    pub const ALL: [Self; 23] = [
        Self::Details,
        Self::AccountStates,
        Self::AlternativeTitles,
        Self::Changes,
        Self::ContentRatings,
        Self::Credits,
        Self::EpisodeGroups,
        Self::ExternalIds,
        Self::Images,
        Self::Keywords,
        Self::Recommendations,
        Self::Reviews,
        Self::ScreenedTheatrically,
        Self::Similar,
        Self::Translations,
        Self::Videos,
        Self::Rate,
        Self::DeleteRating,
        Self::Latest,
        Self::AiringToday,
        Self::OnTheAir,
        Self::Popular,
        Self::TopRated,
    ];

    /// Name of the client method serving this endpoint.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Details => "get_tv_show",
            Self::AccountStates => "get_tv_show_account_states",
            Self::AlternativeTitles => "get_tv_show_alternative_titles",
            Self::Changes => "get_tv_show_changes",
            Self::ContentRatings => "get_tv_show_content_ratings",
            Self::Credits => "get_tv_show_credits",
            Self::EpisodeGroups => "get_tv_show_episode_groups",
            Self::ExternalIds => "get_tv_show_external_ids",
            Self::Images => "get_tv_show_images",
            Self::Keywords => "get_tv_show_keywords",
            Self::Recommendations => "get_tv_show_recommendations",
            Self::Reviews => "get_tv_show_reviews",
            Self::ScreenedTheatrically => "get_tv_show_screened_theatrically",
            Self::Similar => "get_tv_show_similar",
            Self::Translations => "get_tv_show_translations",
            Self::Videos => "get_tv_show_videos",
            Self::Rate => "rate_tv_show",
            Self::DeleteRating => "delete_tv_show_rating",
            Self::Latest => "get_latest_tv_show",
            Self::AiringToday => "get_airing_today_tv_shows",
            Self::OnTheAir => "get_on_the_air_tv_shows",
            Self::Popular => "get_popular_tv_shows",
            Self::TopRated => "get_top_rated_tv_shows",
        }
    }

    /// Short kebab-case name (e.g. `airing-today`), used on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::AccountStates => "account-states",
            Self::AlternativeTitles => "alternative-titles",
            Self::Changes => "changes",
            Self::ContentRatings => "content-ratings",
            Self::Credits => "credits",
            Self::EpisodeGroups => "episode-groups",
            Self::ExternalIds => "external-ids",
            Self::Images => "images",
            Self::Keywords => "keywords",
            Self::Recommendations => "recommendations",
            Self::Reviews => "reviews",
            Self::ScreenedTheatrically => "screened-theatrically",
            Self::Similar => "similar",
            Self::Translations => "translations",
            Self::Videos => "videos",
            Self::Rate => "rate",
            Self::DeleteRating => "delete-rating",
            Self::Latest => "latest",
            Self::AiringToday => "airing-today",
            Self::OnTheAir => "on-the-air",
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Rate => HttpMethod::Post,
            Self::DeleteRating => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// Path template relative to the v3 base URL. Show-scoped endpoints
    /// contain a single `{id}` slot.
    #[must_use]
    pub const fn path_template(self) -> &'static str {
        match self {
            Self::Details => "tv/{id}",
            Self::AccountStates => "tv/{id}/account_states",
            Self::AlternativeTitles => "tv/{id}/alternative_titles",
            Self::Changes => "tv/{id}/changes",
            Self::ContentRatings => "tv/{id}/content_ratings",
            Self::Credits => "tv/{id}/credits",
            Self::EpisodeGroups => "tv/{id}/episode_groups",
            Self::ExternalIds => "tv/{id}/external_ids",
            Self::Images => "tv/{id}/images",
            Self::Keywords => "tv/{id}/keywords",
            Self::Recommendations => "tv/{id}/recommendations",
            Self::Reviews => "tv/{id}/reviews",
            Self::ScreenedTheatrically => "tv/{id}/screened_theatrically",
            Self::Similar => "tv/{id}/similar",
            Self::Translations => "tv/{id}/translations",
            Self::Videos => "tv/{id}/videos",
            Self::Rate | Self::DeleteRating => "tv/{id}/rating",
            Self::Latest => "tv/latest",
            Self::AiringToday => "tv/airing_today",
            Self::OnTheAir => "tv/on_the_air",
            Self::Popular => "tv/popular",
            Self::TopRated => "tv/top_rated",
        }
    }

    /// Meta pool keys injected as defaults, in order.
    #[must_use]
    pub const fn meta_keys(self) -> &'static [MetaKey] {
        match self {
            Self::Details | Self::AccountStates => SESSION_READ_KEYS,
            Self::Rate | Self::DeleteRating => SESSION_WRITE_KEYS,
            Self::Images => IMAGE_KEYS,
            Self::Changes | Self::Keywords | Self::ScreenedTheatrically | Self::Translations => {
                KEY_ONLY
            }
            Self::AlternativeTitles
            | Self::ContentRatings
            | Self::Credits
            | Self::EpisodeGroups
            | Self::ExternalIds
            | Self::Recommendations
            | Self::Reviews
            | Self::Similar
            | Self::Videos
            | Self::Latest
            | Self::AiringToday
            | Self::OnTheAir
            | Self::Popular
            | Self::TopRated => LOCALIZED_KEYS,
        }
    }

    /// Returns `true` if the path takes a TV show ID.
    #[must_use]
    pub const fn is_show_scoped(self) -> bool {
        !matches!(
            self,
            Self::Latest | Self::AiringToday | Self::OnTheAir | Self::Popular | Self::TopRated
        )
    }

    /// Renders the request path.
    ///
    /// # Errors
    ///
    /// Returns an error if `tv_id` is missing for a show-scoped endpoint or
    /// given for a list endpoint.
    pub fn path(self, tv_id: Option<u64>) -> Result<String> {
        let template = self.path_template();
        match (self.is_show_scoped(), tv_id) {
            (true, Some(id)) => Ok(template.replacen(ID_SLOT, &id.to_string(), 1)),
            (false, None) => Ok(String::from(template)),
            (true, None) => bail!("{self} requires a TV show id"),
            (false, Some(id)) => bail!("{self} does not take a TV show id (got {id})"),
        }
    }

    /// Resolves query parameters: meta pool defaults for the recognized
    /// keys, then every option set by the caller.
    #[must_use]
    pub fn resolve_params(self, pool: &MetaPool, options: &TvOptions) -> QueryParams {
        QueryParams::merge(pool.metas(self.meta_keys()), options.to_params())
    }

    /// Builds the full request for this endpoint.
    ///
    /// Write endpoints always carry a JSON body: `body` for POST (an empty
    /// object if none is given) and an empty object for DELETE.
    ///
    /// # Errors
    ///
    /// Returns an error if `tv_id` does not match the endpoint scope, or a
    /// body is given for a GET endpoint.
    pub fn prepare(
        self,
        pool: &MetaPool,
        tv_id: Option<u64>,
        options: &TvOptions,
        body: Option<Value>,
    ) -> Result<PreparedRequest> {
        let path = self.path(tv_id)?;
        let query = self.resolve_params(pool, options);
        let body = match (self.method(), body) {
            (HttpMethod::Get, None) => None,
            (HttpMethod::Get, Some(_)) => bail!("{self} does not take a request body"),
            (HttpMethod::Post, body) => Some(body.unwrap_or_else(empty_object)),
            (HttpMethod::Delete, _) => Some(empty_object()),
        };

        Ok(PreparedRequest {
            method: self.method(),
            path,
            query,
            body,
        })
    }
}

/// `{}`
fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl fmt::Display for TvEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TvEndpoint {
    type Err = anyhow::Error;

    /// Accepts either the slug (`on-the-air`) or the method name
    /// (`get_on_the_air_tv_shows`).
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.slug() == s || e.name() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown TV operation: {s}"))
    }
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the v3 base URL.
    pub path: String,
    /// Query parameters.
    pub query: QueryParams,
    /// JSON body (write endpoints only).
    pub body: Option<Value>,
}
