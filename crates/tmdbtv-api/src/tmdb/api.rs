//! `TvShowsApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;

use super::params::{RatingBody, TvOptions};

/// TMDB v3 TV show operations.
///
/// Every method issues exactly one HTTP request and returns the decoded JSON
/// untouched. Uses `trait_variant::make` to generate a `Send`-bound async
/// trait.
///
/// All methods share the same error contract:
///
/// # Errors
///
/// Returns the transport's error unchanged (network failure, non-2xx
/// status, malformed JSON).
#[allow(clippy::module_name_repetitions)]
#[allow(clippy::missing_errors_doc)]
#[trait_variant::make(TvShowsApi: Send)]
pub trait LocalTvShowsApi {
    /// Primary details of a TV show (`GET tv/{id}`).
    async fn get_tv_show(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Rating, watchlist and favourite state for the session
    /// (`GET tv/{id}/account_states`).
    async fn get_tv_show_account_states(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Alternative titles (`GET tv/{id}/alternative_titles`).
    async fn get_tv_show_alternative_titles(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value>;

    /// Changes, by default the last 24 hours (`GET tv/{id}/changes`).
    async fn get_tv_show_changes(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Content ratings (`GET tv/{id}/content_ratings`).
    async fn get_tv_show_content_ratings(&self, tv_id: u64, options: &TvOptions)
    -> Result<Value>;

    /// Cast and crew (`GET tv/{id}/credits`).
    async fn get_tv_show_credits(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Episode groups (`GET tv/{id}/episode_groups`).
    async fn get_tv_show_episode_groups(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// External IDs (`GET tv/{id}/external_ids`).
    async fn get_tv_show_external_ids(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Images (`GET tv/{id}/images`).
    async fn get_tv_show_images(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Keywords (`GET tv/{id}/keywords`).
    async fn get_tv_show_keywords(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Recommendations (`GET tv/{id}/recommendations`).
    async fn get_tv_show_recommendations(&self, tv_id: u64, options: &TvOptions)
    -> Result<Value>;

    /// Reviews (`GET tv/{id}/reviews`).
    async fn get_tv_show_reviews(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Seasons or episodes screened in a film festival or theatre
    /// (`GET tv/{id}/screened_theatrically`).
    async fn get_tv_show_screened_theatrically(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value>;

    /// Similar shows (`GET tv/{id}/similar`).
    async fn get_tv_show_similar(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Translations (`GET tv/{id}/translations`).
    async fn get_tv_show_translations(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Videos (`GET tv/{id}/videos`).
    async fn get_tv_show_videos(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Rates a TV show (`POST tv/{id}/rating`).
    async fn rate_tv_show(
        &self,
        tv_id: u64,
        options: &TvOptions,
        body: &RatingBody,
    ) -> Result<Value>;

    /// Removes the rating (`DELETE tv/{id}/rating`, empty JSON body).
    async fn delete_tv_show_rating(&self, tv_id: u64, options: &TvOptions) -> Result<Value>;

    /// Most recently created show (`GET tv/latest`).
    async fn get_latest_tv_show(&self, options: &TvOptions) -> Result<Value>;

    /// Shows airing today (`GET tv/airing_today`).
    async fn get_airing_today_tv_shows(&self, options: &TvOptions) -> Result<Value>;

    /// Shows airing in the next 7 days (`GET tv/on_the_air`).
    async fn get_on_the_air_tv_shows(&self, options: &TvOptions) -> Result<Value>;

    /// Popular shows, updated daily (`GET tv/popular`).
    async fn get_popular_tv_shows(&self, options: &TvOptions) -> Result<Value>;

    /// Top rated shows (`GET tv/top_rated`).
    async fn get_top_rated_tv_shows(&self, options: &TvOptions) -> Result<Value>;
}
