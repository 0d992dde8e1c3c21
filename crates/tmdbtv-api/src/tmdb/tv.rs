//! `TvShows` - dispatches the TV endpoint catalogue onto a `Transport`.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::instrument;

use super::api::LocalTvShowsApi;
use super::endpoint::{HttpMethod, PreparedRequest, TvEndpoint};
use super::meta::MetaPool;
use super::params::{RatingBody, TvOptions};
use super::transport::LocalTransport;

/// TMDB v3 TV show client.
///
/// Holds a snapshot of the meta pool and a transport. Stateless per call:
/// two calls with the same arguments produce the same request.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TvShows<T> {
    transport: T,
    meta: MetaPool,
}

impl<T> TvShows<T> {
    /// Creates a client over `transport` with default parameters from `meta`.
    #[must_use]
    pub fn new(transport: T, meta: &MetaPool) -> Self {
        Self {
            transport,
            meta: meta.clone(),
        }
    }

    /// Meta pool used for default parameters.
    #[must_use]
    pub const fn meta(&self) -> &MetaPool {
        &self.meta
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the request `endpoint` would send, without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if `tv_id` does not match the endpoint scope or the
    /// body cannot be encoded.
    pub fn prepare(
        &self,
        endpoint: TvEndpoint,
        tv_id: Option<u64>,
        options: &TvOptions,
        body: Option<&RatingBody>,
    ) -> Result<PreparedRequest> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .context("failed to encode request body")?;
        endpoint.prepare(&self.meta, tv_id, options, body)
    }
}

impl<T: LocalTransport> TvShows<T> {
    /// Prepares and sends the request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be prepared, or the transport's
    /// error unchanged.
    #[instrument(skip_all, fields(operation = %endpoint))]
    pub async fn call(
        &self,
        endpoint: TvEndpoint,
        tv_id: Option<u64>,
        options: &TvOptions,
        body: Option<&RatingBody>,
    ) -> Result<Value> {
        let request = self.prepare(endpoint, tv_id, options, body)?;
        self.send(&request).await
    }

    /// Hands a prepared request to the transport: reads go through `get_v3`,
    /// writes (including `DELETE`) through `post_v3`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn send(&self, request: &PreparedRequest) -> Result<Value> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            params = request.query.len(),
            "dispatching TV request"
        );
        match request.method {
            HttpMethod::Get => self.transport.get_v3(&request.path, &request.query).await,
            method => {
                let empty = Value::Object(serde_json::Map::new());
                let body = request.body.as_ref().unwrap_or(&empty);
                self.transport
                    .post_v3(&request.path, &request.query, body, method)
                    .await
            }
        }
    }
}

impl<T: LocalTransport> LocalTvShowsApi for TvShows<T> {
    async fn get_tv_show(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Details, Some(tv_id), options, None).await
    }

    async fn get_tv_show_account_states(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::AccountStates, Some(tv_id), options, None).await
    }

    async fn get_tv_show_alternative_titles(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value> {
        self.call(TvEndpoint::AlternativeTitles, Some(tv_id), options, None).await
    }

    async fn get_tv_show_changes(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Changes, Some(tv_id), options, None).await
    }

    async fn get_tv_show_content_ratings(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value> {
        self.call(TvEndpoint::ContentRatings, Some(tv_id), options, None).await
    }

    async fn get_tv_show_credits(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Credits, Some(tv_id), options, None).await
    }

    async fn get_tv_show_episode_groups(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::EpisodeGroups, Some(tv_id), options, None).await
    }

    async fn get_tv_show_external_ids(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::ExternalIds, Some(tv_id), options, None).await
    }

    async fn get_tv_show_images(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Images, Some(tv_id), options, None).await
    }

    async fn get_tv_show_keywords(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Keywords, Some(tv_id), options, None).await
    }

    async fn get_tv_show_recommendations(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value> {
        self.call(TvEndpoint::Recommendations, Some(tv_id), options, None).await
    }

    async fn get_tv_show_reviews(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Reviews, Some(tv_id), options, None).await
    }

    async fn get_tv_show_screened_theatrically(
        &self,
        tv_id: u64,
        options: &TvOptions,
    ) -> Result<Value> {
        self.call(TvEndpoint::ScreenedTheatrically, Some(tv_id), options, None).await
    }

    async fn get_tv_show_similar(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Similar, Some(tv_id), options, None).await
    }

    async fn get_tv_show_translations(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Translations, Some(tv_id), options, None).await
    }

    async fn get_tv_show_videos(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Videos, Some(tv_id), options, None).await
    }

    async fn rate_tv_show(
        &self,
        tv_id: u64,
        options: &TvOptions,
        body: &RatingBody,
    ) -> Result<Value> {
        self.call(TvEndpoint::Rate, Some(tv_id), options, Some(body)).await
    }

    async fn delete_tv_show_rating(&self, tv_id: u64, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::DeleteRating, Some(tv_id), options, None).await
    }

    async fn get_latest_tv_show(&self, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Latest, None, options, None).await
    }

    async fn get_airing_today_tv_shows(&self, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::AiringToday, None, options, None).await
    }

    async fn get_on_the_air_tv_shows(&self, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::OnTheAir, None, options, None).await
    }

    async fn get_popular_tv_shows(&self, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::Popular, None, options, None).await
    }

    async fn get_top_rated_tv_shows(&self, options: &TvOptions) -> Result<Value> {
        self.call(TvEndpoint::TopRated, None, options, None).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use anyhow::bail;
    use serde_json::json;

    use super::*;
    use crate::tmdb::params::QueryParams;

    /// A request as seen by the transport.
    #[derive(Debug, Clone, PartialEq)]
    struct Recorded {
        method: HttpMethod,
        path: String,
        query: Vec<(String, String)>,
        body: Option<Value>,
    }

    /// Transport that records every call and answers `{"ok": true}`.
    #[derive(Debug, Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<Recorded>>,
    }

    impl RecordingTransport {
        fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }

        fn last(&self) -> Recorded {
            self.calls().last().cloned().unwrap()
        }
    }

    impl LocalTransport for RecordingTransport {
        async fn get_v3(&self, path: &str, query: &QueryParams) -> Result<Value> {
            self.calls.lock().unwrap().push(Recorded {
                method: HttpMethod::Get,
                path: String::from(path),
                query: query.as_pairs().to_vec(),
                body: None,
            });
            Ok(json!({ "ok": true }))
        }

        async fn post_v3(
            &self,
            path: &str,
            query: &QueryParams,
            body: &Value,
            method: HttpMethod,
        ) -> Result<Value> {
            self.calls.lock().unwrap().push(Recorded {
                method,
                path: String::from(path),
                query: query.as_pairs().to_vec(),
                body: Some(body.clone()),
            });
            Ok(json!({ "ok": true }))
        }
    }

    /// Transport that always fails.
    #[derive(Debug)]
    struct FailingTransport;

    impl LocalTransport for FailingTransport {
        async fn get_v3(&self, path: &str, _query: &QueryParams) -> Result<Value> {
            bail!("TMDB API error (HTTP 404 Not Found): {path}")
        }

        async fn post_v3(
            &self,
            path: &str,
            _query: &QueryParams,
            _body: &Value,
            _method: HttpMethod,
        ) -> Result<Value> {
            bail!("TMDB API error (HTTP 401 Unauthorized): {path}")
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    fn client(pool: &MetaPool) -> TvShows<RecordingTransport> {
        TvShows::new(RecordingTransport::default(), pool)
    }

    #[tokio::test]
    async fn test_rate_tv_show_posts_body() {
        // Arrange
        let tv = client(&MetaPool::new().api_key("pool-key"));
        let options = TvOptions::new().api_key("k");

        // Act
        let response = tv
            .rate_tv_show(123, &options, &RatingBody::new(7.5))
            .await
            .unwrap();

        // Assert
        assert_eq!(response, json!({ "ok": true }));
        assert_eq!(
            tv.transport().last(),
            Recorded {
                method: HttpMethod::Post,
                path: String::from("tv/123/rating"),
                query: pairs(&[("api_key", "k")]),
                body: Some(json!({ "value": 7.5 })),
            }
        );
    }

    #[tokio::test]
    async fn test_delete_tv_show_rating_uses_delete_with_empty_body() {
        // Arrange
        let tv = client(&MetaPool::new());
        let options = TvOptions::new().api_key("k");

        // Act
        tv.delete_tv_show_rating(123, &options).await.unwrap();

        // Assert
        assert_eq!(
            tv.transport().last(),
            Recorded {
                method: HttpMethod::Delete,
                path: String::from("tv/123/rating"),
                query: pairs(&[("api_key", "k")]),
                body: Some(json!({})),
            }
        );
    }

    #[tokio::test]
    async fn test_rating_uses_session_keys_from_pool() {
        // Arrange
        let pool = MetaPool::new()
            .api_key("pool-key")
            .language("en-US")
            .session_id("sess")
            .guest_session_id("guest");
        let tv = client(&pool);

        // Act
        tv.rate_tv_show(1, &TvOptions::new(), &RatingBody::new(10.0))
            .await
            .unwrap();

        // Assert
        assert_eq!(
            tv.transport().last().query,
            pairs(&[
                ("api_key", "pool-key"),
                ("session_id", "sess"),
                ("guest_session_id", "guest"),
            ])
        );
    }

    #[tokio::test]
    async fn test_get_tv_show_images_overrides_language() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").language("en-US");
        let tv = client(&pool);
        let options = TvOptions::new()
            .language("fr")
            .include_image_language("en,null");

        // Act
        tv.get_tv_show_images(55, &options).await.unwrap();

        // Assert
        let call = tv.transport().last();
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.path, "tv/55/images");
        assert_eq!(call.body, None);
        assert_eq!(
            call.query,
            pairs(&[
                ("api_key", "pool-key"),
                ("language", "fr"),
                ("include_image_language", "en,null"),
            ])
        );
    }

    #[tokio::test]
    async fn test_get_popular_tv_shows_with_page() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").language("en-US").page(7);
        let tv = client(&pool);
        let options = TvOptions::new().api_key("k").page(2);

        // Act
        tv.get_popular_tv_shows(&options).await.unwrap();

        // Assert
        let call = tv.transport().last();
        assert_eq!(call.path, "tv/popular");
        assert_eq!(
            call.query,
            pairs(&[("api_key", "k"), ("language", "en-US"), ("page", "2")])
        );
    }

    #[tokio::test]
    async fn test_get_popular_tv_shows_without_pool_language() {
        // Arrange
        let tv = client(&MetaPool::new());
        let options = TvOptions::new().api_key("k").page(2);

        // Act
        tv.get_popular_tv_shows(&options).await.unwrap();

        // Assert
        assert_eq!(
            tv.transport().last().query,
            pairs(&[("api_key", "k"), ("page", "2")])
        );
    }

    #[tokio::test]
    async fn test_pool_page_is_not_injected() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").page(3);
        let tv = client(&pool);

        // Act
        tv.get_top_rated_tv_shows(&TvOptions::new()).await.unwrap();

        // Assert
        assert_eq!(
            tv.transport().last().query,
            pairs(&[("api_key", "pool-key")])
        );
    }

    #[tokio::test]
    async fn test_get_tv_show_passes_append_to_response() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").session_id("sess");
        let tv = client(&pool);
        let options = TvOptions::new().append_to_response("credits,images");

        // Act
        tv.get_tv_show(1399, &options).await.unwrap();

        // Assert
        let call = tv.transport().last();
        assert_eq!(call.path, "tv/1399");
        assert_eq!(
            call.query,
            pairs(&[
                ("api_key", "pool-key"),
                ("session_id", "sess"),
                ("append_to_response", "credits,images"),
            ])
        );
    }

    #[tokio::test]
    async fn test_get_tv_show_changes_date_range() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").language("en-US");
        let tv = client(&pool);
        let options = TvOptions::new()
            .start_date("2024-01-01")
            .end_date("2024-01-14");

        // Act
        tv.get_tv_show_changes(1399, &options).await.unwrap();

        // Assert
        assert_eq!(
            tv.transport().last().query,
            pairs(&[
                ("api_key", "pool-key"),
                ("start_date", "2024-01-01"),
                ("end_date", "2024-01-14"),
            ])
        );
    }

    #[tokio::test]
    async fn test_repeat_calls_produce_identical_requests() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").language("en-US");
        let tv = client(&pool);
        let options = TvOptions::new().page(4);

        // Act
        tv.get_tv_show_similar(42, &options).await.unwrap();
        tv.get_tv_show_similar(42, &options).await.unwrap();

        // Assert
        let calls = tv.transport().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_every_operation_hits_its_catalogue_entry() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key");
        let tv = client(&pool);
        let o = TvOptions::new();
        let id = 77;

        // Act
        tv.get_tv_show(id, &o).await.unwrap();
        tv.get_tv_show_account_states(id, &o).await.unwrap();
        tv.get_tv_show_alternative_titles(id, &o).await.unwrap();
        tv.get_tv_show_changes(id, &o).await.unwrap();
        tv.get_tv_show_content_ratings(id, &o).await.unwrap();
        tv.get_tv_show_credits(id, &o).await.unwrap();
        tv.get_tv_show_episode_groups(id, &o).await.unwrap();
        tv.get_tv_show_external_ids(id, &o).await.unwrap();
        tv.get_tv_show_images(id, &o).await.unwrap();
        tv.get_tv_show_keywords(id, &o).await.unwrap();
        tv.get_tv_show_recommendations(id, &o).await.unwrap();
        tv.get_tv_show_reviews(id, &o).await.unwrap();
        tv.get_tv_show_screened_theatrically(id, &o).await.unwrap();
        tv.get_tv_show_similar(id, &o).await.unwrap();
        tv.get_tv_show_translations(id, &o).await.unwrap();
        tv.get_tv_show_videos(id, &o).await.unwrap();
        tv.rate_tv_show(id, &o, &RatingBody::new(8.0)).await.unwrap();
        tv.delete_tv_show_rating(id, &o).await.unwrap();
        tv.get_latest_tv_show(&o).await.unwrap();
        tv.get_airing_today_tv_shows(&o).await.unwrap();
        tv.get_on_the_air_tv_shows(&o).await.unwrap();
        tv.get_popular_tv_shows(&o).await.unwrap();
        tv.get_top_rated_tv_shows(&o).await.unwrap();

        // Assert
        let calls = tv.transport().calls();
        assert_eq!(calls.len(), TvEndpoint::ALL.len());
        for (call, endpoint) in calls.iter().zip(TvEndpoint::ALL) {
            let expected_path = if endpoint.is_show_scoped() {
                endpoint.path(Some(id)).unwrap()
            } else {
                endpoint.path(None).unwrap()
            };
            assert_eq!(call.path, expected_path, "{endpoint}");
            assert_eq!(call.method, endpoint.method(), "{endpoint}");
            assert_eq!(call.query, pairs(&[("api_key", "pool-key")]), "{endpoint}");
            assert_eq!(
                call.body.is_some(),
                endpoint.method() != HttpMethod::Get,
                "{endpoint}"
            );
        }
    }

    #[tokio::test]
    async fn test_call_by_endpoint_matches_typed_method() {
        // Arrange
        let pool = MetaPool::new().api_key("pool-key").language("en-US");
        let tv = client(&pool);
        let options = TvOptions::new().language("ja-JP");

        // Act
        tv.get_tv_show_credits(10, &options).await.unwrap();
        tv.call(TvEndpoint::Credits, Some(10), &options, None)
            .await
            .unwrap();

        // Assert
        let calls = tv.transport().calls();
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_call_rejects_missing_id_without_sending() {
        // Arrange
        let tv = client(&MetaPool::new());

        // Act
        let result = tv
            .call(TvEndpoint::Videos, None, &TvOptions::new(), None).await;

        // Assert
        assert!(result.is_err());
        assert!(tv.transport().calls().is_empty());
    }

    #[test]
    fn test_prepare_does_not_send() {
        // Arrange
        let tv = client(&MetaPool::new().api_key("pool-key"));

        // Act
        let request = tv
            .prepare(
                TvEndpoint::Rate,
                Some(9),
                &TvOptions::new(),
                Some(&RatingBody::new(0.5)),
            )
            .unwrap();

        // Assert
        assert_eq!(request.path, "tv/9/rating");
        assert_eq!(request.body, Some(json!({ "value": 0.5 })));
        assert!(tv.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        // Arrange
        let tv = TvShows::new(FailingTransport, &MetaPool::new());

        // Act
        let read = tv.get_tv_show(404, &TvOptions::new()).await;
        let write = tv.delete_tv_show_rating(404, &TvOptions::new()).await;

        // Assert
        assert_eq!(
            read.unwrap_err().to_string(),
            "TMDB API error (HTTP 404 Not Found): tv/404"
        );
        assert_eq!(
            write.unwrap_err().to_string(),
            "TMDB API error (HTTP 401 Unauthorized): tv/404/rating"
        );
    }

    #[test]
    fn test_send_logs_dispatch() {
        use tracing_mock::{expect, subscriber};

        // Arrange
        let tv = client(&MetaPool::new().api_key("pool-key"));
        let request = tv
            .prepare(TvEndpoint::Keywords, Some(3), &TvOptions::new(), None)
            .unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(tracing::Level::DEBUG)
                    .with_fields(expect::msg("dispatching TV request")),
            )
            .only()
            .run_with_handle();

        // Act
        tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(tv.send(&request)).unwrap();
        });

        // Assert
        handle.assert_finished();
        assert_eq!(tv.transport().last().path, "tv/3/keywords");
    }

    #[test]
    fn test_new_snapshots_meta_pool() {
        // Arrange
        let mut pool = MetaPool::new().api_key("first");
        let tv = client(&pool);

        // Act
        pool.api_key = Some(String::from("second"));

        // Assert
        assert_eq!(tv.meta().api_key.as_deref(), Some("first"));
    }

    #[test]
    fn test_http_client_can_be_shared_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<TvShows<crate::tmdb::TmdbClient>>();
    }
}
