//! `TmdbClient` - reqwest-backed `Transport` for the TMDB v3 API.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::endpoint::HttpMethod;
use super::params::QueryParams;
use super::transport::LocalTransport;

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Error document returned by TMDB on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB status code (not the HTTP status).
    pub status_code: u32,
    /// Human readable message.
    pub status_message: String,
    /// Always `false` for errors.
    #[serde(default)]
    pub success: bool,
}

/// TMDB API HTTP client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Optional v4 read access token.
    bearer_token: Option<String>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    bearer_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a bearer token, sent as `Authorization: Bearer <token>`.
    ///
    /// Optional: v3 requests usually authenticate with the `api_key` query
    /// parameter from the meta pool.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a total request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        // `Url::join` replaces the last segment unless the path ends in `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            bearer_token: self.bearer_token,
        })
    }
}

/// Maps the endpoint method onto reqwest's.
const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends one request and decodes the JSON response. No retries.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut builder = self
            .http_client
            .request(to_reqwest_method(method), url)
            .query(query.as_pairs());
        if let Some(ref token) = self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(%method, path = request.url().path(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let raw_result: std::result::Result<Value, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalTransport for TmdbClient {
    async fn get_v3(&self, path: &str, query: &QueryParams) -> Result<Value> {
        self.send_json(HttpMethod::Get, path, query, None).await
    }

    async fn post_v3(
        &self,
        path: &str,
        query: &QueryParams,
        body: &Value,
        method: HttpMethod,
    ) -> Result<Value> {
        if method == HttpMethod::Get {
            bail!("post_v3 does not send GET requests: {path}");
        }
        self.send_json(method, path, query, Some(body)).await
    }
}
