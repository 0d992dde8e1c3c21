//! `Transport` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;

use super::endpoint::HttpMethod;
use super::params::QueryParams;

/// HTTP transport for TMDB v3 requests.
///
/// Owns base URL resolution, authentication headers, serialization and
/// error mapping. Uses `trait_variant::make` to generate a `Send`-bound
/// async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Sends a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the response status is not
    /// successful, or the body is not valid JSON.
    async fn get_v3(&self, path: &str, query: &QueryParams) -> Result<Value>;

    /// Sends a write request (`POST`, or `DELETE` as a method override) with a
    /// JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the response status is not
    /// successful, or the body is not valid JSON.
    async fn post_v3(
        &self,
        path: &str,
        query: &QueryParams,
        body: &Value,
        method: HttpMethod,
    ) -> Result<Value>;
}
