//! TMDB v3 TV show client module.
//!
//! Maps each TV operation onto one HTTP request: meta pool defaults merged
//! with per-call options, path interpolation, and dispatch to a transport.

mod api;
mod client;
mod endpoint;
mod meta;
mod params;
mod transport;
mod tv;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTvShowsApi, TvShowsApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder, TmdbErrorResponse};
pub use endpoint::{HttpMethod, PreparedRequest, TvEndpoint};
pub use meta::{MetaKey, MetaPool};
pub use params::{QueryParams, RatingBody, TvOptions};
pub use transport::{LocalTransport, Transport};
pub use tv::TvShows;
