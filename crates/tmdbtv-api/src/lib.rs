//! API client library for tmdbtv.
//!
//! Provides a binding for the TMDB v3 TV show endpoints and a reqwest-based
//! HTTP transport.

/// TMDB TV API client.
pub mod tmdb;
