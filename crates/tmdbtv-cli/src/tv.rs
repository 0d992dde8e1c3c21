//! `tv` subcommand helpers: argument checks, dispatch and output.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tmdbtv_api::tmdb::{HttpMethod, LocalTvShowsApi, TvEndpoint, TvOptions};

/// Checks that `operation` is a read operation and that `--id` is given
/// exactly when the operation is show-scoped.
///
/// # Errors
///
/// Returns an error describing the mismatch.
pub fn validate_get(operation: TvEndpoint, id: Option<u64>) -> Result<()> {
    if operation.method() != HttpMethod::Get {
        bail!(
            "{} is not a read operation; use `tv rate` or `tv delete-rating`",
            operation.slug()
        );
    }
    match (operation.is_show_scoped(), id) {
        (true, None) => bail!("--id is required for {}", operation.slug()),
        (false, Some(_)) => bail!("--id is not accepted by {}", operation.slug()),
        _ => Ok(()),
    }
}

/// Calls the read operation named by `operation`.
///
/// # Errors
///
/// Returns an error if `--id` is missing for a show-scoped operation,
/// `operation` is a write operation, or the API call fails.
pub async fn dispatch_get<A: LocalTvShowsApi>(
    api: &A,
    operation: TvEndpoint,
    id: Option<u64>,
    options: &TvOptions,
) -> Result<Value> {
    let tv_id = || id.with_context(|| format!("--id is required for {}", operation.slug()));
    match operation {
        TvEndpoint::Details => api.get_tv_show(tv_id()?, options).await,
        TvEndpoint::AccountStates => api.get_tv_show_account_states(tv_id()?, options).await,
        TvEndpoint::AlternativeTitles => {
            api.get_tv_show_alternative_titles(tv_id()?, options).await
        }
        TvEndpoint::Changes => api.get_tv_show_changes(tv_id()?, options).await,
        TvEndpoint::ContentRatings => api.get_tv_show_content_ratings(tv_id()?, options).await,
        TvEndpoint::Credits => api.get_tv_show_credits(tv_id()?, options).await,
        TvEndpoint::EpisodeGroups => api.get_tv_show_episode_groups(tv_id()?, options).await,
        TvEndpoint::ExternalIds => api.get_tv_show_external_ids(tv_id()?, options).await,
        TvEndpoint::Images => api.get_tv_show_images(tv_id()?, options).await,
        TvEndpoint::Keywords => api.get_tv_show_keywords(tv_id()?, options).await,
        TvEndpoint::Recommendations => api.get_tv_show_recommendations(tv_id()?, options).await,
        TvEndpoint::Reviews => api.get_tv_show_reviews(tv_id()?, options).await,
        TvEndpoint::ScreenedTheatrically => {
            api.get_tv_show_screened_theatrically(tv_id()?, options).await
        }
        TvEndpoint::Similar => api.get_tv_show_similar(tv_id()?, options).await,
        TvEndpoint::Translations => api.get_tv_show_translations(tv_id()?, options).await,
        TvEndpoint::Videos => api.get_tv_show_videos(tv_id()?, options).await,
        TvEndpoint::Latest => api.get_latest_tv_show(options).await,
        TvEndpoint::AiringToday => api.get_airing_today_tv_shows(options).await,
        TvEndpoint::OnTheAir => api.get_on_the_air_tv_shows(options).await,
        TvEndpoint::Popular => api.get_popular_tv_shows(options).await,
        TvEndpoint::TopRated => api.get_top_rated_tv_shows(options).await,
        TvEndpoint::Rate | TvEndpoint::DeleteRating => {
            bail!("{} is not a read operation", operation.slug())
        }
    }
}

/// Emits a response as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn log_response(response: &Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(response).context("failed to format response")?;
    tracing::info!("{}", pretty);
    Ok(())
}

/// Emits the endpoint catalogue, one line per operation.
pub fn log_operations() {
    tracing::info!("Operation\t\t\tMethod\tPath\t\t\t\tMeta keys");
    for endpoint in TvEndpoint::ALL {
        let keys: Vec<&str> = endpoint.meta_keys().iter().map(|k| k.as_str()).collect();
        tracing::info!(
            "{}\t\t{}\t{}\t\t{}",
            endpoint.slug(),
            endpoint.method(),
            endpoint.path_template(),
            keys.join(","),
        );
    }
    tracing::info!("Total: {} operations", TvEndpoint::ALL.len());
}
