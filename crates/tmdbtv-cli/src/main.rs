//! tmdbtv - TMDB TV show metadata CLI.

/// Application configuration (TOML).
mod config;
/// `tv` subcommand helpers.
mod tv;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tmdbtv_api::tmdb::{
    LocalTvShowsApi, RatingBody, TmdbClient, TvEndpoint, TvOptions, TvShows,
};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, mask_secret, resolve_config_path};
use crate::tv::{dispatch_get, log_operations, log_response, validate_get};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query TMDB TV show endpoints.
    Tv(TvCommand),
    /// Show or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvCommand {
    /// Tv subcommand to run.
    #[command(subcommand)]
    command: TvSubcommands,
}

/// Available TV subcommands.
#[derive(Subcommand)]
enum TvSubcommands {
    /// Run a read operation (see `tv operations`).
    Get(TvGetArgs),
    /// Rate a TV show.
    Rate(TvRateArgs),
    /// Remove your rating for a TV show.
    DeleteRating(TvDeleteRatingArgs),
    /// List the supported operations.
    Operations,
}

/// Session-related request options.
#[derive(clap::Args)]
struct SessionArgs {
    /// Session ID (overrides config).
    #[arg(long)]
    session_id: Option<String>,
    /// Guest session ID (overrides config).
    #[arg(long)]
    guest_session_id: Option<String>,
    /// Extra query parameter as `key=value` (repeatable).
    #[arg(long = "param", value_parser = parse_key_val)]
    params: Vec<(String, String)>,
}

impl SessionArgs {
    /// Applies the session options on top of `options`.
    fn apply(&self, mut options: TvOptions) -> TvOptions {
        if let Some(ref id) = self.session_id {
            options = options.session_id(id);
        }
        if let Some(ref id) = self.guest_session_id {
            options = options.guest_session_id(id);
        }
        for (key, value) in &self.params {
            options = options.param(key, value);
        }
        options
    }
}

/// Arguments for the `tv get` subcommand.
#[derive(clap::Args)]
struct TvGetArgs {
    /// Operation name (e.g. "details", "credits", "popular").
    operation: TvEndpoint,
    /// TMDB series ID (required for show-scoped operations).
    #[arg(long)]
    id: Option<u64>,
    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
    /// Page number.
    #[arg(long)]
    page: Option<u32>,
    /// Image languages, e.g. "en,null" (images only).
    #[arg(long)]
    include_image_language: Option<String>,
    /// Sub-requests to append, e.g. "credits,images" (details only).
    #[arg(long)]
    append_to_response: Option<String>,
    /// Start date, YYYY-MM-DD (changes only).
    #[arg(long)]
    start_date: Option<String>,
    /// End date, YYYY-MM-DD (changes only).
    #[arg(long)]
    end_date: Option<String>,
    /// Session options.
    #[command(flatten)]
    session: SessionArgs,
}

impl TvGetArgs {
    /// Builds the per-call options.
    fn to_options(&self) -> TvOptions {
        let mut options = TvOptions::new();
        options.language.clone_from(&self.language);
        options.page = self.page;
        options
            .include_image_language
            .clone_from(&self.include_image_language);
        options
            .append_to_response
            .clone_from(&self.append_to_response);
        options.start_date.clone_from(&self.start_date);
        options.end_date.clone_from(&self.end_date);
        self.session.apply(options)
    }
}

/// Arguments for the `tv rate` subcommand.
#[derive(clap::Args)]
struct TvRateArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Rating value (0.5 to 10.0).
    #[arg(long, required = true)]
    value: f64,
    /// Session options.
    #[command(flatten)]
    session: SessionArgs,
}

/// Arguments for the `tv delete-rating` subcommand.
#[derive(clap::Args)]
struct TvDeleteRatingArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Session options.
    #[command(flatten)]
    session: SessionArgs,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration (secrets masked).
    Show,
    /// Update values in the config file.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// TMDB v3 API key.
    #[arg(long)]
    api_key: Option<String>,
    /// TMDB v4 read access token.
    #[arg(long)]
    bearer_token: Option<String>,
    /// Default response language.
    #[arg(long)]
    language: Option<String>,
    /// Session ID.
    #[arg(long)]
    session_id: Option<String>,
    /// Guest session ID.
    #[arg(long)]
    guest_session_id: Option<String>,
    /// Default image languages.
    #[arg(long)]
    include_image_language: Option<String>,
    /// Base URL override.
    #[arg(long)]
    base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Parses a `key=value` pair.
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got: {s}"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name: {s}"));
    }
    Ok((String::from(key), String::from(value)))
}

/// Loads `[tmdb]` settings from the config file and environment.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_tmdb_config(dir: Option<&PathBuf>) -> Result<TmdbConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok(config.tmdb.with_env_overrides(
        std::env::var("TMDB_API_KEY").ok(),
        std::env::var("TMDB_API_TOKEN").ok(),
    ))
}

/// Builds a `TvShows` client from config and environment.
///
/// A missing API key is not an error here; TMDB rejects the request instead.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the base URL is invalid,
/// or the HTTP client fails to build.
fn build_tv_client(dir: Option<&PathBuf>) -> Result<TvShows<TmdbClient>> {
    let config = load_tmdb_config(dir)?;
    if config.api_key.is_none() && config.bearer_token.is_none() {
        tracing::warn!(
            "No TMDB credentials configured (set TMDB_API_KEY or run `config set --api-key`)"
        );
    }

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref base_url) = config.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref token) = config.bearer_token {
        builder = builder.bearer_token(token);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("failed to build TMDB client")?;

    Ok(TvShows::new(client, &config.to_meta_pool()))
}

/// Runs the `tv get` subcommand.
///
/// # Errors
///
/// Returns an error if the arguments do not fit the operation, the client
/// fails to build, or the API request fails.
#[instrument(skip_all)]
async fn run_tv_get(args: &TvGetArgs, dir: Option<&PathBuf>) -> Result<()> {
    validate_get(args.operation, args.id)?;
    let client = build_tv_client(dir)?;

    let response = dispatch_get(&client, args.operation, args.id, &args.to_options())
        .await
        .with_context(|| format!("TMDB {} request failed", args.operation.path_template()))?;

    log_response(&response)
}

/// Runs the `tv rate` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv_rate(args: &TvRateArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tv_client(dir)?;
    let options = args.session.apply(TvOptions::new());

    let response = client
        .rate_tv_show(args.id, &options, &RatingBody::new(args.value))
        .await
        .context("TMDB tv rating request failed")?;

    log_response(&response)
}

/// Runs the `tv delete-rating` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv_delete_rating(args: &TvDeleteRatingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tv_client(dir)?;
    let options = args.session.apply(TvOptions::new());

    let response = client
        .delete_tv_show_rating(args.id, &options)
        .await
        .context("TMDB tv rating delete request failed")?;

    log_response(&response)
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = load_tmdb_config(dir)?;
    let show = |value: Option<&str>| String::from(value.unwrap_or("-"));

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!(
        "api_key: {}",
        config
            .api_key
            .as_deref()
            .map_or_else(|| String::from("-"), mask_secret)
    );
    tracing::info!(
        "bearer_token: {}",
        config
            .bearer_token
            .as_deref()
            .map_or_else(|| String::from("-"), mask_secret)
    );
    tracing::info!("language: {}", show(config.language.as_deref()));
    tracing::info!("session_id: {}", show(config.session_id.as_deref()));
    tracing::info!(
        "guest_session_id: {}",
        show(config.guest_session_id.as_deref())
    );
    tracing::info!(
        "include_image_language: {}",
        show(config.include_image_language.as_deref())
    );
    tracing::info!("base_url: {}", show(config.base_url.as_deref()));
    tracing::info!(
        "timeout_secs: {}",
        config
            .timeout_secs
            .map_or_else(|| String::from("-"), |t| t.to_string())
    );

    Ok(())
}

/// Runs the `config set` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
fn run_config_set(args: ConfigSetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    let tmdb = &mut config.tmdb;
    let updates = [
        (&mut tmdb.api_key, args.api_key),
        (&mut tmdb.bearer_token, args.bearer_token),
        (&mut tmdb.language, args.language),
        (&mut tmdb.session_id, args.session_id),
        (&mut tmdb.guest_session_id, args.guest_session_id),
        (&mut tmdb.include_image_language, args.include_image_language),
        (&mut tmdb.base_url, args.base_url),
    ];
    for (slot, value) in updates {
        if value.is_some() {
            *slot = value;
        }
    }
    if args.timeout_secs.is_some() {
        tmdb.timeout_secs = args.timeout_secs;
    }

    config
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Saved config to {}", config_path.display());

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Tv(tv) => match tv.command {
            TvSubcommands::Get(args) => run_tv_get(&args, cli.dir.as_ref()).await,
            TvSubcommands::Rate(args) => run_tv_rate(&args, cli.dir.as_ref()).await,
            TvSubcommands::DeleteRating(args) => {
                run_tv_delete_rating(&args, cli.dir.as_ref()).await
            }
            TvSubcommands::Operations => {
                log_operations();
                Ok(())
            }
        },
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
            ConfigSubcommands::Set(args) => run_config_set(args, cli.dir.as_ref()),
        },
    }
}
