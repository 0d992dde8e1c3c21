//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory under the config root.
const APP_DIR: &str = "tmdbtv";
/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path from `--dir` and the environment.
///
/// Lookup order: `{dir}/config.toml`, `$XDG_CONFIG_HOME/tmdbtv/config.toml`,
/// `$HOME/.config/tmdbtv/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// Environment-free core of [`resolve_config_path`].
///
/// Empty or relative `XDG_CONFIG_HOME` values are ignored, as the XDG base
/// directory rules require.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }
    let root = match (xdg_config_home.filter(|p| p.is_absolute()), home) {
        (Some(xdg), _) => xdg,
        (None, Some(home)) if !home.as_os_str().is_empty() => home.join(".config"),
        _ => bail!("cannot locate config directory: set HOME or pass --dir"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}
