use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    Error, Result,
    env_overrides::apply_env_overrides,
    env_subst::substitute_env,
    schema::RelayConfig,
    validate::validate,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["d2d.toml", "d2d.yaml", "d2d.yml", "d2d.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<RelayConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover the config file (unless `explicit` is given), apply environment
/// overrides and validate the result.
///
/// With no config file at all the environment alone must supply every
/// required field.
pub fn load(explicit: Option<&Path>) -> Result<RelayConfig> {
    let mut config = match explicit.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        },
        None => {
            debug!("no config file found, using environment only");
            RelayConfig::default()
        },
    };
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Find the first config file in standard locations.
///
/// Search order:
/// 1. `./d2d.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/d2d/d2d.{toml,yaml,yml,json}` (user-global)
pub fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/d2d/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "d2d").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<RelayConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse(path, e)),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
