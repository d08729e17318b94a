//! Configuration loading, env substitution, env overrides and validation.
//!
//! Config files: `d2d.toml`, `d2d.yaml`, `d2d.yml` or `d2d.json`,
//! searched in `./` then `~/.config/d2d/`.
//!
//! Supports `${ENV_VAR}` substitution in the raw file text, and the legacy
//! `DISCORD_TOKEN` / `TO_CHANNEL_ID` / `FROM_CHANNEL_IDS` / `VERBOSE` /
//! `AUTHORIZED_ADMIN_USER_ID` environment variables on top of the file.

pub mod env_overrides;
pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{config_dir, find_config_file, load, load_config},
    schema::RelayConfig,
    validate::validate,
};
