//! Environment variable overrides applied on top of the config file.
//!
//! These are the variable names older deployments used with a `.env` file,
//! so an existing `.env` keeps working without a config file.

use secrecy::Secret;

use crate::{Error, Result, schema::RelayConfig};

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const DESTINATION_VAR: &str = "TO_CHANNEL_ID";
pub const SOURCES_VAR: &str = "FROM_CHANNEL_IDS";
pub const VERBOSE_VAR: &str = "VERBOSE";
pub const ADMIN_VAR: &str = "AUTHORIZED_ADMIN_USER_ID";
pub const RELAY_DELAY_VAR: &str = "D2D_RELAY_DELAY_MS";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut RelayConfig) -> Result<()> {
    apply_env_overrides_with(config, |name| std::env::var(name).ok())
}

/// Apply overrides using a custom lookup, so tests don't touch the process env.
pub(crate) fn apply_env_overrides_with(
    config: &mut RelayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(token) = var(TOKEN_VAR) {
        config.token = Secret::new(token.trim().to_string());
    }
    if let Some(raw) = var(DESTINATION_VAR) {
        config.destination_channel = parse_id(DESTINATION_VAR, &raw)?;
    }
    if let Some(raw) = var(SOURCES_VAR) {
        config.source_channels = parse_id_list(SOURCES_VAR, &raw)?;
    }
    if let Some(raw) = var(VERBOSE_VAR) {
        config.verbose = parse_flag(&raw);
    }
    if let Some(raw) = var(ADMIN_VAR) {
        config.admin_user_id = parse_id(ADMIN_VAR, &raw)?;
    }
    if let Some(raw) = var(RELAY_DELAY_VAR) {
        config.relay_delay_ms = parse_id(RELAY_DELAY_VAR, &raw)?;
    }
    Ok(())
}

fn parse_id(var: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_env(var, raw))
}

/// Comma-separated ids; blank entries are skipped.
fn parse_id_list(var: &str, raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_id(var, s))
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest, secrecy::ExposeSecret, std::collections::HashMap};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn overrides_every_field() {
        let mut cfg = RelayConfig::default();
        apply_env_overrides_with(
            &mut cfg,
            env(&[
                (TOKEN_VAR, " tok "),
                (DESTINATION_VAR, "100"),
                (SOURCES_VAR, "200, 300,,400 "),
                (VERBOSE_VAR, "True"),
                (ADMIN_VAR, "7"),
                (RELAY_DELAY_VAR, "250"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.token.expose_secret(), "tok");
        assert_eq!(cfg.destination_channel, 100);
        assert_eq!(cfg.source_channels, vec![200, 300, 400]);
        assert!(cfg.verbose);
        assert_eq!(cfg.admin_user_id, 7);
        assert_eq!(cfg.relay_delay_ms, 250);
    }

    #[test]
    fn absent_vars_keep_file_values() {
        let mut cfg = RelayConfig {
            destination_channel: 5,
            source_channels: vec![6],
            ..Default::default()
        };
        apply_env_overrides_with(&mut cfg, env(&[(DESTINATION_VAR, "  ")])).unwrap();
        assert_eq!(cfg.destination_channel, 5);
        assert_eq!(cfg.source_channels, vec![6]);
    }

    #[test]
    fn malformed_id_names_the_variable() {
        let mut cfg = RelayConfig::default();
        let err = apply_env_overrides_with(&mut cfg, env(&[(SOURCES_VAR, "1,abc")])).unwrap_err();
        match err {
            Error::InvalidEnv { var, value } => {
                assert_eq!(var, SOURCES_VAR);
                assert_eq!(value, "abc");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("true", true)]
    #[case("YES", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("nope", false)]
    fn verbose_flag(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(raw), expected);
    }
}
