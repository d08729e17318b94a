use std::path::Path;

use {anyhow::Result, secrecy::ExposeSecret};

use d2d_config::{Error, RelayConfig};

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Load and validate the configuration, print a redacted summary.
pub fn check(config_path: Option<&Path>) -> Result<()> {
    match config_path
        .map(Path::to_path_buf)
        .or_else(d2d_config::find_config_file)
    {
        Some(path) => eprintln!("Checking {}\n", path.display()),
        None => eprintln!("No config file found; checking environment only.\n"),
    }

    match d2d_config::load(config_path) {
        Ok(config) => {
            print_summary(&config);
            eprintln!("\n{GREEN}{BOLD}Configuration OK{RESET}");
            Ok(())
        },
        Err(Error::Missing { fields }) => {
            for field in &fields {
                eprintln!("  {RED}error{RESET}: missing required field {BOLD}{field}{RESET}");
            }
            anyhow::bail!("{} required field(s) missing", fields.len())
        },
        Err(e) => {
            eprintln!("  {RED}error{RESET}: {e}");
            Err(e.into())
        },
    }
}

/// Never includes any part of the token itself.
fn token_summary(config: &RelayConfig) -> String {
    format!(
        "[REDACTED] ({} chars)",
        config.token.expose_secret().chars().count()
    )
}

fn print_summary(config: &RelayConfig) {
    eprintln!("  token:               {}", token_summary(config));
    eprintln!("  destination_channel: {}", config.destination_channel);
    eprintln!(
        "  source_channels:     {}",
        config
            .source_channels
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    eprintln!("  admin_user_id:       {}", config.admin_user_id);
    eprintln!("  verbose:             {}", config.verbose);
    eprintln!("  relay_delay_ms:      {}", config.relay_delay_ms);
}

#[cfg(test)]
mod tests {
    use {super::*, secrecy::Secret};

    #[test]
    fn token_summary_reveals_only_length() {
        let config = RelayConfig {
            token: Secret::new("MTIzNDU2.secret-part".into()),
            ..RelayConfig::default()
        };
        let summary = token_summary(&config);
        assert_eq!(summary, "[REDACTED] (20 chars)");
        assert!(!summary.contains("MTIz"));
    }
}
