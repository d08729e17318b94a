use std::time::Duration;

use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
};

/// Default pause between two relayed historical messages (ms).
pub const DEFAULT_RELAY_DELAY_MS: u64 = 1000;

/// Top-level relay configuration.
///
/// Loaded once at startup; after [`crate::validate`] succeeds every required
/// field is populated and the value is never mutated again.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Discord bot token.
    pub token: Secret<String>,

    /// Channel that receives every forwarded or re-sent message.
    pub destination_channel: u64,

    /// Channels whose live messages are mirrored, in configuration order.
    pub source_channels: Vec<u64>,

    /// The only user allowed to run `!resend_channel`.
    pub admin_user_id: u64,

    /// Log one line per inbound event and per forwarded message.
    pub verbose: bool,

    /// Pause after each re-sent historical message (ms).
    pub relay_delay_ms: u64,
}

impl RelayConfig {
    #[must_use]
    pub fn relay_delay(&self) -> Duration {
        Duration::from_millis(self.relay_delay_ms)
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("token", &"[REDACTED]")
            .field("destination_channel", &self.destination_channel)
            .field("source_channels", &self.source_channels)
            .field("admin_user_id", &self.admin_user_id)
            .field("verbose", &self.verbose)
            .field("relay_delay_ms", &self.relay_delay_ms)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            destination_channel: 0,
            source_channels: Vec::new(),
            admin_user_id: 0,
            verbose: false,
            relay_delay_ms: DEFAULT_RELAY_DELAY_MS,
        }
    }
}
