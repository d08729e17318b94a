//! Required-field validation.
//!
//! A relay without a token, destination, sources or admin cannot do anything
//! useful, so each missing field is reported and startup is aborted.

use crate::{Error, Result, schema::RelayConfig};

/// Names of required fields that are not populated, in a stable order.
#[must_use]
pub fn missing_fields(config: &RelayConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if !config.has_token() {
        missing.push("token");
    }
    if config.destination_channel == 0 {
        missing.push("destination_channel");
    }
    if config.source_channels.is_empty() {
        missing.push("source_channels");
    }
    if config.admin_user_id == 0 {
        missing.push("admin_user_id");
    }
    missing
}

/// Fail with [`Error::Missing`] when any required field is unset.
pub fn validate(config: &RelayConfig) -> Result<()> {
    let fields = missing_fields(config);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(Error::Missing { fields })
    }
}
