use std::collections::HashMap;

use {
    d2d_config::RelayConfig,
    tracing::{error, info, warn},
};

use crate::platform::{ChannelInfo, ChatPlatform};

/// Channels resolved from the configuration at connection-ready time.
///
/// Built once by [`ChannelRegistry::populate`] and read-only afterwards.
/// A channel that could not be resolved is simply absent.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    destination: Option<ChannelInfo>,
    sources: HashMap<u64, ChannelInfo>,
}

impl ChannelRegistry {
    /// Resolve the destination and every configured source through the
    /// platform. Failures are logged and leave the slot empty.
    pub async fn populate(platform: &dyn ChatPlatform, config: &RelayConfig) -> Self {
        let destination = resolve(platform, config.destination_channel).await;
        match &destination {
            Some(channel) => info!(
                channel_id = channel.id,
                name = %channel.name,
                "destination channel found"
            ),
            None => error!(
                channel_id = config.destination_channel,
                "destination channel not found; check the id and that the bot can see it"
            ),
        }

        let mut sources = HashMap::new();
        for &channel_id in &config.source_channels {
            match resolve(platform, channel_id).await {
                Some(channel) => {
                    info!(channel_id, name = %channel.name, "listening on source channel");
                    sources.insert(channel_id, channel);
                },
                None => error!(channel_id, "source channel not found, it will be ignored"),
            }
        }

        let registry = Self {
            destination,
            sources,
        };
        if registry.is_degraded() {
            error!(
                "forwarding degraded: destination or source channels are missing, \
                 fix the configuration and restart"
            );
        } else {
            info!(
                sources = registry.sources.len(),
                "relay running and listening for messages"
            );
        }
        registry
    }

    /// Build a registry from already-resolved channels.
    pub fn from_channels(
        destination: Option<ChannelInfo>,
        sources: impl IntoIterator<Item = ChannelInfo>,
    ) -> Self {
        Self {
            destination,
            sources: sources.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn destination(&self) -> Option<&ChannelInfo> {
        self.destination.as_ref()
    }

    pub fn source(&self, channel_id: u64) -> Option<&ChannelInfo> {
        self.sources.get(&channel_id)
    }

    pub fn is_source(&self, channel_id: u64) -> bool {
        self.sources.contains_key(&channel_id)
    }

    /// Any registered channel, destination included.
    pub fn resolve(&self, channel_id: u64) -> Option<&ChannelInfo> {
        self.destination
            .as_ref()
            .filter(|d| d.id == channel_id)
            .or_else(|| self.source(channel_id))
    }

    /// True when nothing can be forwarded: no destination or no source.
    pub fn is_degraded(&self) -> bool {
        self.destination.is_none() || self.sources.is_empty()
    }
}

async fn resolve(platform: &dyn ChatPlatform, channel_id: u64) -> Option<ChannelInfo> {
    match platform.lookup_channel(channel_id).await {
        Ok(found) => found,
        Err(e) => {
            warn!(channel_id, error = %e, "channel lookup failed");
            None
        },
    }
}
