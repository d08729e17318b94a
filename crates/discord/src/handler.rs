//! Discord event handler for serenity.
//!
//! Implements the EventHandler trait to build the relay on `ready` and feed
//! every message event to the dispatcher.

use std::sync::{Arc, OnceLock};

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, Message, Ready},
        async_trait,
    },
    tracing::{debug, info},
};

use {
    d2d_channels::{ChannelRegistry, Dispatcher},
    d2d_config::RelayConfig,
};

use crate::platform::{DiscordPlatform, relay_message};

/// Handler for Discord gateway events.
pub struct RelayHandler {
    config: Arc<RelayConfig>,
    /// Set once, on the first `ready`; reconnects keep the original registry.
    dispatcher: OnceLock<Dispatcher>,
}

impl RelayHandler {
    pub fn new(config: Arc<RelayConfig>) -> Self {
        Self {
            config,
            dispatcher: OnceLock::new(),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for RelayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            bot_id = %ready.user.id,
            admin_user_id = self.config.admin_user_id,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );

        if self.dispatcher.get().is_some() {
            debug!("gateway reconnected, keeping channel registry");
            return;
        }

        info!("resolving configured channels");
        let platform = Arc::new(DiscordPlatform::new(Arc::clone(&ctx.http)));
        let registry = ChannelRegistry::populate(platform.as_ref(), &self.config).await;
        let dispatcher = Dispatcher::new(
            ready.user.id.get(),
            &self.config,
            Arc::new(registry),
            platform,
        );

        if self.dispatcher.set(dispatcher).is_err() {
            debug!("dispatcher already initialised by a concurrent ready event");
        }
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let Some(dispatcher) = self.dispatcher.get() else {
            debug!(channel_id = %msg.channel_id, "message before ready, dropping");
            return;
        };

        dispatcher.on_message(&relay_message(&msg)).await;
    }
}
