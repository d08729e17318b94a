use std::sync::Arc;

use {
    d2d_config::RelayConfig,
    tracing::{debug, error, info},
};

use crate::{
    backfill::BackfillEngine,
    command::is_resend_command,
    forward::ForwardingEngine,
    platform::{ChatPlatform, RelayMessage},
    registry::ChannelRegistry,
};

/// How an inbound message was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sent by the bot itself; dropped to avoid loops.
    OwnMessage,
    /// `!resend_channel` invocation, from any channel.
    Command,
    /// From a registered source channel while the destination is resolved.
    Forward,
    Ignored,
}

/// Entry point for every inbound message event.
pub struct Dispatcher {
    bot_user_id: u64,
    verbose: bool,
    registry: Arc<ChannelRegistry>,
    forwarding: ForwardingEngine,
    backfill: BackfillEngine,
}

impl Dispatcher {
    pub fn new(
        bot_user_id: u64,
        config: &RelayConfig,
        registry: Arc<ChannelRegistry>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            bot_user_id,
            verbose: config.verbose,
            forwarding: ForwardingEngine::new(Arc::clone(&platform), config.verbose),
            backfill: BackfillEngine::new(
                platform,
                Arc::clone(&registry),
                config.admin_user_id,
                config.relay_delay(),
                config.verbose,
            ),
            registry,
        }
    }

    /// Routing decision only, in priority order.
    pub fn classify(&self, message: &RelayMessage) -> Route {
        if message.author.id == self.bot_user_id {
            Route::OwnMessage
        } else if is_resend_command(&message.content) {
            Route::Command
        } else if self.registry.is_source(message.channel_id)
            && self.registry.destination().is_some()
        {
            Route::Forward
        } else {
            Route::Ignored
        }
    }

    /// Classify and handle one inbound message. Never fails: command errors
    /// are replied to, forwarding errors are logged.
    pub async fn on_message(&self, message: &RelayMessage) -> Route {
        let route = self.classify(message);
        if route == Route::OwnMessage {
            return route;
        }

        if self.verbose {
            info!(
                channel = %self.channel_label(message.channel_id),
                author = %message.author.name,
                "message received"
            );
        } else {
            debug!(channel_id = message.channel_id, ?route, "message received");
        }

        match route {
            Route::Command => {
                let outcome = self
                    .backfill
                    .resend(&message.author, &message.content, message.channel_id)
                    .await;
                debug!(?outcome, "resend command finished");
            },
            Route::Forward => self.forward(message).await,
            Route::OwnMessage | Route::Ignored => {},
        }
        route
    }

    async fn forward(&self, message: &RelayMessage) {
        let (Some(source), Some(destination)) = (
            self.registry.source(message.channel_id),
            self.registry.destination(),
        ) else {
            return;
        };

        if let Err(e) = self.forwarding.forward(message, source, destination).await {
            error!(
                message_id = message.id,
                channel_id = message.channel_id,
                error = %e,
                "failed to forward message"
            );
        }
    }

    fn channel_label(&self, channel_id: u64) -> String {
        self.registry
            .resolve(channel_id)
            .map(|c| format!("#{}", c.name))
            .unwrap_or_else(|| channel_id.to_string())
    }
}
