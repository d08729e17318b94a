//! Admin-only `!resend_channel` command: replay a channel's history into the
//! destination channel.
//!
//! Every invocation walks `authorize → parse → resolve → announce → relay`
//! and ends in exactly one [`BackfillOutcome`], which is also reported to the
//! invoking channel. Messages relayed before a failure stay delivered.

use std::{sync::Arc, time::Duration};

use {
    futures::StreamExt,
    tracing::{error, info, warn},
};

use crate::{
    Error,
    command::{self, CommandError, ResendRequest},
    format,
    forward::deliver,
    platform::{Author, ChannelInfo, ChatPlatform},
    registry::ChannelRegistry,
};

/// Which side of the relay a permission failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reading history from the source channel.
    ReadHistory,
    /// Sending into the destination channel.
    Send,
}

/// Terminal state of one resend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillOutcome {
    Completed {
        source: ChannelInfo,
        destination: ChannelInfo,
        relayed: usize,
    },
    Unauthorized,
    InvalidArguments(CommandError),
    SourceNotFound {
        channel_id: u64,
    },
    DestinationUnavailable,
    PermissionDenied {
        channel: ChannelInfo,
        access: Access,
        relayed: usize,
    },
    Failed {
        relayed: usize,
        error: String,
    },
}

impl BackfillOutcome {
    /// Reply posted to the invoking channel.
    #[must_use]
    pub fn reply(&self) -> String {
        match self {
            Self::Completed {
                source,
                destination,
                ..
            } => format::completed_reply(source, destination),
            Self::Unauthorized => format::UNAUTHORIZED_REPLY.to_string(),
            Self::InvalidArguments(_) => format::usage_reply(),
            Self::SourceNotFound { channel_id } => format::source_not_found_reply(*channel_id),
            Self::DestinationUnavailable => format::DESTINATION_UNAVAILABLE_REPLY.to_string(),
            Self::PermissionDenied {
                channel,
                access: Access::ReadHistory,
                ..
            } => format::read_denied_reply(channel),
            Self::PermissionDenied {
                channel,
                access: Access::Send,
                ..
            } => format::send_denied_reply(channel),
            Self::Failed { error, .. } => format::failed_reply(error),
        }
    }

    /// Number of historical messages fully relayed before the terminal state.
    #[must_use]
    pub fn relayed(&self) -> usize {
        match self {
            Self::Completed { relayed, .. }
            | Self::PermissionDenied { relayed, .. }
            | Self::Failed { relayed, .. } => *relayed,
            _ => 0,
        }
    }
}

/// Runs the resend command.
pub struct BackfillEngine {
    platform: Arc<dyn ChatPlatform>,
    registry: Arc<ChannelRegistry>,
    admin_user_id: u64,
    relay_delay: Duration,
    verbose: bool,
}

impl BackfillEngine {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        registry: Arc<ChannelRegistry>,
        admin_user_id: u64,
        relay_delay: Duration,
        verbose: bool,
    ) -> Self {
        Self {
            platform,
            registry,
            admin_user_id,
            relay_delay,
            verbose,
        }
    }

    /// Handle one `!resend_channel` invocation from `requester` in
    /// `invoking_channel`. Never fails: every error becomes a reply.
    pub async fn resend(
        &self,
        requester: &Author,
        content: &str,
        invoking_channel: u64,
    ) -> BackfillOutcome {
        let outcome = self.run(requester, content, invoking_channel).await;
        self.reply(invoking_channel, &outcome.reply()).await;
        outcome
    }

    async fn run(&self, requester: &Author, content: &str, invoking_channel: u64) -> BackfillOutcome {
        // Authorization comes before any argument handling.
        if requester.id != self.admin_user_id {
            if self.verbose {
                info!(user = %requester.name, user_id = requester.id, "unauthorized !resend_channel");
            } else {
                warn!(user_id = requester.id, "unauthorized !resend_channel");
            }
            return BackfillOutcome::Unauthorized;
        }

        let request = match command::parse_resend(content) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "malformed !resend_channel");
                return BackfillOutcome::InvalidArguments(e);
            },
        };

        let source = match self.platform.lookup_channel(request.channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                return BackfillOutcome::SourceNotFound {
                    channel_id: request.channel_id,
                };
            },
            Err(e) => {
                warn!(channel_id = request.channel_id, error = %e, "source lookup failed");
                return BackfillOutcome::SourceNotFound {
                    channel_id: request.channel_id,
                };
            },
        };
        let Some(destination) = self.registry.destination().cloned() else {
            return BackfillOutcome::DestinationUnavailable;
        };

        info!(
            count = request.count,
            source = %source.name,
            source_id = source.id,
            "resending channel history"
        );
        self.reply(invoking_channel, &format::announce_reply(request.count, &source))
            .await;

        self.relay(request, source, destination).await
    }

    async fn relay(
        &self,
        request: ResendRequest,
        source: ChannelInfo,
        destination: ChannelInfo,
    ) -> BackfillOutcome {
        let mut relayed = 0;
        let mut history = self.platform.history(&source, request.count);

        while let Some(item) = history.next().await {
            let message = match item {
                Ok(message) => message,
                Err(e) => {
                    return relay_failure(e, Access::ReadHistory, &source, &destination, relayed);
                },
            };

            let payload = format::backfill_payload(&message, &source);
            if let Err(e) = deliver(self.platform.as_ref(), destination.id, &payload, &message).await
            {
                return relay_failure(e, Access::Send, &source, &destination, relayed);
            }
            relayed += 1;

            if !self.relay_delay.is_zero() {
                tokio::time::sleep(self.relay_delay).await;
            }
        }
        drop(history);

        info!(relayed, source_id = source.id, "all historical messages relayed");
        BackfillOutcome::Completed {
            source,
            destination,
            relayed,
        }
    }

    async fn reply(&self, channel_id: u64, text: &str) {
        if let Err(e) = self.platform.send_text(channel_id, text).await {
            warn!(channel_id, error = %e, "failed to send command reply");
        }
    }
}

fn relay_failure(
    error: Error,
    access: Access,
    source: &ChannelInfo,
    destination: &ChannelInfo,
    relayed: usize,
) -> BackfillOutcome {
    if error.is_permission_denied() {
        let channel = match access {
            Access::ReadHistory => source,
            Access::Send => destination,
        };
        warn!(channel_id = channel.id, ?access, relayed, "resend stopped: permission denied");
        return BackfillOutcome::PermissionDenied {
            channel: channel.clone(),
            access,
            relayed,
        };
    }
    error!(error = %error, relayed, "resend failed");
    BackfillOutcome::Failed {
        relayed,
        error: error.to_string(),
    }
}
