use std::pin::Pin;

use {async_trait::async_trait, futures::Stream};

use crate::Result;

// ── Data model ──────────────────────────────────────────────────────────────

/// A resolved channel: identifier, display name and owning server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: u64,
    pub name: String,
    /// Server (guild) name; `None` for direct-message channels.
    pub server: Option<String>,
}

impl ChannelInfo {
    /// Mention token the platform renders as a channel link.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// Message author as shown in forwarded payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    /// Display name (global name when set, otherwise the username).
    pub name: String,
}

/// Rich embed reference; only the URL is ever relayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedRef {
    pub url: Option<String>,
}

/// A live or historical message, already detached from the platform client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    pub id: u64,
    pub author: Author,
    pub channel_id: u64,
    pub content: String,
    /// Attachment URLs in their original order.
    pub attachments: Vec<String>,
    pub embeds: Vec<EmbedRef>,
}

impl RelayMessage {
    /// URLs of embeds that carry one, in original order.
    pub fn embed_urls(&self) -> impl Iterator<Item = &str> {
        self.embeds.iter().filter_map(|e| e.url.as_deref())
    }
}

// ── Platform boundary ───────────────────────────────────────────────────────

/// Lazily fetched channel history, oldest message first.
pub type HistoryStream<'a> = Pin<Box<dyn Stream<Item = Result<RelayMessage>> + Send + 'a>>;

/// The chat platform as seen by the relay: channel lookup, the send
/// primitive and paginated history. The Discord adapter provides the
/// concrete implementation.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Look a channel up by id. `Ok(None)` means the session cannot see it.
    async fn lookup_channel(&self, channel_id: u64) -> Result<Option<ChannelInfo>>;

    /// Post a plain text message to a channel.
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<()>;

    /// Stream at most `limit` messages of `channel`, oldest first.
    ///
    /// Missing read access surfaces as an [`crate::Error::PermissionDenied`]
    /// item, possibly after earlier pages were yielded.
    fn history<'a>(&'a self, channel: &'a ChannelInfo, limit: usize) -> HistoryStream<'a>;
}
