//! Outgoing text: forwarded payloads and command replies.

use crate::{
    command::USAGE,
    platform::{ChannelInfo, RelayMessage},
};

/// Platform limit for a single message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Origin label used when a channel has no server.
pub const DM_LABEL: &str = "Direct Message";

/// `server/channel`, or `Direct Message/channel` outside a server.
#[must_use]
pub fn origin(channel: &ChannelInfo) -> String {
    format!(
        "{}/{}",
        channel.server.as_deref().unwrap_or(DM_LABEL),
        channel.name
    )
}

/// Payload for a live message.
#[must_use]
pub fn live_payload(message: &RelayMessage, source: &ChannelInfo) -> String {
    format!(
        "🤖**{}** from `{}`\n{}",
        message.author.name,
        origin(source),
        message.content
    )
}

/// Payload for a historical message replayed by `!resend_channel`.
#[must_use]
pub fn backfill_payload(message: &RelayMessage, source: &ChannelInfo) -> String {
    format!(
        "🤖[Forwarded from **{}** in `{}`]\n{}",
        message.author.name,
        origin(source),
        message.content
    )
}

/// Cut `text` to at most [`MAX_MESSAGE_LEN`] characters.
#[must_use]
pub fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

// ── Command replies ─────────────────────────────────────────────────────────

pub const UNAUTHORIZED_REPLY: &str = "🚫 You are not authorized to use this command.";

pub const DESTINATION_UNAVAILABLE_REPLY: &str =
    "❌ The destination channel is not configured correctly. Check the logs.";

#[must_use]
pub fn usage_reply() -> String {
    format!("⚠️ Invalid format. Usage: {USAGE}")
}

#[must_use]
pub fn source_not_found_reply(channel_id: u64) -> String {
    format!("❌ Could not find source channel with ID {channel_id}.")
}

#[must_use]
pub fn announce_reply(count: usize, source: &ChannelInfo) -> String {
    format!("🔄 Fetching {count} messages from {}...", source.mention())
}

#[must_use]
pub fn completed_reply(source: &ChannelInfo, destination: &ChannelInfo) -> String {
    format!(
        "✅ Finished forwarding messages from {} to {}.",
        source.mention(),
        destination.mention()
    )
}

#[must_use]
pub fn read_denied_reply(source: &ChannelInfo) -> String {
    format!(
        "❌ I don't have permission to read message history in {}.",
        source.mention()
    )
}

#[must_use]
pub fn send_denied_reply(destination: &ChannelInfo) -> String {
    format!(
        "❌ I don't have permission to send messages in {}.",
        destination.mention()
    )
}

#[must_use]
pub fn failed_reply(error: &str) -> String {
    format!("❌ An unexpected error occurred while forwarding: {error}")
}

#[cfg(test)]
mod tests {
    use {super::*, crate::test_support::*};

    #[test]
    fn live_payload_tags_origin() {
        let msg = message(1, "alice", 10, "hello");
        let payload = live_payload(&msg, &channel(10, "general", Some("Guild")));
        assert_eq!(payload, "🤖**alice** from `Guild/general`\nhello");
    }

    #[test]
    fn backfill_payload_uses_distinct_wording() {
        let msg = message(1, "bob", 10, "old news");
        let payload = backfill_payload(&msg, &channel(10, "archive", None));
        assert_eq!(
            payload,
            "🤖[Forwarded from **bob** in `Direct Message/archive`]\nold news"
        );
        assert_ne!(payload, live_payload(&msg, &channel(10, "archive", None)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_MESSAGE_LEN + 10);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_MESSAGE_LEN);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn replies_mention_channels() {
        let src = channel(555, "src", None);
        let dst = channel(1, "dst", None);
        assert_eq!(announce_reply(3, &src), "🔄 Fetching 3 messages from <#555>...");
        assert!(completed_reply(&src, &dst).contains("<#555> to <#1>"));
        assert!(usage_reply().contains(USAGE));
    }
}
