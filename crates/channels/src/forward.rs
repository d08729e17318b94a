use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    Result, format,
    platform::{ChannelInfo, ChatPlatform, RelayMessage},
};

/// Forwards live messages from a source channel to the destination.
pub struct ForwardingEngine {
    platform: Arc<dyn ChatPlatform>,
    verbose: bool,
}

impl ForwardingEngine {
    pub fn new(platform: Arc<dyn ChatPlatform>, verbose: bool) -> Self {
        Self { platform, verbose }
    }

    /// Send the annotated text, then every attachment URL, then every embed
    /// URL. Returns the number of sends. The first failing send aborts the
    /// rest; nothing is retried.
    pub async fn forward(
        &self,
        message: &RelayMessage,
        source: &ChannelInfo,
        destination: &ChannelInfo,
    ) -> Result<usize> {
        let payload = format::live_payload(message, source);
        let sent = deliver(self.platform.as_ref(), destination.id, &payload, message).await?;

        if self.verbose {
            info!(
                author = %message.author.name,
                channel = %source.name,
                sends = sent,
                "message forwarded"
            );
        } else {
            debug!(message_id = message.id, sends = sent, "message forwarded");
        }
        Ok(sent)
    }
}

/// Deliver `payload` followed by the message's attachment and embed URLs,
/// in that order.
pub(crate) async fn deliver(
    platform: &dyn ChatPlatform,
    destination: u64,
    payload: &str,
    message: &RelayMessage,
) -> Result<usize> {
    let mut sent = 0;
    platform
        .send_text(destination, format::truncate(payload))
        .await?;
    sent += 1;

    for url in message
        .attachments
        .iter()
        .map(String::as_str)
        .chain(message.embed_urls())
    {
        platform.send_text(destination, format::truncate(url)).await?;
        sent += 1;
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{platform::EmbedRef, test_support::*},
    };

    #[tokio::test]
    async fn sends_text_then_attachments_then_embed_urls() {
        let platform = Arc::new(MockPlatform::new());
        let engine = ForwardingEngine::new(platform.clone(), false);
        let mut msg = message(7, "alice", 10, "look");
        msg.attachments = vec!["https://cdn/a.png".into(), "https://cdn/b.png".into()];
        msg.embeds = vec![
            EmbedRef {
                url: Some("https://example.com/e1".into()),
            },
            EmbedRef { url: None },
            EmbedRef {
                url: Some("https://example.com/e2".into()),
            },
        ];

        let sent = engine
            .forward(&msg, &channel(10, "src", Some("G")), &channel(1, "dst", None))
            .await
            .unwrap();

        assert_eq!(sent, 1 + 2 + 2);
        assert_eq!(
            platform.sent_to(1),
            vec![
                "🤖**alice** from `G/src`\nlook".to_string(),
                "https://cdn/a.png".into(),
                "https://cdn/b.png".into(),
                "https://example.com/e1".into(),
                "https://example.com/e2".into(),
            ]
        );
    }

    #[tokio::test]
    async fn send_failure_propagates_and_stops() {
        let platform = Arc::new(MockPlatform::new().with_send_failure_on("https://cdn/a.png"));
        let engine = ForwardingEngine::new(platform.clone(), true);
        let mut msg = message(7, "alice", 10, "look");
        msg.attachments = vec!["https://cdn/a.png".into(), "https://cdn/b.png".into()];

        let err = engine
            .forward(&msg, &channel(10, "src", None), &channel(1, "dst", None))
            .await
            .unwrap_err();

        assert!(!err.is_permission_denied());
        assert_eq!(platform.sent_to(1).len(), 1);
    }
}
