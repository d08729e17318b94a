//! In-memory [`ChatPlatform`] used by the unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use {async_trait::async_trait, d2d_config::RelayConfig, secrecy::Secret, tokio::time::Instant};

use crate::{
    Error, Result,
    platform::{Author, ChannelInfo, ChatPlatform, HistoryStream, RelayMessage},
};

pub const AUTHOR_ID: u64 = 500;

pub fn channel(id: u64, name: &str, server: Option<&str>) -> ChannelInfo {
    ChannelInfo {
        id,
        name: name.to_string(),
        server: server.map(str::to_string),
    }
}

pub fn author(id: u64, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
    }
}

pub fn message(id: u64, author_name: &str, channel_id: u64, content: &str) -> RelayMessage {
    RelayMessage {
        id,
        author: author(AUTHOR_ID, author_name),
        channel_id,
        content: content.to_string(),
        attachments: Vec::new(),
        embeds: Vec::new(),
    }
}

pub fn config(destination: u64, sources: &[u64]) -> RelayConfig {
    RelayConfig {
        token: Secret::new("test-token".into()),
        destination_channel: destination,
        source_channels: sources.to_vec(),
        admin_user_id: 900,
        verbose: false,
        relay_delay_ms: 0,
    }
}

#[derive(Default)]
pub struct MockPlatform {
    channels: HashMap<u64, ChannelInfo>,
    history: HashMap<u64, Vec<RelayMessage>>,
    failing_lookups: HashSet<u64>,
    send_failure_on: Option<String>,
    send_denied_to: Option<u64>,
    history_denied_after: Option<usize>,
    history_failure_after: Option<usize>,
    sends: Mutex<Vec<(u64, String)>>,
    send_times: Mutex<Vec<Instant>>,
    lookups: AtomicUsize,
    history_limits: Mutex<Vec<usize>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: ChannelInfo) -> Self {
        self.channels.insert(channel.id, channel);
        self
    }

    /// Messages must be given oldest first.
    pub fn with_history(
        mut self,
        channel_id: u64,
        messages: impl IntoIterator<Item = RelayMessage>,
    ) -> Self {
        self.history
            .insert(channel_id, messages.into_iter().collect());
        self
    }

    pub fn with_failing_lookup(mut self, channel_id: u64) -> Self {
        self.failing_lookups.insert(channel_id);
        self
    }

    /// Fail (generic error) the send whose text equals `text`.
    pub fn with_send_failure_on(mut self, text: &str) -> Self {
        self.send_failure_on = Some(text.to_string());
        self
    }

    pub fn with_send_denied_to(mut self, channel_id: u64) -> Self {
        self.send_denied_to = Some(channel_id);
        self
    }

    pub fn with_history_denied_after(mut self, yielded: usize) -> Self {
        self.history_denied_after = Some(yielded);
        self
    }

    pub fn with_history_failure_after(mut self, yielded: usize) -> Self {
        self.history_failure_after = Some(yielded);
        self
    }

    pub fn all_sends(&self) -> Vec<(u64, String)> {
        self.sends.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel_id: u64) -> Vec<String> {
        self.all_sends()
            .into_iter()
            .filter(|(id, _)| *id == channel_id)
            .map(|(_, text)| text)
            .collect()
    }

    /// Clock reading of every successful send, in send order.
    pub fn send_times(&self) -> Vec<Instant> {
        self.send_times.lock().unwrap().clone()
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_limits.lock().unwrap().len()
    }

    pub fn last_history_limit(&self) -> Option<usize> {
        self.history_limits.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    async fn lookup_channel(&self, channel_id: u64) -> Result<Option<ChannelInfo>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_lookups.contains(&channel_id) {
            return Err(Error::external(
                "lookup channel",
                std::io::Error::other("gateway hiccup"),
            ));
        }
        Ok(self.channels.get(&channel_id).cloned())
    }

    async fn send_text(&self, channel_id: u64, text: &str) -> Result<()> {
        if self.send_denied_to == Some(channel_id) {
            return Err(Error::permission_denied(format!("send to {channel_id}")));
        }
        if self.send_failure_on.as_deref() == Some(text) {
            return Err(Error::external("send message", std::io::Error::other("boom")));
        }
        self.sends
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        self.send_times.lock().unwrap().push(Instant::now());
        Ok(())
    }

    fn history<'a>(&'a self, channel: &'a ChannelInfo, limit: usize) -> HistoryStream<'a> {
        self.history_limits.lock().unwrap().push(limit);

        let mut items: Vec<Result<RelayMessage>> = self
            .history
            .get(&channel.id)
            .into_iter()
            .flatten()
            .take(limit)
            .cloned()
            .map(Ok)
            .collect();

        if let Some(after) = self.history_denied_after {
            items.truncate(after);
            items.push(Err(Error::permission_denied(format!(
                "read history of {}",
                channel.id
            ))));
        } else if let Some(after) = self.history_failure_after {
            items.truncate(after);
            items.push(Err(Error::external(
                "history page",
                std::io::Error::other("connection reset"),
            )));
        }

        Box::pin(futures::stream::iter(items))
    }
}
