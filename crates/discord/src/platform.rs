use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::{
        all::{Channel, ChannelId, GetMessages, Message, MessageId},
        http::{Http, HttpError},
    },
    tracing::{debug, warn},
};

use d2d_channels::{
    Author, ChannelInfo, ChatPlatform, EmbedRef, Error, HistoryStream, RelayMessage, Result,
};

/// Discord returns at most this many messages per history request.
const HISTORY_PAGE_SIZE: usize = 100;

/// [`ChatPlatform`] over the Discord REST API.
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn http(&self) -> &Http {
        &self.http
    }

    async fn server_name(&self, channel: &serenity::all::GuildChannel) -> String {
        match channel.guild_id.to_partial_guild(self.http()).await {
            Ok(guild) => guild.name,
            Err(e) => {
                warn!(guild_id = %channel.guild_id, error = %e, "failed to fetch guild name");
                channel.guild_id.to_string()
            },
        }
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn lookup_channel(&self, channel_id: u64) -> Result<Option<ChannelInfo>> {
        // Discord ids are never zero; `ChannelId::new(0)` would panic.
        if channel_id == 0 {
            return Ok(None);
        }

        let channel = match ChannelId::new(channel_id).to_channel(self.http()).await {
            Ok(channel) => channel,
            Err(e) if http_status(&e).is_some_and(|s| s == 403 || s == 404) => {
                debug!(channel_id, error = %e, "channel not visible");
                return Ok(None);
            },
            Err(e) => return Err(map_error(format!("lookup channel {channel_id}"), e)),
        };

        let info = match channel {
            Channel::Guild(guild_channel) => ChannelInfo {
                id: channel_id,
                name: guild_channel.name.clone(),
                server: Some(self.server_name(&guild_channel).await),
            },
            Channel::Private(private) => ChannelInfo {
                id: channel_id,
                name: private.name(),
                server: None,
            },
            other => {
                debug!(channel_id, kind = ?other, "unsupported channel kind");
                return Ok(None);
            },
        };
        Ok(Some(info))
    }

    async fn send_text(&self, channel_id: u64, text: &str) -> Result<()> {
        if channel_id == 0 {
            return Err(Error::not_found("channel 0"));
        }
        ChannelId::new(channel_id)
            .say(self.http(), text)
            .await
            .map_err(|e| map_error(format!("send message to {channel_id}"), e))?;
        Ok(())
    }

    fn history<'a>(&'a self, channel: &'a ChannelInfo, limit: usize) -> HistoryStream<'a> {
        Box::pin(async_stream::stream! {
            if channel.id == 0 {
                return;
            }
            let channel_id = ChannelId::new(channel.id);
            // Walking forward from the first possible id yields the oldest
            // messages of the channel first.
            let mut cursor = MessageId::new(1);
            let mut remaining = limit;

            while remaining > 0 {
                let request = GetMessages::new().after(cursor).limit(page_limit(remaining));
                let mut page = match channel_id.messages(self.http(), request).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(map_error(format!("read history of {}", channel.id), e));
                        return;
                    },
                };
                if page.is_empty() {
                    break;
                }

                // Pages come back newest first.
                page.sort_by_key(|m| m.id);
                let Some(last) = page.last().map(|m| m.id) else {
                    break;
                };
                for msg in page.iter().take(remaining) {
                    yield Ok(relay_message(msg));
                }
                remaining = remaining.saturating_sub(page.len());
                cursor = last;
            }
        })
    }
}

/// Detach a serenity message into the relay's data model.
pub fn relay_message(msg: &Message) -> RelayMessage {
    RelayMessage {
        id: msg.id.get(),
        author: Author {
            id: msg.author.id.get(),
            name: display_name(msg.author.global_name.as_deref(), &msg.author.name),
        },
        channel_id: msg.channel_id.get(),
        content: msg.content.clone(),
        attachments: msg.attachments.iter().map(|a| a.url.clone()).collect(),
        embeds: msg
            .embeds
            .iter()
            .map(|e| EmbedRef { url: e.url.clone() })
            .collect(),
    }
}

fn display_name(global_name: Option<&str>, username: &str) -> String {
    global_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(username)
        .to_string()
}

fn page_limit(remaining: usize) -> u8 {
    u8::try_from(remaining.min(HISTORY_PAGE_SIZE)).unwrap_or(u8::MAX)
}

fn http_status(error: &serenity::Error) -> Option<u16> {
    match error {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        },
        _ => None,
    }
}

/// 403 becomes [`Error::PermissionDenied`]; everything else is external.
fn map_error(context: String, error: serenity::Error) -> Error {
    match http_status(&error) {
        Some(status) if is_denied_status(status) => Error::permission_denied(context),
        _ => Error::external(context, error),
    }
}

fn is_denied_status(status: u16) -> bool {
    status == 403
}
