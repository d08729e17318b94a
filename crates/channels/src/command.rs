//! `!resend_channel <channel_id_or_mention> [message_count]` parsing.

use std::num::IntErrorKind;

/// Command token, matched case-insensitively at the start of a message.
pub const RESEND_COMMAND: &str = "!resend_channel";

pub const DEFAULT_COUNT: usize = 100;
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 200;

/// Usage hint shown on malformed arguments.
pub const USAGE: &str = "`!resend_channel <channel_id> [num_messages]`";

/// A fully parsed resend request. `count` is always within
/// [`MIN_COUNT`]..=[`MAX_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendRequest {
    pub channel_id: u64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("missing channel argument")]
    MissingChannel,

    #[error("invalid channel id: {0:?}")]
    InvalidChannel(String),

    #[error("invalid message count: {0:?}")]
    InvalidCount(String),
}

/// Whether a message body invokes the resend command.
pub fn is_resend_command(content: &str) -> bool {
    content
        .trim()
        .get(..RESEND_COMMAND.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RESEND_COMMAND))
}

/// Parse the command text. Either every argument is valid or an error is
/// returned; there is no partially populated request.
pub fn parse_resend(content: &str) -> Result<ResendRequest, CommandError> {
    let mut parts = content.split_whitespace().skip(1);

    let raw_channel = parts.next().ok_or(CommandError::MissingChannel)?;
    let channel_id = raw_channel
        .trim_matches(|c| matches!(c, '<' | '#' | '>'))
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidChannel(raw_channel.to_string()))?;

    let count = match parts.next() {
        Some(raw) => parse_count(raw)?,
        None => DEFAULT_COUNT,
    };

    Ok(ResendRequest { channel_id, count })
}

fn parse_count(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<i64>() {
        Ok(n) => Ok(clamp_count(n)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(MAX_COUNT),
            IntErrorKind::NegOverflow => Ok(MIN_COUNT),
            _ => Err(CommandError::InvalidCount(raw.to_string())),
        },
    }
}

/// Clamp a requested count into [`MIN_COUNT`]..=[`MAX_COUNT`].
#[must_use]
pub fn clamp_count(requested: i64) -> usize {
    usize::try_from(requested.clamp(MIN_COUNT as i64, MAX_COUNT as i64)).unwrap_or(DEFAULT_COUNT)
}
