//! Platform-agnostic relay core.
//!
//! Live messages from configured source channels are forwarded to a single
//! destination channel, and an admin-only `!resend_channel` command replays
//! a channel's history into the same destination. The chat platform itself
//! is reached through the [`ChatPlatform`] trait.

pub mod backfill;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod forward;
pub mod platform;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use {
    backfill::{Access, BackfillEngine, BackfillOutcome},
    command::{CommandError, ResendRequest, is_resend_command, parse_resend},
    dispatch::{Dispatcher, Route},
    error::{Error, Result},
    forward::ForwardingEngine,
    platform::{Author, ChannelInfo, ChatPlatform, EmbedRef, HistoryStream, RelayMessage},
    registry::ChannelRegistry,
};
