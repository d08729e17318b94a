//! Discord adapter for the relay.
//!
//! Connects to the gateway with serenity, turns message events into
//! [`d2d_channels::RelayMessage`]s for the dispatcher, and implements
//! [`d2d_channels::ChatPlatform`] on top of the Discord REST API.

pub mod bot;
pub mod error;
pub mod handler;
pub mod platform;

pub use {
    bot::run,
    error::{Error, Result},
    handler::RelayHandler,
    platform::DiscordPlatform,
};
