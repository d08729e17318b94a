use std::sync::Arc;

use {
    secrecy::ExposeSecret,
    serenity::{Client, gateway::GatewayError},
    tracing::{error, info, warn},
};

use d2d_config::RelayConfig;

use crate::{Error, Result, handler::RelayHandler};

/// Connect to the Discord gateway and relay messages until the connection
/// ends or the process receives Ctrl-C.
pub async fn run(config: RelayConfig) -> Result<()> {
    let token = config.token.expose_secret().clone();
    let handler = RelayHandler::new(Arc::new(config));

    let mut client = Client::builder(&token, RelayHandler::intents())
        .event_handler(handler)
        .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        info!("shutting down discord client");
        shard_manager.shutdown_all().await;
    });

    info!("connecting to discord gateway");
    match client.start().await {
        Ok(()) => {
            info!("discord client stopped");
            Ok(())
        },
        Err(serenity::Error::Gateway(GatewayError::InvalidAuthentication)) => {
            error!("login failed: invalid token");
            Err(Error::message(
                "login failed: invalid Discord token, check DISCORD_TOKEN or the config file",
            ))
        },
        Err(e) => Err(e.into()),
    }
}
