use poise::serenity_prelude as serenity;
use serenity::GuildId;
use tokio::sync::mpsc;
use tracing::{error, info};

use warhorn::clash::ClashClient;
use warhorn::config::Config;
use warhorn::discord::{self, Data};
use warhorn::logging;

#[tokio::main]
async fn main() {
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("⚔️ {}", err);
            std::process::exit(1);
        }
    };

    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let data = Data {
        clash: ClashClient::new(config.clash_api_token, config.clash_rate_limit_per_second),
        shutdown: shutdown_tx,
    };
    let framework = discord::create_framework(data, config.guild_id.map(GuildId::new));

    let intents = serenity::GatewayIntents::non_privileged();
    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await;

    let mut client = match client {
        Ok(client) => client,
        Err(err) => {
            // Gateway authentication is the one unrecoverable failure.
            error!("⚔️ Failed to build Discord client: {}", err);
            std::process::exit(1);
        }
    };

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if shutdown_rx.recv().await.is_some() {
            info!("🛑 Stop requested, shutting down shards");
            shard_manager.shutdown_all().await;
        }
    });

    info!("⚔️ Starting...");

    if let Err(err) = client.start().await {
        error!("⚔️ Client error: {}", err);
    }
}
