use poise::serenity_prelude as serenity;
use serenity::{ActivityData, GuildId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::clash::ClashClient;
use crate::error::AppError;

use super::commands;

/// Shared data accessible in all commands.
pub struct Data {
    pub clash: ClashClient,
    /// Single-consumer control channel; `/stop` sends, `main` shuts down.
    pub shutdown: mpsc::Sender<()>,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("clash", &"<ClashClient>")
            .field("shutdown", &self.shutdown)
            .finish()
    }
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

pub fn create_framework(data: Data, guild_id: Option<GuildId>) -> poise::Framework<Data, AppError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::current_war(),
                commands::cwl(),
                commands::clan(),
                commands::stop(),
            ],
            on_error: |error| {
                Box::pin(async move {
                    handle_error(error).await;
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                match guild_id {
                    Some(guild) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild,
                        )
                        .await?;
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }

                info!(
                    bot_name = %ready.user.name,
                    guild_count = ready.guilds.len(),
                    "⚔️ Bot is ready"
                );
                ctx.set_activity(Some(ActivityData::playing("Clash of Clans")));

                Ok(data)
            })
        })
        .build()
}

async fn handle_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                error = ?error,
                command = ctx.command().name.as_str(),
                user_id = %ctx.author().id,
                "⚔️ ❌ Command execution failed"
            );
            let _ = ctx.say(format!("Error: {}", error)).await;
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            warn!(
                error = %error,
                command = ctx.command().name.as_str(),
                "⚔️ ⚠️ Invalid command argument"
            );
            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
        }
        other => {
            error!(error = ?other, "⚔️ ❌ Unhandled framework error");
        }
    }
}
