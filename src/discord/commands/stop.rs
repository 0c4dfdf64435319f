use tracing::info;

use crate::discord::bot::Context;
use crate::error::AppError;

/// Shut the bot down gracefully
#[poise::command(slash_command, owners_only, ephemeral, category = "Admin")]
pub async fn stop(ctx: Context<'_>) -> Result<(), AppError> {
    info!("🛑 [CMD] /stop invoked by {}", ctx.author().name);

    ctx.say("Shutting down. Goodbye! 👋").await?;

    ctx.data()
        .shutdown
        .send(())
        .await
        .map_err(|_| AppError::Config("shutdown channel closed".into()))?;

    Ok(())
}
