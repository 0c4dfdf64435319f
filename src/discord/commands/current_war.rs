use chrono::Utc;

use crate::discord::bot::Context;
use crate::discord::embeds::war_cards;
use crate::error::AppError;
use crate::war::current_war_view;

use super::{enter_command_log, send_cards, ClanChoice};

/// Get current war information
#[poise::command(slash_command, category = "War")]
pub async fn current_war(
    ctx: Context<'_>,
    #[description = "Clan to look up"] clan: Option<ClanChoice>,
) -> Result<(), AppError> {
    let clan = clan.unwrap_or_default();
    enter_command_log("current_war", clan);

    // Defer the reply; the aggregation can take several API round trips.
    ctx.defer().await?;

    let war = current_war_view(&ctx.data().clash, clan.tag()).await;
    let cards = war_cards(clan.tag(), war.as_ref(), Utc::now());

    send_cards(&ctx, cards).await
}
