use chrono::Utc;
use tracing::debug;

use crate::clash::WarApi;
use crate::discord::bot::Context;
use crate::discord::embeds::{war_cards, ReplyCard};
use crate::error::AppError;
use crate::war::CwlSeason;

use super::{enter_command_log, send_cards, ClanChoice};

/// Get clan war league information
#[poise::command(slash_command, category = "War")]
pub async fn cwl(
    ctx: Context<'_>,
    #[description = "Clan to look up"] clan: Option<ClanChoice>,
) -> Result<(), AppError> {
    let clan = clan.unwrap_or_default();
    enter_command_log("cwl", clan);

    ctx.defer().await?;

    let group = match ctx.data().clash.get_league_group(clan.tag()).await {
        Ok(group) => group,
        Err(err) => {
            // The endpoint 404s after the season expires; show "no wars"
            // instead of an error.
            debug!("[CMD] no league group for {}: {}", clan.tag(), err);
            Default::default()
        }
    };

    let season = CwlSeason::fetch(&ctx.data().clash, clan.tag(), &group).await;
    debug!(
        "[CMD] season for {} spans {} rounds",
        clan.tag(),
        season.round_count()
    );

    let now = Utc::now();
    let cards: Vec<ReplyCard> = season
        .wars()
        .flat_map(|war| war_cards(clan.tag(), Some(war), now))
        .collect();
    let cards = if cards.is_empty() {
        war_cards(clan.tag(), None, now)
    } else {
        cards
    };

    send_cards(&ctx, cards).await
}
