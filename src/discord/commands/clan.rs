use reqwest::StatusCode;
use tracing::error;

use crate::clash::ClashApiError;
use crate::discord::bot::Context;
use crate::discord::embeds::{colors, ReplyCard};
use crate::error::AppError;

use super::{enter_command_log, send_cards, ClanChoice};

/// Get clan information
#[poise::command(slash_command, category = "Clan")]
pub async fn clan(
    ctx: Context<'_>,
    #[description = "Clan to look up"] clan: Option<ClanChoice>,
) -> Result<(), AppError> {
    let clan = clan.unwrap_or_default();
    enter_command_log("clan", clan);

    ctx.defer().await?;

    let card = match ctx.data().clash.get_clan(clan.tag()).await {
        Ok(info) => {
            let mut fields = vec![
                ("Level".to_string(), info.clan_level.to_string()),
                ("Members".to_string(), format!("{}/50", info.members)),
                ("War wins".to_string(), info.war_wins.to_string()),
            ];
            if let Some(league) = &info.war_league {
                fields.push(("War league".to_string(), league.name.clone()));
            }

            ReplyCard {
                color: colors::BLUE,
                title: format!("{} ({})", info.name, info.tag),
                description: None,
                fields,
                thumbnail: info.badge_urls.large.clone(),
            }
        }
        Err(ClashApiError::Status(StatusCode::NOT_FOUND)) => ReplyCard {
            color: colors::RED,
            title: "Error".into(),
            description: Some("Clan not found".into()),
            fields: Vec::new(),
            thumbnail: None,
        },
        Err(err) => {
            error!("[CMD] clan lookup failed: {}", err);
            ReplyCard {
                color: colors::RED,
                title: "Error".into(),
                description: Some("Error getting clan information".into()),
                fields: Vec::new(),
                thumbnail: None,
            }
        }
    };

    send_cards(&ctx, vec![card]).await
}
