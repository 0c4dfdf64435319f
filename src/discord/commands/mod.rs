mod clan;
mod current_war;
mod cwl;
mod stop;

pub use clan::clan;
pub use current_war::current_war;
pub use cwl::cwl;
pub use stop::stop;

use poise::ChoiceParameter;
use tracing::info;

use crate::discord::bot::Context;
use crate::discord::embeds::{CardAuthor, ReplyCard};
use crate::error::AppError;

/// Discord rejects messages carrying more than 10 embeds, so long card
/// sequences go out as follow-ups.
const MAX_EMBEDS_PER_MESSAGE: usize = 10;

/// The clans this bot is configured for. The first entry is the default when
/// the `clan` option is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ChoiceParameter)]
pub enum ClanChoice {
    #[default]
    #[name = "Midwest Warrior"]
    MidwestWarrior,
    #[name = "No Type 2.0"]
    NoType,
}

impl ClanChoice {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MidwestWarrior => "2Q82UJVY",
            Self::NoType => "2PUVOROPR",
        }
    }
}

fn enter_command_log(command_name: &str, clan: ClanChoice) {
    info!("🛠️ [CMD] /{} invoked for {}", command_name, clan.name());
}

/// Deliver a card sequence as one or more embed messages.
async fn send_cards(ctx: &Context<'_>, cards: Vec<ReplyCard>) -> Result<(), AppError> {
    let author = CardAuthor::from_user(ctx.author());

    for page in cards.chunks(MAX_EMBEDS_PER_MESSAGE) {
        let mut reply = poise::CreateReply::default();
        for card in page {
            reply = reply.embed(card.clone().into_embed(&author));
        }
        ctx.send(reply).await?;
    }

    Ok(())
}
