//! Builds the reply cards for every war state.

use chrono::{DateTime, Duration, Utc};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedAuthor, User};

use crate::clash::types::{War, WarMember, WarState};
use crate::war::side;

/// Discord caps embed fields at 25 per embed.
const MAX_EMBED_FIELDS: usize = 25;

const PROJECT_URL: &str = "https://github.com/Ixirsii/warhorn";
const CLASH_LOGO_URL: &str = "https://i.imgur.com/S95pJ9o.png";

const ERROR_TITLE: &str = "Error";
const NO_ATTACK: &str = "No attack";

/// Material palette accents, one per war state family.
pub mod colors {
    pub const RED: u32 = 0xF44336;
    pub const BLUE: u32 = 0x2196F3;
    pub const LIGHT_BLUE: u32 = 0x03A9F4;
    pub const GREEN: u32 = 0x4CAF50;
    pub const YELLOW: u32 = 0xFFEB3B;
    pub const ORANGE: u32 = 0xFF9800;
}

/// One reply message, as pure data. Conversion to a [`CreateEmbed`] happens
/// only at the Discord boundary so the builder logic stays testable.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyCard {
    pub color: u32,
    pub title: String,
    pub description: Option<String>,
    /// Field label/value pairs, at most [`MAX_EMBED_FIELDS`].
    pub fields: Vec<(String, String)>,
    /// `None` falls back to the Clash logo.
    pub thumbnail: Option<String>,
}

impl ReplyCard {
    fn simple(color: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            color,
            title: title.into(),
            description: Some(description.into()),
            fields: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn into_embed(self, author: &CardAuthor) -> CreateEmbed {
        let mut author_block = CreateEmbedAuthor::new(&author.name).url(PROJECT_URL);
        if let Some(icon) = &author.icon_url {
            author_block = author_block.icon_url(icon);
        }

        let mut embed = CreateEmbed::new()
            .author(author_block)
            .color(self.color)
            .title(self.title)
            .thumbnail(self.thumbnail.unwrap_or_else(|| CLASH_LOGO_URL.to_string()));
        if let Some(description) = self.description {
            embed = embed.description(description);
        }

        embed.fields(
            self.fields
                .into_iter()
                .map(|(name, value)| (name, value, false)),
        )
    }
}

/// Author block shared by every card of a reply: the requesting user.
#[derive(Debug, Clone)]
pub struct CardAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

impl CardAuthor {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            icon_url: Some(user.face()),
        }
    }
}

/// Build the full reply sequence for a war lookup. Always returns at least
/// one card; an absent war renders as a generic error card.
pub fn war_cards(clan_tag: &str, war: Option<&War>, now: DateTime<Utc>) -> Vec<ReplyCard> {
    tracing::trace!("[EMBEDS] building cards for {}", clan_tag);

    let Some(war) = war else {
        return vec![ReplyCard {
            color: colors::RED,
            title: "Error getting war status".into(),
            description: None,
            fields: Vec::new(),
            thumbnail: None,
        }];
    };

    match war.state {
        WarState::ClanNotFound => {
            vec![ReplyCard::simple(colors::RED, ERROR_TITLE, "Clan not found")]
        }
        WarState::AccessDenied => {
            vec![ReplyCard::simple(
                colors::RED,
                ERROR_TITLE,
                "Clan war log is not public",
            )]
        }
        WarState::InMatchmaking | WarState::EnterWar | WarState::Matched => {
            vec![ReplyCard::simple(
                colors::LIGHT_BLUE,
                "Matchmaking",
                "Searching for opponents",
            )]
        }
        WarState::NotInWar => {
            vec![ReplyCard::simple(colors::BLUE, "Not in war", "War has ended")]
        }
        WarState::Preparation => {
            let remaining = remaining_time(now, war.start_time);
            vec![ReplyCard::simple(
                colors::GREEN,
                versus_title(clan_tag, war, "Prep Day"),
                format!("{} remaining in prep day", remaining),
            )]
        }
        WarState::War | WarState::InWar => {
            let remaining = remaining_time(now, war.end_time);
            let summary = ReplyCard::simple(
                colors::YELLOW,
                versus_title(clan_tag, war, "War Day"),
                format!("{}\n{} remaining in war", war_stats(clan_tag, war), remaining),
            );

            let mut cards = vec![summary];
            cards.extend(member_cards(clan_tag, war, colors::YELLOW));
            cards
        }
        WarState::Ended => {
            let summary = ReplyCard::simple(
                colors::ORANGE,
                versus_title(clan_tag, war, "War Ended"),
                war_stats(clan_tag, war),
            );

            let mut cards = vec![summary];
            cards.extend(member_cards(clan_tag, war, colors::ORANGE));
            cards
        }
    }
}

/// Roster cards for the resolved own clan, one field per member ordered by
/// map position, paginated to the embed field limit.
fn member_cards(clan_tag: &str, war: &War, color: u32) -> Vec<ReplyCard> {
    let fields = member_fields(clan_tag, war);
    let thumbnail = side::opponent_badge(clan_tag, war);

    fields
        .chunks(MAX_EMBED_FIELDS)
        .map(|page| ReplyCard {
            color,
            title: "Member attack status".into(),
            description: None,
            fields: page.to_vec(),
            thumbnail: thumbnail.clone(),
        })
        .collect()
}

fn member_fields(clan_tag: &str, war: &War) -> Vec<(String, String)> {
    let Some(own) = side::clan(clan_tag, war) else {
        return Vec::new();
    };

    let mut members: Vec<&WarMember> = own.members.iter().collect();
    members.sort_by_key(|member| member.map_position);

    let attacks_per_member = war.attacks_per_member.max(1) as usize;

    members
        .into_iter()
        .map(|member| {
            let value = (0..attacks_per_member)
                .map(|slot| match member.attacks.get(slot) {
                    Some(attack) => format!(
                        "{:.1}% {}",
                        attack.destruction_percentage,
                        star_glyphs(attack.stars)
                    ),
                    None => NO_ATTACK.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" | ");

            (member.name.clone(), value)
        })
        .collect()
}

fn versus_title(clan_tag: &str, war: &War, suffix: &str) -> String {
    format!(
        "\"{}\" VS \"{}\" | {}",
        side::clan_name(clan_tag, war),
        side::opponent_name(clan_tag, war),
        suffix
    )
}

fn war_stats(clan_tag: &str, war: &War) -> String {
    let own = side::clan(clan_tag, war);
    let enemy = side::opponent(clan_tag, war);

    format!(
        "{} ★ ({}) | {} ★ ({})",
        side::stars(own),
        side::destruction(own),
        side::stars(enemy),
        side::destruction(enemy)
    )
}

/// Three-glyph star rating, filled from the right.
fn star_glyphs(stars: u32) -> &'static str {
    match stars {
        0 => "☆☆☆",
        1 => "☆☆★",
        2 => "☆★★",
        _ => "★★★",
    }
}

/// Time left until `deadline`, as `"1d 3h 25m"`. Clamps to zero once the
/// deadline has passed or is missing.
fn remaining_time(now: DateTime<Utc>, deadline: Option<DateTime<Utc>>) -> String {
    let remaining = deadline
        .map(|deadline| deadline - now)
        .filter(|remaining| *remaining > Duration::zero())
        .unwrap_or_else(Duration::zero);

    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
