//! Typed representations of the Clash of Clans API responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// State of a clan war, regular or league round.
///
/// `ClanNotFound` and `AccessDenied` never appear on the wire; they are
/// synthesized from HTTP 404/403 responses so that every failure mode of a
/// war lookup is representable as a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarState {
    #[serde(skip)]
    ClanNotFound,
    #[serde(skip)]
    AccessDenied,
    InMatchmaking,
    EnterWar,
    Matched,
    #[default]
    NotInWar,
    Preparation,
    War,
    InWar,
    #[serde(alias = "warEnded")]
    Ended,
}

impl WarState {
    /// Whether the war is currently in its combat phase.
    pub fn is_active(&self) -> bool {
        matches!(self, WarState::War | WarState::InWar)
    }
}

/// A single clan war. `clan`/`opponent` carry no home/visiting meaning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct War {
    pub state: WarState,
    /// Absent in league war responses, where every member gets one attack.
    #[serde(default)]
    pub attacks_per_member: u32,
    #[serde(default, deserialize_with = "coc_time::deserialize")]
    pub preparation_start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "coc_time::deserialize")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "coc_time::deserialize")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clan: Option<WarClan>,
    #[serde(default)]
    pub opponent: Option<WarClan>,
}

impl War {
    /// War carrying only an error/absence state, with no participants.
    pub fn from_state(state: WarState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

/// One side of a war.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarClan {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub badge_urls: BadgeUrls,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub destruction_percentage: f64,
    #[serde(default)]
    pub members: Vec<WarMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeUrls {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarMember {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: String,
    /// 1-based roster display position.
    #[serde(default)]
    pub map_position: u32,
    #[serde(default)]
    pub attacks: Vec<Attack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub destruction_percentage: f64,
}

/// State of a Clan War League group, independent from individual war states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupState {
    #[default]
    #[serde(skip)]
    GroupNotFound,
    NotInWar,
    Preparation,
    #[serde(rename = "inWar", alias = "war")]
    War,
    Ended,
}

/// League group for the current CWL season. The API returns 404 for this
/// endpoint once the season has lapsed; callers treat that as "no group",
/// which is what [`Default`] produces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueGroup {
    #[serde(default)]
    pub state: GroupState,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub rounds: Vec<LeagueRound>,
}

/// One CWL time slot. `"#0"` entries are bye slots, never dereferenced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRound {
    #[serde(default)]
    pub war_tags: Vec<String>,
}

/// Clan profile, used by the `/clan` command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub badge_urls: BadgeUrls,
    #[serde(default)]
    pub clan_level: u32,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub war_wins: u32,
    #[serde(default)]
    pub war_league: Option<WarLeague>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarLeague {
    pub name: String,
}

/// The API uses a compact timestamp format (`20240131T070000.000Z`) that
/// chrono cannot parse as RFC 3339.
mod coc_time {
    use super::*;
    use serde::Deserializer;

    pub(super) const FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(|naive| Some(naive.and_utc()))
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
