//! Resolves which side of a war record is "us" and which is the opponent.

use crate::clash::types::{War, WarClan};

pub const UNKNOWN: &str = "Unknown";

/// The side of `war` whose tag matches `clan_tag`, if any.
///
/// Matching is a suffix comparison so that a queried tag without the leading
/// `#` still matches the `#`-prefixed tags the API returns.
pub fn clan<'a>(clan_tag: &str, war: &'a War) -> Option<&'a WarClan> {
    if tag_matches(clan_tag, war.clan.as_ref()) {
        war.clan.as_ref()
    } else if tag_matches(clan_tag, war.opponent.as_ref()) {
        war.opponent.as_ref()
    } else {
        None
    }
}

/// The side of `war` facing the clan identified by `clan_tag`, if any.
pub fn opponent<'a>(clan_tag: &str, war: &'a War) -> Option<&'a WarClan> {
    if tag_matches(clan_tag, war.clan.as_ref()) {
        war.opponent.as_ref()
    } else if tag_matches(clan_tag, war.opponent.as_ref()) {
        war.clan.as_ref()
    } else {
        None
    }
}

pub fn clan_name(clan_tag: &str, war: &War) -> String {
    clan(clan_tag, war)
        .map(|side| side.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn opponent_name(clan_tag: &str, war: &War) -> String {
    opponent(clan_tag, war)
        .map(|side| side.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn stars(side: Option<&WarClan>) -> u32 {
    side.map(|side| side.stars).unwrap_or(0)
}

/// Destruction percentage rendered with one decimal, `"0.0%"` when the side
/// is absent.
pub fn destruction(side: Option<&WarClan>) -> String {
    format!(
        "{:.1}%",
        side.map(|side| side.destruction_percentage).unwrap_or(0.0)
    )
}

pub fn opponent_badge(clan_tag: &str, war: &War) -> Option<String> {
    opponent(clan_tag, war).and_then(|side| side.badge_urls.large.clone())
}

/// Whether `clan_tag` is one of the two participants of `war`.
pub fn involves(clan_tag: &str, war: &War) -> bool {
    clan(clan_tag, war).is_some()
}

fn tag_matches(clan_tag: &str, side: Option<&WarClan>) -> bool {
    side.is_some_and(|side| side.tag.ends_with(clan_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sided_war() -> War {
        War {
            clan: Some(WarClan {
                tag: "#AAA".into(),
                name: "Us".into(),
                stars: 12,
                destruction_percentage: 45.67,
                ..WarClan::default()
            }),
            opponent: Some(WarClan {
                tag: "#BBB".into(),
                name: "Them".into(),
                stars: 9,
                destruction_percentage: 33.0,
                ..WarClan::default()
            }),
            ..War::default()
        }
    }

    #[test]
    fn resolves_clan_side_by_tag() {
        let war = two_sided_war();

        assert_eq!(clan("AAA", &war).unwrap().name, "Us");
        assert_eq!(opponent("AAA", &war).unwrap().name, "Them");
    }

    #[test]
    fn resolution_is_symmetric() {
        let war = two_sided_war();

        assert_eq!(clan("BBB", &war).unwrap().name, "Them");
        assert_eq!(opponent("BBB", &war).unwrap().name, "Us");
    }

    #[test]
    fn tolerates_leading_hash_in_query() {
        let war = two_sided_war();

        assert_eq!(clan("#AAA", &war).unwrap().name, "Us");
    }

    #[test]
    fn unmatched_tag_resolves_to_neither_side() {
        let war = two_sided_war();

        assert!(clan("ZZZ", &war).is_none());
        assert!(opponent("ZZZ", &war).is_none());
        assert!(!involves("ZZZ", &war));
    }

    #[test]
    fn accessors_degrade_to_sentinels() {
        let war = War::default();

        assert_eq!(clan_name("AAA", &war), UNKNOWN);
        assert_eq!(opponent_name("AAA", &war), UNKNOWN);
        assert_eq!(stars(clan("AAA", &war)), 0);
        assert_eq!(destruction(clan("AAA", &war)), "0.0%");
        assert!(opponent_badge("AAA", &war).is_none());
    }

    #[test]
    fn destruction_renders_one_decimal() {
        let war = two_sided_war();

        assert_eq!(destruction(clan("AAA", &war)), "45.7%");
        assert_eq!(destruction(opponent("AAA", &war)), "33.0%");
    }
}
