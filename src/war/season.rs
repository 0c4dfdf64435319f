//! Fan-out aggregation of a Clan War League season.

use futures::future::join_all;

use crate::clash::types::{LeagueGroup, War, WarState};
use crate::clash::{ClashApiResponse, WarApi};

use super::side;

/// Placeholder war tag marking a bye slot in a round.
const BYE_TAG: &str = "#0";

/// All wars of one CWL season relevant to a single clan, assembled fresh for
/// each command invocation.
///
/// Round order and within-round tag order are preserved regardless of fetch
/// completion order. Individual fetch failures are retained as `Err` slots
/// so one bad war tag never aborts a round.
pub struct CwlSeason {
    clan_tag: String,
    rounds: Vec<Vec<ClashApiResponse<War>>>,
}

impl CwlSeason {
    /// Concurrently fetch every non-bye war tag of every round, then join.
    pub async fn fetch<A: WarApi>(api: &A, clan_tag: &str, group: &LeagueGroup) -> Self {
        tracing::trace!("[WAR::SEASON] fetching {} rounds", group.rounds.len());

        let rounds = join_all(group.rounds.iter().map(|round| {
            join_all(
                round
                    .war_tags
                    .iter()
                    .filter(|tag| tag.as_str() != BYE_TAG)
                    .map(|tag| api.get_league_war(tag)),
            )
        }))
        .await;

        Self::from_rounds(clan_tag, rounds)
    }

    pub fn from_rounds(clan_tag: &str, rounds: Vec<Vec<ClashApiResponse<War>>>) -> Self {
        Self {
            clan_tag: clan_tag.to_string(),
            rounds,
        }
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// The war of round `index` this clan participates in, if the round
    /// resolved to one.
    pub fn round_war(&self, index: usize) -> Option<&War> {
        self.rounds.get(index)?.iter().find_map(|result| {
            result
                .as_ref()
                .ok()
                .filter(|war| side::involves(&self.clan_tag, war))
        })
    }

    /// This clan's wars across all rounds, in round order.
    pub fn wars(&self) -> impl Iterator<Item = &War> {
        (0..self.rounds.len()).filter_map(|index| self.round_war(index))
    }

    /// The war the clan is currently fighting: the first round (ascending)
    /// in its combat phase, or (when no round is fighting yet) the first
    /// round still in preparation.
    pub fn active_war(&self) -> Option<&War> {
        self.wars()
            .find(|war| war.state.is_active())
            .or_else(|| self.wars().find(|war| war.state == WarState::Preparation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clash::types::WarClan;
    use crate::clash::ClashApiError;
    use reqwest::StatusCode;

    fn league_war(clan_tag: &str, state: WarState) -> War {
        War {
            state,
            clan: Some(WarClan {
                tag: clan_tag.into(),
                name: "Us".into(),
                ..WarClan::default()
            }),
            opponent: Some(WarClan {
                tag: "#FOE".into(),
                name: "Them".into(),
                ..WarClan::default()
            }),
            ..War::default()
        }
    }

    #[test]
    fn preserves_round_order_with_empty_rounds() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![
                vec![Ok(league_war("#ABC", WarState::Ended))],
                vec![],
                vec![Ok(league_war("#ABC", WarState::InWar))],
            ],
        );

        assert_eq!(season.round_count(), 3);
        assert!(season.round_war(0).is_some());
        assert!(season.round_war(1).is_none());
        assert!(season.round_war(2).is_some());
    }

    #[test]
    fn active_war_picks_first_fighting_round() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![
                vec![Ok(league_war("#ABC", WarState::Ended))],
                vec![Ok(league_war("#ABC", WarState::Ended))],
                vec![Ok(league_war("#ABC", WarState::InWar))],
                vec![Ok(league_war("#ABC", WarState::InWar))],
            ],
        );

        let active = season.active_war().unwrap();
        assert!(active.state.is_active());
        assert!(std::ptr::eq(active, season.round_war(2).unwrap()));
    }

    #[test]
    fn active_war_falls_back_to_preparation_round() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![vec![Ok(league_war("#ABC", WarState::Preparation))]],
        );

        assert_eq!(season.active_war().unwrap().state, WarState::Preparation);
    }

    #[test]
    fn active_war_absent_when_no_round_is_live() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![
                vec![Ok(league_war("#ABC", WarState::Ended))],
                vec![Ok(league_war("#ABC", WarState::Ended))],
            ],
        );

        assert!(season.active_war().is_none());
    }

    #[test]
    fn failed_fetches_are_skipped_not_fatal() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![vec![
                Err(ClashApiError::Status(StatusCode::NOT_FOUND)),
                Ok(league_war("#ABC", WarState::War)),
            ]],
        );

        assert!(season.active_war().is_some());
    }

    #[test]
    fn rounds_without_this_clan_are_ignored() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![vec![Ok(league_war("#OTHER", WarState::War))]],
        );

        assert!(season.round_war(0).is_none());
        assert!(season.active_war().is_none());
    }

    #[test]
    fn wars_iterates_in_round_order() {
        let season = CwlSeason::from_rounds(
            "#ABC",
            vec![
                vec![Ok(league_war("#ABC", WarState::Ended))],
                vec![],
                vec![Ok(league_war("#ABC", WarState::War))],
            ],
        );

        let states: Vec<WarState> = season.wars().map(|war| war.state).collect();
        assert_eq!(states, vec![WarState::Ended, WarState::War]);
    }
}
