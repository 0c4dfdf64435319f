//! Decides which war record is "the current war" for a clan.

use reqwest::StatusCode;
use tracing::{debug, error};

use crate::clash::types::{GroupState, War, WarState};
use crate::clash::{ClashApiError, WarApi};

use super::season::CwlSeason;

/// A clan in a fighting CWL round sees that round's war; otherwise the
/// regular current-war record applies. `None` means there is nothing to show
/// beyond a generic error card.
pub async fn current_war_view<A: WarApi>(api: &A, clan_tag: &str) -> Option<War> {
    let group = match api.get_league_group(clan_tag).await {
        Ok(group) => group,
        Err(err) => {
            // The league group endpoint 404s once the season has lapsed, so
            // a failure here just means "no group".
            debug!("[WAR::CURRENT] no league group for {}: {}", clan_tag, err);
            Default::default()
        }
    };

    if group.state == GroupState::War {
        let season = CwlSeason::fetch(api, clan_tag, &group).await;
        return season.active_war().cloned();
    }

    match api.get_current_war(clan_tag).await {
        Ok(war) => Some(war),
        Err(ClashApiError::Status(StatusCode::NOT_FOUND)) => {
            Some(War::from_state(WarState::ClanNotFound))
        }
        Err(ClashApiError::Status(StatusCode::FORBIDDEN)) => {
            Some(War::from_state(WarState::AccessDenied))
        }
        Err(err) => {
            error!("[WAR::CURRENT] current war fetch failed: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::clash::types::LeagueGroup;
    use crate::clash::ClashApiResponse;

    use super::*;

    /// In-memory API double. Missing entries answer with the given status.
    struct StubApi {
        group: Option<LeagueGroup>,
        current_war: Option<War>,
        league_wars: HashMap<String, War>,
        missing_status: StatusCode,
    }

    impl StubApi {
        fn new() -> Self {
            Self {
                group: None,
                current_war: None,
                league_wars: HashMap::new(),
                missing_status: StatusCode::NOT_FOUND,
            }
        }
    }

    #[async_trait]
    impl WarApi for StubApi {
        async fn get_current_war(&self, _clan_tag: &str) -> ClashApiResponse<War> {
            self.current_war
                .clone()
                .ok_or(ClashApiError::Status(self.missing_status))
        }

        async fn get_league_group(&self, _clan_tag: &str) -> ClashApiResponse<LeagueGroup> {
            self.group
                .clone()
                .ok_or(ClashApiError::Status(StatusCode::NOT_FOUND))
        }

        async fn get_league_war(&self, war_tag: &str) -> ClashApiResponse<War> {
            self.league_wars
                .get(war_tag)
                .cloned()
                .ok_or(ClashApiError::Status(StatusCode::NOT_FOUND))
        }
    }

    fn group(state: &str, rounds: Vec<Vec<&str>>) -> LeagueGroup {
        serde_json::from_value(json!({
            "state": state,
            "season": "2024-01",
            "rounds": rounds.iter().map(|tags| json!({ "warTags": tags })).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    fn war(clan_tag: &str, state: WarState) -> War {
        serde_json::from_value::<War>(json!({
            "state": "notInWar",
            "clan": { "tag": clan_tag, "name": "Us" },
            "opponent": { "tag": "#FOE", "name": "Them" }
        }))
        .map(|mut war| {
            war.state = state;
            war
        })
        .unwrap()
    }

    #[tokio::test]
    async fn falls_back_to_current_war_when_group_is_missing() {
        let api = StubApi {
            current_war: Some(war("#ABC", WarState::NotInWar)),
            ..StubApi::new()
        };

        let view = current_war_view(&api, "ABC").await.unwrap();

        assert_eq!(view.state, WarState::NotInWar);
    }

    #[tokio::test]
    async fn falls_back_when_group_is_not_fighting() {
        let api = StubApi {
            group: Some(group("preparation", vec![vec!["#T1"]])),
            current_war: Some(war("#ABC", WarState::InWar)),
            ..StubApi::new()
        };

        let view = current_war_view(&api, "ABC").await.unwrap();

        assert_eq!(view.state, WarState::InWar);
    }

    #[tokio::test]
    async fn fighting_group_delegates_to_season() {
        let mut api = StubApi {
            group: Some(group("inWar", vec![vec!["#T1", "#0"], vec!["#T2"]])),
            ..StubApi::new()
        };
        api.league_wars
            .insert("#T1".into(), war("#ABC", WarState::Ended));
        api.league_wars
            .insert("#T2".into(), war("#ABC", WarState::War));

        let view = current_war_view(&api, "ABC").await.unwrap();

        assert_eq!(view.state, WarState::War);
    }

    #[tokio::test]
    async fn fighting_group_without_active_round_yields_none() {
        let mut api = StubApi {
            group: Some(group("inWar", vec![vec!["#T1"]])),
            ..StubApi::new()
        };
        api.league_wars
            .insert("#T1".into(), war("#ABC", WarState::Ended));

        assert!(current_war_view(&api, "ABC").await.is_none());
    }

    #[tokio::test]
    async fn current_war_404_maps_to_clan_not_found() {
        let api = StubApi::new();

        let view = current_war_view(&api, "ABC").await.unwrap();

        assert_eq!(view.state, WarState::ClanNotFound);
    }

    #[tokio::test]
    async fn current_war_403_maps_to_access_denied() {
        let api = StubApi {
            missing_status: StatusCode::FORBIDDEN,
            ..StubApi::new()
        };

        let view = current_war_view(&api, "ABC").await.unwrap();

        assert_eq!(view.state, WarState::AccessDenied);
    }

    #[tokio::test]
    async fn other_failures_surface_as_absence() {
        let api = StubApi {
            missing_status: StatusCode::INTERNAL_SERVER_ERROR,
            ..StubApi::new()
        };

        assert!(current_war_view(&api, "ABC").await.is_none());
    }
}
