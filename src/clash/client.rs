//! HTTP client for the Clash of Clans REST API.

use std::fmt::Debug;
use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Clan, LeagueGroup, War};

const BASE_URL: &str = "https://api.clashofclans.com/v1";

#[derive(Debug, Error)]
pub enum ClashApiError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    Status(StatusCode),
}

/// A call to the Clash API either succeeds with the decoded body or fails
/// with a [`ClashApiError`]. Failures are values, never panics.
pub type ClashApiResponse<T> = Result<T, ClashApiError>;

/// The war-related subset of the API, behind a trait so that aggregation
/// logic can run against an in-memory double.
#[async_trait]
pub trait WarApi: Send + Sync {
    async fn get_current_war(&self, clan_tag: &str) -> ClashApiResponse<War>;
    async fn get_league_group(&self, clan_tag: &str) -> ClashApiResponse<LeagueGroup>;
    async fn get_league_war(&self, war_tag: &str) -> ClashApiResponse<War>;
}

pub struct ClashClient {
    client: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Clash API bearer token, bound to an IP allow-list on the developer portal.
    token: String,
}

impl ClashClient {
    pub fn new(token: String, rate_limit_per_second: NonZeroU32) -> Self {
        Self {
            client: reqwest::Client::new(),
            limiter: RateLimiter::direct(Quota::per_second(rate_limit_per_second)),
            token,
        }
    }

    pub async fn get_clan(&self, clan_tag: &str) -> ClashApiResponse<Clan> {
        tracing::trace!("[CLASH::CLIENT] get_clan {}", clan_tag);
        let path = format!("{}/clans/{}", BASE_URL, encode_tag(clan_tag));

        self.request(path).await
    }

    /// Shared request logic: rate-limit gate, auth header, status check.
    async fn request<T: DeserializeOwned + Debug>(&self, path: String) -> ClashApiResponse<T> {
        self.limiter.until_ready().await;

        let res = self
            .client
            .get(path)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ClashApiError::Reqwest)?;
        match res.status() {
            StatusCode::OK => res.json().await.map_err(ClashApiError::Reqwest),
            status => Err(ClashApiError::Status(status)),
        }
    }
}

#[async_trait]
impl WarApi for ClashClient {
    async fn get_current_war(&self, clan_tag: &str) -> ClashApiResponse<War> {
        tracing::trace!("[CLASH::CLIENT] get_current_war {}", clan_tag);
        let path = format!("{}/clans/{}/currentwar", BASE_URL, encode_tag(clan_tag));

        self.request(path).await
    }

    async fn get_league_group(&self, clan_tag: &str) -> ClashApiResponse<LeagueGroup> {
        tracing::trace!("[CLASH::CLIENT] get_league_group {}", clan_tag);
        let path = format!(
            "{}/clans/{}/currentwar/leaguegroup",
            BASE_URL,
            encode_tag(clan_tag)
        );

        self.request(path).await
    }

    async fn get_league_war(&self, war_tag: &str) -> ClashApiResponse<War> {
        tracing::trace!("[CLASH::CLIENT] get_league_war {}", war_tag);
        let path = format!("{}/clanwarleagues/wars/{}", BASE_URL, encode_tag(war_tag));

        self.request(path).await
    }
}

/// Normalize a tag for use in a URL path: tolerate a missing leading `#`,
/// then percent-encode (`#` becomes `%23`).
fn encode_tag(tag: &str) -> String {
    let bare = tag.trim_start_matches('#');
    format!("%23{}", urlencoding::encode(bare))
}
