use std::env;
use std::num::NonZeroU32;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub clash_api_token: String,
    /// When set, slash commands are registered to this guild only instead of globally.
    pub guild_id: Option<u64>,
    pub clash_rate_limit_per_second: NonZeroU32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_CLASH_RATE_LIMIT_PER_SECOND: u32 = 10;

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let clash_api_token = env::var("CLASH_API_TOKEN")
            .map_err(|_| AppError::Config("CLASH_API_TOKEN must be set".into()))?;

        let guild_id = env::var("DISCORD_GUILD_ID")
            .ok()
            .and_then(|v| v.parse().ok());

        let clash_rate_limit_per_second = env::var("CLASH_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_CLASH_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        Ok(Self {
            discord_token,
            clash_api_token,
            guild_id,
            clash_rate_limit_per_second,
        })
    }
}
