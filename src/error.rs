use thiserror::Error;

use crate::clash::ClashApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Clash API error: {0}")]
    Clash(#[from] ClashApiError),

    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}
