//! Discord bot relaying Clash of Clans clan war status into channel embeds.

pub mod clash;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod war;
