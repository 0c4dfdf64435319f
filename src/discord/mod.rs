mod bot;
pub mod commands;
pub mod embeds;

pub use bot::{create_framework, Context, Data};
