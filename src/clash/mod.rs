pub mod client;
pub mod types;

pub use client::{ClashApiError, ClashApiResponse, ClashClient, WarApi};
