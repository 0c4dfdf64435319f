//! War aggregation: side resolution, current-war selection, CWL seasons.

pub mod current;
pub mod season;
pub mod side;

pub use current::current_war_view;
pub use season::CwlSeason;
