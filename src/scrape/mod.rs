// src/scrape/mod.rs
pub mod teams;
pub mod licences;
pub mod players;
pub mod progression;

pub use teams::{collect_teams, TeamReport};
pub use players::collect_players;
pub use progression::{collect_progression, PageSource, PingPocket};
