// src/specs/mod.rs
//! # Record "specs"
//!
//! Pure readers that turn one payload shape into typed records or normalized
//! strings. Each reader knows where the ground truth lives in one response (an XML
//! `Map` from the API, or an HTML page from the secondary source) and how to read
//! it tolerantly.
//!
//! ## What lives here
//! - Free-text normalization (`division`, `team_id`).
//! - Payload readers (`teams`, `fixtures`, `ranking`, `licences`, `pingpocket`).
//! - Small delimiter parsers that fail with `Error::Parse` instead of slicing blindly
//!   (`fixtures::parse_round`, `fixtures::link_param`).
//!
//! ## What does **not** live here
//! - Network calls, except `ranking::resolve_ranking`, which owns the best-effort
//!   policy for standings and therefore wraps its own call.
//! - Sequencing across endpoints and writing files; that is `scrape::*`.
//!
//! Readers are testable offline against inline fixtures.
pub mod division;
pub mod fixtures;
pub mod licences;
pub mod pingpocket;
pub mod ranking;
pub mod team_id;
pub mod teams;

pub use division::normalize_division;
pub use team_id::extract_team_id;
