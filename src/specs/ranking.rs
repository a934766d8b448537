// src/specs/ranking.rs
//! A team's line in its pool standings.
//!
//! Ranking is enrichment: when the standings call fails, the payload is empty or
//! odd, or the team is not listed, the caller gets `Ranking::default()` and a log
//! line. Nothing here returns an error.

use crate::api::{Fftt, Map};

pub const NOT_AVAILABLE: &str = "N/A";
const ZERO: &str = "0";

/// Standings fields, kept as text the way the API sends them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    pub rang: String,
    pub points: String,
    pub joues: String,
    pub victoires: String,
    pub nuls: String,
    pub defaites: String,
    pub forfaits: String,
}

impl Default for Ranking {
    fn default() -> Self {
        Self {
            rang: s!(NOT_AVAILABLE),
            points: s!(NOT_AVAILABLE),
            joues: s!(ZERO),
            victoires: s!(ZERO),
            nuls: s!(ZERO),
            defaites: s!(ZERO),
            forfaits: s!(ZERO),
        }
    }
}

impl Ranking {
    /// One `classement` entry. Missing counters read as "0", missing rank/points as "N/A".
    pub fn from_entry(entry: &Map) -> Self {
        let or = |tag: &str, dflt: &str| s!(entry.value(tag).unwrap_or(dflt));
        Self {
            rang: or("rang", NOT_AVAILABLE),
            points: or("pts", NOT_AVAILABLE),
            joues: or("J", ZERO),
            victoires: or("V", ZERO),
            nuls: or("N", ZERO),
            defaites: or("D", ZERO),
            forfaits: or("F", ZERO),
        }
    }

    /// Output order: rang, points, joues, victoires, nuls, defaites, forfaits.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.rang.as_str(), self.points.as_str(), self.joues.as_str(), self.victoires.as_str(),
            self.nuls.as_str(), self.defaites.as_str(), self.forfaits.as_str(),
        ]
    }
}

/// Scan `liste.classement` for `team_name` (exact match on `equipe`).
/// A single entry and a list of one read the same.
pub fn find_ranking(standings: &Map, team_name: &str) -> Option<Ranking> {
    standings
        .path_all(&["liste", "classement"])
        .iter()
        .filter_map(|n| n.as_map())
        .find(|entry| entry.text("equipe") == Some(team_name))
        .map(Ranking::from_entry)
}

/// Fetch the pool standings and pick `team_name`; defaults on any failure.
pub fn resolve_ranking<A: Fftt + ?Sized>(api: &A, division: &str, pool: &str, team_name: &str) -> Ranking {
    match api.pool_standings(division, pool) {
        Ok(standings) => find_ranking(&standings, team_name).unwrap_or_else(|| {
            logw!("No standings line for {team_name:?} in pool {pool}");
            Ranking::default()
        }),
        Err(e) => {
            loge!("Standings lookup failed for pool {pool}: {e}");
            Ranking::default()
        }
    }
}
