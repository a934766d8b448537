// src/specs/fixtures.rs
//! Pool fixtures (`xml_rencontre_equ`) and the free-text bits they are keyed by.
//!
//! Entry shape (`liste.tour`):
//! `libelle` ("Poule 3 - tour n°4 du 18/01/2026"), `equa`/`equb` (home/away names),
//! `scorea`/`scoreb`, `dateprevue`/`datereelle`, `ncluba`/`nclubb` (club numbers).

use crate::api::Map;
use crate::error::Error;

pub const ROUND_MARKER: &str = "tour n°";

/// One played or scheduled match, seen from the queried club.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub round: u32,
    pub date: String,
    pub home: String,
    pub away: String,
    pub home_score: String,
    pub away_score: String,
    pub is_home: bool,
}

impl Fixture {
    /// `Ok(None)` when the club plays on neither side.
    pub fn from_entry(entry: &Map, club: &str) -> Result<Option<Self>, Error> {
        let home_club = entry.value("ncluba") == Some(club);
        let away_club = entry.value("nclubb") == Some(club);
        if !home_club && !away_club {
            return Ok(None);
        }

        let round = parse_round(entry.text("libelle").unwrap_or_default())?;
        let date = entry
            .value("datereelle")
            .or_else(|| entry.value("dateprevue"))
            .unwrap_or_default();

        let field = |tag: &str| s!(entry.text(tag).unwrap_or_default().trim());
        Ok(Some(Self {
            round,
            date: s!(date),
            home: field("equa"),
            away: field("equb"),
            home_score: field("scorea"),
            away_score: field("scoreb"),
            is_home: home_club,
        }))
    }

    /// "True"/"False", the spelling the report consumers expect.
    pub fn is_home_cell(&self) -> &'static str {
        if self.is_home { "True" } else { "False" }
    }
}

/// The club's fixtures in a pool, sorted by round. Entries with an unreadable
/// round label are logged and skipped.
pub fn club_fixtures(response: &Map, club: &str) -> Vec<Fixture> {
    let mut out = Vec::new();
    for entry in response.path_all(&["liste", "tour"]).iter().filter_map(|n| n.as_map()) {
        match Fixture::from_entry(entry, club) {
            Ok(Some(f)) => out.push(f),
            Ok(None) => {}
            Err(e) => logw!("Skipping fixture: {e}"),
        }
    }
    sort_by_round(&mut out);
    out
}

/// Numeric round order; "10" comes after "9". Stable for equal rounds.
pub fn sort_by_round(fixtures: &mut [Fixture]) {
    fixtures.sort_by_key(|f| f.round);
}

/// "Poule 3 - tour n°12 du 18/01/2026" → 12.
pub fn parse_round(label: &str) -> Result<u32, Error> {
    let (_, rest) = label
        .split_once(ROUND_MARKER)
        .ok_or_else(|| Error::parse(format!("no {ROUND_MARKER:?} in round label {label:?}")))?;
    let digits: String = rest.trim_start().chars().take_while(char::is_ascii_digit).collect();
    digits
        .parse()
        .map_err(|_| Error::parse(format!("no round number after {ROUND_MARKER:?} in {label:?}")))
}

/// Query parameter `name` of a link such as
/// `cx_poule=1234&D1=5678&organisme_pere=94`.
pub fn link_param(link: &str, name: &str) -> Result<String, Error> {
    link.split(['?', '&'])
        .find_map(|kv| kv.strip_prefix(name)?.strip_prefix('='))
        .map(|v| s!(v))
        .ok_or_else(|| Error::parse(format!("no {name}= parameter in {link:?}")))
}
