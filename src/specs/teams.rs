// src/specs/teams.rs
//! Club team list (`xml_equipe`, `liste.equipe`).

use crate::api::Map;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamEntry {
    /// `libequipe`, e.g. "US FONTENAY TT 1 - Phase 1"
    pub name: String,
    /// `libdivision`, raw
    pub division: String,
    /// `liendivision`: query string carrying `cx_poule` and `D1`
    pub division_link: String,
    /// `libepr`, e.g. "FED_Championnat de France par Equipes Masculin"
    pub competition: String,
    pub phase: String,
}

impl TeamEntry {
    pub fn from_entry(entry: &Map) -> Self {
        let field = |tag: &str| s!(entry.text(tag).unwrap_or_default().trim());
        Self {
            name: field("libequipe"),
            division: field("libdivision"),
            division_link: field("liendivision"),
            competition: field("libepr"),
            phase: field("phase"),
        }
    }

    pub fn in_competition(&self, filter: &str) -> bool {
        self.competition.contains(filter)
    }
}

pub fn club_teams(response: &Map) -> Vec<TeamEntry> {
    response
        .path_all(&["liste", "equipe"])
        .iter()
        .filter_map(|n| n.as_map())
        .map(TeamEntry::from_entry)
        .collect()
}
