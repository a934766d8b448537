// src/specs/licences.rs
//! Licence lists (`xml_licence_b`), player lists (`xml_liste_joueur`, `xml_joueur`)
//! and game history (`xml_partie_mysql`), read as flat (tag, text) records.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::api::Map;

/// Ordered (column, value) pairs, one per leaf of an entry.
pub type Record = Vec<(String, String)>;

/// Licence type of players entered in competitions.
pub const COMPETITIVE_TYPE: &str = "T";

pub fn licence_records(response: &Map) -> Vec<Record> {
    records_at(response, &["liste", "licence"])
}

pub fn player_records(response: &Map) -> Vec<Record> {
    records_at(response, &["liste", "joueur"])
}

fn records_at(response: &Map, path: &[&str]) -> Vec<Record> {
    response
        .path_all(path)
        .iter()
        .filter_map(|n| n.as_map())
        .map(Map::leaves)
        .collect()
}

pub fn get<'a>(record: &'a Record, column: &str) -> Option<&'a str> {
    record.iter().find(|(k, _)| k == column).map(|(_, v)| v.as_str())
}

pub fn drop_columns(record: &mut Record, columns: &[&str]) {
    record.retain(|(k, _)| !columns.contains(&k.as_str()));
}

/// Remove a column, returning its value.
pub fn take(record: &mut Record, column: &str) -> Option<String> {
    let at = record.iter().position(|(k, _)| k == column)?;
    Some(record.remove(at).1)
}

pub fn set(record: &mut Record, column: &str, value: String) {
    match record.iter_mut().find(|(k, _)| k == column) {
        Some((_, v)) => *v = value,
        None => record.push((s!(column), value)),
    }
}

/// Games in `xml_partie_mysql` played outside `today`'s calendar month.
/// A blank `liste` (no games) counts 0. Dates that do not parse are counted.
pub fn count_games_before_month(response: &Map, today: NaiveDate) -> usize {
    let Some(liste) = response.node("liste") else { return 0 };
    if liste.is_blank() {
        return 0;
    }
    let Some(liste) = liste.as_map() else { return 0 };

    liste
        .maps("partie")
        .filter(|game| {
            let raw = game.value("date").unwrap_or_default();
            match NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
                Ok(d) => d.month() != today.month() || d.year() != today.year(),
                Err(_) => {
                    logw!("Unreadable game date {raw:?}; counting it");
                    true
                }
            }
        })
        .count()
}

/// Abbreviated month name `offset` months from `today` (approximated as 30-day
/// steps from the first of the month): -1 → last month.
pub fn month_label(offset: i64, today: NaiveDate) -> String {
    let first = today - TimeDelta::days(i64::from(today.day0()));
    (first + TimeDelta::days(offset * 30)).format("%b").to_string()
}
