// src/scrape/licences.rs
//! Club licences → `licenses_<club>.csv`; competitive licences with their game
//! counts → `competitors_<club>.csv`. Both are merged into any previous run's file.

use std::error::Error as StdError;

use chrono::NaiveDate;

use crate::api::Fftt;
use crate::config::consts::LICENCE_KEY;
use crate::config::RunOptions;
use crate::progress::Progress;
use crate::specs::licences::{
    count_games_before_month, drop_columns, get, licence_records, month_label, set, take, Record,
    COMPETITIVE_TYPE,
};
use crate::store::{merge_and_write, DataSet};

pub const LICENCE_COLUMNS: [&str; 13] = [
    "idlicence", "licence", "sexe", "cat", "prenom", "nom", "certif",
    "type", "validation", "mutation", "arb", "ja", "tech",
];

/// Club and ranking fields left out of the licences file.
const LICENCE_DROPPED: [&str; 9] = [
    "numclub", "nomclub", "echelon", "place", "point", "pointm", "apointm", "initm", "natio",
];

/// Administrative fields left out of the competitors file.
const COMPETITOR_DROPPED: [&str; 12] = [
    "numclub", "nomclub", "type", "certif", "validation", "echelon",
    "place", "mutation", "natio", "arb", "ja", "tech",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LicenceCounts {
    /// Licences returned by the API for this run.
    pub fetched: usize,
    /// Rows in the licences file after the merge.
    pub licences: usize,
    /// Rows in the competitors file after the merge; 0 when nothing was written.
    pub competitors: usize,
}

/// `idlicence, licence, sexe, cat, prenom, nom, point, parties, <month-1>, <month-2>`
pub fn competitor_columns(today: NaiveDate) -> Vec<String> {
    let mut cols = cols!["idlicence", "licence", "sexe", "cat", "prenom", "nom", "point", "parties"];
    cols.push(month_label(-1, today));
    cols.push(month_label(-2, today));
    cols
}

pub fn licence_row(mut rec: Record) -> Record {
    drop_columns(&mut rec, &LICENCE_DROPPED);
    rec
}

/// Trimmed record plus `parties`; `pointm`/`apointm` move to the end under the
/// names of the previous two months.
pub fn competitor_row(mut rec: Record, games: usize, today: NaiveDate) -> Record {
    drop_columns(&mut rec, &COMPETITOR_DROPPED);
    let last = take(&mut rec, "pointm").unwrap_or_default();
    let before = take(&mut rec, "apointm").unwrap_or_default();
    set(&mut rec, "parties", games.to_string());
    set(&mut rec, &month_label(-1, today), last);
    set(&mut rec, &month_label(-2, today), before);
    rec
}

pub fn run<A: Fftt + ?Sized>(
    api: &A,
    opts: &RunOptions,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> Result<LicenceCounts, Box<dyn StdError>> {
    let records = licence_records(&api.club_licences(&opts.club)?);
    if records.is_empty() {
        logw!("No licences for club {}", opts.club);
        return Ok(LicenceCounts::default());
    }

    let fetched = records.len();
    let path = opts.club_file("licenses");
    let table = DataSet::from_records(records.iter().cloned().map(licence_row));
    let licences = merge_and_write(&table, &path, LICENCE_KEY, &LICENCE_COLUMNS)?;

    let competitors: Vec<Record> = records
        .into_iter()
        .filter(|r| get(r, "type") == Some(COMPETITIVE_TYPE))
        .collect();
    logf!("{}/{} competitors (type {COMPETITIVE_TYPE})", competitors.len(), fetched);

    if competitors.is_empty() {
        return Ok(LicenceCounts { fetched, licences, competitors: 0 });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(competitors.len());
    }

    let mut rows = Vec::with_capacity(competitors.len());
    for rec in competitors {
        let licence = get(&rec, "licence").unwrap_or_default().to_string();
        let games = count_games_before_month(&api.player_games(&licence)?, today);
        logd!("{licence}: {games} games");
        rows.push(competitor_row(rec, games, today));
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&licence);
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let declared = competitor_columns(today);
    let declared: Vec<&str> = declared.iter().map(String::as_str).collect();
    let competitors = merge_and_write(
        &DataSet::from_records(rows),
        &opts.club_file("competitors"),
        LICENCE_KEY,
        &declared,
    )?;

    Ok(LicenceCounts { fetched, licences, competitors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
    }

    #[test]
    fn competitor_row_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let row = competitor_row(
            rec(&[
                ("idlicence", "42"), ("licence", "9412345"), ("nom", "DUPONT"), ("numclub", "08940073"),
                ("type", "T"), ("point", "912"), ("pointm", "905"), ("apointm", "880"),
            ]),
            7,
            today,
        );
        assert_eq!(
            row,
            rec(&[
                ("idlicence", "42"), ("licence", "9412345"), ("nom", "DUPONT"), ("point", "912"),
                ("parties", "7"), ("Sep", "905"), ("Aug", "880"),
            ])
        );
    }

    #[test]
    fn licence_row_drops_ranking_fields() {
        let row = licence_row(rec(&[("idlicence", "1"), ("point", "500"), ("type", "T"), ("natio", "F")]));
        assert_eq!(row, rec(&[("idlicence", "1"), ("type", "T")]));
    }
}
