// src/scrape/players.rs
//! Club player list enriched with each player's detail sheet.

use std::error::Error as StdError;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::api::{Fftt, Map};
use crate::config::RunOptions;
use crate::error::Error;
use crate::file::timestamped_name;
use crate::progress::Progress;
use crate::specs::licences::{get, player_records, Record};
use crate::store::DataSet;

pub const PLAYER_HEADERS: [&str; 10] = [
    "licence", "prenom", "nom", "categ", "natio", "point", "aclglob", "apoint", "valcla", "valinit",
];

/// Columns taken from `xml_joueur` when the detail call succeeds.
const DETAIL_FIELDS: [&str; 7] = ["categ", "natio", "point", "aclglob", "apoint", "valcla", "valinit"];

/// One `liste.joueur` row; detail columns stay empty until filled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Player {
    pub licence: String,
    pub prenom: String,
    pub nom: String,
    pub detail: Vec<String>,
}

impl Player {
    fn from_record(rec: &Record) -> Self {
        let field = |tag: &str| s!(get(rec, tag).unwrap_or_default().trim());
        Self {
            licence: field("licence"),
            prenom: field("prenom"),
            nom: field("nom"),
            detail: vec![s!(); DETAIL_FIELDS.len()],
        }
    }

    /// Copy detail fields from an `xml_joueur` answer. An answer without a
    /// `liste.joueur` entry leaves the player unchanged.
    fn enrich(&mut self, detail: &Map) {
        let Some(entry) = detail.path(&["liste", "joueur"]).and_then(|n| n.as_map()) else {
            return;
        };
        for (slot, tag) in self.detail.iter_mut().zip(DETAIL_FIELDS) {
            *slot = s!(entry.text(tag).unwrap_or_default().trim());
        }
    }

    fn row(&self) -> Vec<String> {
        let mut row = cols![&self.licence, &self.prenom, &self.nom];
        row.extend(self.detail.iter().cloned());
        row
    }
}

/// List the club's players, then fetch each one's detail. A failed detail call is
/// logged and the player keeps the list fields. The list call itself must succeed.
pub fn collect_players<A: Fftt + ?Sized>(
    api: &A,
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Player>, Error> {
    let list = api.club_players(&opts.club)?;
    let mut players: Vec<Player> = player_records(&list).iter().map(Player::from_record).collect();
    logf!("{} players in club {}", players.len(), opts.club);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(players.len());
    }

    for player in &mut players {
        let label = format!("{} {}", player.prenom, player.nom);
        match api.player(&player.licence) {
            Ok(detail) => {
                player.enrich(&detail);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&label);
                }
            }
            Err(e) => {
                logw!("Failed to get details for {label}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&label, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(players)
}

pub fn to_rows(players: &[Player]) -> DataSet {
    let mut out = DataSet::new(PLAYER_HEADERS.iter().map(|h| s!(*h)).collect());
    for p in players {
        out.push(p.row());
    }
    out
}

/// Write `players_<club>_<YYYYMMDD_HHMMSS>.csv` under the output directory.
pub fn run<A: Fftt + ?Sized>(
    api: &A,
    opts: &RunOptions,
    now: DateTime<Local>,
    progress: Option<&mut dyn Progress>,
) -> Result<PathBuf, Box<dyn StdError>> {
    let players = collect_players(api, opts, progress)?;
    let path = opts.out_dir.join(timestamped_name(&format!("players_{}", opts.club), now));
    let rows = to_rows(&players);
    rows.save(&path)?;
    logf!("{} players → {}", rows.len(), path.display());
    Ok(path)
}
