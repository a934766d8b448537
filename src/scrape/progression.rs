// src/scrape/progression.rs
//! PingPocket monthly progression: scrape every licence page of the club, keep the
//! raw table, then split competitors by category × sex into one CSV per segment.

use std::cmp::Ordering;
use std::error::Error as StdError;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{PINGPOCKET_BASE_URL, REQUEST_PAUSE_MS};
use crate::config::RunOptions;
use crate::core::net;
use crate::error::Error;
use crate::file::write_segments;
use crate::progress::Progress;
use crate::specs::pingpocket::{parse_detail, parse_listing, Progression, PROGRESSION_HEADERS};
use crate::store::DataSet;

/// Licence type of competitors on PingPocket.
pub const COMPETITOR_TYPE: &str = "C";

/// (category substring, segment name). The empty substring matches everyone.
pub const SEGMENTS: [(&str, &str); 8] = [
    ("", "All"),
    ("Poussin", "Poussin"),
    ("Benjamin", "Benjamin"),
    ("Minime", "Minime"),
    ("Cadet", "Cadet"),
    ("Junior", "Junior"),
    ("Sénior", "Senior"),
    ("Vétéran", "Veteran"),
];
pub const SEXES: [&str; 2] = ["F", "H"];

/// Where HTML pages come from; paths are relative to the site root.
pub trait PageSource {
    fn page(&self, path: &str) -> Result<String, Error>;

    /// Called between two requests.
    fn pause(&self) {}
}

pub struct PingPocket {
    http: Client,
    base_url: String,
    pause: Duration,
}

impl PingPocket {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            http: net::client()?,
            base_url: s!(PINGPOCKET_BASE_URL),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
        })
    }
}

impl PageSource for PingPocket {
    fn page(&self, path: &str) -> Result<String, Error> {
        let url = join!(&self.base_url, path);
        net::get_text(&self.http, &url, &[], &[("X-Requested-With", "XMLHttpRequest")], "utf-8")
    }

    fn pause(&self) {
        thread::sleep(self.pause);
    }
}

/// Listing page, then one detail page per licence. Fetch errors abort; a detail
/// page that does not parse is logged and skipped.
pub fn collect_progression<S: PageSource + ?Sized>(
    src: &S,
    club: &str,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Progression>, Error> {
    let listing = parse_listing(&src.page(&format!("clubs/{club}/licencies?SORT=CATEGORY"))?)?;
    logf!("{} licences listed for club {club}", listing.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(listing.len());
    }

    let mut out = Vec::with_capacity(listing.len());
    for who in &listing {
        src.pause();
        let html = src.page(&format!("licencies/{}?CLUB_ID={club}", who.id))?;
        match parse_detail(&html, who) {
            Ok(record) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&record.name);
                }
                out.push(record);
            }
            Err(e) => {
                logw!("{e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&who.id, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

pub fn to_table(records: &[Progression]) -> DataSet {
    let mut out = DataSet::new(PROGRESSION_HEADERS.iter().map(|h| s!(*h)).collect());
    for r in records {
        out.push(r.cells());
    }
    out
}

pub fn from_table(table: &DataSet) -> Result<Vec<Progression>, Error> {
    if table.headers.iter().map(String::as_str).ne(PROGRESSION_HEADERS) {
        return Err(Error::parse(format!("unexpected progression headers {:?}", table.headers)));
    }
    table.rows.iter().map(|r| Progression::from_cells(r)).collect()
}

/* ---------- segmentation ---------- */

/// "x" means no progression yet.
fn zero_if_x(v: &mut Option<String>) {
    if v.as_deref().map(str::trim) == Some("x") {
        *v = Some(s!("0"));
    }
}

/// Sort value of a progression cell ("+12", "-3.5"); unreadable or blank sorts last.
fn progress_value(v: Option<&str>) -> f64 {
    v.map(|s| s.trim().trim_start_matches('+'))
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NEG_INFINITY)
}

/// Competitors only, "x" → "0", best monthly progression first.
pub fn competitors(records: &[Progression]) -> Vec<Progression> {
    let mut out: Vec<Progression> = records
        .iter()
        .filter(|r| r.licence_type == COMPETITOR_TYPE)
        .cloned()
        .map(|mut r| {
            zero_if_x(&mut r.monthly_progress);
            zero_if_x(&mut r.overall_progress);
            r
        })
        .collect();
    out.sort_by(|a, b| {
        let (a, b) = (progress_value(a.monthly_progress.as_deref()), progress_value(b.monthly_progress.as_deref()));
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    out
}

/// `("<segment> <sex>", table)` for every segment × sex, without the type and sex columns.
pub fn segments(competitors: &[Progression]) -> Vec<(String, DataSet)> {
    let table = to_table(competitors);
    let (Some(cat), Some(sex)) = (table.column("categorie"), table.column("sex")) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(SEGMENTS.len() * SEXES.len());
    for (needle, name) in SEGMENTS {
        for wanted in SEXES {
            let seg = table.select(&["typeLicence", "sex"], |row| row[cat].contains(needle) && row[sex] == wanted);
            out.push((format!("{name} {wanted}"), seg));
        }
    }
    out
}

/// Fetch (or with `offline`, reload `progression_<club>.csv`), then write the
/// segment files under `progression_<club>/`.
pub fn run<S: PageSource + ?Sized>(
    src: &S,
    opts: &RunOptions,
    offline: bool,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<PathBuf>, Box<dyn StdError>> {
    let raw_path = opts.club_file("progression");
    let records = if offline {
        logf!("Offline: reading {}", raw_path.display());
        from_table(&DataSet::load(&raw_path)?)?
    } else {
        let records = collect_progression(src, &opts.club, progress)?;
        to_table(&records).save(&raw_path)?;
        records
    };

    let comps = competitors(&records);
    logf!("{}/{} competitors", comps.len(), records.len());

    let segs = segments(&comps);
    for (name, seg) in &segs {
        let top: Vec<&str> = seg.rows.iter().take(3).filter_map(|r| seg.get(r, "name")).collect();
        logd!("{name}: {} players, top {top:?}", seg.len());
    }

    let dir = opts.out_dir.join(format!("progression_{}", opts.club));
    Ok(write_segments(&dir, &segs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, ty: &str, sex: &str, cat: &str, monthly: Option<&str>) -> Progression {
        Progression {
            licence: s!(id),
            licence_type: s!(ty),
            sex: s!(sex),
            name: format!("P{id}"),
            category: s!(cat),
            monthly_points: s!("500"),
            monthly_progress: monthly.map(String::from),
            ..Progression::default()
        }
    }

    #[test]
    fn competitors_sorted_by_monthly_progress() {
        let got = competitors(&[
            rec("1", "C", "H", "Junior 1", Some("+5")),
            rec("2", "L", "H", "Junior 1", Some("+50")),
            rec("3", "C", "F", "Sénior", Some("x")),
            rec("4", "C", "H", "Vétéran 1", Some("+12")),
            rec("5", "C", "H", "Cadet 2", None),
            rec("6", "C", "H", "Minime 1", Some("-3")),
        ]);
        let ids: Vec<_> = got.iter().map(|r| r.licence.as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "3", "6", "5"]);
        assert_eq!(got[2].monthly_progress.as_deref(), Some("0"));
    }

    #[test]
    fn segments_split_by_category_and_sex() {
        let comps = competitors(&[
            rec("1", "C", "H", "Junior 1", Some("1")),
            rec("2", "C", "F", "Junior 2", Some("2")),
            rec("3", "C", "F", "Sénior", Some("3")),
        ]);
        let segs = segments(&comps);
        assert_eq!(segs.len(), 16);
        assert_eq!(segs[0].0, "All F");
        assert_eq!(segs[0].1.len(), 2);
        assert!(!segs[0].1.headers.iter().any(|h| h == "sex" || h == "typeLicence"));

        let by_name = |n: &str| segs.iter().find(|(name, _)| name == n).map(|(_, t)| t.len());
        assert_eq!(by_name("Junior H"), Some(1));
        assert_eq!(by_name("Junior F"), Some(1));
        assert_eq!(by_name("Senior F"), Some(1));
        assert_eq!(by_name("Veteran H"), Some(0));
    }
}
