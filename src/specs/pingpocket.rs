// src/specs/pingpocket.rs
//! PingPocket HTML pages: the club licence listing and the per-licence detail page.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::html::{attr_value, open_tag, slice_between_ci, tag_blocks, text_of};
use crate::error::Error;

static LICENCE_HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"licencies/(\d+)").expect("valid regex"));
static ICON_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<i\b[^>]*>").expect("valid regex"));

/// Column order of the raw progression table.
pub const PROGRESSION_HEADERS: [&str; 9] = [
    "licence",
    "typeLicence",
    "sex",
    "name",
    "categorie",
    "pointsDebutPhase",
    "pointsMensuels",
    "progressionMensuelle",
    "progressionGenerale",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedLicence {
    pub id: String,
    /// "F" or "H".
    pub sex: String,
}

/// One player's row from the detail page. The last three figures are absent for
/// players without a phase history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    pub licence: String,
    pub licence_type: String,
    pub sex: String,
    pub name: String,
    pub category: String,
    pub phase_start_points: Option<String>,
    pub monthly_points: String,
    pub monthly_progress: Option<String>,
    pub overall_progress: Option<String>,
}

impl Progression {
    pub fn cells(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.licence.clone(),
            self.licence_type.clone(),
            self.sex.clone(),
            self.name.clone(),
            self.category.clone(),
            opt(&self.phase_start_points),
            self.monthly_points.clone(),
            opt(&self.monthly_progress),
            opt(&self.overall_progress),
        ]
    }

    /// Inverse of `cells`, for reloading a saved table. Blank cells become `None`.
    pub fn from_cells(cells: &[String]) -> Result<Self, Error> {
        if cells.len() < PROGRESSION_HEADERS.len() {
            return Err(Error::parse(format!(
                "progression row has {} cells, expected {}",
                cells.len(),
                PROGRESSION_HEADERS.len()
            )));
        }
        let opt = |i: usize| Some(cells[i].clone()).filter(|v| !v.trim().is_empty());
        Ok(Self {
            licence: cells[0].clone(),
            licence_type: cells[1].clone(),
            sex: cells[2].clone(),
            name: cells[3].clone(),
            category: cells[4].clone(),
            phase_start_points: opt(5),
            monthly_points: cells[6].clone(),
            monthly_progress: opt(7),
            overall_progress: opt(8),
        })
    }
}

/* ---------- listing ---------- */

/// `clubs/<club>/licencies?SORT=CATEGORY`: every licence anchor of the `edgetoedge` list.
pub fn parse_listing(html: &str) -> Result<Vec<ListedLicence>, Error> {
    let list = slice_between_ci(html, r#"class="edgetoedge""#, "</ul>")
        .ok_or_else(|| Error::parse("licence listing has no edgetoedge list"))?;

    let mut out = Vec::new();
    for anchor in tag_blocks(list, "<a ", "</a>") {
        let Some(href) = attr_value(open_tag(anchor), "href") else { continue };
        let Some(id) = LICENCE_HREF.captures(href).map(|c| c[1].to_string()) else {
            logd!("Skipping non-licence link {href}");
            continue;
        };
        out.push(ListedLicence { id, sex: s!(icon_sex(anchor)) });
    }
    Ok(out)
}

/// Second class of the icon (`fa fa-female`) decides: female → "F", anything else → "H".
fn icon_sex(anchor: &str) -> &'static str {
    let lc = crate::core::html::to_lower(anchor);
    let second_class = lc
        .find(r#"class="icon""#)
        .and_then(|at| ICON_TAG.find(&anchor[at..]))
        .and_then(|m| attr_value(m.as_str(), "class"))
        .and_then(|classes| classes.split_whitespace().nth(1))
        .map(|c| c.strip_prefix("fa-").unwrap_or(c).to_ascii_lowercase());

    match second_class.as_deref() {
        Some("female") => "F",
        _ => "H",
    }
}

/* ---------- detail ---------- */

/// `licencies/<id>?CLUB_ID=<club>`.
pub fn parse_detail(html: &str, licence: &ListedLicence) -> Result<Progression, Error> {
    let name = slice_between_ci(html, "<h1", "</h1>")
        .map(text_of)
        .ok_or_else(|| Error::parse(format!("licence {}: no name heading", licence.id)))?;

    let info = slice_between_ci(html, r#"class="info border""#, "</div>")
        .ok_or_else(|| Error::parse(format!("licence {}: no info block", licence.id)))?;
    let spans: Vec<String> = tag_blocks(info, "<span", "</span>").into_iter().map(text_of).collect();
    let (Some(category), Some(licence_type)) = (spans.first(), spans.get(4)) else {
        return Err(Error::parse(format!("licence {}: info block has {} spans", licence.id, spans.len())));
    };

    let figures = slice_between_ci(html, r#"class="rounded""#, "</ul>")
        .ok_or_else(|| Error::parse(format!("licence {}: no points list", licence.id)))?;
    let small: Vec<Option<String>> = tag_blocks(figures, "<li", "</li>")
        .into_iter()
        .map(|li| slice_between_ci(li, "<small", "</small>").map(text_of))
        .collect();

    let monthly_points = small
        .get(1)
        .cloned()
        .flatten()
        .ok_or_else(|| Error::parse(format!("licence {}: no monthly points", licence.id)))?;

    // li[2..=4] come together or not at all
    let (phase_start_points, monthly_progress, overall_progress) = match small.get(2).cloned().flatten() {
        Some(start) => (
            Some(start),
            small.get(3).cloned().flatten(),
            small.get(4).cloned().flatten(),
        ),
        None => (None, None, None),
    };

    Ok(Progression {
        licence: licence.id.clone(),
        licence_type: licence_type.clone(),
        sex: licence.sex.clone(),
        name,
        category: category.clone(),
        phase_start_points,
        monthly_points,
        monthly_progress,
        overall_progress,
    })
}
