// src/specs/division.rs
//! Free-text division labels → short codes (`N2`, `R3`, `PR`, `PN`, `D1`).
//!
//! Rules are tried in order and the first hit wins. Labels no rule recognizes
//! come back unchanged. Only the `PR`/`PN` prefix checks look at the trimmed label;
//! the pattern searches run on the raw text.

use std::sync::LazyLock;

use regex::Regex;

static NATIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Nationale\s*(\d)").expect("valid regex"));
static REGIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|_)R(\d)").expect("valid regex"));
static DEPARTMENTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"D(\d) (?:Masculine|Feminine)").expect("valid regex"));

const PRE_REGIONAL_MARKERS: [&str; 2] = ["Pre-Reg.", "Pré-Rég."];
const PRE_REGIONAL: &str = "PR";
const PRE_NATIONAL: &str = "PN";

pub fn normalize_division(label: &str) -> String {
    if let Some(c) = NATIONAL.captures(label) {
        return join!("N", &c[1]);
    }
    if let Some(c) = REGIONAL.captures(label) {
        return join!("R", &c[1]);
    }

    let trimmed = label.trim();
    if PRE_REGIONAL_MARKERS.iter().any(|m| label.contains(m)) || trimmed.starts_with(PRE_REGIONAL) {
        return s!(PRE_REGIONAL);
    }
    if label.contains(PRE_NATIONAL) || trimmed.starts_with(PRE_NATIONAL) {
        return s!(PRE_NATIONAL);
    }

    if let Some(c) = DEPARTMENTAL.captures(label) {
        return join!("D", &c[1]);
    }
    s!(label)
}
