// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// Per-run knobs shared by every pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Club number as the federation writes it (leading zeros kept).
    pub club: String,
    pub out_dir: PathBuf,
    /// Substring a team's competition label must contain to be reconciled.
    pub competition: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            club: s!(DEFAULT_CLUB),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            competition: s!(TEAM_COMPETITION),
        }
    }
}

impl RunOptions {
    pub fn for_club(club: &str) -> Self {
        Self { club: s!(club), ..Self::default() }
    }

    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }

    /// "<out_dir>/<stem>.csv"
    pub fn out_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(join!(stem, ".", CSV_EXT))
    }

    /// "<out_dir>/<prefix>_<club>.csv"
    pub fn club_file(&self, prefix: &str) -> PathBuf {
        self.out_path(&format!("{prefix}_{}", self.club))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_file_joins_prefix_and_club() {
        let opts = RunOptions::for_club("02210081").with_out_dir("reports");
        assert_eq!(opts.club_file("teams"), PathBuf::from("reports").join("teams_02210081.csv"));
    }
}
