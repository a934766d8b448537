// src/scrape/teams.rs
//! Team reconciliation: club teams × pool standings × pool fixtures → one row per
//! (team, match).

use std::error::Error as StdError;
use std::path::PathBuf;

use crate::api::Fftt;
use crate::config::RunOptions;
use crate::error::Error;
use crate::progress::Progress;
use crate::specs::fixtures::{club_fixtures, link_param, Fixture};
use crate::specs::ranking::{resolve_ranking, Ranking};
use crate::specs::teams::{club_teams, TeamEntry};
use crate::specs::{extract_team_id, normalize_division};
use crate::store::DataSet;

pub const TEAM_HEADERS: [&str; 18] = [
    "team_id",
    "team_name",
    "division",
    "phase",
    "rang",
    "points",
    "joues",
    "victoires",
    "nuls",
    "defaites",
    "forfaits",
    "tour",
    "date",
    "equipe_domicile",
    "equipe_exterieur",
    "score_domicile",
    "score_exterieur",
    "is_home",
];

/// A reconciled team, frozen once its fixtures are in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamReport {
    pub team_id: Option<String>,
    pub name: String,
    /// Raw label; normalized when rows are emitted.
    pub division: String,
    pub phase: String,
    pub pool: String,
    pub ranking: Ranking,
    pub fixtures: Vec<Fixture>,
}

struct TeamBuilder {
    entry: TeamEntry,
    pool: String,
    ranking: Ranking,
    fixtures: Vec<Fixture>,
}

impl TeamBuilder {
    fn new(entry: TeamEntry, pool: String) -> Self {
        Self { entry, pool, ranking: Ranking::default(), fixtures: Vec::new() }
    }

    fn ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    /// Already in round order (`club_fixtures` sorts them).
    fn fixtures(mut self, fixtures: Vec<Fixture>) -> Self {
        self.fixtures = fixtures;
        self
    }

    fn build(self) -> TeamReport {
        let Self { entry, pool, ranking, fixtures } = self;
        TeamReport {
            team_id: extract_team_id(&entry.name, &entry.division),
            name: entry.name,
            division: entry.division,
            phase: entry.phase,
            pool,
            ranking,
            fixtures,
        }
    }
}

/// Reconcile every team of `opts.club` entered in `opts.competition`.
///
/// Transport and XML errors on the team list or a fixture list abort the run.
/// Standings failures degrade to the default ranking. A team whose division link
/// carries no pool is skipped.
pub fn collect_teams<A: Fftt + ?Sized>(
    api: &A,
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<TeamReport>, Error> {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching teams of club {}…", opts.club));
    }
    let all = club_teams(&api.club_teams(&opts.club)?);
    let teams: Vec<TeamEntry> = all.iter().filter(|t| t.in_competition(&opts.competition)).cloned().collect();
    logf!("{} teams found, {} in {:?}", all.len(), teams.len(), opts.competition);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(teams.len());
    }

    let mut reports = Vec::with_capacity(teams.len());
    for entry in teams {
        let pool = match link_param(&entry.division_link, "cx_poule") {
            Ok(pool) => pool,
            Err(e) => {
                logw!("{}: {e}; skipping team", entry.name);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&entry.name, "no pool in division link");
                }
                continue;
            }
        };

        let ranking = match link_param(&entry.division_link, "D1") {
            Ok(division) => resolve_ranking(api, &division, &pool, &entry.name),
            Err(e) => {
                logw!("{}: {e}; using default ranking", entry.name);
                Ranking::default()
            }
        };

        let fixtures = club_fixtures(&api.pool_fixtures(&pool)?, &opts.club);
        logd!("{}: pool {pool}, {} fixtures", entry.name, fixtures.len());

        let label = entry.name.clone();
        reports.push(TeamBuilder::new(entry, pool).ranking(ranking).fixtures(fixtures).build());

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&label);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(reports)
}

/// One row per (team, fixture); teams without fixtures contribute nothing.
pub fn to_rows(reports: &[TeamReport]) -> DataSet {
    let mut out = DataSet::new(TEAM_HEADERS.iter().map(|h| s!(*h)).collect());
    for team in reports {
        let division = normalize_division(&team.division);
        let team_id = team.team_id.clone().unwrap_or_default();
        for fx in &team.fixtures {
            let mut row = cols![&team_id, &team.name, &division, &team.phase];
            row.extend(team.ranking.cells().iter().map(|c| s!(*c)));
            row.extend(cols![
                fx.round.to_string(),
                &fx.date,
                &fx.home,
                &fx.away,
                &fx.home_score,
                &fx.away_score,
                fx.is_home_cell(),
            ]);
            out.push(row);
        }
    }
    out
}

/// Collect, then write `teams_<club>.csv`. Nothing is written if collection fails.
pub fn run<A: Fftt + ?Sized>(
    api: &A,
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<PathBuf, Box<dyn StdError>> {
    let reports = collect_teams(api, opts, progress)?;
    let rows = to_rows(&reports);
    let path = opts.club_file("teams");
    rows.save(&path)?;
    logf!("{} rows for {} teams → {}", rows.len(), reports.len(), path.display());
    Ok(path)
}
