// src/cli.rs
use std::error::Error;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};

use crate::api::{ApiClient, Map, Node};
use crate::config::consts::{DEFAULT_CLUB, DEFAULT_OUT_DIR, TEAM_COMPETITION};
use crate::config::{Credentials, RunOptions};
use crate::progress::Progress;
use crate::scrape::{self, PingPocket};

#[derive(Parser, Debug)]
#[command(name = "fftt_scrape", version, about = "FFTT club, player and team reports")]
pub struct Cli {
    /// Club number, leading zeros included
    #[arg(long, global = true, default_value = DEFAULT_CLUB)]
    pub club: String,

    /// Output directory
    #[arg(short, long, global = true, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Competition label filter for `teams`
    #[arg(long, global = true, default_value = TEAM_COMPETITION)]
    pub competition: String,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Teams × standings × fixtures → teams_<club>.csv
    Teams,
    /// Licences and competitors, merged into licenses_<club>.csv / competitors_<club>.csv
    Licences,
    /// Player list with details → players_<club>_<timestamp>.csv
    Players,
    /// PingPocket monthly progression, one CSV per category × sex
    Progression {
        /// Reuse progression_<club>.csv instead of scraping
        #[arg(long)]
        offline: bool,
    },
    /// Call any endpoint and print the decoded answer
    Call {
        /// `xml_*` endpoint name or one of its short names (club_detail, joueur_detail, ...)
        endpoint: String,
        /// key=value query parameters
        params: Vec<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            club: self.club.clone(),
            out_dir: self.out.clone(),
            competition: self.competition.clone(),
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);
    dispatch(&cli)
}

pub fn dispatch(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let opts = cli.run_options();
    let mut console = Console::default();

    match &cli.command {
        Command::Teams => {
            let api = api_client()?;
            let path = scrape::teams::run(&api, &opts, Some(&mut console))?;
            println!("{}", path.display());
        }
        Command::Licences => {
            let api = api_client()?;
            let today = Local::now().date_naive();
            let counts = scrape::licences::run(&api, &opts, today, Some(&mut console))?;
            println!("{} licences, {} competitors", counts.licences, counts.competitors);
        }
        Command::Players => {
            let api = api_client()?;
            let path = scrape::players::run(&api, &opts, Local::now(), Some(&mut console))?;
            println!("{}", path.display());
        }
        Command::Progression { offline } => {
            let src = PingPocket::new()?;
            for path in scrape::progression::run(&src, &opts, *offline, Some(&mut console))? {
                println!("{}", path.display());
            }
        }
        Command::Call { endpoint, params, json } => {
            let api = api_client()?;
            let pairs = parse_params(params);
            let query: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let answer = crate::api::Fftt::get(&api, resolve_endpoint(endpoint), &query)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&answer.to_json())?);
            } else {
                print_tree(&answer, "");
            }
        }
    }
    Ok(())
}

/// Credentials are read only by commands that hit the API.
fn api_client() -> Result<ApiClient, Box<dyn Error>> {
    let creds = Credentials::from_env()?;
    logd!("{creds:?}");
    Ok(ApiClient::new(creds)?)
}

/* ---------- call helpers ---------- */

/// Short names → endpoint. Anything else is passed through unchanged.
const ENDPOINT_ALIASES: [(&str, &str); 13] = [
    ("initialisation", "xml_initialisation"),
    ("club_dep", "xml_club_dep2"),
    ("club_recherche", "xml_club_b"),
    ("club_detail", "xml_club_detail"),
    ("list_joueurs_club", "xml_liste_joueur"),
    ("licences_club", "xml_licence_b"),
    ("joueur_detail", "xml_joueur"),
    ("licence_detail", "xml_licence"),
    ("historique_classement", "xml_histo_classement"),
    ("parties_joueur", "xml_partie_mysql"),
    ("parties_spid", "xml_partie"),
    ("equipes_club", "xml_equipe"),
    ("rencontre_equipes", "xml_rencontre_equ"),
];

pub fn resolve_endpoint(name: &str) -> &str {
    ENDPOINT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, endpoint)| *endpoint)
        .unwrap_or(name)
}

/// `key=value` pairs; arguments without `=` are ignored with a warning.
pub fn parse_params(args: &[String]) -> Vec<(String, String)> {
    args.iter()
        .filter_map(|a| match a.split_once('=') {
            Some((k, v)) => Some((s!(k), s!(v))),
            None => {
                logw!("Ignoring parameter without '=': {a}");
                None
            }
        })
        .collect()
}

fn print_tree(map: &Map, prefix: &str) {
    for (tag, field) in map.iter() {
        let many = field.as_slice().len() > 1;
        for (i, node) in field.as_slice().iter().enumerate() {
            let path = match (prefix.is_empty(), many) {
                (true, false) => s!(tag),
                (true, true) => format!("{tag}[{i}]"),
                (false, false) => format!("{prefix}.{tag}"),
                (false, true) => format!("{prefix}.{tag}[{i}]"),
            };
            match node {
                Node::Text(t) => println!("{path} = {}", t.trim()),
                Node::Map(m) => print_tree(m, &path),
            }
        }
    }
}

/* ---------- console progress ---------- */

#[derive(Default)]
struct Console {
    total: usize,
    done: usize,
}

impl Progress for Console {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}", self.done, self.total);
    }

    fn item_failed(&mut self, label: &str, reason: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}: {reason}", self.done, self.total);
    }

    fn finish(&mut self) {
        eprintln!("Done ({} items)", self.done);
    }
}
