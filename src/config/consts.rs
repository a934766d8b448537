// src/config/consts.rs

// Smartping API
pub const API_BASE_URL: &str = "http://www.fftt.com/mobile/pxml/";
pub const API_TIMEOUT_SECS: u64 = 10;
pub const XML_CHARSET: &str = "iso-8859-1"; // used when the response names none
pub const USER_AGENT: &str = concat!("fftt_scrape/", env!("CARGO_PKG_VERSION"));

// Secondary HTML source
pub const PINGPOCKET_BASE_URL: &str = "https://www.pingpocket.fr/app/fftt/";
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite

// Credentials
pub const ENV_APP_ID: &str = "FFTT_APP_ID";
pub const ENV_PASSWORD: &str = "FFTT_PASSWORD";
pub const ENV_SERIE: &str = "FFTT_SERIE";

// Pipelines
pub const DEFAULT_CLUB: &str = "08940073";
pub const TEAM_COMPETITION: &str = "FED_Championnat de France";
pub const LICENCE_KEY: &str = "idlicence";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CSV_EXT: &str = "csv";
