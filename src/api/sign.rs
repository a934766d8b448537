// src/api/sign.rs
use chrono::Local;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use rand::Rng;
use sha1::Sha1;

use crate::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

pub const SERIE_LEN: usize = 15;
const SERIE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Local time as `YYYYMMDDHHMMSSmmm`.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// `tmc`: hex HMAC-SHA1 of the timestamp, keyed with the hex MD5 of the secret.
pub fn sign(secret: &str, timestamp: &str) -> String {
    let key = hex::encode(Md5::digest(secret.as_bytes()));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn generate_serie() -> String {
    let mut rng = rand::thread_rng();
    (0..SERIE_LEN)
        .map(|_| SERIE_CHARSET[rng.gen_range(0..SERIE_CHARSET.len())] as char)
        .collect()
}

/// The four query parameters every endpoint wants. Built fresh for each call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedParams {
    pub serie: String,
    pub tm: String,
    pub tmc: String,
    pub id: String,
}

impl SignedParams {
    pub fn new(creds: &Credentials) -> Self {
        Self::at(creds, timestamp())
    }

    pub fn at(creds: &Credentials, tm: String) -> Self {
        let tmc = sign(creds.password(), &tm);
        Self { serie: s!(creds.serie()), tm, tmc, id: s!(creds.app_id()) }
    }

    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("serie", self.serie.as_str()),
            ("tm", self.tm.as_str()),
            ("tmc", self.tmc.as_str()),
            ("id", self.id.as_str()),
        ]
    }
}
