// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use fftt_scrape::api::{xml, Fftt, Map};
use fftt_scrape::Error;

/// In-memory API: answers keyed by `endpoint?k=v&k=v` (parameters in call order).
/// `None` answers fail like a timed-out request.
#[derive(Default)]
pub struct Canned {
    answers: HashMap<String, Option<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl Canned {
    pub fn answer(mut self, key: &str, xml: &str) -> Self {
        self.answers.insert(key.to_string(), Some(xml.to_string()));
        self
    }

    pub fn fail(mut self, key: &str) -> Self {
        self.answers.insert(key.to_string(), None);
        self
    }

    pub fn called(&self, key: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == key)
    }
}

impl Fftt for Canned {
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Map, Error> {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let key = format!("{endpoint}?{}", query.join("&"));
        self.calls.borrow_mut().push(key.clone());
        match self.answers.get(&key) {
            Some(Some(body)) => xml::decode(body),
            Some(None) => Err(Error::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"))),
            None => Err(Error::Parse(format!("unexpected call {key}"))),
        }
    }
}

pub fn cells(rows: &[Vec<String>], col: usize) -> Vec<&str> {
    rows.iter().map(|r| r[col].as_str()).collect()
}
