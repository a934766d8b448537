// src/api/client.rs
use reqwest::blocking::Client;

use super::sign::SignedParams;
use super::xml::{self, Map};
use crate::config::consts::{API_BASE_URL, XML_CHARSET};
use crate::config::Credentials;
use crate::core::net;
use crate::error::Error;

/// Smartping endpoints. Implementors only provide `get`; the typed calls are
/// thin wrappers naming the endpoint and its parameters.
///
/// Every call returns the decoded document rooted at the response tag
/// (usually `liste`).
pub trait Fftt {
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Map, Error>;

    fn initialisation(&self) -> Result<Map, Error> {
        self.get("xml_initialisation", &[])
    }

    /* ---------- clubs ---------- */

    fn club_detail(&self, club: &str) -> Result<Map, Error> {
        self.get("xml_club_detail", &[("club", club)])
    }

    fn clubs_by_department(&self, dep: &str) -> Result<Map, Error> {
        self.get("xml_club_dep2", &[("dep", dep)])
    }

    /// Free search; accepts `numero`, `code`, `ville` or `dep`.
    fn club_search(&self, params: &[(&str, &str)]) -> Result<Map, Error> {
        self.get("xml_club_b", params)
    }

    /* ---------- players & licences ---------- */

    fn club_players(&self, club: &str) -> Result<Map, Error> {
        self.get("xml_liste_joueur", &[("club", club)])
    }

    fn club_licences(&self, club: &str) -> Result<Map, Error> {
        self.get("xml_licence_b", &[("club", club)])
    }

    fn player(&self, licence: &str) -> Result<Map, Error> {
        self.get("xml_joueur", &[("licence", licence)])
    }

    fn licence(&self, licence: &str) -> Result<Map, Error> {
        self.get("xml_licence", &[("licence", licence)])
    }

    /* ---------- match history ---------- */

    fn ranking_history(&self, licence: &str) -> Result<Map, Error> {
        self.get("xml_histo_classement", &[("numlic", licence)])
    }

    /// Games validated in the federation database.
    fn player_games(&self, licence: &str) -> Result<Map, Error> {
        self.get("xml_partie_mysql", &[("licence", licence)])
    }

    /// Games from the live (SPID) feed.
    fn player_games_spid(&self, licence: &str) -> Result<Map, Error> {
        self.get("xml_partie", &[("numlic", licence)])
    }

    /* ---------- teams & pools ---------- */

    fn club_teams(&self, club: &str) -> Result<Map, Error> {
        self.get("xml_equipe", &[("numclu", club)])
    }

    fn pool_fixtures(&self, pool: &str) -> Result<Map, Error> {
        self.get("xml_rencontre_equ", &[("poule", pool)])
    }

    fn pool_standings(&self, division: &str, pool: &str) -> Result<Map, Error> {
        self.get(
            "xml_result_equ",
            &[("action", "classement"), ("auto", "1"), ("D1", division), ("cx_poule", pool)],
        )
    }
}

impl<T: Fftt + ?Sized> Fftt for &T {
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Map, Error> {
        (**self).get(endpoint, params)
    }
}

/// HTTP implementation: one signed GET per call, no retries.
pub struct ApiClient {
    creds: Credentials,
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(creds: Credentials) -> Result<Self, Error> {
        Ok(Self { creds, http: net::client()?, base_url: s!(API_BASE_URL) })
    }

    /// Point at another host (a local mirror or a test server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = s!(base_url);
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        self
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        join!(&self.base_url, endpoint, ".php")
    }
}

impl Fftt for ApiClient {
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Map, Error> {
        let signed = SignedParams::new(&self.creds);
        let mut query: Vec<(&str, &str)> = signed.pairs().to_vec();
        query.extend_from_slice(params);

        let body = net::get_text(&self.http, &self.endpoint_url(endpoint), &query, &[], XML_CHARSET)?;
        xml::decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use crate::specs::fixtures::club_fixtures;

    /// Records calls, answers with an empty list.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Fftt for Recorder {
        fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Map, Error> {
            let owned = params.iter().map(|(k, v)| (s!(*k), s!(*v))).collect();
            self.calls.borrow_mut().push((s!(endpoint), owned));
            xml::decode("<liste>\n</liste>")
        }
    }

    #[test]
    fn typed_calls_name_endpoint_and_params() {
        let api = Recorder::default();
        api.club_teams("08940073").unwrap();
        api.pool_standings("12345", "678").unwrap();
        api.ranking_history("9412345").unwrap();

        let calls = api.calls.borrow();
        assert_eq!(calls[0].0, "xml_equipe");
        assert_eq!(calls[0].1, vec![(s!("numclu"), s!("08940073"))]);
        assert_eq!(calls[1].0, "xml_result_equ");
        assert!(calls[1].1.contains(&(s!("cx_poule"), s!("678"))));
        assert!(calls[1].1.contains(&(s!("D1"), s!("12345"))));
        assert_eq!(calls[2].1, vec![(s!("numlic"), s!("9412345"))]);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let creds = Credentials::new("SW001", "pw", None);
        let api = ApiClient::new(creds).unwrap().with_base_url("http://localhost:8080/pxml");
        assert_eq!(api.endpoint_url("xml_equipe"), "http://localhost:8080/pxml/xml_equipe.php");
    }

    /* ---------- HTTP client against a one-shot local server ---------- */

    /// Answer a single request with `status` and `body` (no charset declared).
    /// The handle yields the request line.
    fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/pxml", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes()).and_then(|_| stream.write_all(body));
            let request = String::from_utf8_lossy(&request).into_owned();
            s!(request.lines().next().unwrap_or_default())
        });
        (base, handle)
    }

    /// Same client setup, minus any proxy from the environment.
    fn local_client(base: &str) -> ApiClient {
        let creds = Credentials::new("SW001", "pw", Some("ABCDEFGHIJKLMNO"));
        let http = Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        ApiClient { creds, http, base_url: s!() }.with_base_url(base)
    }

    #[test]
    fn request_carries_signature_then_endpoint_params() {
        let (base, server) = serve_once("200 OK", b"<liste>\n</liste>");
        local_client(&base).club_teams("08940073").unwrap();

        let line = server.join().unwrap();
        assert!(line.starts_with("GET /pxml/xml_equipe.php?serie=ABCDEFGHIJKLMNO&tm="), "{line}");
        assert!(line.contains("&tmc="), "{line}");
        assert!(line.ends_with("&id=SW001&numclu=08940073 HTTP/1.1"), "{line}");
    }

    #[test]
    fn server_error_status_is_an_http_error() {
        let (base, server) = serve_once("500 Internal Server Error", b"oops");
        let res = local_client(&base).pool_fixtures("42");
        server.join().unwrap();
        assert!(matches!(res, Err(Error::Http(_))));
    }

    #[test]
    fn latin1_body_keeps_the_round_marker() {
        let (base, server) = serve_once(
            "200 OK",
            b"<liste><tour><libelle>Poule 1 - tour n\xB010 du 01/03/2026</libelle>\
              <equa>US FONTENAY TT 1</equa><equb>IVRY 2</equb>\
              <ncluba>08940073</ncluba><nclubb>111</nclubb></tour></liste>",
        );
        let doc = local_client(&base).pool_fixtures("42").unwrap();
        server.join().unwrap();

        let fixtures = club_fixtures(&doc, "08940073");
        let rounds: Vec<u32> = fixtures.iter().map(|f| f.round).collect();
        assert_eq!(rounds, vec![10]);
    }
}
