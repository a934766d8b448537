// src/core/net.rs
//
// Blocking HTTP GET shared by the XML API and the HTML source.
// One request in flight at a time, fixed timeout, no retries.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{API_TIMEOUT_SECS, USER_AGENT};
use crate::error::Error;

pub fn client() -> Result<Client, Error> {
    let http = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(API_TIMEOUT_SECS))
        .build()?;
    Ok(http)
}

/// GET `url?query`, log the composed URL, fail on non-2xx, decode the body.
/// `fallback_charset` applies when the response names no charset.
pub fn get_text(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
    fallback_charset: &str,
) -> Result<String, Error> {
    let mut builder = http.get(url).query(query);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.build()?;
    logf!("Calling: {}", request.url());

    let response = http.execute(request)?.error_for_status()?;
    Ok(response.text_with_charset(fallback_charset)?)
}
