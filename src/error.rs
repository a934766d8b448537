// src/error.rs
use thiserror::Error;

/// Errors raised by the API client, the decoders and the CSV store.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable credentials; fatal before any request is made.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A free-text field did not have the shape we slice it by.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
