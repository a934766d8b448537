// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::Error;

#[doc(hidden)]
pub use tracing as __tracing;
