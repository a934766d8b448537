// src/api/mod.rs
//! Smartping (FFTT mobile XML API) access.
//!
//! - `sign`   — per-request `tm`/`tmc` derivation and session series generation.
//! - `xml`    — response body → `Map` tree (scalar-or-sequence resolved at decode time).
//! - `client` — the `Fftt` trait (typed endpoints over one `get`) and its HTTP implementation.
//!
//! Nothing here retries. Transport and XML errors go straight back to the caller.
pub mod client;
pub mod sign;
pub mod xml;

pub use client::{ApiClient, Fftt};
pub use xml::{Field, Map, Node};
