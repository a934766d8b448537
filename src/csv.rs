// src/csv.rs
//! Flat CSV tables on top of the `csv` crate. First row is always the header.

use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::error::Error;

pub type Rows = Vec<Vec<String>>;

/* ---------------- Reading ---------------- */

/// (headers, rows) from a file. Short rows are padded to the header width.
pub fn read_table(path: &Path) -> Result<(Vec<String>, Rows), Error> {
    parse_table(&std::fs::read_to_string(path)?)
}

pub fn parse_table(text: &str) -> Result<(Vec<String>, Rows), Error> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        // a UTF-8 BOM would otherwise stick to the key column name
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let mut row: Vec<String> = rec?.iter().map(str::to_string).collect();
        if row.len() < headers.len() {
            row.resize(headers.len(), s!());
        }
        rows.push(row);
    }
    Ok((headers, rows))
}

/* ---------------- Writing ---------------- */

pub fn write_table_to<W: Write>(w: W, headers: &[String], rows: &[Vec<String>]) -> Result<(), Error> {
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or truncate `path` (parent directories included) and write the table.
pub fn write_table(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), Error> {
    crate::file::ensure_parent(path)?;
    let file = std::fs::File::create(path)?;
    write_table_to(std::io::BufWriter::new(file), headers, rows)
}
