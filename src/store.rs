// src/store.rs
//! In-memory tables and the keyed merge-writer behind every persisted CSV.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use crate::csv::{read_table, write_table, Rows};
use crate::error::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Rows,
}

impl DataSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Build from (column, value) records. Columns are ordered by first appearance;
    /// a record missing a column gets an empty cell.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Vec<(String, String)>>,
    {
        let records: Vec<_> = records.into_iter().collect();
        let mut headers: Vec<String> = Vec::new();
        for rec in &records {
            for (k, _) in rec {
                if !headers.contains(k) {
                    headers.push(k.clone());
                }
            }
        }
        let rows = records
            .into_iter()
            .map(|rec| {
                let mut row = vec![s!(); headers.len()];
                for (k, v) in rec {
                    if let Some(i) = headers.iter().position(|h| *h == k) {
                        row[i] = v;
                    }
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn get<'a>(&'a self, row: &'a [String], name: &str) -> Option<&'a str> {
        self.column(name).and_then(|i| row.get(i)).map(String::as_str)
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let (headers, rows) = read_table(path)?;
        Ok(Self { headers, rows })
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        write_table(path, &self.headers, &self.rows)
    }

    /// Keep only rows matching `pred`, dropping the listed columns.
    pub fn select<F>(&self, drop: &[&str], mut pred: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        let keep: Vec<usize> = (0..self.headers.len())
            .filter(|&i| !drop.contains(&self.headers[i].as_str()))
            .collect();
        let pick = |row: &[String]| -> Vec<String> {
            keep.iter().map(|&i| row.get(i).cloned().unwrap_or_default()).collect()
        };
        Self {
            headers: pick(self.headers.as_slice()),
            rows: self
                .rows
                .iter()
                .filter(|r| pred(r.as_slice()))
                .map(|r| pick(r.as_slice()))
                .collect(),
        }
    }
}

/* ---------------- Merge ---------------- */

/// Integer keys in numeric order first, then any other key lexically.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Merge `new` into `existing` on `key`.
///
/// Cell by cell, a non-empty new value wins and an empty one leaves the existing
/// value alone. Keys present only in `existing` are kept. Columns: existing order,
/// then new columns, then `declared` columns still missing (empty), so a first
/// write keeps the new rows' layout. Rows come out sorted with `compare_keys`.
pub fn merge(existing: &DataSet, new: &DataSet, key: &str, declared: &[&str]) -> Result<DataSet, Error> {
    if new.column(key).is_none() && !new.rows.is_empty() {
        return Err(Error::parse(format!("new rows have no `{key}` column")));
    }
    if existing.column(key).is_none() && !existing.rows.is_empty() {
        return Err(Error::parse(format!("existing file has no `{key}` column")));
    }

    let mut headers: Vec<String> = Vec::new();
    let all = existing.headers.iter().chain(&new.headers).map(String::as_str).chain(declared.iter().copied());
    for h in all {
        if !headers.iter().any(|x| x == h) {
            headers.push(s!(h));
        }
    }
    let key_slot = match headers.iter().position(|h| h == key) {
        Some(i) => i,
        None => {
            headers.insert(0, s!(key));
            0
        }
    };

    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Vec<String>> = HashMap::new();

    for source in [existing, new] {
        let Some(key_idx) = source.column(key) else { continue };
        // source column → merged column
        let slots: Vec<usize> = source
            .headers
            .iter()
            .map(|h| headers.iter().position(|x| x == h).unwrap_or(key_slot))
            .collect();

        for row in &source.rows {
            let id = row.get(key_idx).map(|v| v.trim()).unwrap_or_default();
            if id.is_empty() {
                logw!("Dropping row without `{key}`: {row:?}");
                continue;
            }
            let merged = by_key.entry(s!(id)).or_insert_with(|| {
                order.push(s!(id));
                vec![s!(); headers.len()]
            });
            for (i, cell) in row.iter().enumerate() {
                if !cell.is_empty() && i < slots.len() {
                    merged[slots[i]] = cell.clone();
                }
            }
            merged[key_slot] = s!(id);
        }
    }

    order.sort_by(|a, b| compare_keys(a, b));
    let rows = order.into_iter().filter_map(|k| by_key.remove(&k)).collect();
    Ok(DataSet { headers, rows })
}

/// Merge `new` into the table at `path` (if any) and rewrite it. Returns the row count.
pub fn merge_and_write(new: &DataSet, path: &Path, key: &str, declared: &[&str]) -> Result<usize, Error> {
    let existing = if path.exists() {
        DataSet::load(path)?
    } else {
        DataSet::default()
    };
    let merged = merge(&existing, new, key, declared)?;
    merged.save(path)?;
    logf!("Wrote {} rows to {}", merged.len(), path.display());
    Ok(merged.len())
}
