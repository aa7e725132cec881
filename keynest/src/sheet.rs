//! Tabular collaborator: CSV rows with a key column plus one value column
//! per document (typically one per locale).
//!
//! The sheet layer never interprets dotted paths itself; it only carves the
//! table into per-column [`FlatMap`]s and reassembles a table from them.

use std::{collections::BTreeSet, io::BufRead};

use serde_json::Value;

use crate::{error::Error, traits::Parser, types::FlatMap};

/// The header identifying the key column, matched case-insensitively.
const KEY_HEADER: &str = "key";

/// One parsed spreadsheet: a header row plus data rows.
///
/// Rows shorter than the header are padded with blanks; cells beyond the
/// last header have no column and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Parser for Sheet {
    /// Parse from any reader. The first record is the header row.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(Error::DataMismatch("sheet has no header row".to_string())),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let mut row: Vec<String> = record
                .iter()
                .take(headers.len())
                .map(str::to_string)
                .collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Sheet { headers, rows })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Sheet {
    /// Position of the key column, matched case-insensitively against `key`.
    pub fn key_column(&self) -> Result<usize, Error> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(KEY_HEADER))
            .ok_or(Error::MissingKeyColumn)
    }

    /// Carves the table into one `(columnName, FlatMap)` per non-key column.
    ///
    /// Blank cells become empty strings, never dropped. When two rows carry
    /// the same key, the later row wins. Rows with a blank key are carried
    /// through; the unflattener skips them. The fields are public, so rows
    /// shorter than the header can exist in caller-built sheets; missing
    /// cells read as blanks.
    pub fn columns(&self) -> Result<Vec<(String, FlatMap)>, Error> {
        let key = self.key_column()?;
        let mut columns = Vec::new();
        for (index, header) in self.headers.iter().enumerate() {
            if index == key {
                continue;
            }
            let mut flat = FlatMap::new();
            for row in &self.rows {
                let path = row.get(key).cloned().unwrap_or_default();
                let cell = row.get(index).cloned().unwrap_or_default();
                flat.insert(path, Value::String(cell));
            }
            columns.push((header.clone(), flat));
        }
        Ok(columns)
    }

    /// Assembles a table from named flat maps: a `key` column holding the
    /// union of all paths in lexicographic order, then one column per map in
    /// the given order. Keys a map lacks render as blank cells.
    pub fn from_documents(columns: &[(String, FlatMap)]) -> Sheet {
        let mut headers = Vec::with_capacity(columns.len() + 1);
        headers.push(KEY_HEADER.to_string());
        headers.extend(columns.iter().map(|(name, _)| name.clone()));

        let keys: BTreeSet<&String> = columns
            .iter()
            .flat_map(|(_, flat)| flat.keys())
            .collect();

        let rows = keys
            .into_iter()
            .map(|key| {
                let mut row = Vec::with_capacity(columns.len() + 1);
                row.push(key.clone());
                for (_, flat) in columns {
                    row.push(flat.get(key).map(render_cell).unwrap_or_default());
                }
                row
            })
            .collect();

        Sheet { headers, rows }
    }
}

/// Renders a scalar for a spreadsheet cell: strings verbatim, numbers and
/// booleans via their JSON text, null as a blank.
fn render_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
