//! Batch driver for whole-sheet ⇄ document-set conversions.
//!
//! Each column or file is one conversion unit. A failing unit is recorded
//! and its siblings keep converting; nothing here aborts a batch. Units are
//! independent pure transforms, so callers may fan them out if they wish —
//! the driver itself stays single-threaded and synchronous.

use std::fmt::Display;
use std::path::Path;

use crate::{
    error::Error,
    flatten::flatten,
    sheet::Sheet,
    types::Document,
    unflatten::unflatten,
};

/// One conversion unit that failed, with the error that stopped it.
#[derive(Debug)]
pub struct UnitFailure {
    /// Column header or file stem of the failing unit.
    pub unit: String,
    pub error: Error,
}

impl Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.unit, self.error)
    }
}

/// Represents a collection of JSON documents and provides methods to build
/// them from a sheet, render them back to one, and load them from disk.
#[derive(Debug, Default)]
pub struct Codec {
    /// The collection of documents managed by this codec.
    pub documents: Vec<Document>,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Codec {
            documents: Vec::new(),
        }
    }

    /// Returns an iterator over all documents.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Finds a document by name, if present.
    pub fn get_by_name(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.name == name)
    }

    /// Adds a document to the collection.
    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Unflattens every non-key column of a sheet into one document each.
    ///
    /// A missing key column is fatal — without it no unit exists. A column
    /// whose paths are malformed or schema-conflicting becomes a
    /// [`UnitFailure`]; the remaining columns still convert.
    pub fn from_sheet(sheet: &Sheet) -> Result<(Self, Vec<UnitFailure>), Error> {
        let mut codec = Codec::new();
        let mut failures = Vec::new();
        for (name, flat) in sheet.columns()? {
            match unflatten(&flat) {
                Ok(tree) => codec.add_document(Document::new(name, tree)),
                Err(error) => failures.push(UnitFailure { unit: name, error }),
            }
        }
        Ok((codec, failures))
    }

    /// Reads one JSON file per path into the collection, collecting per-file
    /// failures instead of stopping at the first bad file.
    pub fn read_json_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<UnitFailure> {
        let mut failures = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match Document::read_from(path) {
                Ok(document) => self.add_document(document),
                Err(error) => failures.push(UnitFailure {
                    unit: path.display().to_string(),
                    error,
                }),
            }
        }
        failures
    }

    /// Flattens every document into one sheet column, keyed by the union of
    /// all paths. Documents that fail to flatten are reported and left out
    /// of the sheet.
    pub fn to_sheet(&self) -> (Sheet, Vec<UnitFailure>) {
        let mut columns = Vec::with_capacity(self.documents.len());
        let mut failures = Vec::new();
        for document in &self.documents {
            match flatten(&document.tree) {
                Ok(flat) => columns.push((document.name.clone(), flat)),
                Err(error) => failures.push(UnitFailure {
                    unit: document.name.clone(),
                    error,
                }),
            }
        }
        (Sheet::from_documents(&columns), failures)
    }

    /// Writes every document as `<dir>/<name>.json`, collecting per-file
    /// failures.
    pub fn write_json_dir<P: AsRef<Path>>(&self, dir: P) -> Vec<UnitFailure> {
        let mut failures = Vec::new();
        for document in &self.documents {
            let path = dir.as_ref().join(format!("{}.json", document.name));
            if let Err(error) = document.write_to(&path) {
                failures.push(UnitFailure {
                    unit: document.name.clone(),
                    error,
                });
            }
        }
        failures
    }
}
