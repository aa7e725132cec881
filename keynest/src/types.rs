//! Core, format-agnostic types for keynest.
//! The transform operates on these; the sheet and codec layers feed them.

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, traits::Parser};

/// A flat mapping from dotted path strings to scalar values.
///
/// Keys are unique and naturally ordered (lexicographic by path), which is
/// the stable boundary ordering the tabular layer relies on. Values are
/// scalars only; containers never appear in the flat representation.
pub type FlatMap = BTreeMap<String, Value>;

/// One named JSON document: a locale file on disk, or one sheet column.
///
/// The name is a sheet column header in one direction and a file stem in the
/// other; the tree is the nested JSON value itself.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    /// Column header / file stem identifying this document (e.g. `en`, `fr`).
    pub name: String,

    /// The nested tree. An object or array at the root in well-formed input.
    pub tree: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, tree: Value) -> Self {
        Document {
            name: name.into(),
            tree,
        }
    }

    /// Reads one JSON document from a file, naming it after the file stem.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let file = File::open(path).map_err(Error::Io)?;
        let tree = serde_json::from_reader(BufReader::new(file))?;
        Ok(Document { name, tree })
    }

    /// Writes the tree as pretty-printed JSON with a trailing newline.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.tree)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl Parser for Vec<Document> {
    /// Parse a document-set cache from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write a document-set cache to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document {{ name: {} }}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("en.json");

        let doc = Document::new("en", json!({"greeting": "Hello", "items": ["a", "b"]}));
        doc.write_to(&path).unwrap();

        let read = Document::read_from(&path).unwrap();
        assert_eq!(read.name, "en");
        assert_eq!(read.tree, doc.tree);
    }

    #[test]
    fn test_document_name_from_file_stem() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fr-CA.json");
        std::fs::write(&path, "{}").unwrap();

        let doc = Document::read_from(&path).unwrap();
        assert_eq!(doc.name, "fr-CA");
        assert_eq!(doc.tree, json!({}));
    }

    #[test]
    fn test_document_read_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json }").unwrap();

        assert!(matches!(Document::read_from(&path), Err(Error::Parse(_))));
    }

    #[test]
    fn test_document_set_cache_round_trip() {
        let documents = vec![
            Document::new("en", json!({"a": "x"})),
            Document::new("fr", json!({"a": "y"})),
        ];

        let mut buffer = Vec::new();
        documents.to_writer(&mut buffer).unwrap();

        let parsed = Vec::<Document>::from_bytes(&buffer).unwrap();
        assert_eq!(parsed, documents);
    }

    #[test]
    fn test_document_display() {
        let doc = Document::new("en", json!({}));
        assert_eq!(format!("{}", doc), "Document { name: en }");
    }
}
