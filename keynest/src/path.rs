//! Dotted-path segments and their classification.
//!
//! A path like `menu.items.0.title` is split on `.` into segments. A segment
//! that is a pure digit run addresses a sequence position; anything else is a
//! mapping key. The distinction drives the whole flat ⇄ nested transform.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

// A segment addresses a sequence position iff it is entirely digits.
lazy_static! {
    static ref INDEX_SEGMENT_REGEX: Regex = Regex::new(r"^\d+$").unwrap();
}

/// One segment of a dotted path: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A mapping key (non-empty, not a pure digit run).
    Name(String),
    /// A zero-based sequence position.
    Index(usize),
}

impl Segment {
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Splits a path on `.` and classifies each segment.
///
/// Returns [`Error::MalformedPath`] if any segment is empty (consecutive
/// dots, or a leading or trailing dot). Callers skip entirely-blank paths
/// before getting here.
pub fn split_path(path: &str) -> Result<Vec<Segment>, Error> {
    path.split('.')
        .map(|raw| {
            if raw.is_empty() {
                return Err(Error::MalformedPath(path.to_string()));
            }
            if INDEX_SEGMENT_REGEX.is_match(raw) {
                // A digit run too long for usize is kept as a plain name.
                if let Ok(index) = raw.parse::<usize>() {
                    return Ok(Segment::Index(index));
                }
            }
            Ok(Segment::Name(raw.to_string()))
        })
        .collect()
}

/// Joins a child segment onto a prefix, omitting the dot at the root.
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
