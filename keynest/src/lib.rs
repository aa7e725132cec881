#![forbid(unsafe_code)]
//! Convert between flat spreadsheet tables and nested JSON localization resources.
//!
//! Spreadsheets address translations by dotted paths (`menu.items.0.title`);
//! JSON resources nest the same data as objects and arrays. This crate owns
//! the bidirectional transform between the two shapes:
//!
//! - [`flatten`] turns a nested tree into a flat path → value map, encoding
//!   array positions as numeric path segments.
//! - [`unflatten`] rebuilds the tree, inferring at each branch whether the
//!   container is an array (next segment numeric) or an object.
//!
//! The two are inverses for well-formed input; a path prefix used both ways
//! is rejected as a schema conflict rather than silently coerced.
//!
//! The [`sheet`] module is the tabular collaborator (CSV rows with a `key`
//! column plus one column per locale), and [`codec`] drives whole-batch
//! conversions with per-unit failure isolation.
//!
//! # Quick Start
//!
//! ```rust
//! use keynest::{flatten, unflatten};
//! use serde_json::json;
//!
//! let tree = json!({"list": [{"name": "a"}, {"name": "b"}]});
//! let flat = flatten(&tree)?;
//! assert_eq!(flat["list.0.name"], json!("a"));
//! assert_eq!(unflatten(&flat)?, tree);
//! # Ok::<(), keynest::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod flatten;
pub mod path;
pub mod sheet;
pub mod traits;
pub mod types;
pub mod unflatten;

// Re-export most used items for easy consumption
pub use crate::{
    codec::{Codec, UnitFailure},
    error::Error,
    flatten::flatten,
    sheet::Sheet,
    types::{Document, FlatMap},
    unflatten::unflatten,
};
