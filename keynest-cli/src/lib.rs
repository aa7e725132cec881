//! CLI library for testing purposes

pub mod convert;

pub use convert::{run_check, run_to_json, run_to_sheet};
