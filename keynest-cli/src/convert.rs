//! Conversion commands: sheet → JSON directory, JSON directory → sheet, and
//! a dry-run check. Per-unit failures are printed and counted; a command
//! only fails as a whole when at least one unit failed or nothing could be
//! read at all.

use std::path::Path;

use keynest::{Codec, Sheet, UnitFailure, traits::Parser};

/// Converts one sheet into one JSON file per non-key column.
///
/// Failing columns are reported on stderr; the remaining columns are still
/// written. Returns an error string when any unit failed.
pub fn run_to_json(input: &str, output_dir: &str) -> Result<(), String> {
    let sheet = Sheet::read_from(input).map_err(|e| format!("Error reading {}: {}", input, e))?;

    let (codec, mut failures) =
        Codec::from_sheet(&sheet).map_err(|e| format!("Error reading {}: {}", input, e))?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Error creating {}: {}", output_dir, e))?;
    let write_failures = codec.write_json_dir(output_dir);

    for document in codec.iter() {
        if write_failures.iter().any(|f| f.unit == document.name) {
            continue;
        }
        println!(
            "Wrote {}",
            Path::new(output_dir)
                .join(format!("{}.json", document.name))
                .display()
        );
    }
    failures.extend(write_failures);
    report(failures)
}

/// Converts a directory of JSON files into one sheet, one column per file.
///
/// Files are discovered as `<dir>/*.json` and ordered by name, so column
/// order is stable across runs.
pub fn run_to_sheet(input_dir: &str, output: &str) -> Result<(), String> {
    let paths = json_files(input_dir)?;
    if paths.is_empty() {
        return Err(format!("Error: no .json files found in {}", input_dir));
    }

    let mut codec = Codec::new();
    let mut failures = codec.read_json_files(&paths);

    let (sheet, flatten_failures) = codec.to_sheet();
    failures.extend(flatten_failures);

    sheet
        .write_to(output)
        .map_err(|e| format!("Error writing {}: {}", output, e))?;
    println!("Wrote {}", output);
    report(failures)
}

/// Validates a sheet without writing anything: every column is unflattened
/// and the result discarded, so schema conflicts and malformed paths
/// surface exactly as `to-json` would hit them.
pub fn run_check(input: &str) -> Result<(), String> {
    let sheet = Sheet::read_from(input).map_err(|e| format!("Error reading {}: {}", input, e))?;

    let (codec, failures) =
        Codec::from_sheet(&sheet).map_err(|e| format!("Error reading {}: {}", input, e))?;

    for document in codec.iter() {
        println!("column `{}`: ok", document.name);
    }
    report(failures)
}

fn json_files(dir: &str) -> Result<Vec<std::path::PathBuf>, String> {
    let pattern = format!("{}/*.json", dir.trim_end_matches('/'));
    let mut paths: Vec<_> = glob::glob(&pattern)
        .map_err(|e| format!("Error scanning {}: {}", dir, e))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}

fn report(failures: Vec<UnitFailure>) -> Result<(), String> {
    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        eprintln!("Error in {}", failure);
    }
    Err(format!("{} unit(s) failed", failures.len()))
}
