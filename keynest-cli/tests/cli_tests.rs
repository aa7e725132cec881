use serde_json::{Value, json};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn keynest_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("keynest"))
}

#[test]
fn test_to_json_writes_one_file_per_column() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("translations.csv");
    let out = temp_dir.path().join("locales");

    fs::write(
        &sheet,
        "key,en,fr\nmenu.items.0,Open,Ouvrir\nmenu.items.1,Save,Enregistrer\nmenu.title,File,Fichier\n",
    )
    .unwrap();

    let output = keynest_cmd()
        .args([
            "to-json",
            "--input",
            sheet.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let en: Value =
        serde_json::from_str(&fs::read_to_string(out.join("en.json")).unwrap()).unwrap();
    assert_eq!(
        en,
        json!({"menu": {"items": ["Open", "Save"], "title": "File"}})
    );

    let fr: Value =
        serde_json::from_str(&fs::read_to_string(out.join("fr.json")).unwrap()).unwrap();
    assert_eq!(
        fr,
        json!({"menu": {"items": ["Ouvrir", "Enregistrer"], "title": "Fichier"}})
    );
}

#[test]
fn test_to_json_failed_write_is_not_reported_as_written() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("translations.csv");
    let out = temp_dir.path().join("locales");

    fs::write(&sheet, "key,en,fr\ngreeting,Hello,Bonjour\n").unwrap();
    // A directory squatting on en.json makes that one write fail.
    fs::create_dir_all(out.join("en.json")).unwrap();

    let output = keynest_cmd()
        .args([
            "to-json",
            "--input",
            sheet.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("en.json"));
    assert!(stdout.contains("fr.json"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("en"));

    let fr: Value =
        serde_json::from_str(&fs::read_to_string(out.join("fr.json")).unwrap()).unwrap();
    assert_eq!(fr, json!({"greeting": "Bonjour"}));
}

#[test]
fn test_to_sheet_builds_sorted_columns() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(
        locales.join("en.json"),
        r#"{"greeting": "Hello", "list": ["a", "b"]}"#,
    )
    .unwrap();
    fs::write(
        locales.join("de.json"),
        r#"{"greeting": "Hallo", "list": ["a", "b"]}"#,
    )
    .unwrap();

    let out = temp_dir.path().join("translations.csv");
    let output = keynest_cmd()
        .args([
            "to-sheet",
            "--input",
            locales.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(&out).unwrap();
    // Files are scanned in name order, so `de` comes before `en`.
    assert_eq!(
        written,
        "key,de,en\ngreeting,Hallo,Hello\nlist.0,a,a\nlist.1,b,b\n"
    );
}

#[test]
fn test_to_sheet_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("translations.csv");

    let output = keynest_cmd()
        .args([
            "to-sheet",
            "--input",
            temp_dir.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no .json files"));
}

#[test]
fn test_to_sheet_bad_file_still_writes_good_ones() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"a": "x"}"#).unwrap();
    fs::write(locales.join("fr.json"), "{ not json }").unwrap();

    let out = temp_dir.path().join("translations.csv");
    let output = keynest_cmd()
        .args([
            "to-sheet",
            "--input",
            locales.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fr.json"));

    // The sheet was still written from the healthy file.
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "key,en\na,x\n");
}

#[test]
fn test_check_reports_conflicting_schema() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("translations.csv");
    fs::write(&sheet, "key,en\na.b.c,x\na.0.b,y\n").unwrap();

    let output = keynest_cmd()
        .args(["check", "--input", sheet.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("conflicting schema"));
}

#[test]
fn test_check_passes_clean_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("translations.csv");
    fs::write(&sheet, "key,en\na.b,x\na.c,y\n").unwrap();

    let output = keynest_cmd()
        .args(["check", "--input", sheet.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("column `en`: ok"));
}

#[test]
fn test_missing_key_column_fails() {
    let temp_dir = TempDir::new().unwrap();
    let sheet = temp_dir.path().join("translations.csv");
    fs::write(&sheet, "en,fr\na,b\n").unwrap();

    let output = keynest_cmd()
        .args(["check", "--input", sheet.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing key column"));
}
