//! Integration tests for opening catalogs from disk
//!
//! These tests verify:
//! - Single-file catalogs in JSON and YAML
//! - Directories of catalog fragments
//! - Shape errors reported with record id and field

use baikal::{Error, Loader, RecordKind, SearchFilters, Store};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

const CATALOG_YAML: &str = r#"
content:
  - id: 1
    type: hero
    title: Baikal Systems
    content: Cloud, AI and blockchain consulting
    metadata:
      tags: [hero, main]
portfolio:
  - id: p1
    title: RPA System
    description: automation
    category: RPA
    technologies: [Python]
    liveUrl: https://rpa.example.com
services:
  - id: s1
    name: AI Automation
    description: Code generation and debugging
    category: Automation
    features: [Code Generation, AI Debugging]
    pricing: { basic: 100, premium: 200, enterprise: 300 }
"#;

fn write(path: &std::path::Path, text: &str) {
    let mut file = File::create(path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
}

#[test]
fn test_open_yaml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    write(&path, CATALOG_YAML);

    let store = Store::open(&path).unwrap();
    assert_eq!(store.count(None), 3);

    // numeric ids are read as strings; `content` is accepted for the body
    let hero = store.get_content("1").unwrap();
    assert_eq!(hero.body, "Cloud, AI and blockchain consulting");
    assert!(hero.metadata.published);

    let results = store.search(&SearchFilters::query("rpa"));
    assert_eq!(results[0].key(), "portfolio:p1");
    assert_eq!(results[0].url.as_deref(), Some("https://rpa.example.com"));
}

#[test]
fn test_open_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    write(
        &path,
        r#"{"services": [{"id": "s1", "name": "Cloud Infrastructure", "description": "d",
            "category": "Infrastructure", "features": ["24/7 Monitoring"]}]}"#,
    );

    let store = Store::open(&path).unwrap();
    assert_eq!(store.count(Some(RecordKind::Service)), 1);
    assert_eq!(store.services_by_category("Infrastructure").len(), 1);
}

#[test]
fn test_open_missing_file() {
    let dir = tempdir().unwrap();
    let err = Store::open(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_open_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    write(&path, "content = []");

    let err = Store::open(&path).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_shape_error_names_record_and_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    write(
        &path,
        r#"
portfolio:
  - id: broken
    title: No Technologies
    description: d
    category: Web
"#,
    );

    let err = Store::open(&path).unwrap_err();
    match err {
        Error::InvalidRecordShape { collection, id, field } => {
            assert_eq!(collection, "portfolio");
            assert_eq!(id, "broken");
            assert_eq!(field, "technologies");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_open_directory_of_fragments() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("site.yaml"), CATALOG_YAML);

    fs::create_dir(dir.path().join("extra")).unwrap();
    write(
        &dir.path().join("extra").join("more.json"),
        r#"{"portfolio": [{"id": "p2", "title": "Data Portal", "description": "open data",
            "category": "Public Data", "technologies": ["API"]}]}"#,
    );

    // hidden directories are skipped
    fs::create_dir(dir.path().join(".drafts")).unwrap();
    write(&dir.path().join(".drafts").join("draft.yaml"), CATALOG_YAML);

    let store = Store::open(dir.path()).unwrap();
    assert_eq!(store.count(None), 4);
    assert_eq!(store.count(Some(RecordKind::Portfolio)), 2);
}

#[test]
fn test_loader_with_patterns() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("site.yaml"), CATALOG_YAML);
    write(
        &dir.path().join("ignored.json"),
        r#"{"services": [{"id": "x"}]}"#,
    );

    let mut store = Store::new();
    let stats = Loader::new(&mut store)
        .load_dir(dir.path(), &["**/*.yaml"], &[])
        .unwrap();

    assert_eq!(stats.files_scanned, 1);
    assert_eq!(stats.errors, 0);
    assert_eq!(store.count(None), 3);
}

#[test]
fn test_mutations_after_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    write(&path, CATALOG_YAML);

    let mut store = Store::open(&path).unwrap();
    let revision = store.revision();

    store.delete_portfolio("p1").unwrap();
    assert!(store.search(&SearchFilters::query("rpa")).iter().all(|r| r.id != "p1"));
    assert!(store.revision() > revision);

    let err = store.delete_portfolio("p1").unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { .. }));

    // nothing is written back
    let reopened = Store::open(&path).unwrap();
    assert!(reopened.get_portfolio("p1").is_ok());
}
