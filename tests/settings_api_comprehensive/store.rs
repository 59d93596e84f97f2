//! Store: path layout, lazy loading, persistence, tag listing.

use crate::common::*;

// ============================================================================
// Path Layout
// ============================================================================

#[test]
fn untagged_document_path() {
    let key = NamespaceKey::new("local", None, "deploy").unwrap();
    let store = Store::new(key, "./settings", Arc::new(OsFileSystem));
    assert_eq!(store.path(), PathBuf::from("./settings/local/deploy.json"));
    assert_eq!(store.directory(), PathBuf::from("./settings/local"));
}

#[test]
fn tagged_document_path() {
    let key = NamespaceKey::new("local", Some("v2".into()), "deploy").unwrap();
    let store = Store::new(key, "./settings", Arc::new(OsFileSystem));
    assert_eq!(store.path(), PathBuf::from("./settings/local/v2/deploy.json"));
}

#[test]
fn equal_keys_resolve_to_same_path() {
    let root = TestRoot::new();
    assert_eq!(
        root.store(Some("v2"), "deploy").path(),
        root.store(Some("v2"), "deploy").path()
    );
    assert_ne!(
        root.store(None, "deploy").path(),
        root.store(Some("deploy"), "deploy").path()
    );
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn missing_file_yields_empty_document() {
    let root = TestRoot::new();
    let mut store = root.store(None, "deploy");
    assert_eq!(*store.document().unwrap(), json!({}));
    assert!(!store.path().exists());
}

#[test]
fn existing_file_is_parsed() {
    let root = TestRoot::new();
    root.write_raw("local/deploy.json", r#"{"owner": "alice", "n": 2}"#);
    let mut store = root.store(None, "deploy");
    assert_eq!(*store.document().unwrap(), json!({"owner": "alice", "n": 2}));
}

#[test]
fn malformed_file_is_parse_error() {
    let root = TestRoot::new();
    root.write_raw("local/deploy.json", r#"{"owner": "alice",}"#);
    let mut store = root.store(None, "deploy");
    let err = store.document().unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("deploy.json"));
}

#[test]
fn refresh_observes_out_of_band_edit() {
    let root = TestRoot::new();
    root.write_raw("local/deploy.json", r#"{"n": 1}"#);
    let mut store = root.store(None, "deploy");
    assert_eq!(store.document().unwrap()["n"], json!(1));

    root.write_raw("local/deploy.json", r#"{"n": 2}"#);
    assert_eq!(store.document().unwrap()["n"], json!(1));

    store.refresh().unwrap();
    assert_eq!(store.document().unwrap()["n"], json!(2));
}

#[test]
fn refresh_surfaces_parse_errors() {
    let root = TestRoot::new();
    let mut store = root.store(None, "deploy");
    store.document().unwrap();
    root.write_raw("local/deploy.json", "not json");
    assert!(store.refresh().unwrap_err().is_parse());
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn set_creates_nested_directories() {
    let root = TestRoot::new();
    let mut store = root.store(Some("v2"), "deploy");
    store.set("owner", json!("alice")).unwrap();
    assert!(root.base().join("local/v2/deploy.json").exists());
}

#[test]
fn set_writes_four_space_pretty_json() {
    let root = TestRoot::new();
    let mut store = root.store(None, "deploy");
    store.set("nested", json!({"a": 1})).unwrap();
    assert_eq!(
        root.read_raw("local/deploy.json"),
        "{\n    \"nested\": {\n        \"a\": 1\n    }\n}"
    );
}

#[test]
fn set_without_prior_read_keeps_existing_keys() {
    let root = TestRoot::new();
    root.write_raw("local/deploy.json", r#"{"kept": true}"#);
    let mut store = root.store(None, "deploy");
    store.set("added", json!(1)).unwrap();

    let written: Value = serde_json::from_str(&root.read_raw("local/deploy.json")).unwrap();
    assert_eq!(written, json!({"kept": true, "added": 1}));
}

#[test]
fn independent_stores_last_write_wins() {
    let root = TestRoot::new();
    let mut first = root.store(None, "deploy");
    let mut second = root.store(None, "deploy");
    first.document().unwrap();
    second.document().unwrap();

    first.set("a", json!(1)).unwrap();
    second.set("b", json!(2)).unwrap();

    let written: Value = serde_json::from_str(&root.read_raw("local/deploy.json")).unwrap();
    assert_eq!(written, json!({"b": 2}));
}

// ============================================================================
// Tag Listing
// ============================================================================

#[test]
fn list_tags_returns_only_directories() {
    let root = TestRoot::new();
    std::fs::create_dir_all(root.base().join("local/a")).unwrap();
    std::fs::create_dir_all(root.base().join("local/b")).unwrap();
    root.write_raw("local/note.txt", "not a tag");

    let mut tags = root.store(None, "deploy").list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["a", "b"]);
}

#[test]
fn list_tags_without_environment_dir_fails() {
    let root = TestRoot::new();
    let err = root.store(None, "deploy").list_tags().unwrap_err();
    assert!(err.is_io_kind(std::io::ErrorKind::NotFound));
}
