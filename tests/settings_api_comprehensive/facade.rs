//! Settings facade: construction, transitions, write-then-read, refresh.

use crate::common::*;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn empty_file_name_is_rejected() {
    let root = TestRoot::new();
    assert!(root.builder().file("").open().unwrap_err().is_config());
    assert!(Settings::new("", None, SettingsOptions::default())
        .unwrap_err()
        .is_config());
}

#[test]
fn construction_does_not_create_files() {
    let root = TestRoot::new();
    let settings = root.open("deploy");
    assert_eq!(settings.get("anything"), None);
    assert!(!root.base().exists());
}

#[test]
fn malformed_document_fails_construction() {
    let root = TestRoot::new();
    root.write_raw("local/deploy.json", "{");
    assert!(root.builder().file("deploy").open().unwrap_err().is_parse());
}

#[test]
fn construction_reads_once_and_reads_are_cached() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.insert_file("settings/local/deploy.json", r#"{"retries": 3}"#);
    let settings = memory_builder(&fs).file("deploy").open().unwrap();
    for _ in 0..10 {
        assert_eq!(settings.get("retries"), Some(&json!(3)));
        assert_eq!(settings.get("missing"), None);
    }
    assert_eq!(fs.read_count(), 1);
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn set_then_fresh_instance_reads_value() {
    let root = TestRoot::new();
    let mut settings = root.open("deploy");
    settings.set("owner", ADDRESS).unwrap();
    settings.set("retries", 5).unwrap();

    let reopened = root.open("deploy");
    assert_eq!(reopened.must_get_address("owner").unwrap(), ADDRESS);
    assert_eq!(reopened.get_or("retries", 0), json!(5));
}

#[test]
fn set_falsy_value_reads_back_as_default() {
    let root = TestRoot::new();
    let mut settings = root.open("deploy");
    settings.set("enabled", false).unwrap();

    assert_eq!(settings.get_or("enabled", true), json!(true));
    assert!(root.read_raw("local/deploy.json").contains("\"enabled\": false"));
}

#[test]
fn set_is_visible_immediately() {
    let root = TestRoot::new();
    let mut settings = root.open("deploy");
    settings.set("nested", json!({"a": {"b": 1}})).unwrap();
    assert_eq!(settings.get_path("nested.a.b"), Some(&json!(1)));
    assert_eq!(settings.get_reader("nested").get_path("a.b"), Some(&json!(1)));
}

#[test]
fn outstanding_readers_do_not_change() {
    let root = TestRoot::new();
    let mut settings = root.open("deploy");
    settings.set("n", 1).unwrap();
    let snapshot = settings.reader().clone();

    settings.set("n", 2).unwrap();
    assert_eq!(snapshot.get("n"), Some(&json!(1)));
    assert_eq!(settings.get("n"), Some(&json!(2)));
}

#[test]
fn tagged_and_untagged_are_separate_documents() {
    let root = TestRoot::new();
    let mut base = root.open("deploy");
    let mut tagged = base.with_tag("v2").unwrap();

    base.set("version", 1).unwrap();
    tagged.set("version", 2).unwrap();

    assert_eq!(root.open("deploy").get("version"), Some(&json!(1)));
    assert_eq!(root.open_tagged("deploy", "v2").get("version"), Some(&json!(2)));
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn refresh_required_to_see_external_edits() {
    let root = TestRoot::new();
    let mut settings = root.open("deploy");
    root.write_raw("local/deploy.json", r#"{"owner": "edited"}"#);

    assert_eq!(settings.get("owner"), None);
    settings.refresh().unwrap();
    assert_eq!(settings.get("owner"), Some(&json!("edited")));
}

#[test]
fn refresh_sees_writes_from_another_instance() {
    let root = TestRoot::new();
    let mut reader_side = root.open("deploy");
    let mut writer_side = root.open("deploy");

    writer_side.set("n", 7).unwrap();
    assert_eq!(reader_side.get("n"), None);
    reader_side.refresh().unwrap();
    assert_eq!(reader_side.get("n"), Some(&json!(7)));
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn with_file_keeps_tag_and_base() {
    let root = TestRoot::new();
    let tagged = root.open_tagged("deploy", "v2");
    let tokens = tagged.with_file("tokens").unwrap();
    assert_eq!(tokens.tag(), Some("v2"));
    assert_eq!(tokens.path(), root.base().join("local/v2/tokens.json"));
    assert_eq!(tagged.file_name(), "deploy");
}

#[test]
fn list_tags_reports_tag_directories() {
    let root = TestRoot::new();
    root.open_tagged("deploy", "a").set("x", 1).unwrap();
    root.open_tagged("deploy", "b").set("x", 1).unwrap();
    root.open("deploy").set("x", 1).unwrap();

    let mut tags = root.open("deploy").list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["a", "b"]);
}

#[test]
fn list_tags_missing_environment_propagates_error() {
    let root = TestRoot::new();
    let err = root.open("deploy").list_tags().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
