#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_has_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_keeps_version_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallytui.db");

    {
        let db = Database::open(&path).unwrap();
        db.set_item("transactions", "[]").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
    assert_eq!(db.get_item("transactions").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallytui.db");

    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 99", [])
            .unwrap();
    }

    let err = Database::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("schema v99 is newer"), "{err:#}");
}

// ── Items ─────────────────────────────────────────────────────

#[test]
fn test_get_missing_item() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_item("transactions").unwrap().is_none());
}

#[test]
fn test_set_then_get() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("transactions", r#"[{"a":1}]"#).unwrap();
    assert_eq!(
        db.get_item("transactions").unwrap().as_deref(),
        Some(r#"[{"a":1}]"#)
    );
}

#[test]
fn test_set_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "first").unwrap();
    db.set_item("k", "second").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_keys_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("a", "1").unwrap();
    db.set_item("b", "2").unwrap();
    assert_eq!(db.get_item("a").unwrap().as_deref(), Some("1"));
    assert_eq!(db.get_item("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_remove_item() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "v").unwrap();
    assert!(db.remove_item("k").unwrap());
    assert!(db.get_item("k").unwrap().is_none());
    assert!(!db.remove_item("k").unwrap());
}

#[test]
fn test_empty_string_value_is_stored() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some(""));
}
