mod common;

use common::sample_trace;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;
use trace_tables::storage::{
    tmp_path_for, Codec, Compression, Layout, LoadOptions, SaveOptions, TableStore,
    TableStoreWriter,
};
use trace_tables::utils::error::StoreError;
use trace_tables::{Table, Trace};

fn assert_same_tables(loaded: &Trace, original: &Trace) {
    assert_eq!(loaded.event_types, original.event_types);
    assert_eq!(loaded.event_names, original.event_names);
    assert_eq!(loaded.event_attributes, original.event_attributes);
    assert_eq!(loaded.nodes, original.nodes);
    assert_eq!(loaded.threads, original.threads);
    assert_eq!(loaded.information, original.information);
    assert_eq!(loaded.errors, original.errors);
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dpotrf-abc123.h5");
    let trace = sample_trace(25, 1_380_000_000);

    assert!(trace.save(&path, &SaveOptions::default()).unwrap());
    assert!(!tmp_path_for(&path).exists());

    let loaded = Trace::load(&path, &LoadOptions::default()).unwrap();
    assert_same_tables(&loaded, &trace);
    assert_eq!(loaded.events, trace.events);
    assert!(!loaded.is_open());
}

#[test]
fn test_grouped_compressed_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grouped.h5");
    let trace = sample_trace(100, 7);

    let options = SaveOptions {
        grouped: true,
        compression: Compression::new(9, Codec::Zstd),
        ..Default::default()
    };
    assert!(trace.save(&path, &options).unwrap());

    let loaded = Trace::load(&path, &LoadOptions::default()).unwrap();
    assert_same_tables(&loaded, &trace);
    assert_eq!(loaded.events, trace.events);
}

#[test]
fn test_skeleton_load_skips_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("skeleton.h5");
    let trace = sample_trace(10, 1);
    trace.save(&path, &SaveOptions::default()).unwrap();

    let options = LoadOptions {
        skeleton_only: true,
        ..Default::default()
    };
    let loaded = Trace::load(&path, &options).unwrap();

    assert!(loaded.events.is_empty());
    assert_same_tables(&loaded, &trace);
}

#[test]
fn test_no_overwrite_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.h5");
    fs::write(&path, b"previous contents").unwrap();

    let options = SaveOptions {
        overwrite: false,
        ..Default::default()
    };
    let written = sample_trace(5, 1).save(&path, &options).unwrap();

    assert!(!written);
    assert_eq!(fs::read(&path).unwrap(), b"previous contents");
    assert!(!tmp_path_for(&path).exists());
}

#[test]
fn test_overwrite_replaces_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("replaced.h5");
    sample_trace(5, 1).save(&path, &SaveOptions::default()).unwrap();
    sample_trace(8, 2).save(&path, &SaveOptions::default()).unwrap();

    let loaded = Trace::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.events.len(), 8);
}

#[test]
fn test_stale_tmp_file_is_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stale.h5");
    // left behind by an interrupted save
    fs::write(tmp_path_for(&path), b"PTTC half written").unwrap();

    sample_trace(5, 1).save(&path, &SaveOptions::default()).unwrap();

    assert!(!tmp_path_for(&path).exists());
    assert_eq!(
        Trace::load(&path, &LoadOptions::default()).unwrap().events.len(),
        5
    );
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kept.h5");
    sample_trace(5, 1).save(&path, &SaveOptions::default()).unwrap();
    let before = fs::read(&path).unwrap();

    // the temporary file cannot be created
    fs::create_dir(tmp_path_for(&path)).unwrap();

    let result = sample_trace(50, 2).save(&path, &SaveOptions::default());

    assert!(matches!(result, Err(StoreError::Io(_))));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(
        Trace::load(&path, &LoadOptions::default()).unwrap().events.len(),
        5
    );
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/dirs/trace.h5");
    assert!(sample_trace(3, 1).save(&path, &SaveOptions::default()).unwrap());
    assert!(path.exists());
}

#[test]
fn test_invalid_compression_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.h5");
    let options = SaveOptions {
        compression: Compression::new(99, Codec::Zstd),
        ..Default::default()
    };
    assert!(matches!(
        sample_trace(3, 1).save(&path, &options),
        Err(StoreError::InvalidCompression(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_keep_open_until_close() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("open.h5");
    sample_trace(3, 1).save(&path, &SaveOptions::default()).unwrap();

    let options = LoadOptions {
        keep_open: true,
        ..Default::default()
    };
    let mut trace = Trace::load(&path, &options).unwrap();
    assert!(trace.is_open());

    trace.close();
    assert!(!trace.is_open());
    trace.close();
}

#[test]
fn test_missing_table_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.h5");
    let trace = sample_trace(3, 1);

    let mut writer = TableStoreWriter::create(&path, Compression::default()).unwrap();
    writer.put_table("event_types", &trace.event_types, Layout::Fixed).unwrap();
    writer.put_table("event_names", &trace.event_names, Layout::Fixed).unwrap();
    writer.put_information("information", &trace.information).unwrap();
    writer.finish().unwrap();

    match Trace::load(&path, &LoadOptions::default()) {
        Err(StoreError::MissingTable(name)) => assert_eq!(name, "event_attributes"),
        other => panic!("expected a missing table, got {:?}", other.map(|t| t.events.len())),
    }
}

#[test]
fn test_not_a_container() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.h5");
    fs::write(&path, b"\x89HDF\r\n\x1a\n").unwrap();

    assert!(matches!(
        Trace::load(&path, &LoadOptions::default()),
        Err(StoreError::InvalidFormat(_))
    ));
}

#[test]
fn test_truncated_container() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("truncated.h5");
    sample_trace(20, 1).save(&path, &SaveOptions::default()).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

    assert!(matches!(
        TableStore::open(&path),
        Err(StoreError::InvalidFormat(_))
    ));
}

#[test]
fn test_grouped_frames_are_joined() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chunks.h5");
    let events = sample_trace(12, 1).events.clone();

    let mut writer = TableStoreWriter::create(&path, Compression::new(3, Codec::Zstd)).unwrap();
    writer
        .put_table("events", &events.slice(0, 5), Layout::Grouped)
        .unwrap();
    writer
        .put_table("events", &events.slice(5, 12), Layout::Grouped)
        .unwrap();
    writer.finish().unwrap();

    let mut store = TableStore::open(&path).unwrap();
    assert_eq!(store.keys(), vec!["events"]);
    assert_eq!(store.get_table("events").unwrap(), events);
    assert!(matches!(
        store.get_table("nodes"),
        Err(StoreError::MissingTable(_))
    ));
}

#[test]
fn test_store_keys_in_canonical_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("order.h5");
    sample_trace(2, 1).save(&path, &SaveOptions::default()).unwrap();

    let store = TableStore::open(&path).unwrap();
    assert_eq!(
        store.keys(),
        vec![
            "event_types",
            "event_names",
            "event_attributes",
            "nodes",
            "threads",
            "information",
            "errors",
            "events",
        ]
    );
}

#[test]
fn test_empty_trace_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.h5");
    let trace = Trace::new(Table::events(), Default::default());
    trace.save(&path, &SaveOptions { grouped: true, ..Default::default() }).unwrap();

    let loaded = Trace::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.events, Table::events());
    assert!(loaded.information.is_empty());
}
