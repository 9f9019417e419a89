mod common;

use common::sample_trace;
use pretty_assertions::assert_eq;
use trace_tables::merge::{
    automerge_trace_sets, find_trace_sets, merge_trace_set, set_key, MatchingValues,
};
use trace_tables::utils::error::{MergeError, MetadataError};
use trace_tables::{Information, Trace, Value};

fn with_cmdline(mut trace: Trace, cmdline: &str) -> Trace {
    trace
        .information
        .insert("cmdline".to_string(), Value::from(cmdline));
    trace
}

#[test]
fn test_grouping_keeps_encounter_order() {
    let traces = vec![
        with_cmdline(sample_trace(3, 1), "./testing_dgemm -N 100"),
        with_cmdline(sample_trace(3, 2), "./testing_dpotrf -N 100"),
        with_cmdline(sample_trace(3, 3), "./testing_dgemm -N 100"),
    ];

    let sets = find_trace_sets(&traces, &["cmdline"]).unwrap();

    let keys: Vec<&str> = sets.keys().map(String::as_str).collect();
    assert_eq!(keys, vec![".testing_dgemm -N 100", ".testing_dpotrf -N 100"]);

    let first = &sets[".testing_dgemm -N 100"];
    assert_eq!(first.len(), 2);
    assert!(std::ptr::eq(first[0], &traces[0]));
    assert!(std::ptr::eq(first[1], &traces[2]));
    assert_eq!(sets[".testing_dpotrf -N 100"].len(), 1);
}

#[test]
fn test_composite_key() {
    let trace = sample_trace(1, 5);
    assert_eq!(
        set_key(&trace, &["N", "NB", "hostname"]).unwrap(),
        "1000_200_node01"
    );
    assert!(matches!(
        set_key(&trace, &["missing"]),
        Err(MergeError::Metadata(MetadataError::NotFound(_)))
    ));
}

#[test]
fn test_merge_pair() {
    let a = sample_trace(10, 100);
    let b = sample_trace(5, 200);
    let a_info = a.information.clone();

    let merged = merge_trace_set(&[&a, &b], &MatchingValues).unwrap();

    assert_eq!(merged.events.len(), 15);
    let origins = merged.events.column("start_time").unwrap();
    assert!(origins[..10].iter().all(|v| *v == Value::Int(100)));
    assert!(origins[10..].iter().all(|v| *v == Value::Int(200)));

    assert_eq!(merged.threads.len(), 8);
    assert_eq!(
        merged.threads.column("start_time").unwrap()[4],
        Value::Int(200)
    );
    assert_eq!(merged.nodes.len(), 4);
    assert_eq!(merged.event_types, a.event_types);

    // start_time differs between runs, everything else is shared
    assert!(!merged.information.contains_key("start_time"));
    assert_eq!(merged.information.len(), a_info.len() - 1);
    assert_eq!(merged.information["cmdline"], a_info["cmdline"]);

    // inputs are untouched
    assert_eq!(a.events.len(), 10);
    assert!(!a.events.has_column("start_time"));
    assert_eq!(a.information, a_info);
}

#[test]
fn test_merge_single_trace_is_not_tagged() {
    let a = sample_trace(4, 100);
    let merged = merge_trace_set(&[&a], &MatchingValues).unwrap();

    assert_eq!(merged.events, a.events);
    assert!(!merged.events.has_column("start_time"));
    assert_eq!(merged.information, a.information);
}

#[test]
fn test_merge_empty_set() {
    assert!(matches!(
        merge_trace_set(&[], &MatchingValues),
        Err(MergeError::EmptySet)
    ));
}

#[test]
fn test_merge_requires_start_time() {
    let a = sample_trace(2, 1);
    let mut b = sample_trace(2, 2);
    b.information.shift_remove("start_time");

    assert!(matches!(
        merge_trace_set(&[&a, &b], &MatchingValues),
        Err(MergeError::Metadata(MetadataError::NotFound(_)))
    ));
}

#[test]
fn test_merge_with_closure_policy() {
    let a = sample_trace(2, 1);
    let b = sample_trace(2, 2);
    let keep_first = |infos: &[&Information]| infos[0].clone();

    let merged = merge_trace_set(&[&a, &b], &keep_first).unwrap();
    assert_eq!(merged.information, a.information);
}

#[test]
fn test_automerge_every_set() {
    let traces = vec![
        with_cmdline(sample_trace(3, 1), "a"),
        with_cmdline(sample_trace(4, 2), "b"),
        with_cmdline(sample_trace(5, 3), "a"),
    ];
    let sets = find_trace_sets(&traces, &["cmdline"]).unwrap();

    let merged = automerge_trace_sets(sets.values(), &MatchingValues).unwrap();

    let sizes: Vec<usize> = merged.iter().map(|t| t.events.len()).collect();
    assert_eq!(sizes, vec![8, 4]);
    assert_eq!(
        merged[0].information.get("cmdline"),
        Some(&Value::from("a"))
    );
}

#[test]
fn test_merge_command_writes_one_file_per_set() {
    use tempfile::tempdir;
    use trace_tables::commands::{execute_merge, MergeArgs};
    use trace_tables::storage::{LoadOptions, SaveOptions};

    let dir = tempdir().unwrap();
    let mut files = Vec::new();
    for (i, events) in [3usize, 4].into_iter().enumerate() {
        let path = dir.path().join(format!("run-{}.h5", i));
        sample_trace(events, i as i64 + 1)
            .save(&path, &SaveOptions::default())
            .unwrap();
        files.push(path);
    }

    let args = MergeArgs {
        files,
        output_dir: dir.path().join("merged"),
        ..Default::default()
    };
    let written = execute_merge(&args).unwrap();

    assert_eq!(
        written,
        vec![dir.path().join("merged/node01-dpotrf-1000-200-42.5.h5")]
    );
    let merged = Trace::load(&written[0], &LoadOptions::default()).unwrap();
    assert_eq!(merged.events.len(), 7);
    assert!(merged.events.has_column("start_time"));
}

#[test]
fn test_merge_command_keeps_sets_with_shared_descriptors() {
    use tempfile::tempdir;
    use trace_tables::commands::{execute_merge, MergeArgs};
    use trace_tables::storage::{LoadOptions, SaveOptions};

    // the cmdlines differ only in a flag the descriptors do not cover
    let dir = tempdir().unwrap();
    let mut files = Vec::new();
    for (i, cmdline) in ["-c 4", "-c 8", "-c 4", "-c 8"].into_iter().enumerate() {
        let path = dir.path().join(format!("run-{}.h5", i));
        with_cmdline(sample_trace(i + 1, i as i64 + 1), cmdline)
            .save(&path, &SaveOptions::default())
            .unwrap();
        files.push(path);
    }

    let args = MergeArgs {
        files,
        output_dir: dir.path().join("merged"),
        ..Default::default()
    };
    let written = execute_merge(&args).unwrap();

    assert_eq!(
        written,
        vec![
            dir.path().join("merged/node01-dpotrf-1000-200-42.5.h5"),
            dir.path().join("merged/node01-dpotrf-1000-200-42.5-1.h5"),
        ]
    );
    let sizes: Vec<usize> = written
        .iter()
        .map(|path| Trace::load(path, &LoadOptions::default()).unwrap().events.len())
        .collect();
    // 1 + 3 events for "-c 4", 2 + 4 for "-c 8"
    assert_eq!(sizes, vec![4, 6]);
}
