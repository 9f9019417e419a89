use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;
use trace_tables::naming::{
    find_h5_conflicts, find_h5_conflicts_in, get_basic_ptt_name, is_pbt, is_ptt,
};

#[test]
fn test_raw_trace_name() {
    let raw = "run.prof-abc123";
    assert!(is_pbt(raw));
    assert!(!is_ptt(raw));
    assert_eq!(get_basic_ptt_name(raw), "run-abc123.h5");
}

#[test]
fn test_conflicts_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("other.abc123.h5"), b"").unwrap();
    fs::write(dir.path().join("run-abc123.h5"), b"").unwrap();
    fs::write(dir.path().join("run-zzz999.h5"), b"").unwrap();
    fs::write(dir.path().join("run.prof-abc123"), b"").unwrap();

    let conflicts = find_h5_conflicts_in(dir.path(), &["run.prof-abc123"]).unwrap();

    assert_eq!(
        conflicts,
        Some(vec![
            "other.abc123.h5".to_string(),
            "run-abc123.h5".to_string()
        ])
    );
}

#[test]
fn test_first_raw_name_selects_the_id() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("run-zzz999.h5"), b"").unwrap();

    let files = ["notes.txt", "run.prof-zzz999", "run.prof-abc123"];
    let conflicts = find_h5_conflicts_in(dir.path(), &files).unwrap();
    assert_eq!(conflicts, Some(vec!["run-zzz999.h5".to_string()]));
}

#[test]
fn test_no_conflicts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("run-zzz999.h5"), b"").unwrap();

    assert_eq!(
        find_h5_conflicts_in(dir.path(), &["run.prof-abc123"]).unwrap(),
        None
    );
    assert_eq!(
        find_h5_conflicts_in(dir.path(), &["notes.txt", "run-zzz999.h5"]).unwrap(),
        None
    );
    let none: [&str; 0] = [];
    assert_eq!(find_h5_conflicts_in(dir.path(), &none).unwrap(), None);
}

#[test]
fn test_hidden_files_are_not_conflicts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".run-abc123.h5"), b"").unwrap();

    assert_eq!(
        find_h5_conflicts_in(dir.path(), &["run.prof-abc123"]).unwrap(),
        None
    );

    fs::write(dir.path().join("run-abc123.h5"), b"").unwrap();
    assert_eq!(
        find_h5_conflicts_in(dir.path(), &["run.prof-abc123"]).unwrap(),
        Some(vec!["run-abc123.h5".to_string()])
    );
}

#[test]
fn test_conflicts_in_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("run-Qw3rty.h5"), b"").unwrap();

    // no other test in this file depends on the working directory
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let conflicts = find_h5_conflicts(&["run.prof-Qw3rty"]);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(conflicts.unwrap(), Some(vec!["run-Qw3rty.h5".to_string()]));
}
