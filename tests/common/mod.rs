//! Shared trace builders for integration tests.

#![allow(dead_code)]

use trace_tables::{EventRecord, Information, Table, Trace, Value};

pub fn info(pairs: &[(&str, Value)]) -> Information {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A trace with `events` events, two nodes' worth of threads and typical metadata
pub fn sample_trace(events: usize, start_time: i64) -> Trace {
    let records: Vec<EventRecord> = (0..events as i64)
        .map(|i| EventRecord::new(i % 2, i % 4, 1 + i % 3, i * 10, i * 10 + 7).with_id(i))
        .collect();

    let mut trace = Trace::new(
        Table::from_events(&records),
        info(&[
            ("hostname", Value::from("node01.cluster.example")),
            ("exe", Value::from("/opt/dplasma/testing/testing_dpotrf")),
            ("cmdline", Value::from("./testing_dpotrf -N 1000 -t 200")),
            ("start_time", Value::Int(start_time)),
            ("PARAM_N", Value::Int(1000)),
            ("PARAM_NB", Value::Int(200)),
            ("gflops", Value::Float(42.5)),
        ]),
    );

    trace.event_types = Table::from_columns(vec![
        ("type", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        (
            "name",
            vec![Value::from("POTRF"), Value::from("TRSM"), Value::from("GEMM")],
        ),
    ])
    .unwrap();
    trace.event_names = Table::from_columns(vec![(
        "name",
        vec![Value::from("POTRF"), Value::from("TRSM"), Value::from("GEMM")],
    )])
    .unwrap();
    trace.nodes = Table::from_columns(vec![
        ("node_id", vec![Value::Int(0), Value::Int(1)]),
        ("hostname", vec![Value::from("node01"), Value::from("node02")]),
    ])
    .unwrap();
    trace.threads = Table::from_columns(vec![
        (
            "thread_id",
            vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)],
        ),
        (
            "node_id",
            vec![Value::Int(0), Value::Int(0), Value::Int(1), Value::Int(1)],
        ),
    ])
    .unwrap();
    trace
}
