//! Best-effort merging of trace sets.
//!
//! Only the event log, nodes, threads and metadata are combined. Event
//! types, names and attributes (and the error table) are taken from the
//! first trace of the set, which is assumed to speak for the whole set;
//! merging traces that do not really belong together gives meaningless
//! results.

use super::reconcile::ReconcilePolicy;
use crate::table::{Information, Table};
use crate::trace::Trace;
use crate::utils::config::START_TIME_KEY;
use crate::utils::error::MergeError;
use log::info;

/// Merge one trace set into a new trace
///
/// **Public** - inputs are left untouched
///
/// With more than one trace, every event and thread row gets a
/// `start_time` column naming the run it came from, so the merged trace can
/// still be split per run. Tables are concatenated in set order.
///
/// # Errors
/// * `MergeError::EmptySet` - `set` is empty
/// * `MergeError::Metadata` - a trace has no `start_time`
pub fn merge_trace_set(set: &[&Trace], policy: &dyn ReconcilePolicy) -> Result<Trace, MergeError> {
    let (first, rest) = set.split_first().ok_or(MergeError::EmptySet)?;

    let infos: Vec<&Information> = set.iter().map(|t| &t.information).collect();
    let information = policy.reconcile(&infos);

    if rest.is_empty() {
        let mut merged = (*first).clone();
        merged.information = information;
        return Ok(merged);
    }

    let mut events = Vec::with_capacity(set.len());
    let mut threads = Vec::with_capacity(set.len());
    for trace in set {
        let start_time = trace.metadata(START_TIME_KEY)?;

        let mut tagged_events = trace.events.clone();
        tagged_events.set_constant_column(START_TIME_KEY, start_time.clone());
        events.push(tagged_events);

        let mut tagged_threads = trace.threads.clone();
        tagged_threads.set_constant_column(START_TIME_KEY, start_time);
        threads.push(tagged_threads);
    }

    let mut merged = Trace::new(Table::concat(&events), information);
    merged.nodes = Table::concat(set.iter().map(|t| &t.nodes));
    merged.threads = Table::concat(&threads);
    merged.event_types = first.event_types.clone();
    merged.event_names = first.event_names.clone();
    merged.event_attributes = first.event_attributes.clone();
    merged.errors = first.errors.clone();

    info!(
        "Merged {} traces: {} events, {} threads, {} shared metadata keys",
        set.len(),
        merged.events.len(),
        merged.threads.len(),
        merged.information.len()
    );
    Ok(merged)
}

/// Merge every trace set
///
/// **Public** - usually fed the values of `find_trace_sets`
pub fn automerge_trace_sets<'a, I, S>(sets: I, policy: &dyn ReconcilePolicy) -> Result<Vec<Trace>, MergeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[&'a Trace]>,
{
    sets.into_iter()
        .map(|set| merge_trace_set(set.as_ref(), policy))
        .collect()
}
