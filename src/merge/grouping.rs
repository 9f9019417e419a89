//! Bucket traces that belong to the same experiment.

use crate::trace::Trace;
use crate::utils::error::MergeError;
use indexmap::IndexMap;
use log::debug;

/// Traces keyed by their composite key, in encounter order
pub type TraceSets<'a> = IndexMap<String, Vec<&'a Trace>>;

/// Composite key of `trace` over the metadata keys `on`
///
/// Values are stringified, stripped of `/` and joined with `_`.
///
/// # Errors
/// * `MergeError::Metadata` - a key is missing or cannot be formatted
pub fn set_key(trace: &Trace, on: &[&str]) -> Result<String, MergeError> {
    let parts = on
        .iter()
        .map(|key| {
            trace
                .metadata(key)
                .map(|value| value.to_string().replace('/', ""))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join("_"))
}

/// Group traces by composite key
///
/// **Public** - first step before `automerge_trace_sets`
///
/// # Arguments
/// * `traces` - Traces to group
/// * `on` - Metadata keys forming the composite key (usually `["cmdline"]`)
///
/// # Returns
/// Ordered map from composite key to the traces sharing it; both the keys
/// and the traces in each bucket keep encounter order.
pub fn find_trace_sets<'a>(traces: &'a [Trace], on: &[&str]) -> Result<TraceSets<'a>, MergeError> {
    let mut sets = TraceSets::new();
    for trace in traces {
        let key = set_key(trace, on)?;
        sets.entry(key).or_default().push(trace);
    }
    debug!("Grouped {} traces into {} sets", traces.len(), sets.len());
    Ok(sets)
}
