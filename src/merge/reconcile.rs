//! Policies for combining the metadata of merged traces.

use crate::table::Information;

/// Combines the metadata dictionaries of a trace set into one
///
/// Implemented by `MatchingValues` and by any
/// `Fn(&[&Information]) -> Information` closure.
pub trait ReconcilePolicy {
    fn reconcile(&self, infos: &[&Information]) -> Information;
}

/// Keep only keys that every dictionary has with an identical value
///
/// Keys come out in the first dictionary's order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingValues;

impl ReconcilePolicy for MatchingValues {
    fn reconcile(&self, infos: &[&Information]) -> Information {
        let Some((first, rest)) = infos.split_first() else {
            return Information::new();
        };

        first
            .iter()
            .filter(|(key, value)| rest.iter().all(|info| info.get(*key) == Some(*value)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<F> ReconcilePolicy for F
where
    F: Fn(&[&Information]) -> Information,
{
    fn reconcile(&self, infos: &[&Information]) -> Information {
        self(infos)
    }
}
