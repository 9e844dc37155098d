use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;

use crate::core::types::PerformanceMap;

/// What reconciliation found before testing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Both maps covered the same users before any were dropped
    pub keys_consistent: bool,
    /// Users removed from both maps because of a NaN or infinite value
    pub dropped: Vec<u64>,
}

/// Users whose value is NaN or infinite in either map
pub fn non_finite_users(map1: &PerformanceMap, map2: &PerformanceMap) -> BTreeSet<u64> {
    map1.iter()
        .chain(map2.iter())
        .filter(|(_, value)| !value.is_finite())
        .map(|(user, _)| *user)
        .collect()
}

/// Warn about mismatched user sets and drop non-finite users from both maps.
///
/// Mismatched user sets are not an error: each map keeps its own users.
pub fn reconcile(map1: &mut PerformanceMap, map2: &mut PerformanceMap) -> ReconcileReport {
    let keys_consistent = map1.keys().eq(map2.keys());
    if !keys_consistent {
        warn!(
            "keys not consistent: {} users in first file, {} in second",
            map1.len(),
            map2.len()
        );
    }

    let dropped = non_finite_users(map1, map2);
    if !dropped.is_empty() {
        warn!(
            "nan found: dropping {} user(s) with non-finite values",
            dropped.len()
        );
        for user in &dropped {
            map1.remove(user);
            map2.remove(user);
        }
    }

    ReconcileReport {
        keys_consistent,
        dropped: dropped.into_iter().collect(),
    }
}
