use std::collections::HashSet;
use std::hash::Hash;

pub mod articles;
pub mod products;

/// Split candidate keys into those present in `existing` and those absent,
/// preserving candidate order. Pure so it stays testable without a store.
pub fn partition_by_existence<K: Eq + Hash>(
    candidates: impl IntoIterator<Item = K>,
    existing: &HashSet<K>,
) -> (Vec<K>, Vec<K>) {
    let mut present = Vec::new();
    let mut absent = Vec::new();
    for key in candidates {
        if existing.contains(&key) {
            present.push(key);
        } else {
            absent.push(key);
        }
    }
    (present, absent)
}
