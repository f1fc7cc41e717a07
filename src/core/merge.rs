//! Merge a freshly built baseline with previously persisted records
//!
//! Seeded records get new identifiers every time the baseline is built, so
//! saved edits are matched back by a natural key derived from field values.

use std::collections::HashMap;
use std::hash::Hash;

/// Outcome counts of a natural-key merge
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Baseline records that received saved edits
    pub matched: usize,
    /// Saved records with no baseline counterpart (dropped)
    pub dropped: usize,
}

/// Copy saved edits onto baseline records that share a natural key
///
/// For every baseline record whose key has a saved counterpart, `apply`
/// receives the baseline record and the saved one. Saved records whose key
/// is not in the baseline are discarded; the result always has exactly the
/// baseline's records in the baseline's order. When several saved records
/// share a key the first one wins; later ones count as dropped.
pub fn merge_by_key<T, K, F, A>(
    mut baseline: Vec<T>,
    saved: Vec<T>,
    key: F,
    mut apply: A,
) -> (Vec<T>, MergeStats)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    A: FnMut(&mut T, &T),
{
    let mut stats = MergeStats::default();
    let saved_count = saved.len();

    let mut by_key: HashMap<K, T> = HashMap::with_capacity(saved_count);
    for record in saved {
        by_key.entry(key(&record)).or_insert(record);
    }
    let distinct_saved = by_key.len();

    for record in baseline.iter_mut() {
        if let Some(saved) = by_key.remove(&key(record)) {
            apply(record, &saved);
            stats.matched += 1;
        }
    }

    stats.dropped = by_key.len() + (saved_count - distinct_saved);
    (baseline, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        key: &'static str,
        value: u32,
        tag: u32,
    }

    fn row(key: &'static str, value: u32, tag: u32) -> Row {
        Row { key, value, tag }
    }

    fn copy_value(target: &mut Row, saved: &Row) {
        target.value = saved.value;
    }

    #[test]
    fn test_merge_copies_matching_edits() {
        let baseline = vec![row("a", 0, 1), row("b", 0, 2), row("c", 0, 3)];
        let saved = vec![row("b", 7, 99)];

        let (merged, stats) = merge_by_key(baseline, saved, |r| r.key, copy_value);

        assert_eq!(merged, vec![row("a", 0, 1), row("b", 7, 2), row("c", 0, 3)]);
        assert_eq!(stats, MergeStats { matched: 1, dropped: 0 });
    }

    #[test]
    fn test_merge_drops_unmatched_saved_records() {
        let baseline = vec![row("a", 0, 1)];
        let saved = vec![row("zzz", 5, 0), row("a", 2, 0)];

        let (merged, stats) = merge_by_key(baseline, saved, |r| r.key, copy_value);

        assert_eq!(merged, vec![row("a", 2, 1)]);
        assert_eq!(stats, MergeStats { matched: 1, dropped: 1 });
    }

    #[test]
    fn test_merge_keeps_baseline_order() {
        let baseline = vec![row("x", 0, 1), row("y", 0, 2)];
        let saved = vec![row("y", 1, 0), row("x", 2, 0)];

        let (merged, _) = merge_by_key(baseline, saved, |r| r.key, copy_value);

        assert_eq!(merged[0].key, "x");
        assert_eq!(merged[1].key, "y");
    }

    #[test]
    fn test_merge_duplicate_saved_keys_first_wins() {
        let baseline = vec![row("a", 0, 1)];
        let saved = vec![row("a", 3, 0), row("a", 4, 0)];

        let (merged, stats) = merge_by_key(baseline, saved, |r| r.key, copy_value);

        assert_eq!(merged[0].value, 3);
        assert_eq!(stats, MergeStats { matched: 1, dropped: 1 });
    }

    #[test]
    fn test_merge_with_no_saved_records() {
        let baseline = vec![row("a", 0, 1)];
        let (merged, stats) = merge_by_key(baseline.clone(), Vec::new(), |r| r.key, copy_value);
        assert_eq!(merged, baseline);
        assert_eq!(stats, MergeStats::default());
    }
}
