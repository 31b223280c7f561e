//! Interval coalescing.

use crate::models::Interval;

/// Coalesce intervals of one family into a minimal disjoint, sorted set.
///
/// Adjacent intervals (`a.end + 1 == b.start`) merge as if overlapping, so
/// the result never contains two intervals that could close a zero-address
/// gap. Idempotent: merging an already-merged list returns it unchanged.
///
/// # Arguments
/// * `intervals` - intervals of a single family, in any order
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    debug_assert!(
        intervals.windows(2).all(|w| w[0].family == w[1].family),
        "merge_intervals expects a single family"
    );

    if intervals.len() < 2 {
        return intervals;
    }
    intervals.sort_by_key(|iv| iv.start);

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    let mut acc = intervals[0];
    for iv in intervals.into_iter().skip(1) {
        // Phrased to avoid acc.end + 1 overflowing at the top of the space.
        if iv.start > acc.end && iv.start - acc.end > 1 {
            merged.push(acc);
            acc = iv;
        } else if iv.end > acc.end {
            acc.end = iv.end;
        }
    }
    merged.push(acc);
    merged
}
