//! Property-based tests using proptest.
//!
//! These tests verify the algebraic invariants of decomposition, merging
//! and the set operations for randomly generated inputs.

use cidr_summary::{
    difference, interval_to_cidrs, merge_intervals, overlap, summarize, Cidr, Family, Interval,
    Limits,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Generate random IPv4 intervals.
fn v4_interval_strategy() -> impl Strategy<Value = Interval> {
    (0u64..=u32::MAX as u64, 0u64..=u32::MAX as u64).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Interval::new(Family::V4, lo as u128, hi as u128).unwrap()
    })
}

/// Generate random IPv6 intervals.
fn v6_interval_strategy() -> impl Strategy<Value = Interval> {
    (any::<u128>(), any::<u128>()).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Interval::new(Family::V6, lo, hi).unwrap()
    })
}

/// Generate small collections of IPv4 intervals.
fn v4_set_strategy() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(v4_interval_strategy(), 1..8)
}

/// Generate random aligned IPv4 CIDR blocks.
fn v4_cidr_strategy() -> impl Strategy<Value = Cidr> {
    (0u64..=u32::MAX as u64, 0u8..=32u8)
        .prop_map(|(value, prefix)| Cidr::masked(Family::V4, value as u128, prefix).unwrap())
}

/// Render intervals as one textual entry per line.
fn as_lines(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// DECOMPOSITION PROPERTIES
// ============================================================================

proptest! {
    /// Property: decomposing a block's own interval returns exactly that block.
    #[test]
    fn prop_cidr_round_trip(block in v4_cidr_strategy()) {
        let blocks = interval_to_cidrs(&block.interval(), 1_000).unwrap();
        prop_assert_eq!(blocks, vec![block]);
    }

    /// Property: the blocks tile the interval exactly, in order, with no
    /// gaps, overlaps, or overshoot.
    #[test]
    fn prop_cover_exactness(interval in v4_interval_strategy()) {
        let blocks = interval_to_cidrs(&interval, 1_000).unwrap();
        prop_assert_eq!(blocks.first().unwrap().first(), interval.start);
        prop_assert_eq!(blocks.last().unwrap().last(), interval.end);
        for pair in blocks.windows(2) {
            prop_assert_eq!(pair[0].last() + 1, pair[1].first());
        }
    }

    /// Property: same, for the 128-bit space.
    #[test]
    fn prop_cover_exactness_v6(interval in v6_interval_strategy()) {
        let blocks = interval_to_cidrs(&interval, 1_000).unwrap();
        prop_assert_eq!(blocks.first().unwrap().first(), interval.start);
        prop_assert_eq!(blocks.last().unwrap().last(), interval.end);
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].last() < pair[1].first());
            prop_assert_eq!(pair[0].last() + 1, pair[1].first());
        }
    }

    /// Property: no two adjacent emitted blocks are siblings that could
    /// merge into one larger aligned block.
    #[test]
    fn prop_minimality(interval in v4_interval_strategy()) {
        let blocks = interval_to_cidrs(&interval, 1_000).unwrap();
        for pair in blocks.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.prefix == b.prefix && a.prefix > 0 {
                let merged = Cidr::masked(a.family, a.network, a.prefix - 1).unwrap();
                let siblings = merged.network == a.network && merged.last() == b.last();
                prop_assert!(!siblings, "{} and {} could merge", a, b);
            }
        }
    }
}

// ============================================================================
// MERGE PROPERTIES
// ============================================================================

proptest! {
    /// Property: merge is idempotent.
    #[test]
    fn prop_merge_idempotent(intervals in v4_set_strategy()) {
        let once = merge_intervals(intervals);
        let twice = merge_intervals(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Property: merged intervals are sorted, disjoint, and non-adjacent.
    #[test]
    fn prop_merge_disjoint_sorted(intervals in v4_set_strategy()) {
        let merged = merge_intervals(intervals);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
            prop_assert!(pair[1].start - pair[0].end > 1, "adjacent intervals must coalesce");
        }
    }
}

// ============================================================================
// SET OPERATION PROPERTIES
// ============================================================================

proptest! {
    /// Property: overlap(A, B) == overlap(B, A).
    #[test]
    fn prop_intersection_symmetry(a in v4_set_strategy(), b in v4_set_strategy()) {
        let limits = Limits::default();
        let ab = overlap(&as_lines(&a), &as_lines(&b), &limits).unwrap();
        let ba = overlap(&as_lines(&b), &as_lines(&a), &limits).unwrap();
        prop_assert_eq!(ab.ipv4, ba.ipv4);
        prop_assert_eq!(ab.stats.overlap_percent_v4, ba.stats.overlap_percent_v4);
    }

    /// Property: (A - B) ∪ (A ∩ B) == A.
    #[test]
    fn prop_difference_identity(a in v4_set_strategy(), b in v4_set_strategy()) {
        let limits = Limits::default();
        let text_a = as_lines(&a);
        let text_b = as_lines(&b);

        let diff = difference(&text_a, &text_b, &limits).unwrap();
        let inter = overlap(&text_a, &text_b, &limits).unwrap();
        let reunion: Vec<String> = diff.ipv4.into_iter().chain(inter.ipv4).collect();

        let merged_a = summarize(&text_a, &limits).unwrap();
        if reunion.is_empty() {
            // A was empty of addresses only if it never parsed; with our
            // strategies A is never empty, so the reunion never is either.
            prop_assert!(merged_a.ipv4.is_empty());
        } else {
            let rebuilt = summarize(&reunion.join("\n"), &limits).unwrap();
            prop_assert_eq!(rebuilt.ipv4, merged_a.ipv4);
        }
    }
}
