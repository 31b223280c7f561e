//! Integration tests for cidr-summary
//!
//! These tests drive the public operations end to end with textual input,
//! the way a CLI or HTTP wrapper would.

use cidr_summary::{
    compare, containment, deaggregate, difference, overlap, split_by_prefix, summarize, CalcError,
    Limits,
};

#[test]
fn test_summarize_two_halves() {
    let report = summarize("192.168.0.0/25\n192.168.0.128/25", &Limits::default())
        .expect("summarize failed");
    assert_eq!(report.ipv4, vec!["192.168.0.0/24"], "halves must coalesce");
    assert_eq!(report.stats.original_count, 2);
    assert_eq!(report.stats.summarized_count, 1);
    assert_eq!(report.stats.addresses_v4, 256);
    assert!(report.errors.is_empty());
}

#[test]
fn test_overlap_fifty_percent() {
    let report =
        overlap("10.0.0.0/24", "10.0.0.128/25", &Limits::default()).expect("overlap failed");
    assert_eq!(report.ipv4, vec!["10.0.0.128/25"]);
    assert_eq!(report.stats.overlap_percent_v4, 50.0);
}

#[test]
fn test_decompose_misaligned_range() {
    // Decomposition is reachable through summarize: one range line in,
    // its minimal cover out.
    let report = summarize("10.0.0.5-10.0.0.20", &Limits::default()).expect("summarize failed");
    assert_eq!(
        report.ipv4,
        vec![
            "10.0.0.5/32",
            "10.0.0.6/31",
            "10.0.0.8/29",
            "10.0.0.16/30",
            "10.0.0.20/32",
        ]
    );
}

#[test]
fn test_split_by_prefix_children() {
    let report = split_by_prefix("10.0.0.0/24", 26, &Limits::default()).expect("split failed");
    assert_eq!(
        report.children,
        vec![
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.0.128/26",
            "10.0.0.192/26",
        ]
    );
}

#[test]
fn test_compare_matches_exact_blocks_only() {
    let report = compare(
        "10.0.0.0/24",
        "10.0.0.0/25\n10.0.1.0/25",
        &Limits::default(),
    )
    .expect("compare failed");
    assert!(report.unchanged.is_empty(), "no exact CIDR match exists");
    assert_eq!(report.removed, vec!["10.0.0.0/24"]);
    assert_eq!(report.added, vec!["10.0.0.0/25", "10.0.1.0/25"]);
}

#[test]
fn test_deaggregate_to_eight_blocks() {
    let report = deaggregate("10.0.0.0/23", 25, &Limits::default()).expect("deaggregate failed");
    assert_eq!(
        report.ipv4,
        vec![
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.0.1.0/25",
            "10.0.1.128/25",
        ],
        "a /23 holds four /25 blocks"
    );
    assert_eq!(report.stats.block_count, 4);
}

#[test]
fn test_mixed_input_partial_success() {
    let input = "10.0.0.0/24\nnot-an-address\n2001:db8::/64\n10.0.1.0/33\n";
    let report = summarize(input, &Limits::default()).expect("summarize failed");
    assert_eq!(report.ipv4, vec!["10.0.0.0/24"]);
    assert_eq!(report.ipv6, vec!["2001:db8::/64"]);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("line 2"));
    assert!(report.errors[1].contains("line 4"));
}

#[test]
fn test_families_never_mix() {
    // ::ffff:a00:0/120 covers the same integers as 10.0.0.0/24 would in
    // IPv4, but the spaces are distinct.
    let report = overlap("10.0.0.0/24", "::ffff:10.0.0.0/120", &Limits::default())
        .expect("overlap failed");
    assert!(report.ipv4.is_empty());
    assert!(report.ipv6.is_empty());
    assert_eq!(report.stats.overlap_percent_v4, 0.0);
}

#[test]
fn test_containment_workflow() {
    let report = containment("10.0.0.0/25\n10.0.1.0/24", "10.0.0.0/24").expect("containment failed");
    assert_eq!(
        report.ipv4,
        vec!["10.0.0.0/25: within", "10.0.1.0/24: disjoint"]
    );
}

#[test]
fn test_difference_and_hard_failures() {
    let report =
        difference("10.0.0.0/24", "10.0.0.0/25", &Limits::default()).expect("difference failed");
    assert_eq!(report.ipv4, vec!["10.0.0.128/25"]);

    assert_eq!(
        summarize("\n\n", &Limits::default()).unwrap_err(),
        CalcError::EmptyInput
    );
    let tight = Limits {
        max_blocks_per_input: 4,
        max_blocks_total: 8,
        max_decompose_blocks: 1_000,
    };
    assert!(matches!(
        deaggregate("10.0.0.0/24", 32, &tight),
        Err(CalcError::ResourceLimitExceeded(_))
    ));
}
