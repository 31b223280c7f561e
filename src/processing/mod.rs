//! Set-operation processing logic.
//!
//! This module contains the algorithms behind every operation:
//! - [`merge`] - coalescing intervals into minimal disjoint sets
//! - [`decompose`] - exact interval-to-CIDR decomposition
//! - [`algebra`] - summarize, overlap, difference, containment, alignment
//!   and compare over textual input
//! - [`partition`] - prefix/count splits and uniform deaggregation

mod algebra;
mod decompose;
mod merge;
mod partition;

// Re-export public functions and their report types
pub use algebra::{
    alignment, compare, containment, difference, overlap, summarize, AlignmentReport,
    AlignmentStats, CompareReport, CompareStats, Containment, ContainmentReport, ContainmentStats,
    DifferenceReport, DifferenceStats, OverlapReport, OverlapStats, SummarizeReport,
    SummarizeStats,
};
pub use decompose::interval_to_cidrs;
pub use merge::merge_intervals;
pub use partition::{
    deaggregate, split_by_count, split_by_prefix, DeaggregateReport, DeaggregateStats, SplitReport,
    SplitStats,
};
