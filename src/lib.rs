//! Exact CIDR set algebra for IPv4 and IPv6 address sets.
//!
//! Inputs are newline-delimited lists of single addresses, `ip/prefix`
//! blocks and `ip1-ip2` ranges. Every operation normalizes its input to
//! inclusive address intervals, computes on those, and renders the outcome
//! as minimal, naturally aligned CIDR blocks. All operations are pure
//! functions of their input text: no I/O, no state between calls.

pub mod cli;
mod config;
mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::Limits;
pub use error::CalcError;
pub use models::{host_span, parse_addr, parse_line, parse_lines, Addr, Cidr, Family, Interval};
pub use processing::{
    alignment, compare, containment, deaggregate, difference, interval_to_cidrs, merge_intervals,
    overlap, split_by_count, split_by_prefix, summarize,
};
