//! Safety limits for block-generating operations.
//!
//! The caps are policy constants, not algorithmic requirements: they bound
//! how many CIDR blocks a single call may materialize so that one oversized
//! or mistaken input cannot exhaust memory.

/// Block-count caps applied by decomposition, split and deaggregation.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum blocks generated from a single input line.
    pub max_blocks_per_input: usize,
    /// Maximum blocks generated across all lines of one call.
    pub max_blocks_total: usize,
    /// Maximum blocks when decomposing one interval into CIDRs.
    pub max_decompose_blocks: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_blocks_per_input: 10_000,
            max_blocks_total: 25_000,
            max_decompose_blocks: 1_000,
        }
    }
}
