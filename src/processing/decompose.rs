//! Minimal CIDR decomposition of intervals.

use crate::error::CalcError;
use crate::models::{Cidr, Interval};

/// Decompose an interval into the minimal ordered list of aligned blocks.
///
/// At each step the block placed at `start` is the largest power-of-two
/// block that both starts there (alignment: `2^k` divides `start`) and does
/// not overshoot `end` (fit). A misaligned range can need up to `2 * width`
/// blocks, never more, but `max_blocks` still guards the loop and fails
/// with [`CalcError::ResourceLimitExceeded`] rather than allocating
/// unboundedly.
///
/// # Arguments
/// * `interval` - the interval to cover exactly
/// * `max_blocks` - cap on the number of emitted blocks
pub fn interval_to_cidrs(interval: &Interval, max_blocks: usize) -> Result<Vec<Cidr>, CalcError> {
    let width = u32::from(interval.family.width());
    let mut blocks = Vec::new();
    let mut start = interval.start;

    loop {
        if blocks.len() >= max_blocks {
            return Err(CalcError::ResourceLimitExceeded(format!(
                "decomposing {} needs more than {} blocks",
                interval, max_blocks
            )));
        }

        // Largest aligned block at `start`: 2^k with k bounded by the
        // trailing zeros of `start` (the whole space when start is 0).
        let align_k = if start == 0 {
            width
        } else {
            start.trailing_zeros().min(width)
        };
        // Largest block that still fits: floor(log2(end - start + 1)),
        // computed on the span so the +1 cannot overflow.
        let span = interval.end - start;
        let fit_k = if span == u128::MAX {
            128
        } else {
            (span + 1).ilog2()
        };

        let k = align_k.min(fit_k);
        let block_span = if k == 128 { u128::MAX } else { (1u128 << k) - 1 };
        let prefix = (width - k) as u8;
        blocks.push(Cidr::new(interval.family, start, prefix)?);

        let last = start + block_span;
        if last >= interval.end {
            break;
        }
        start = last + 1;
    }

    log::debug!("decomposed {} into {} blocks", interval, blocks.len());
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family;

    fn decompose(start: u128, end: u128) -> Vec<String> {
        let iv = Interval::new(Family::V4, start, end).unwrap();
        interval_to_cidrs(&iv, 1_000)
            .unwrap()
            .iter()
            .map(Cidr::to_string)
            .collect()
    }

    #[test]
    fn test_single_address() {
        assert_eq!(decompose(0x0A00_0001, 0x0A00_0001), vec!["10.0.0.1/32"]);
    }

    #[test]
    fn test_exact_block() {
        assert_eq!(decompose(0x0A00_0000, 0x0A00_00FF), vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_misaligned_both_ends() {
        // 10.0.0.5 - 10.0.0.20
        assert_eq!(
            decompose(0x0A00_0005, 0x0A00_0014),
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
    fn test_full_v4_space() {
        assert_eq!(decompose(0, u32::MAX as u128), vec!["0.0.0.0/0"]);
    }

    #[test]
    fn test_full_v6_space() {
        let iv = Interval::new(Family::V6, 0, u128::MAX).unwrap();
        let blocks = interval_to_cidrs(&iv, 1_000).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].to_string(), "::/0");
    }

    #[test]
    fn test_v6_misaligned() {
        let iv = Interval::new(Family::V6, 1, 2).unwrap();
        let blocks = interval_to_cidrs(&iv, 1_000).unwrap();
        let texts: Vec<String> = blocks.iter().map(Cidr::to_string).collect();
        assert_eq!(texts, vec!["::1/128", "::2/128"]);
    }

    #[test]
    fn test_blocks_sorted_and_disjoint() {
        let iv = Interval::new(Family::V4, 3, 77).unwrap();
        let blocks = interval_to_cidrs(&iv, 1_000).unwrap();
        for pair in blocks.windows(2) {
            assert_eq!(
                pair[0].last() + 1,
                pair[1].first(),
                "blocks must tile the interval in order"
            );
        }
        assert_eq!(blocks.first().unwrap().first(), 3);
        assert_eq!(blocks.last().unwrap().last(), 77);
    }

    #[test]
    fn test_block_cap() {
        let iv = Interval::new(Family::V4, 0x0A00_0005, 0x0A00_0014).unwrap();
        assert!(matches!(
            interval_to_cidrs(&iv, 2),
            Err(CalcError::ResourceLimitExceeded(_))
        ));
    }
}
