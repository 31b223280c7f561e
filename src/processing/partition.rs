//! Equal-size splitting and uniform-size deaggregation.

use crate::config::Limits;
use crate::error::CalcError;
use crate::models::{parse_line, parse_lines, Cidr, Family, InputKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SplitStats {
    /// The parent block, normalized.
    pub parent: String,
    /// Prefix length of the children.
    pub child_prefix: u8,
    /// Children that exist at that prefix (a power of two).
    pub generated: u128,
    /// Children actually returned.
    pub returned: usize,
    /// `returned / generated`; below 1.0 only for count-based splits.
    pub utilization: f64,
}

#[derive(Debug, Serialize)]
pub struct SplitReport {
    pub children: Vec<String>,
    pub stats: SplitStats,
}

/// Parse a single line that must be a CIDR block.
fn parse_block(text: &str) -> Result<Cidr, CalcError> {
    match parse_line(text)?.0 {
        InputKind::Block(cidr) => Ok(cidr),
        _ => Err(CalcError::InvalidPrefix(format!(
            "'{}' is not a CIDR block (expected address/prefix)",
            text.trim()
        ))),
    }
}

/// Enumerate `count` children of `parent` at `child_prefix` by striding the
/// network address.
fn stride_children(parent: &Cidr, child_prefix: u8, count: u128) -> Vec<String> {
    let span = crate::models::host_span(parent.family, child_prefix).unwrap_or(0);
    (0..count)
        .map(|i| {
            // A /0 child can only be the parent itself (count 1), so the
            // full-width span is never multiplied by a nonzero index.
            let size = span.saturating_add(1);
            Cidr {
                family: parent.family,
                network: parent.network + i * size,
                prefix: child_prefix,
            }
            .to_string()
        })
        .collect()
}

/// Split one CIDR into all of its children at `target_prefix`.
///
/// Fails when the target is not a narrowing of the parent prefix, exceeds
/// the address width, or would generate more children than the per-input
/// cap allows.
pub fn split_by_prefix(
    cidr_text: &str,
    target_prefix: u8,
    limits: &Limits,
) -> Result<SplitReport, CalcError> {
    let parent = parse_block(cidr_text)?;
    if target_prefix > parent.family.max_prefix() {
        return Err(CalcError::InvalidPrefix(format!(
            "/{} exceeds the {} maximum of /{}",
            target_prefix,
            parent.family.name(),
            parent.family.max_prefix()
        )));
    }
    if target_prefix <= parent.prefix {
        return Err(CalcError::InvalidPrefix(format!(
            "/{} is not a narrowing of {}",
            target_prefix, parent
        )));
    }

    let diff = u32::from(target_prefix - parent.prefix);
    let count = if diff >= 128 {
        None
    } else {
        Some(1u128 << diff)
    };
    let count = match count {
        Some(c) if c <= limits.max_blocks_per_input as u128 => c,
        _ => {
            return Err(CalcError::ResourceLimitExceeded(format!(
                "splitting {} to /{} makes 2^{} blocks, cap is {}",
                parent, target_prefix, diff, limits.max_blocks_per_input
            )))
        }
    };

    let children = stride_children(&parent, target_prefix, count);
    Ok(SplitReport {
        stats: SplitStats {
            parent: parent.to_string(),
            child_prefix: target_prefix,
            generated: count,
            returned: children.len(),
            utilization: 1.0,
        },
        children,
    })
}

/// Split one CIDR into at least `n` equal children, returning the first `n`.
///
/// The child prefix is `parent + ceil(log2(n))`; utilization reports
/// `n / 2^bits` since `n` need not be a power of two.
pub fn split_by_count(cidr_text: &str, n: u64, limits: &Limits) -> Result<SplitReport, CalcError> {
    if n == 0 {
        return Err(CalcError::EmptyInput);
    }
    let parent = parse_block(cidr_text)?;
    let bits = n.next_power_of_two().trailing_zeros();
    let child_prefix = u32::from(parent.prefix) + bits;
    if child_prefix > u32::from(parent.family.max_prefix()) {
        return Err(CalcError::InvalidPrefix(format!(
            "{} children of {} would need /{}, past the {} maximum of /{}",
            n,
            parent,
            child_prefix,
            parent.family.name(),
            parent.family.max_prefix()
        )));
    }
    if n as u128 > limits.max_blocks_per_input as u128 {
        return Err(CalcError::ResourceLimitExceeded(format!(
            "{} blocks requested, cap is {}",
            n, limits.max_blocks_per_input
        )));
    }

    let generated = 1u128 << bits;
    let children = stride_children(&parent, child_prefix as u8, n as u128);
    Ok(SplitReport {
        stats: SplitStats {
            parent: parent.to_string(),
            child_prefix: child_prefix as u8,
            generated,
            returned: children.len(),
            utilization: n as f64 / generated as f64,
        },
        children,
    })
}

#[derive(Debug, Serialize)]
pub struct DeaggregateStats {
    /// Lines that parsed successfully.
    pub input_count: usize,
    /// Uniform blocks emitted across all inputs.
    pub block_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeaggregateReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: DeaggregateStats,
    pub errors: Vec<String>,
}

/// Decompose every input into uniform blocks of `target_prefix`.
///
/// Entries coarser than their own size allows are never rounded: an entry
/// smaller than the target block is kept unchanged only when it sits on a
/// target boundary, and a range tail that does not fill a whole block is
/// dropped - both with an entry in `errors`. The per-input and global caps
/// fail the entire call.
pub fn deaggregate(
    input: &str,
    target_prefix: u8,
    limits: &Limits,
) -> Result<DeaggregateReport, CalcError> {
    if target_prefix > Family::V6.max_prefix() {
        return Err(CalcError::InvalidPrefix(format!(
            "/{} exceeds the IPv6 maximum of /128",
            target_prefix
        )));
    }

    let (entries, mut errors) = parse_lines(input, "")?;
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();
    let mut total_blocks = 0usize;

    for entry in &entries {
        let family = entry.family();
        if target_prefix > family.max_prefix() {
            errors.push(format!(
                "line {}: /{} exceeds the {} maximum of /{}",
                entry.line_no,
                target_prefix,
                family.name(),
                family.max_prefix()
            ));
            continue;
        }
        let t_span = crate::models::host_span(family, target_prefix)?;
        let iv = entry.interval();
        let out = match family {
            Family::V4 => &mut ipv4,
            Family::V6 => &mut ipv6,
        };

        if t_span > iv.span() {
            // Target blocks are bigger than this entry. Coarsening would
            // require rounding, which never happens silently: keep the
            // entry as-is when it sits on a target boundary, drop it
            // otherwise.
            if iv.start & t_span == 0 {
                out.push(entry.normalized());
                total_blocks += 1;
                if total_blocks > limits.max_blocks_total {
                    return Err(CalcError::ResourceLimitExceeded(format!(
                        "deaggregation exceeds the global cap of {} blocks",
                        limits.max_blocks_total
                    )));
                }
            } else {
                log::warn!("deaggregate drops {}", entry.normalized());
                errors.push(format!(
                    "line {}: {} is smaller than a /{} block and not aligned to it (dropped)",
                    entry.line_no,
                    entry.normalized(),
                    target_prefix
                ));
            }
            continue;
        }

        if iv.start & t_span != 0 {
            errors.push(format!(
                "line {}: {} does not start on a /{} boundary (dropped)",
                entry.line_no,
                entry.normalized(),
                target_prefix
            ));
            continue;
        }

        // t_span <= span rules out the full-IPv6 special case unless the
        // entry is the full space itself.
        let (block_count, leftover) = if t_span == u128::MAX {
            (1u128, 0u128)
        } else {
            let size = t_span + 1;
            let addresses = iv.span().saturating_add(1);
            (addresses / size, addresses % size)
        };
        if leftover != 0 {
            errors.push(format!(
                "line {}: trailing {} addresses of {} do not fill a /{} block (dropped)",
                entry.line_no,
                leftover,
                entry.normalized(),
                target_prefix
            ));
        }

        if block_count > limits.max_blocks_per_input as u128 {
            return Err(CalcError::ResourceLimitExceeded(format!(
                "line {}: {} deaggregates into {} blocks, per-input cap is {}",
                entry.line_no,
                entry.normalized(),
                block_count,
                limits.max_blocks_per_input
            )));
        }
        total_blocks += block_count as usize;
        if total_blocks > limits.max_blocks_total {
            return Err(CalcError::ResourceLimitExceeded(format!(
                "deaggregation exceeds the global cap of {} blocks",
                limits.max_blocks_total
            )));
        }

        let size = t_span.saturating_add(1); // u128::MAX case emits one block below
        for i in 0..block_count {
            let network = iv.start + i * size;
            out.push(
                Cidr {
                    family,
                    network,
                    prefix: target_prefix,
                }
                .to_string(),
            );
        }
    }

    log::info!(
        "deaggregate: {} entries -> {} blocks at /{}",
        entries.len(),
        total_blocks,
        target_prefix
    );
    Ok(DeaggregateReport {
        ipv4,
        ipv6,
        stats: DeaggregateStats {
            input_count: entries.len(),
            block_count: total_blocks,
        },
        errors,
    })
}
