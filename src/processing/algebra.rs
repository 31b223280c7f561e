//! Set algebra over newline-delimited address lists.
//!
//! Every operation parses its input text per line (recovering from bad
//! lines), partitions by family - the IPv4 and IPv6 spaces never intersect
//! and are always reported separately - merges, combines, and renders the
//! outcome as minimal CIDR blocks.

use crate::config::Limits;
use crate::error::CalcError;
use crate::models::{parse_lines, Cidr, Family, InputKind, Interval, ParsedInput};
use crate::processing::{interval_to_cidrs, merge_intervals};
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Parsed entries of one input, merged per family.
struct MergedSets {
    v4: Vec<Interval>,
    v6: Vec<Interval>,
}

impl MergedSets {
    fn build(entries: &[ParsedInput]) -> MergedSets {
        let (v4, v6): (Vec<_>, Vec<_>) = entries
            .iter()
            .map(ParsedInput::interval)
            .partition(|iv| iv.family == Family::V4);
        MergedSets {
            v4: merge_intervals(v4),
            v6: merge_intervals(v6),
        }
    }
}

/// Decompose merged intervals into CIDR display strings.
fn to_cidr_strings(intervals: &[Interval], limits: &Limits) -> Result<Vec<String>, CalcError> {
    let mut out = Vec::new();
    for iv in intervals {
        out.extend(
            interval_to_cidrs(iv, limits.max_decompose_blocks)?
                .iter()
                .map(Cidr::to_string),
        );
    }
    Ok(out)
}

/// Total addresses covered by disjoint intervals, saturating at `u128::MAX`.
fn total_count(intervals: &[Interval]) -> u128 {
    intervals
        .iter()
        .fold(0u128, |acc, iv| acc.saturating_add(iv.count()))
}

// ---------------------------------------------------------------------------
// Summarize (union)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SummarizeStats {
    /// Lines that parsed successfully.
    pub original_count: usize,
    /// Minimal CIDR blocks after merging.
    pub summarized_count: usize,
    /// Addresses covered per family.
    pub addresses_v4: u128,
    pub addresses_v6: u128,
}

#[derive(Debug, Serialize)]
pub struct SummarizeReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: SummarizeStats,
    pub errors: Vec<String>,
}

/// Merge all input entries and return the minimal covering CIDR blocks.
pub fn summarize(input: &str, limits: &Limits) -> Result<SummarizeReport, CalcError> {
    let (entries, errors) = parse_lines(input, "")?;
    let sets = MergedSets::build(&entries);
    let ipv4 = to_cidr_strings(&sets.v4, limits)?;
    let ipv6 = to_cidr_strings(&sets.v6, limits)?;
    log::info!(
        "summarize: {} entries -> {} blocks",
        entries.len(),
        ipv4.len() + ipv6.len()
    );
    Ok(SummarizeReport {
        stats: SummarizeStats {
            original_count: entries.len(),
            summarized_count: ipv4.len() + ipv6.len(),
            addresses_v4: total_count(&sets.v4),
            addresses_v6: total_count(&sets.v6),
        },
        ipv4,
        ipv6,
        errors,
    })
}

// ---------------------------------------------------------------------------
// Overlap (intersection)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OverlapStats {
    /// `100 * |A ∩ B| / |A ∪ B|` per family, 0 when both sets are empty.
    pub overlap_percent_v4: f64,
    pub overlap_percent_v6: f64,
}

#[derive(Debug, Serialize)]
pub struct OverlapReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: OverlapStats,
    pub errors: Vec<String>,
}

/// Pairwise intersections of two merged sets, re-merged because
/// intersections from different pairs can abut.
fn intersect_sets(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    for x in a {
        for y in b {
            if let Some(shared) = x.intersect(y) {
                out.push(shared);
            }
        }
    }
    merge_intervals(out)
}

fn overlap_percent(shared: &[Interval], a: &[Interval], b: &[Interval]) -> f64 {
    let union = merge_intervals(a.iter().chain(b).copied().collect());
    let union_count = total_count(&union);
    if union_count == 0 {
        0.0
    } else {
        100.0 * total_count(shared) as f64 / union_count as f64
    }
}

/// Intersect two address sets.
pub fn overlap(a: &str, b: &str, limits: &Limits) -> Result<OverlapReport, CalcError> {
    let (entries_a, mut errors) = parse_lines(a, "A ")?;
    let (entries_b, errors_b) = parse_lines(b, "B ")?;
    errors.extend(errors_b);

    let sets_a = MergedSets::build(&entries_a);
    let sets_b = MergedSets::build(&entries_b);
    let shared_v4 = intersect_sets(&sets_a.v4, &sets_b.v4);
    let shared_v6 = intersect_sets(&sets_a.v6, &sets_b.v6);

    Ok(OverlapReport {
        ipv4: to_cidr_strings(&shared_v4, limits)?,
        ipv6: to_cidr_strings(&shared_v6, limits)?,
        stats: OverlapStats {
            overlap_percent_v4: overlap_percent(&shared_v4, &sets_a.v4, &sets_b.v4),
            overlap_percent_v6: overlap_percent(&shared_v6, &sets_a.v6, &sets_b.v6),
        },
        errors,
    })
}

// ---------------------------------------------------------------------------
// Difference (A - B)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DifferenceStats {
    /// Addresses remaining per family after subtraction.
    pub remaining_v4: u128,
    pub remaining_v6: u128,
}

#[derive(Debug, Serialize)]
pub struct DifferenceReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: DifferenceStats,
    pub errors: Vec<String>,
}

/// Subtract every interval of `b` from the remainder of `a`.
///
/// Each subtraction splits a cut remainder into at most two sub-intervals:
/// the parts before and after the overlap.
fn subtract_sets(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut remainder: Vec<Interval> = a.to_vec();
    for cut in b {
        let mut next = Vec::with_capacity(remainder.len() + 1);
        for r in remainder {
            if r.end < cut.start || r.start > cut.end {
                next.push(r);
                continue;
            }
            if r.start < cut.start {
                next.push(Interval {
                    family: r.family,
                    start: r.start,
                    end: cut.start - 1,
                });
            }
            if r.end > cut.end {
                next.push(Interval {
                    family: r.family,
                    start: cut.end + 1,
                    end: r.end,
                });
            }
        }
        remainder = next;
    }
    merge_intervals(remainder)
}

/// Compute `A - B` as minimal CIDR blocks.
pub fn difference(a: &str, b: &str, limits: &Limits) -> Result<DifferenceReport, CalcError> {
    let (entries_a, mut errors) = parse_lines(a, "A ")?;
    let (entries_b, errors_b) = parse_lines(b, "B ")?;
    errors.extend(errors_b);

    let sets_a = MergedSets::build(&entries_a);
    let sets_b = MergedSets::build(&entries_b);
    let rest_v4 = subtract_sets(&sets_a.v4, &sets_b.v4);
    let rest_v6 = subtract_sets(&sets_a.v6, &sets_b.v6);

    Ok(DifferenceReport {
        ipv4: to_cidr_strings(&rest_v4, limits)?,
        ipv6: to_cidr_strings(&rest_v6, limits)?,
        stats: DifferenceStats {
            remaining_v4: total_count(&rest_v4),
            remaining_v6: total_count(&rest_v6),
        },
        errors,
    })
}

// ---------------------------------------------------------------------------
// Containment
// ---------------------------------------------------------------------------

/// Tri-state relation of an A-entry to the union of B.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    Within,
    Partial,
    Disjoint,
}

impl std::fmt::Display for Containment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Containment::Within => "within",
            Containment::Partial => "partial",
            Containment::Disjoint => "disjoint",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct ContainmentStats {
    pub within: usize,
    pub partial: usize,
    pub disjoint: usize,
}

#[derive(Debug, Serialize)]
pub struct ContainmentReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: ContainmentStats,
    pub errors: Vec<String>,
}

/// Classify one interval against a merged (disjoint, non-adjacent) set.
///
/// After merging, "inside some union of B" collapses to "inside one merged
/// B interval", since merged intervals are maximal contiguous runs.
fn classify(entry: &Interval, merged: &[Interval]) -> Containment {
    if merged.iter().any(|b| b.contains(entry)) {
        Containment::Within
    } else if merged.iter().any(|b| b.intersect(entry).is_some()) {
        Containment::Partial
    } else {
        Containment::Disjoint
    }
}

/// Classify each entry of `a` as within / partial / disjoint against `b`.
pub fn containment(a: &str, b: &str) -> Result<ContainmentReport, CalcError> {
    let (entries_a, mut errors) = parse_lines(a, "A ")?;
    let (entries_b, errors_b) = parse_lines(b, "B ")?;
    errors.extend(errors_b);

    let sets_b = MergedSets::build(&entries_b);
    let mut stats = ContainmentStats {
        within: 0,
        partial: 0,
        disjoint: 0,
    };
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();

    for entry in &entries_a {
        let merged = match entry.family() {
            Family::V4 => &sets_b.v4,
            Family::V6 => &sets_b.v6,
        };
        let relation = classify(&entry.interval(), merged);
        match relation {
            Containment::Within => stats.within += 1,
            Containment::Partial => stats.partial += 1,
            Containment::Disjoint => stats.disjoint += 1,
        }
        let line = format!("{}: {}", entry.normalized(), relation);
        match entry.family() {
            Family::V4 => ipv4.push(line),
            Family::V6 => ipv6.push(line),
        }
    }

    Ok(ContainmentReport {
        ipv4,
        ipv6,
        stats,
        errors,
    })
}

// ---------------------------------------------------------------------------
// Alignment check
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AlignmentStats {
    pub target_prefix: u8,
    pub aligned: usize,
    pub misaligned: usize,
}

#[derive(Debug, Serialize)]
pub struct AlignmentReport {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub stats: AlignmentStats,
    pub errors: Vec<String>,
}

/// Check each normalized CIDR against a `2^(width - target)` boundary.
///
/// The check is independent of each block's own prefix; single addresses
/// are treated as host-width blocks. Ranges have no single network address
/// and are reported as per-line errors.
pub fn alignment(input: &str, target_prefix: u8) -> Result<AlignmentReport, CalcError> {
    if target_prefix > Family::V6.max_prefix() {
        return Err(CalcError::InvalidPrefix(format!(
            "/{} exceeds the IPv6 maximum of /128",
            target_prefix
        )));
    }

    let (entries, mut errors) = parse_lines(input, "")?;
    let mut stats = AlignmentStats {
        target_prefix,
        aligned: 0,
        misaligned: 0,
    };
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();

    for entry in &entries {
        let block = match &entry.kind {
            InputKind::Block(cidr) => *cidr,
            InputKind::Single(addr) => {
                // A lone address is its own host-width block.
                match Cidr::new(addr.family, addr.value, addr.family.max_prefix()) {
                    Ok(c) => c,
                    Err(e) => {
                        errors.push(format!("line {}: {}", entry.line_no, e));
                        continue;
                    }
                }
            }
            InputKind::Range(_) => {
                errors.push(format!(
                    "line {}: alignment check needs a CIDR or single address, not a range",
                    entry.line_no
                ));
                continue;
            }
        };
        match block.aligned_to(target_prefix) {
            Ok(aligned) => {
                let verdict = if aligned { "aligned" } else { "misaligned" };
                if aligned {
                    stats.aligned += 1;
                } else {
                    stats.misaligned += 1;
                }
                let line = format!("{}: {} at /{}", block, verdict, target_prefix);
                match block.family {
                    Family::V4 => ipv4.push(line),
                    Family::V6 => ipv6.push(line),
                }
            }
            // Target fits IPv6 but not this entry's family.
            Err(e) => errors.push(format!("line {}: {}", entry.line_no, e)),
        }
    }

    Ok(AlignmentReport {
        ipv4,
        ipv6,
        stats,
        errors,
    })
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CompareStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: Vec<String>,
    pub stats: CompareStats,
    pub errors: Vec<String>,
}

/// Reduce each entry independently to its minimal CIDR cover.
///
/// A written CIDR stays itself (host bits already cleared), a single
/// address becomes a host-width block, a range becomes its minimal cover.
fn normalized_blocks(entries: &[ParsedInput], limits: &Limits) -> Result<BTreeSet<Cidr>, CalcError> {
    let mut set = BTreeSet::new();
    for entry in entries {
        set.extend(interval_to_cidrs(
            &entry.interval(),
            limits.max_decompose_blocks,
        )?);
    }
    Ok(set)
}

/// Deterministic output order: family, network ascending, most specific
/// prefix first.
fn sorted_strings<'a>(blocks: impl IntoIterator<Item = &'a Cidr>) -> Vec<String> {
    blocks
        .into_iter()
        .sorted_by_key(|c| (c.family, c.network, Reverse(c.prefix)))
        .map(Cidr::to_string)
        .collect()
}

/// Compare two normalized lists: added (B only), removed (A only),
/// unchanged (both). Matching is by exact block, not by address overlap.
pub fn compare(a: &str, b: &str, limits: &Limits) -> Result<CompareReport, CalcError> {
    let (entries_a, mut errors) = parse_lines(a, "A ")?;
    let (entries_b, errors_b) = parse_lines(b, "B ")?;
    errors.extend(errors_b);

    let blocks_a = normalized_blocks(&entries_a, limits)?;
    let blocks_b = normalized_blocks(&entries_b, limits)?;

    let added = sorted_strings(blocks_b.difference(&blocks_a));
    let removed = sorted_strings(blocks_a.difference(&blocks_b));
    let unchanged = sorted_strings(blocks_a.intersection(&blocks_b));

    Ok(CompareReport {
        stats: CompareStats {
            added: added.len(),
            removed: removed.len(),
            unchanged: unchanged.len(),
        },
        added,
        removed,
        unchanged,
        errors,
    })
}
