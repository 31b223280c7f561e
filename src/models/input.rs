//! Line-oriented input parsing.
//!
//! One entry per line: a single address, an `ip/prefix` block, or an
//! `ip1-ip2` range. Dispatch is checked in order: `-` means range, `/`
//! means CIDR, anything else is a single address.

use crate::error::CalcError;
use crate::models::{parse_addr, Addr, Cidr, Family, Interval};

/// The three shapes a line of input can take.
#[derive(Debug, Clone)]
pub enum InputKind {
    /// A single address, covering the interval `[addr, addr]`.
    Single(Addr),
    /// A CIDR block; host bits of the written address were cleared.
    Block(Cidr),
    /// An inclusive address range.
    Range(Interval),
}

/// A successfully parsed input line.
#[derive(Debug, Clone)]
pub struct ParsedInput {
    /// 1-based line number in the original text.
    pub line_no: usize,
    /// The trimmed original text, kept for error reporting.
    pub text: String,
    /// What the line parsed to.
    pub kind: InputKind,
    /// IPv6 zone identifier, display-only.
    pub zone: Option<String>,
}

impl ParsedInput {
    /// The contiguous interval this entry covers.
    pub fn interval(&self) -> Interval {
        match &self.kind {
            InputKind::Single(addr) => Interval {
                family: addr.family,
                start: addr.value,
                end: addr.value,
            },
            InputKind::Block(cidr) => cidr.interval(),
            InputKind::Range(interval) => *interval,
        }
    }

    /// Address family of the entry.
    pub fn family(&self) -> Family {
        match &self.kind {
            InputKind::Single(addr) => addr.family,
            InputKind::Block(cidr) => cidr.family,
            InputKind::Range(interval) => interval.family,
        }
    }

    /// Canonical display form (normalized CIDR, canonical address text).
    pub fn normalized(&self) -> String {
        match &self.kind {
            InputKind::Single(addr) => addr.format_with_zone(self.zone.as_deref()),
            InputKind::Block(cidr) => cidr.to_string(),
            InputKind::Range(interval) => interval.to_string(),
        }
    }
}

/// Parse one line of input into an [`InputKind`].
///
/// # Returns
/// * `Ok((kind, zone))` on success
/// * `Err` with the matching [`CalcError`] variant otherwise
pub fn parse_line(text: &str) -> Result<(InputKind, Option<String>), CalcError> {
    let text = text.trim();

    if let Some((lo, hi)) = text.split_once('-') {
        let (start, _) = parse_addr(lo)?;
        let (end, _) = parse_addr(hi)?;
        if start.family != end.family {
            return Err(CalcError::InvalidRange(format!(
                "mixed address families in '{}'",
                text
            )));
        }
        let interval = Interval::new(start.family, start.value, end.value)?;
        return Ok((InputKind::Range(interval), None));
    }

    if let Some((addr_text, prefix_text)) = text.split_once('/') {
        let (addr, zone) = parse_addr(addr_text)?;
        let prefix: u8 = prefix_text
            .trim()
            .parse()
            .map_err(|_| CalcError::InvalidPrefix(format!("'{}' is not a number", prefix_text)))?;
        // masked() clears host bits: 10.0.0.5/24 silently becomes 10.0.0.0/24.
        let cidr = Cidr::masked(addr.family, addr.value, prefix)?;
        return Ok((InputKind::Block(cidr), zone));
    }

    let (addr, zone) = parse_addr(text)?;
    Ok((InputKind::Single(addr), zone))
}

/// Parse newline-delimited input, recovering from per-line errors.
///
/// Blank lines and `#` comment lines are skipped. Lines that fail to parse
/// are recorded in the returned error list as `"line N: <message>"` (with
/// `label` prefixed for two-input operations) and processing continues.
///
/// # Returns
/// * `Ok((entries, errors))` when at least one non-blank line exists
/// * `Err(CalcError::EmptyInput)` when nothing usable was supplied
pub fn parse_lines(text: &str, label: &str) -> Result<(Vec<ParsedInput>, Vec<String>), CalcError> {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    let mut saw_line = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        saw_line = true;
        match parse_line(line) {
            Ok((kind, zone)) => entries.push(ParsedInput {
                line_no: idx + 1,
                text: line.to_string(),
                kind,
                zone,
            }),
            Err(e) => {
                log::debug!("skipping {}line {}: {}", label, idx + 1, e);
                errors.push(format!("{}line {}: {}", label, idx + 1, e));
            }
        }
    }

    if !saw_line {
        return Err(CalcError::EmptyInput);
    }
    Ok((entries, errors))
}
