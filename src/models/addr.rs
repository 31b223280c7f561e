//! Address family and integer address representation.
//!
//! Provides [`Family`] and [`Addr`]: both IPv4 and IPv6 addresses are held
//! as a `u128` tagged with their family, so the interval and CIDR
//! algorithms run once over a single fixed-width integer path.

use crate::error::CalcError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address family: 32-bit IPv4 or 128-bit IPv6.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Address width in bits (32 or 128).
    pub const fn width(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Longest valid prefix length for this family.
    pub const fn max_prefix(self) -> u8 {
        self.width()
    }

    /// Highest address value in this family.
    pub const fn max_value(self) -> u128 {
        match self {
            Family::V4 => u32::MAX as u128,
            Family::V6 => u128::MAX,
        }
    }

    /// Human-readable family name for error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Family::V4 => "IPv4",
            Family::V6 => "IPv6",
        }
    }
}

/// A single address: an unsigned integer value tagged with its family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr {
    /// Address family, fixing the bit width.
    pub family: Family,
    /// Address value, `0 ..= family.max_value()`.
    pub value: u128,
}

impl Addr {
    /// Format this address, re-attaching an optional IPv6 zone identifier.
    ///
    /// The zone takes no part in arithmetic; it is carried for display only.
    pub fn format_with_zone(&self, zone: Option<&str>) -> String {
        match zone {
            Some(z) => format!("{}%{}", self, z),
            None => self.to_string(),
        }
    }
}

impl std::fmt::Display for Addr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.family {
            Family::V4 => write!(f, "{}", Ipv4Addr::from(self.value as u32)),
            // std's Display is the RFC 5952 canonical form: lowercase,
            // leading zeros stripped, longest (leftmost) zero run compressed.
            Family::V6 => write!(f, "{}", Ipv6Addr::from(self.value)),
        }
    }
}

/// Parse a textual address of either family.
///
/// Family is inferred from the text: anything containing `:` is parsed as
/// IPv6 (including `::` compression, at most one occurrence), otherwise as
/// four dot-separated decimal octets. An IPv6 zone identifier (`%eth0`) is
/// split off and returned alongside the address.
///
/// # Returns
/// * `Ok((addr, zone))` on success
/// * `Err(CalcError::InvalidAddress)` for malformed text
pub fn parse_addr(text: &str) -> Result<(Addr, Option<String>), CalcError> {
    let text = text.trim();
    let (addr_part, zone) = match text.split_once('%') {
        Some((a, z)) if !z.is_empty() => (a, Some(z.to_string())),
        Some(_) => return Err(CalcError::InvalidAddress(text.to_string())),
        None => (text, None),
    };

    if addr_part.contains(':') {
        let v6: Ipv6Addr = addr_part
            .parse()
            .map_err(|_| CalcError::InvalidAddress(text.to_string()))?;
        Ok((
            Addr {
                family: Family::V6,
                value: u128::from(v6),
            },
            zone,
        ))
    } else if zone.is_some() {
        // Zone identifiers only exist for IPv6.
        Err(CalcError::InvalidAddress(text.to_string()))
    } else {
        let v4: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| CalcError::InvalidAddress(text.to_string()))?;
        Ok((
            Addr {
                family: Family::V4,
                value: u32::from(v4) as u128,
            },
            None,
        ))
    }
}
