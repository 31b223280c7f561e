//! Naturally aligned CIDR blocks.
//!
//! A [`Cidr`] is a network address plus prefix length whose host bits are
//! all zero; every block covers exactly `2^(width - prefix)` addresses.

use crate::error::CalcError;
use crate::models::{Addr, Family, Interval};

/// Span of the host bits for `prefix` in `family`: block size minus one.
///
/// Exact even for `::/0`, whose full size does not fit a `u128`.
///
/// # Examples
/// ```
/// use cidr_summary::{host_span, Family};
/// assert_eq!(host_span(Family::V4, 24).unwrap(), 255);
/// assert_eq!(host_span(Family::V4, 32).unwrap(), 0);
/// ```
pub fn host_span(family: Family, prefix: u8) -> Result<u128, CalcError> {
    if prefix > family.max_prefix() {
        return Err(CalcError::InvalidPrefix(format!(
            "/{} exceeds the {} maximum of /{}",
            prefix,
            family.name(),
            family.max_prefix()
        )));
    }
    let host_bits = family.width() - prefix;
    if host_bits == 128 {
        Ok(u128::MAX)
    } else {
        Ok((1u128 << host_bits) - 1)
    }
}

/// A naturally aligned CIDR block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cidr {
    /// Address family of the block.
    pub family: Family,
    /// Network address; invariant: all host bits are zero.
    pub network: u128,
    /// Prefix length, `0 ..= family.max_prefix()`.
    pub prefix: u8,
}

impl Cidr {
    /// Create a block, rejecting misaligned network addresses.
    pub fn new(family: Family, network: u128, prefix: u8) -> Result<Cidr, CalcError> {
        let span = host_span(family, prefix)?;
        if network & span != 0 {
            return Err(CalcError::InvalidAddress(format!(
                "{} has host bits set for /{}",
                Addr { family, value: network },
                prefix
            )));
        }
        Ok(Cidr {
            family,
            network,
            prefix,
        })
    }

    /// Create a block from any address by clearing its host bits.
    ///
    /// This is the silent-normalize used when parsing `ip/prefix` input:
    /// `10.0.0.5/24` becomes `10.0.0.0/24` without complaint.
    pub fn masked(family: Family, value: u128, prefix: u8) -> Result<Cidr, CalcError> {
        let span = host_span(family, prefix)?;
        Ok(Cidr {
            family,
            network: value & !span,
            prefix,
        })
    }

    /// First (network) address of the block.
    pub fn first(&self) -> u128 {
        self.network
    }

    /// Last address of the block.
    pub fn last(&self) -> u128 {
        // new()/masked() validated the prefix, so host_span cannot fail.
        self.network | host_span(self.family, self.prefix).unwrap_or(0)
    }

    /// The block as an inclusive interval.
    pub fn interval(&self) -> Interval {
        Interval {
            family: self.family,
            start: self.first(),
            end: self.last(),
        }
    }

    /// Whether the network address sits on a `2^(width - target)` boundary.
    ///
    /// Independent of this block's own prefix: `10.0.0.0/25` is aligned to
    /// a /24 boundary, `10.0.0.128/25` is not.
    pub fn aligned_to(&self, target: u8) -> Result<bool, CalcError> {
        Ok(self.network & host_span(self.family, target)? == 0)
    }

    /// Network address as an [`Addr`].
    pub fn addr(&self) -> Addr {
        Addr {
            family: self.family,
            value: self.network,
        }
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr(), self.prefix)
    }
}
