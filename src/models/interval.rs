//! Inclusive address intervals.

use crate::error::CalcError;
use crate::models::{Addr, Family};

/// A contiguous, inclusive range of addresses of one family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// Address family of both endpoints.
    pub family: Family,
    /// First address, `start <= end`.
    pub start: u128,
    /// Last address.
    pub end: u128,
}

impl Interval {
    /// Create an interval, validating the endpoint order and family bounds.
    pub fn new(family: Family, start: u128, end: u128) -> Result<Interval, CalcError> {
        if start > end {
            return Err(CalcError::InvalidRange(format!(
                "start {} is after end {}",
                Addr { family, value: start },
                Addr { family, value: end }
            )));
        }
        if end > family.max_value() {
            return Err(CalcError::InvalidRange(format!(
                "end exceeds the {} address space",
                family.name()
            )));
        }
        Ok(Interval { family, start, end })
    }

    /// `end - start`: the inclusive count minus one. Never overflows.
    pub fn span(&self) -> u128 {
        self.end - self.start
    }

    /// Number of addresses covered, saturating at `u128::MAX`.
    ///
    /// Only the full IPv6 space saturates; callers use this for stats, not
    /// for arithmetic.
    pub fn count(&self) -> u128 {
        self.span().saturating_add(1)
    }

    /// Whether `value` falls inside this interval.
    pub fn contains_value(&self, value: u128) -> bool {
        self.start <= value && value <= self.end
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.family == other.family && self.start <= other.start && other.end <= self.end
    }

    /// Intersection with `other`, if any addresses are shared.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if self.family != other.family {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(Interval {
                family: self.family,
                start,
                end,
            })
        } else {
            None
        }
    }

    /// First address as an [`Addr`].
    pub fn start_addr(&self) -> Addr {
        Addr {
            family: self.family,
            value: self.start,
        }
    }

    /// Last address as an [`Addr`].
    pub fn end_addr(&self) -> Addr {
        Addr {
            family: self.family,
            value: self.end,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_addr(), self.end_addr())
    }
}
