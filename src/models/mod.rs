//! Domain models for CIDR set calculation.
//!
//! This module contains the core value types used throughout the crate:
//! - [`Family`] and [`Addr`] - family-tagged integer addresses
//! - [`Interval`] - inclusive contiguous address ranges
//! - [`Cidr`] - naturally aligned CIDR blocks
//! - [`ParsedInput`] - one parsed line of textual input

mod addr;
mod cidr;
mod input;
mod interval;

// Re-export public types
pub use addr::{parse_addr, Addr, Family};
pub use cidr::{host_span, Cidr};
pub use input::{parse_line, parse_lines, InputKind, ParsedInput};
pub use interval::Interval;
