//! Error taxonomy for the calculation core.
//!
//! Every public operation returns a [`CalcError`] instead of panicking or
//! leaking string-only errors; per-line parse problems inside multi-line
//! inputs are recovered locally and never surface as a `CalcError`.

use thiserror::Error;

/// Errors produced by parsing and set operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Textual address could not be parsed for either family.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    /// Prefix length is out of range, non-numeric, or not a narrowing.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),

    /// Range endpoints are mixed-family or reversed.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A block-count safety cap was exceeded.
    #[error("resource limit exceeded: {0}")]
    ResourceLimitExceeded(String),

    /// The input contained no usable lines.
    #[error("empty input")]
    EmptyInput,
}
