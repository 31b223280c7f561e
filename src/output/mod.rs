//! Output formatting for operation reports.
//!
//! This module handles rendering the report structs for consumers:
//! - [`terminal`] - colored, human-readable terminal output

mod terminal;

pub use terminal::{
    percent, render_alignment, render_compare, render_containment, render_deaggregate,
    render_difference, render_overlap, render_split, render_summarize,
};
