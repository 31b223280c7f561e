//! Command-line surface.
//!
//! Thin wrapper over the library operations: argument parsing, reading the
//! input texts, and choosing between colored terminal output and JSON.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::io::Read;

use crate::config::Limits;
use crate::output;
use crate::processing;

#[derive(Parser)]
#[command(
    name = "cidr-summary",
    about = "Exact CIDR set algebra over IPv4/IPv6 address lists",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit the report as JSON instead of colored text
    #[arg(long, global = true)]
    pub json: bool,

    /// Cap on blocks generated from a single input line
    #[arg(long, global = true, default_value_t = 10_000)]
    pub max_blocks_per_input: usize,

    /// Cap on blocks generated across one call
    #[arg(long, global = true, default_value_t = 25_000)]
    pub max_blocks_total: usize,

    /// Cap on blocks when decomposing one interval
    #[arg(long, global = true, default_value_t = 1_000)]
    pub max_decompose_blocks: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge an address list into minimal CIDR blocks
    Summarize {
        /// Input file with one entry per line, or '-' for stdin
        input: String,
    },

    /// Intersect two address lists
    Overlap {
        /// First list (file or '-')
        a: String,
        /// Second list (file or '-')
        b: String,
    },

    /// Subtract list B from list A
    Diff {
        a: String,
        b: String,
    },

    /// Classify each entry of A against the union of B
    Contain {
        a: String,
        b: String,
    },

    /// Check each CIDR against a prefix boundary
    Aligned {
        input: String,
        /// Boundary prefix length to test
        #[arg(long)]
        prefix: u8,
    },

    /// Classify normalized entries as added, removed or unchanged
    Compare {
        a: String,
        b: String,
    },

    /// Split one CIDR block into equal children
    Split {
        /// The parent block, e.g. 10.0.0.0/24
        cidr: String,
        /// Target child prefix length
        #[arg(long, conflicts_with = "count")]
        prefix: Option<u8>,
        /// Number of children wanted
        #[arg(long)]
        count: Option<u64>,
    },

    /// Decompose entries into uniform blocks of one prefix
    Deagg {
        input: String,
        /// Uniform block prefix length
        #[arg(long)]
        prefix: u8,
    },
}

/// Read an input argument: a file path, or stdin for `-`.
fn read_input(arg: &str) -> Result<String, Box<dyn Error>> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(arg)?)
    }
}

fn emit<T: Serialize>(report: &T, json: bool, render: impl Fn(&T)) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        render(report);
    }
    Ok(())
}

/// Execute a parsed command line.
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let limits = Limits {
        max_blocks_per_input: cli.max_blocks_per_input,
        max_blocks_total: cli.max_blocks_total,
        max_decompose_blocks: cli.max_decompose_blocks,
    };

    match &cli.command {
        Commands::Summarize { input } => {
            let text = read_input(input)?;
            let report = processing::summarize(&text, &limits)?;
            emit(&report, cli.json, output::render_summarize)
        }
        Commands::Overlap { a, b } => {
            let report = processing::overlap(&read_input(a)?, &read_input(b)?, &limits)?;
            emit(&report, cli.json, output::render_overlap)
        }
        Commands::Diff { a, b } => {
            let report = processing::difference(&read_input(a)?, &read_input(b)?, &limits)?;
            emit(&report, cli.json, output::render_difference)
        }
        Commands::Contain { a, b } => {
            let report = processing::containment(&read_input(a)?, &read_input(b)?)?;
            emit(&report, cli.json, output::render_containment)
        }
        Commands::Aligned { input, prefix } => {
            let report = processing::alignment(&read_input(input)?, *prefix)?;
            emit(&report, cli.json, output::render_alignment)
        }
        Commands::Compare { a, b } => {
            let report = processing::compare(&read_input(a)?, &read_input(b)?, &limits)?;
            emit(&report, cli.json, output::render_compare)
        }
        Commands::Split {
            cidr,
            prefix,
            count,
        } => {
            let report = match (prefix, count) {
                (Some(p), None) => processing::split_by_prefix(cidr, *p, &limits)?,
                (None, Some(n)) => processing::split_by_count(cidr, *n, &limits)?,
                _ => return Err("split needs exactly one of --prefix or --count".into()),
            };
            emit(&report, cli.json, output::render_split)
        }
        Commands::Deagg { input, prefix } => {
            let report = processing::deaggregate(&read_input(input)?, *prefix, &limits)?;
            emit(&report, cli.json, output::render_deaggregate)
        }
    }
}
