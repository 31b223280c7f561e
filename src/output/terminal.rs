//! Terminal output with colors.
//!
//! Renders each operation report for humans; the `--json` path bypasses
//! this module entirely.

use crate::processing::{
    AlignmentReport, CompareReport, ContainmentReport, DeaggregateReport, DifferenceReport,
    OverlapReport, SplitReport, SummarizeReport,
};
use colored::Colorize;

/// Format a percentage with two decimals.
pub fn percent(p: f64) -> String {
    format!("{:.2}%", p)
}

fn print_family_section(label: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("{}", label.cyan().bold());
    for line in lines {
        println!("  {}", line);
    }
}

fn print_errors(errors: &[String]) {
    for e in errors {
        println!("{} {}", "skipped".on_red(), e);
    }
}

pub fn render_summarize(report: &SummarizeReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    println!(
        "{} {} entries -> {} blocks ({} IPv4 / {} IPv6 addresses)",
        "summary:".bold(),
        report.stats.original_count,
        report.stats.summarized_count,
        report.stats.addresses_v4,
        report.stats.addresses_v6
    );
    print_errors(&report.errors);
}

pub fn render_overlap(report: &OverlapReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    if report.ipv4.is_empty() && report.ipv6.is_empty() {
        println!("{}", "no overlap".yellow());
    }
    println!(
        "{} IPv4 {}, IPv6 {}",
        "overlap:".bold(),
        percent(report.stats.overlap_percent_v4),
        percent(report.stats.overlap_percent_v6)
    );
    print_errors(&report.errors);
}

pub fn render_difference(report: &DifferenceReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    println!(
        "{} {} IPv4 / {} IPv6 addresses remain",
        "difference:".bold(),
        report.stats.remaining_v4,
        report.stats.remaining_v6
    );
    print_errors(&report.errors);
}

pub fn render_containment(report: &ContainmentReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    println!(
        "{} {} within, {} partial, {} disjoint",
        "containment:".bold(),
        report.stats.within,
        report.stats.partial,
        report.stats.disjoint
    );
    print_errors(&report.errors);
}

pub fn render_alignment(report: &AlignmentReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    println!(
        "{} {} aligned, {} misaligned at /{}",
        "alignment:".bold(),
        report.stats.aligned,
        report.stats.misaligned,
        report.stats.target_prefix
    );
    print_errors(&report.errors);
}

pub fn render_compare(report: &CompareReport) {
    print_family_section("added", &report.added);
    print_family_section("removed", &report.removed);
    print_family_section("unchanged", &report.unchanged);
    println!(
        "{} {} added, {} removed, {} unchanged",
        "compare:".bold(),
        report.stats.added,
        report.stats.removed,
        report.stats.unchanged
    );
    print_errors(&report.errors);
}

pub fn render_split(report: &SplitReport) {
    print_family_section(&report.stats.parent, &report.children);
    println!(
        "{} {} of {} /{} children ({})",
        "split:".bold(),
        report.stats.returned,
        report.stats.generated,
        report.stats.child_prefix,
        percent(report.stats.utilization * 100.0)
    );
}

pub fn render_deaggregate(report: &DeaggregateReport) {
    print_family_section("IPv4", &report.ipv4);
    print_family_section("IPv6", &report.ipv6);
    println!(
        "{} {} entries -> {} blocks",
        "deaggregate:".bold(),
        report.stats.input_count,
        report.stats.block_count
    );
    print_errors(&report.errors);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_two_decimals() {
        assert_eq!(percent(50.0), "50.00%");
        assert_eq!(percent(33.333), "33.33%");
        assert_eq!(percent(0.0), "0.00%");
    }
}
