//! CLI subcommand modules.
//!
//! This module contains the implementations for all faro CLI subcommands.

pub(crate) mod correlate;
pub(crate) mod fetch;
pub(crate) mod metrics;
pub(crate) mod show;

/// Heavy rule used around report sections.
pub(crate) const RULE_WIDTH: usize = 80;

/// Print a banner title between two `=` rules.
pub(crate) fn banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}
