//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - Single and batch classification
//! - `templates` - Template registry listing
//! - `validate` - Energy contract checks
//! - `semantics` - Review queue, confirmation and edits of stored semantics
//! - `ledger` - Energy totals and semantic coverage

pub mod classify;
pub mod ledger;
pub mod semantics;
pub mod templates;
pub mod validate;

// Re-export command functions for main.rs
pub use classify::*;
pub use ledger::*;
pub use semantics::*;
pub use templates::*;
pub use validate::*;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::{EnergyDistribution, OutputFormat, TallyConfig};

/// JSON when asked on the command line or configured as the default
pub fn use_json(flag: bool, config: &TallyConfig) -> bool {
    flag || config.output == OutputFormat::Json
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Compact "S70 C30" style weights for tables
pub fn short_weights(distribution: &EnergyDistribution) -> String {
    if distribution.is_unclassified() {
        return "-".to_string();
    }
    let parts: Vec<String> = [
        ("S", distribution.survival),
        ("C", distribution.choice),
        ("F", distribution.future),
        ("L", distribution.loss),
    ]
    .iter()
    .filter(|(_, w)| *w > 0.0)
    .map(|(label, w)| format!("{}{}", label, (w * 100.0).round() as i64))
    .collect();
    parts.join(" ")
}
