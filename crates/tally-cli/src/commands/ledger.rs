//! Energy ledger report

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::import::{load_semantics, parse_transactions_csv};
use tally_core::{
    summarize, summarize_by_month, CoverageThresholds, DiagnosticMode, EnergySummary,
};

use super::{print_json, truncate};

pub fn cmd_ledger(
    semantics_path: &Path,
    transactions_path: &Path,
    by_month: bool,
    json: bool,
    thresholds: &CoverageThresholds,
) -> Result<()> {
    let semantics = load_semantics(semantics_path)
        .with_context(|| format!("Failed to read {}", semantics_path.display()))?;
    let reader = File::open(transactions_path)
        .with_context(|| format!("Failed to open {}", transactions_path.display()))?;
    let transactions = parse_transactions_csv(reader)
        .with_context(|| format!("Failed to parse {}", transactions_path.display()))?;

    let summaries = if by_month {
        summarize_by_month(&transactions, &semantics, thresholds)
    } else {
        vec![summarize(&transactions, &semantics, thresholds)]
    };

    if json {
        return if by_month {
            print_json(&summaries)
        } else {
            print_json(&summaries[0])
        };
    }

    if summaries.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    for summary in &summaries {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &EnergySummary) {
    println!();
    match &summary.period {
        Some(period) => println!("⚡ Energy Report - {}", period),
        None => println!("⚡ Energy Report"),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions:  {}", summary.transaction_count);
    println!("   Generated:     {:>12.2}", summary.generated);
    println!(
        "   Survival:      {:>12.2}  ({:.1}%)",
        summary.survival,
        summary.survival_ratio * 100.0
    );
    println!("   Choice:        {:>12.2}", summary.choice);
    println!(
        "   Future:        {:>12.2}  ({:.1}%)",
        summary.future,
        summary.future_ratio * 100.0
    );
    println!(
        "   Loss:          {:>12.2}  ({:.1}%)",
        summary.loss,
        summary.waste_ratio * 100.0
    );
    println!("   Consumed:      {:>12.2}", summary.consumed);
    println!("   Available:     {:>12.2}", summary.available);
    println!("   Net energy:    {:>12.2}", summary.net_energy);
    println!("   Freedom:       {:>11.1}%", summary.freedom_ratio * 100.0);

    let coverage = &summary.coverage;
    let icon = match coverage.diagnostic_mode {
        DiagnosticMode::Complete => "✅",
        DiagnosticMode::Partial => "⚠️ ",
        DiagnosticMode::Insufficient => "❌",
    };
    println!();
    println!(
        "   {} Coverage {:.1}% ({})",
        icon,
        coverage.percentage,
        coverage.diagnostic_mode.as_str()
    );
    if coverage.pending_energy > 0.0 {
        println!(
            "      {:.2} of spending pending validation",
            coverage.pending_energy
        );
    }

    if !summary.breakdown.is_empty() {
        println!();
        println!("   {:20} │ {:>12} │ {:10}", "Category", "Amount", "Energy");
        println!("   ─────────────────────┼──────────────┼───────────");
        for entry in &summary.breakdown {
            println!(
                "   {:20} │ {:>12.2} │ {:10}",
                truncate(&entry.category_id, 20),
                entry.amount,
                entry.energy.as_str()
            );
        }
    }
}
