//! Stored semantics commands: review queue, confirmation and edits

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tally_core::import::{load_semantics, save_semantics};
use tally_core::{CategorySemantics, SemanticsEdit, ValidationStatus};

use super::{print_json, short_weights, truncate};

#[derive(Serialize)]
struct PendingEntry<'a> {
    id: &'a str,
    #[serde(flatten)]
    semantics: &'a CategorySemantics,
}

/// Categories whose semantics still need a reviewer: not yet confirmed by a
/// human, sorted with the least trusted first
pub fn cmd_review(semantics_path: &Path, json: bool) -> Result<()> {
    let semantics = load_semantics(semantics_path)
        .with_context(|| format!("Failed to read {}", semantics_path.display()))?;

    let mut pending: Vec<(&String, &CategorySemantics)> =
        semantics.iter().filter(|(_, s)| !s.is_validated()).collect();
    pending.sort_by(|a, b| {
        attention_rank(a.1.validation_status)
            .cmp(&attention_rank(b.1.validation_status))
            .then_with(|| a.0.cmp(b.0))
    });

    if json {
        let entries: Vec<PendingEntry> = pending
            .iter()
            .map(|(id, s)| PendingEntry {
                id: id.as_str(),
                semantics: s,
            })
            .collect();
        return print_json(&entries);
    }

    println!();
    println!("📝 Review queue");
    println!("   ─────────────────────────────────────────────────────────────");

    if pending.is_empty() {
        println!("   ✅ All {} categories are validated", semantics.len());
        return Ok(());
    }

    println!("   {:16} │ {:14} │ {:16} │ {}", "Id", "Status", "Energy", "Why");
    println!("   ─────────────────┼────────────────┼──────────────────┼──────────────");
    for (id, s) in &pending {
        println!(
            "   {:16} │ {:14} │ {:16} │ {}",
            truncate(id, 16),
            s.validation_status.as_str(),
            short_weights(&s.distribution),
            truncate(s.justification.as_deref().unwrap_or("-"), 40)
        );
    }
    println!();
    println!(
        "   {} of {} categories awaiting confirmation",
        pending.len(),
        semantics.len()
    );

    Ok(())
}

fn attention_rank(status: ValidationStatus) -> u8 {
    match status {
        ValidationStatus::Default => 0,
        ValidationStatus::NotValidated => 1,
        ValidationStatus::Inferred => 2,
        ValidationStatus::Validated => 3,
    }
}

pub fn cmd_confirm(
    semantics_path: &Path,
    id: &str,
    actor: &str,
    reason: Option<String>,
) -> Result<()> {
    let mut semantics = load_semantics(semantics_path)
        .with_context(|| format!("Failed to read {}", semantics_path.display()))?;

    let entry = semantics
        .get_mut(id)
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", id))?;
    let report = entry
        .confirm(actor, Utc::now(), reason)
        .with_context(|| format!("Cannot confirm '{}'", id))?;
    let distribution = entry.distribution;

    save_semantics(semantics_path, &semantics)
        .with_context(|| format!("Failed to write {}", semantics_path.display()))?;

    println!("✅ Confirmed '{}' as {} by {}", id, distribution, actor);
    for warning in &report.warnings {
        println!("   ⚠️  {}", warning);
    }
    Ok(())
}

pub fn cmd_edit(
    semantics_path: &Path,
    id: &str,
    actor: &str,
    edit: SemanticsEdit,
    reason: Option<String>,
) -> Result<()> {
    let mut semantics = load_semantics(semantics_path)
        .with_context(|| format!("Failed to read {}", semantics_path.display()))?;

    let entry = semantics
        .get_mut(id)
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", id))?;
    let report = entry
        .apply_edit(edit, actor, Utc::now(), reason)
        .with_context(|| format!("Edit of '{}' rejected", id))?;
    let distribution = entry.distribution;

    save_semantics(semantics_path, &semantics)
        .with_context(|| format!("Failed to write {}", semantics_path.display()))?;

    println!("✅ Updated '{}' to {} by {}", id, distribution, actor);
    for warning in &report.warnings {
        println!("   ⚠️  {}", warning);
    }
    Ok(())
}
