//! Classification command implementations

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::import::{load_semantics, parse_categories_csv, save_semantics};
use tally_core::{
    classify, classify_many, needs_review, review_queue, AutoClassificationResult, CategoryKind,
    CategorySemantics, ReviewStats,
};
use tracing::info;

use super::{print_json, short_weights, truncate};

pub fn cmd_classify(name: &str, kind: &str, json: bool) -> Result<()> {
    let kind: CategoryKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let result = classify(name, kind);

    if json {
        return print_json(&result);
    }

    println!();
    println!("⚡ {}", name);
    println!("   ─────────────────────────────────────────────────────────────");
    print_result(&result);
    Ok(())
}

fn print_result(result: &AutoClassificationResult) {
    println!(
        "   Template:     {}",
        result.template_name.as_deref().unwrap_or("(none)")
    );
    println!("   Energy:       {}", result.distribution);
    println!("   Predominant:  {}", predominant_label(result));
    println!("   Confidence:   {}", result.confidence);
    println!("   Status:       {}", result.validation_status);

    let mut flags = Vec::new();
    if result.flags.is_fixed {
        flags.push("fixed");
    }
    if result.flags.is_essential {
        flags.push("essential");
    }
    if result.flags.is_investment {
        flags.push("investment");
    }
    if !flags.is_empty() {
        println!("   Flags:        {}", flags.join(", "));
    }

    println!("   Why:          {}", result.justification);
    if needs_review(result) {
        println!("   ⚠️  Needs review");
    }
}

fn predominant_label(result: &AutoClassificationResult) -> String {
    if result.distribution.is_unclassified() {
        return "-".to_string();
    }
    let energy = result.distribution.predominant();
    if result.distribution.is_hybrid() {
        format!("{} (hybrid)", energy.label())
    } else {
        energy.label().to_string()
    }
}

pub fn cmd_batch(file: &Path, out: Option<&Path>, json: bool) -> Result<()> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let categories = parse_categories_csv(reader)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let results = classify_many(&categories);
    let stats = ReviewStats::from_results(results.values());

    if let Some(out) = out {
        let written = write_initial_semantics(out, &results)?;
        info!("Wrote semantics for {} new categories to {}", written, out.display());
    }

    if json {
        return print_json(&results);
    }

    println!();
    println!("⚡ Classified {} categories", stats.total);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:12} │ {:28} │ {:22} │ {:>6}",
        "Id", "Name", "Template", "Conf."
    );
    println!("   ─────────────┼──────────────────────────────┼────────────────────────┼───────");

    for category in &categories {
        if let Some(result) = results.get(&category.id) {
            println!(
                "   {:12} │ {:28} │ {:22} │ {:>6}",
                truncate(&category.id, 12),
                truncate(&category.name, 28),
                truncate(result.template_name.as_deref().unwrap_or("-"), 22),
                result.confidence.as_str(),
            );
        }
    }

    println!();
    println!(
        "   Matched: {}  High: {}  Medium: {}  Low: {}",
        stats.matched, stats.high_confidence, stats.medium_confidence, stats.low_confidence
    );

    let queue = review_queue(&results);
    if queue.is_empty() {
        println!("   ✅ Nothing needs review");
    } else {
        println!("   ⚠️  {} need review:", queue.len());
        for (id, result) in queue {
            println!("      • {} ({})", id, short_weights(&result.distribution));
        }
    }

    Ok(())
}

/// Add semantics for categories not yet in the file. Existing entries keep
/// their state so human validation is never overwritten.
fn write_initial_semantics(
    path: &Path,
    results: &HashMap<String, AutoClassificationResult>,
) -> Result<usize> {
    let mut semantics = if path.exists() {
        load_semantics(path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        HashMap::new()
    };

    let mut written = 0;
    for (id, result) in results {
        if !semantics.contains_key(id) {
            semantics.insert(id.clone(), CategorySemantics::from_classification(result));
            written += 1;
        }
    }

    save_semantics(path, &semantics)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(written)
}
