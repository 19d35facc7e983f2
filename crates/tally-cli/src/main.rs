//! Tally CLI - Spending-energy classifier
//!
//! Usage:
//!   tally classify "Conta de luz"          Classify one category name
//!   tally batch --file categories.csv     Classify a category list
//!   tally review --semantics s.json       Categories awaiting review
//!   tally ledger -s s.json -t tx.csv      Energy totals and coverage

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tally_core::{EnergyDistribution, SemanticFlags, SemanticsEdit, TallyConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = TallyConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Classify { name, kind, json } => {
            commands::cmd_classify(&name, &kind, commands::use_json(json, &config))
        }
        Commands::Batch { file, out, json } => {
            commands::cmd_batch(&file, out.as_deref(), commands::use_json(json, &config))
        }
        Commands::Templates { name, json } => {
            commands::cmd_templates(name.as_deref(), commands::use_json(json, &config))
        }
        Commands::Validate {
            weights,
            flags,
            json,
        } => commands::cmd_validate(
            distribution(&weights),
            semantic_flags(&flags),
            commands::use_json(json, &config),
        ),
        Commands::Review { semantics, json } => {
            commands::cmd_review(&semantics, commands::use_json(json, &config))
        }
        Commands::Confirm {
            semantics,
            id,
            actor,
            reason,
        } => commands::cmd_confirm(&semantics, &id, &actor, reason),
        Commands::Edit {
            semantics,
            id,
            actor,
            weights,
            flags,
            justification,
            reason,
        } => {
            let edit = SemanticsEdit {
                distribution: distribution(&weights),
                flags: semantic_flags(&flags),
                justification,
            };
            commands::cmd_edit(&semantics, &id, &actor, edit, reason)
        }
        Commands::Ledger {
            semantics,
            transactions,
            by_month,
            json,
        } => commands::cmd_ledger(
            &semantics,
            &transactions,
            by_month,
            commands::use_json(json, &config),
            &config.coverage,
        ),
    }
}

fn distribution(weights: &WeightArgs) -> EnergyDistribution {
    EnergyDistribution::new(weights.survival, weights.choice, weights.future, weights.loss)
}

fn semantic_flags(flags: &FlagArgs) -> SemanticFlags {
    SemanticFlags::new(flags.fixed, flags.essential, flags.investment)
}
