//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Classify spending by the energy it consumes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Spending-energy classifier for personal finance categories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ~/.local/share/tally/config/tally.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Energy weights given on the command line (fractions, summing to 1)
#[derive(Args, Debug, Clone, Copy)]
pub struct WeightArgs {
    /// SURVIVAL weight
    #[arg(long, default_value = "0")]
    pub survival: f64,

    /// CHOICE weight
    #[arg(long, default_value = "0")]
    pub choice: f64,

    /// FUTURE weight
    #[arg(long, default_value = "0")]
    pub future: f64,

    /// LOSS weight
    #[arg(long, default_value = "0")]
    pub loss: f64,
}

/// Semantic flags given on the command line
#[derive(Args, Debug, Clone, Copy)]
pub struct FlagArgs {
    /// Recurring cost with little variance
    #[arg(long)]
    pub fixed: bool,

    /// Cannot be cut without severe impact
    #[arg(long)]
    pub essential: bool,

    /// Builds future capacity or assets
    #[arg(long)]
    pub investment: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single category name
    Classify {
        /// Category name (e.g. "Conta de luz")
        name: String,

        /// Category kind: expense, income
        #[arg(short, long, default_value = "expense")]
        kind: String,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a CSV list of categories (id,name,kind)
    Batch {
        /// Categories CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Write initial semantics for each category to this JSON file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in category templates
    Templates {
        /// Show a single template by name (e.g. ENERGIA_ELETRICA)
        #[arg(long)]
        name: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a distribution against the energy contract
    Validate {
        #[command(flatten)]
        weights: WeightArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show categories whose semantics still need a human
    Review {
        /// Semantics JSON file
        #[arg(short, long)]
        semantics: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Confirm a category's current classification
    Confirm {
        /// Semantics JSON file
        #[arg(short, long)]
        semantics: PathBuf,

        /// Category id
        #[arg(long)]
        id: String,

        /// Who is confirming
        #[arg(long)]
        actor: String,

        /// Reason recorded in the history
        #[arg(long)]
        reason: Option<String>,
    },

    /// Replace a category's classification
    Edit {
        /// Semantics JSON file
        #[arg(short, long)]
        semantics: PathBuf,

        /// Category id
        #[arg(long)]
        id: String,

        /// Who is editing
        #[arg(long)]
        actor: String,

        #[command(flatten)]
        weights: WeightArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// New justification text
        #[arg(long)]
        justification: Option<String>,

        /// Reason recorded in the history
        #[arg(long)]
        reason: Option<String>,
    },

    /// Energy totals and semantic coverage for a transaction list
    Ledger {
        /// Semantics JSON file
        #[arg(short, long)]
        semantics: PathBuf,

        /// Transactions CSV file
        #[arg(short, long)]
        transactions: PathBuf,

        /// One summary per month
        #[arg(long)]
        by_month: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}
