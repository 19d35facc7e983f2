//! Tally Core Library
//!
//! Energy classification of spending categories:
//! - Energy model (survival, choice, future, loss) and distributions
//! - Energy contract validation
//! - Built-in Portuguese category template registry
//! - Tiered pattern classifier and review helpers
//! - Category semantics lifecycle with change history
//! - Energy ledger with semantic coverage
//! - CSV import and semantics file storage

pub mod classify;
pub mod config;
pub mod energy;
pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod review;
pub mod templates;
pub mod validation;

pub use classify::{
    classify, classify_many, normalize_name, AutoClassificationResult, CategoryInput,
    CategoryKind, Confidence,
};
pub use config::{CoverageThresholds, OutputFormat, TallyConfig};
pub use energy::{EnergyDistribution, EnergyType};
pub use error::{Error, Result};
pub use ledger::{
    summarize, summarize_by_month, DiagnosticMode, EnergySummary, LedgerTransaction,
    SemanticsCoverage,
};
pub use models::{
    resolve_energy, CategorySemantics, EnergySource, SemanticsChange, SemanticsEdit,
    TransactionEnergyOverride, ValidationStatus,
};
pub use review::{needs_review, review_queue, ReviewStats};
pub use templates::{CategoryEnergyTemplate, TEMPLATES};
pub use validation::{validate_with_flags, SemanticFlags, ValidationReport};
