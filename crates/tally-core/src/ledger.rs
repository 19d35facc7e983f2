//! Energy ledger
//!
//! Turns transactions into energy totals. Only human-validated category
//! semantics (or a per-transaction override) put an expense into the energy
//! columns; everything else is held as pending energy and lowers the
//! semantic coverage of the report.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::CategoryKind;
use crate::config::CoverageThresholds;
use crate::energy::{EnergyDistribution, EnergyType};
use crate::models::{resolve_energy, CategorySemantics, TransactionEnergyOverride};

/// Breakdown key for transactions without a category
pub const UNCATEGORIZED: &str = "uncategorized";

/// A transaction as the ledger sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub category_id: Option<String>,
    pub kind: CategoryKind,
    /// Absolute value is used; sign conventions differ between exports
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_override: Option<TransactionEnergyOverride>,
}

/// How far a report can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticMode {
    Complete,
    Partial,
    Insufficient,
}

impl DiagnosticMode {
    pub fn from_percentage(percentage: f64, thresholds: &CoverageThresholds) -> Self {
        if percentage >= thresholds.complete_percent {
            Self::Complete
        } else if percentage >= thresholds.partial_percent {
            Self::Partial
        } else {
            Self::Insufficient
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Insufficient => "insufficient",
        }
    }
}

impl std::fmt::Display for DiagnosticMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Share of expense spending backed by validated semantics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticsCoverage {
    /// Percent of expenses classified, one decimal
    pub percentage: f64,
    pub classified_amount: f64,
    pub unclassified_amount: f64,
    /// Spending held out of the energy columns until validated
    pub pending_energy: f64,
    pub is_complete: bool,
    pub diagnostic_mode: DiagnosticMode,
}

/// Dominant energy of a category within a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownEnergy {
    Generated,
    Survival,
    Choice,
    Future,
    Loss,
    Hybrid,
    Pending,
}

impl BreakdownEnergy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Survival => "survival",
            Self::Choice => "choice",
            Self::Future => "future",
            Self::Loss => "loss",
            Self::Hybrid => "hybrid",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for BreakdownEnergy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEnergy {
    pub category_id: String,
    pub amount: f64,
    pub energy: BreakdownEnergy,
    /// Amount relative to generated energy, in percent
    pub percentage: f64,
}

/// Energy totals for a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    /// "YYYY-MM" for monthly summaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub transaction_count: usize,
    pub generated: f64,
    pub survival: f64,
    pub choice: f64,
    pub future: f64,
    pub loss: f64,
    /// survival + choice + loss
    pub consumed: f64,
    /// generated - consumed
    pub available: f64,
    /// generated - consumed - future
    pub net_energy: f64,
    pub survival_ratio: f64,
    /// (generated - survival) / generated
    pub freedom_ratio: f64,
    pub future_ratio: f64,
    pub waste_ratio: f64,
    pub coverage: SemanticsCoverage,
    pub breakdown: Vec<CategoryEnergy>,
}

#[derive(Default)]
struct CategoryTotals {
    amount: f64,
    classified: f64,
    energy: [f64; 4],
    income: bool,
}

/// Summarize transactions against the category semantics map
pub fn summarize<'a, I>(
    transactions: I,
    semantics: &HashMap<String, CategorySemantics>,
    thresholds: &CoverageThresholds,
) -> EnergySummary
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    let mut count = 0;
    let mut generated = 0.0;
    let mut energy = [0.0_f64; 4];
    let mut classified_amount = 0.0;
    let mut unclassified_amount = 0.0;
    let mut categories: HashMap<String, CategoryTotals> = HashMap::new();

    for tx in transactions {
        count += 1;
        let amount = tx.amount.abs();
        let key = tx.category_id.as_deref().unwrap_or(UNCATEGORIZED);
        let totals = categories.entry(key.to_string()).or_default();
        totals.amount += amount;

        if tx.kind == CategoryKind::Income {
            generated += amount;
            totals.income = true;
            continue;
        }

        match validated_distribution(tx, semantics) {
            Some(distribution) => {
                for (i, energy_type) in EnergyType::all().iter().enumerate() {
                    let share = amount * distribution.weight(*energy_type);
                    energy[i] += share;
                    totals.energy[i] += share;
                }
                classified_amount += amount;
                totals.classified += amount;
            }
            None => unclassified_amount += amount,
        }
    }

    let [survival, choice, future, loss] = energy;
    let consumed = survival + choice + loss;
    let ratio = |value: f64| if generated > 0.0 { value / generated } else { 0.0 };

    let total_expenses = classified_amount + unclassified_amount;
    let percentage = if total_expenses > 0.0 {
        classified_amount / total_expenses * 100.0
    } else {
        100.0
    };
    let diagnostic_mode = DiagnosticMode::from_percentage(percentage, thresholds);

    let mut breakdown: Vec<CategoryEnergy> = categories
        .into_iter()
        .map(|(category_id, totals)| CategoryEnergy {
            energy: dominant_energy(&totals),
            percentage: ratio(totals.amount) * 100.0,
            amount: totals.amount,
            category_id,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    EnergySummary {
        period: None,
        transaction_count: count,
        generated,
        survival,
        choice,
        future,
        loss,
        consumed,
        available: generated - consumed,
        net_energy: generated - consumed - future,
        survival_ratio: ratio(survival),
        freedom_ratio: ratio(generated - survival),
        future_ratio: ratio(future),
        waste_ratio: ratio(loss),
        coverage: SemanticsCoverage {
            percentage: (percentage * 10.0).round() / 10.0,
            classified_amount,
            unclassified_amount,
            pending_energy: unclassified_amount,
            is_complete: diagnostic_mode == DiagnosticMode::Complete,
            diagnostic_mode,
        },
        breakdown,
    }
}

/// One summary per calendar month, oldest first
pub fn summarize_by_month(
    transactions: &[LedgerTransaction],
    semantics: &HashMap<String, CategorySemantics>,
    thresholds: &CoverageThresholds,
) -> Vec<EnergySummary> {
    let mut months: BTreeMap<String, Vec<&LedgerTransaction>> = BTreeMap::new();
    for tx in transactions {
        months
            .entry(tx.date.format("%Y-%m").to_string())
            .or_default()
            .push(tx);
    }

    let summaries: Vec<EnergySummary> = months
        .into_iter()
        .map(|(period, txs)| {
            let mut summary = summarize(txs, semantics, thresholds);
            summary.period = Some(period);
            summary
        })
        .collect();

    info!("Summarized {} months", summaries.len());
    summaries
}

/// Distribution an expense contributes with, if it is trusted
fn validated_distribution(
    tx: &LedgerTransaction,
    semantics: &HashMap<String, CategorySemantics>,
) -> Option<EnergyDistribution> {
    let category = tx
        .category_id
        .as_ref()
        .and_then(|id| semantics.get(id))
        .filter(|s| s.is_validated());

    resolve_energy(category, tx.energy_override.as_ref()).map(|(distribution, _)| distribution)
}

fn dominant_energy(totals: &CategoryTotals) -> BreakdownEnergy {
    if totals.income {
        return BreakdownEnergy::Generated;
    }
    if totals.classified <= 0.0 {
        return BreakdownEnergy::Pending;
    }

    let kinds = [
        BreakdownEnergy::Survival,
        BreakdownEnergy::Choice,
        BreakdownEnergy::Future,
        BreakdownEnergy::Loss,
    ];
    kinds
        .into_iter()
        .zip(totals.energy)
        .find(|(_, amount)| amount / totals.classified >= 0.5)
        .map(|(kind, _)| kind)
        .unwrap_or(BreakdownEnergy::Hybrid)
}
