//! Domain models for Tally
//!
//! The persisted side of classification: the semantics bundle a category owns,
//! its trust lifecycle and change history, and per-transaction overrides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::AutoClassificationResult;
use crate::energy::EnergyDistribution;
use crate::error::{Error, Result};
use crate::validation::{validate_with_flags, SemanticFlags, ValidationReport};

/// Trust state of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Confirmed by a human
    Validated,
    /// Produced by pattern matching, unconfirmed
    Inferred,
    /// The classifier has no confident answer
    NotValidated,
    /// Persisted but never touched by the classifier or a reviewer
    Default,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Inferred => "inferred",
            Self::NotValidated => "not_validated",
            Self::Default => "default",
        }
    }

    /// Statuses a reviewer still has to look at
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::NotValidated | Self::Default)
    }
}

impl std::str::FromStr for ValidationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "validated" => Ok(Self::Validated),
            "inferred" => Ok(Self::Inferred),
            "not_validated" => Ok(Self::NotValidated),
            "default" => Ok(Self::Default),
            _ => Err(format!("Unknown validation status: {}", s)),
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a transaction's effective distribution comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    #[default]
    Category,
    UserOverride,
}

impl EnergySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::UserOverride => "user_override",
        }
    }
}

impl std::fmt::Display for EnergySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a category's append-only classification history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticsChange {
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
    pub previous_distribution: EnergyDistribution,
    pub new_distribution: EnergyDistribution,
    pub previous_status: ValidationStatus,
    pub new_status: ValidationStatus,
    pub reason: Option<String>,
}

/// A reviewer's replacement for a category's classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticsEdit {
    pub distribution: EnergyDistribution,
    pub flags: SemanticFlags,
    pub justification: Option<String>,
}

/// Classification bundle persisted alongside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySemantics {
    pub distribution: EnergyDistribution,
    pub flags: SemanticFlags,
    pub validation_status: ValidationStatus,
    pub validated_by: Option<String>,
    pub validated_at: Option<DateTime<Utc>>,
    pub justification: Option<String>,
    #[serde(default)]
    pub history: Vec<SemanticsChange>,
}

impl CategorySemantics {
    /// Semantics for a category the classifier never ran on
    pub fn unclassified() -> Self {
        Self {
            distribution: EnergyDistribution::UNCLASSIFIED,
            flags: SemanticFlags::NONE,
            validation_status: ValidationStatus::Default,
            validated_by: None,
            validated_at: None,
            justification: None,
            history: Vec::new(),
        }
    }

    /// Initial semantics written when a category is created
    pub fn from_classification(result: &AutoClassificationResult) -> Self {
        Self {
            distribution: result.distribution,
            flags: result.flags,
            validation_status: result.validation_status,
            validated_by: None,
            validated_at: None,
            justification: Some(result.justification.clone()),
            history: Vec::new(),
        }
    }

    pub fn is_validated(&self) -> bool {
        self.validation_status == ValidationStatus::Validated
    }

    pub fn needs_attention(&self) -> bool {
        self.validation_status.needs_attention()
    }

    /// Human confirmation of the current classification as-is
    pub fn confirm(
        &mut self,
        actor: &str,
        at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<ValidationReport> {
        let report = validate_with_flags(&self.distribution, &self.flags).into_result()?;

        let distribution = self.distribution;
        self.record(actor, at, distribution, ValidationStatus::Validated, reason);
        self.validated_by = Some(actor.to_string());
        self.validated_at = Some(at);

        Ok(report)
    }

    /// Human edit: replaces distribution and flags, blocked when the edit
    /// breaks the energy contract
    pub fn apply_edit(
        &mut self,
        edit: SemanticsEdit,
        actor: &str,
        at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<ValidationReport> {
        let report = validate_with_flags(&edit.distribution, &edit.flags).into_result()?;

        self.record(actor, at, edit.distribution, ValidationStatus::Validated, reason);
        self.distribution = edit.distribution;
        self.flags = edit.flags;
        if edit.justification.is_some() {
            self.justification = edit.justification;
        }
        self.validated_by = Some(actor.to_string());
        self.validated_at = Some(at);

        Ok(report)
    }

    /// Replace the classification with a fresh classifier result (for
    /// example after a rename). Drops any previous human validation.
    pub fn reclassify(
        &mut self,
        result: &AutoClassificationResult,
        actor: &str,
        at: DateTime<Utc>,
        reason: Option<String>,
    ) {
        self.record(actor, at, result.distribution, result.validation_status, reason);
        self.distribution = result.distribution;
        self.flags = result.flags;
        self.justification = Some(result.justification.clone());
        self.validated_by = None;
        self.validated_at = None;
    }

    fn record(
        &mut self,
        actor: &str,
        at: DateTime<Utc>,
        new_distribution: EnergyDistribution,
        new_status: ValidationStatus,
        reason: Option<String>,
    ) {
        debug!(
            "Semantics {} -> {} by {}",
            self.validation_status, new_status, actor
        );
        self.history.push(SemanticsChange {
            changed_at: at,
            changed_by: actor.to_string(),
            previous_distribution: self.distribution,
            new_distribution,
            previous_status: self.validation_status,
            new_status,
            reason,
        });
        self.validation_status = new_status;
    }
}

/// A user's distribution for one specific transaction. Never touches the
/// category's own semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEnergyOverride {
    pub distribution: EnergyDistribution,
    pub created_at: DateTime<Utc>,
    pub reason: Option<String>,
}

impl TransactionEnergyOverride {
    /// Create an override; the distribution must satisfy the energy contract
    pub fn new(
        distribution: EnergyDistribution,
        created_at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Self> {
        if distribution.is_unclassified() {
            return Err(Error::InvalidDistribution(
                "override distribution cannot have all weights at zero".to_string(),
            ));
        }
        validate_with_flags(&distribution, &SemanticFlags::NONE).into_result()?;

        Ok(Self {
            distribution,
            created_at,
            reason,
        })
    }
}

/// Effective distribution of a transaction and where it came from.
///
/// An override always wins; otherwise the category's semantics apply.
/// Returns `None` when there is neither.
pub fn resolve_energy(
    category: Option<&CategorySemantics>,
    energy_override: Option<&TransactionEnergyOverride>,
) -> Option<(EnergyDistribution, EnergySource)> {
    if let Some(o) = energy_override {
        return Some((o.distribution, EnergySource::UserOverride));
    }
    category.map(|c| (c.distribution, EnergySource::Category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, CategoryKind};
    use crate::energy::EnergyType;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_validation_status_as_str_and_from_str() {
        for status in [
            ValidationStatus::Validated,
            ValidationStatus::Inferred,
            ValidationStatus::NotValidated,
            ValidationStatus::Default,
        ] {
            assert_eq!(status.as_str().parse::<ValidationStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<ValidationStatus>().is_err());
    }

    #[test]
    fn test_validation_status_serde() {
        let json = serde_json::to_string(&ValidationStatus::NotValidated).unwrap();
        assert_eq!(json, "\"not_validated\"");
        let source = serde_json::to_string(&EnergySource::UserOverride).unwrap();
        assert_eq!(source, "\"user_override\"");
    }

    #[test]
    fn test_needs_attention() {
        assert!(ValidationStatus::NotValidated.needs_attention());
        assert!(ValidationStatus::Default.needs_attention());
        assert!(!ValidationStatus::Inferred.needs_attention());
        assert!(!ValidationStatus::Validated.needs_attention());
    }

    #[test]
    fn test_unclassified_uses_default_status() {
        let semantics = CategorySemantics::unclassified();
        assert_eq!(semantics.validation_status, ValidationStatus::Default);
        assert!(semantics.distribution.is_unclassified());
        assert!(semantics.needs_attention());
    }

    #[test]
    fn test_from_classification() {
        let result = classify("Supermercado", CategoryKind::Expense);
        let semantics = CategorySemantics::from_classification(&result);
        assert_eq!(semantics.distribution, result.distribution);
        assert_eq!(semantics.flags, result.flags);
        assert_eq!(semantics.validation_status, ValidationStatus::Inferred);
        assert_eq!(semantics.justification.as_deref(), Some(result.justification.as_str()));
        assert!(semantics.history.is_empty());
        assert!(semantics.validated_by.is_none());
    }

    #[test]
    fn test_confirm_stamps_and_logs() {
        let result = classify("Aluguel", CategoryKind::Expense);
        let mut semantics = CategorySemantics::from_classification(&result);

        semantics.confirm("ana", at(5), Some("looks right".to_string())).unwrap();

        assert!(semantics.is_validated());
        assert_eq!(semantics.validated_by.as_deref(), Some("ana"));
        assert_eq!(semantics.validated_at, Some(at(5)));
        assert_eq!(semantics.history.len(), 1);

        let change = &semantics.history[0];
        assert_eq!(change.previous_status, ValidationStatus::Inferred);
        assert_eq!(change.new_status, ValidationStatus::Validated);
        assert_eq!(change.previous_distribution, change.new_distribution);
        assert_eq!(change.reason.as_deref(), Some("looks right"));
    }

    #[test]
    fn test_confirm_rejects_unclassified() {
        let mut semantics = CategorySemantics::unclassified();
        let err = semantics.confirm("ana", at(5), None).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
        assert_eq!(semantics.validation_status, ValidationStatus::Default);
        assert!(semantics.history.is_empty());
    }

    #[test]
    fn test_apply_edit() {
        let result = classify("xyz123 categoria inventada", CategoryKind::Expense);
        let mut semantics = CategorySemantics::from_classification(&result);

        let edit = SemanticsEdit {
            distribution: EnergyDistribution::hybrid(EnergyType::Choice, 0.6, EnergyType::Future)
                .unwrap(),
            flags: SemanticFlags::new(false, false, true),
            justification: Some("Hobby that also builds skills".to_string()),
        };
        let report = semantics.apply_edit(edit.clone(), "bruno", at(7), None).unwrap();

        assert!(report.valid);
        assert_eq!(semantics.distribution, edit.distribution);
        assert_eq!(semantics.flags, edit.flags);
        assert_eq!(semantics.validation_status, ValidationStatus::Validated);
        assert_eq!(
            semantics.justification.as_deref(),
            Some("Hobby that also builds skills")
        );

        let change = &semantics.history[0];
        assert_eq!(change.previous_distribution, EnergyDistribution::new(0.5, 0.5, 0.0, 0.0));
        assert_eq!(change.new_distribution, edit.distribution);
        assert_eq!(change.previous_status, ValidationStatus::NotValidated);
    }

    #[test]
    fn test_apply_edit_blocked_by_contract() {
        let result = classify("Aluguel", CategoryKind::Expense);
        let mut semantics = CategorySemantics::from_classification(&result);
        let before = semantics.clone();

        let edit = SemanticsEdit {
            distribution: EnergyDistribution::new(0.0, 0.0, 0.5, 0.5),
            flags: SemanticFlags::NONE,
            justification: None,
        };
        let err = semantics.apply_edit(edit, "bruno", at(7), None).unwrap_err();

        match err {
            Error::ContractViolation(errors) => {
                assert!(errors.iter().any(|e| e.contains("FUTURE and LOSS")))
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(semantics, before);
    }

    #[test]
    fn test_apply_edit_rejects_non_finite_and_negative_weights() {
        let mut semantics =
            CategorySemantics::from_classification(&classify("Aluguel", CategoryKind::Expense));
        let before = semantics.clone();

        for distribution in [
            EnergyDistribution::new(f64::NAN, 0.0, 0.0, 0.0),
            EnergyDistribution::new(f64::INFINITY, 0.0, 0.0, 0.0),
            EnergyDistribution::new(1.5, -0.5, 0.0, 0.0),
        ] {
            let edit = SemanticsEdit {
                distribution,
                flags: SemanticFlags::NONE,
                justification: None,
            };
            let err = semantics.apply_edit(edit, "bruno", at(7), None).unwrap_err();
            assert!(matches!(err, Error::ContractViolation(_)));
        }

        // Nothing was written, so the semantics still serialize cleanly
        assert_eq!(semantics, before);
        let json = serde_json::to_string(&semantics).unwrap();
        let back: CategorySemantics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, before);
    }

    #[test]
    fn test_apply_edit_returns_warnings() {
        let mut semantics = CategorySemantics::unclassified();
        let edit = SemanticsEdit {
            distribution: EnergyDistribution::pure(EnergyType::Choice),
            flags: SemanticFlags::new(true, false, false),
            justification: None,
        };
        let report = semantics.apply_edit(edit, "carla", at(2), None).unwrap();
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(semantics.justification.is_none());
    }

    #[test]
    fn test_reclassify_reverts_validation() {
        let mut semantics =
            CategorySemantics::from_classification(&classify("Aluguel", CategoryKind::Expense));
        semantics.confirm("ana", at(1), None).unwrap();

        let renamed = classify("xyz123 categoria inventada", CategoryKind::Expense);
        semantics.reclassify(&renamed, "system", at(3), Some("category renamed".to_string()));

        assert_eq!(semantics.validation_status, ValidationStatus::NotValidated);
        assert!(semantics.validated_by.is_none());
        assert!(semantics.validated_at.is_none());
        assert_eq!(semantics.distribution, renamed.distribution);
        assert_eq!(semantics.history.len(), 2);

        let last = semantics.history.last().unwrap();
        assert_eq!(last.previous_status, ValidationStatus::Validated);
        assert_eq!(last.new_status, ValidationStatus::NotValidated);
        assert_eq!(last.changed_by, "system");
    }

    #[test]
    fn test_override_validation() {
        let ok = TransactionEnergyOverride::new(
            EnergyDistribution::pure(EnergyType::Loss),
            at(1),
            Some("late fee".to_string()),
        );
        assert!(ok.is_ok());

        let zero = TransactionEnergyOverride::new(EnergyDistribution::UNCLASSIFIED, at(1), None);
        assert!(matches!(zero, Err(Error::InvalidDistribution(_))));

        let bad_sum =
            TransactionEnergyOverride::new(EnergyDistribution::new(0.5, 0.0, 0.0, 0.0), at(1), None);
        assert!(matches!(bad_sum, Err(Error::ContractViolation(_))));

        let nan = TransactionEnergyOverride::new(
            EnergyDistribution::new(f64::NAN, 0.0, 0.0, 0.0),
            at(1),
            None,
        );
        assert!(matches!(nan, Err(Error::ContractViolation(_))));

        let negative = TransactionEnergyOverride::new(
            EnergyDistribution::new(0.0, 0.0, 1.25, -0.25),
            at(1),
            None,
        );
        assert!(matches!(negative, Err(Error::ContractViolation(_))));
    }

    #[test]
    fn test_resolve_energy() {
        let category =
            CategorySemantics::from_classification(&classify("Supermercado", CategoryKind::Expense));
        let energy_override = TransactionEnergyOverride::new(
            EnergyDistribution::pure(EnergyType::Choice),
            at(1),
            None,
        )
        .unwrap();

        let (dist, source) = resolve_energy(Some(&category), None).unwrap();
        assert_eq!(source, EnergySource::Category);
        assert_eq!(dist, category.distribution);

        let (dist, source) = resolve_energy(Some(&category), Some(&energy_override)).unwrap();
        assert_eq!(source, EnergySource::UserOverride);
        assert_eq!(dist, EnergyDistribution::pure(EnergyType::Choice));
        // Category untouched
        assert_eq!(category.distribution, EnergyDistribution::new(0.7, 0.3, 0.0, 0.0));

        assert!(resolve_energy(None, None).is_none());
        let (_, source) = resolve_energy(None, Some(&energy_override)).unwrap();
        assert_eq!(source, EnergySource::UserOverride);
    }

    #[test]
    fn test_semantics_json_round_trip_keeps_history() {
        let mut semantics =
            CategorySemantics::from_classification(&classify("Netflix", CategoryKind::Expense));
        semantics.confirm("ana", at(9), None).unwrap();

        let json = serde_json::to_string(&semantics).unwrap();
        let parsed: CategorySemantics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, semantics);
    }
}
