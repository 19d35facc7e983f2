//! Energy contract validation
//!
//! Structural and semantic rules checked against a distribution and its
//! semantic flags. Every rule is evaluated even when an earlier one fails, so
//! a caller can show the full list of problems at once.
//!
//! Rules:
//! 1. Each weight is a finite, non-negative number (error)
//! 2. Weights sum to 100% (error)
//! 3. FUTURE and LOSS cannot both be positive (error)
//! 4. Investments need FUTURE > 0 (error)
//! 5. Essentials need SURVIVAL > 0 (error)
//! 6. Fixed costs usually carry SURVIVAL (warning only)

use serde::{Deserialize, Serialize};

use crate::energy::{EnergyDistribution, EnergyType, SUM_TOLERANCE};
use crate::error::{Error, Result};

/// Semantic flags attached to a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SemanticFlags {
    /// Recurs with little variance
    pub is_fixed: bool,
    /// Cannot be cut without severe impact
    pub is_essential: bool,
    /// Builds future capacity or assets
    pub is_investment: bool,
}

impl SemanticFlags {
    pub const NONE: SemanticFlags = SemanticFlags {
        is_fixed: false,
        is_essential: false,
        is_investment: false,
    };

    pub const fn new(is_fixed: bool, is_essential: bool, is_investment: bool) -> Self {
        Self {
            is_fixed,
            is_essential,
            is_investment,
        }
    }
}

/// Outcome of checking a distribution against the energy contract
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Turn an invalid report into `Error::ContractViolation`.
    /// Write paths call this so a failing distribution is never persisted.
    pub fn into_result(self) -> Result<ValidationReport> {
        if self.valid {
            Ok(self)
        } else {
            Err(Error::ContractViolation(self.errors))
        }
    }
}

/// Check a distribution and its flags against every contract rule
pub fn validate_with_flags(
    distribution: &EnergyDistribution,
    flags: &SemanticFlags,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let bad_weights: Vec<&str> = EnergyType::all()
        .iter()
        .filter(|e| {
            let w = distribution.weight(**e);
            !w.is_finite() || w < 0.0
        })
        .map(|e| e.as_str())
        .collect();
    if !bad_weights.is_empty() {
        errors.push(format!(
            "Weights must be finite and non-negative. Invalid: {}",
            bad_weights.join(", ")
        ));
    }

    // A NaN sum compares false and must fail
    let sum = distribution.sum();
    let sums_to_one = (sum - 1.0).abs() < SUM_TOLERANCE;
    if !sums_to_one {
        let current = if sum.is_finite() {
            format!("{}%", (sum * 100.0).round() as i64)
        } else {
            sum.to_string()
        };
        errors.push(format!("Weights must sum to 100%. Current: {}", current));
    }

    if distribution.future > 0.0 && distribution.loss > 0.0 {
        errors.push(
            "FUTURE and LOSS cannot coexist: spending cannot be both an investment and a loss"
                .to_string(),
        );
    }

    if flags.is_investment && distribution.future == 0.0 {
        errors.push("Items marked as investment must have FUTURE energy > 0".to_string());
    }

    if flags.is_essential && distribution.survival == 0.0 {
        errors.push("Essential items must have SURVIVAL energy > 0".to_string());
    }

    if flags.is_fixed && distribution.survival == 0.0 {
        warnings.push(
            "Fixed costs usually carry SURVIVAL energy. Check that the classification is correct"
                .to_string(),
        );
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_distribution_without_flags() {
        let report = validate_with_flags(
            &EnergyDistribution::new(0.7, 0.3, 0.0, 0.0),
            &SemanticFlags::NONE,
        );
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_sum_rule_reports_rounded_percentage() {
        let report = validate_with_flags(
            &EnergyDistribution::new(0.6, 0.6, 0.0, 0.0),
            &SemanticFlags::NONE,
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("120%"));
    }

    #[test]
    fn test_unclassified_fails_sum_rule() {
        let report = validate_with_flags(&EnergyDistribution::UNCLASSIFIED, &SemanticFlags::NONE);
        assert!(!report.valid);
        assert!(report.errors[0].contains("0%"));
    }

    #[test]
    fn test_future_and_loss_are_mutually_exclusive() {
        let report = validate_with_flags(
            &EnergyDistribution::new(0.0, 0.0, 0.5, 0.5),
            &SemanticFlags::default(),
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("FUTURE and LOSS"));
    }

    #[test]
    fn test_investment_requires_future() {
        let report = validate_with_flags(
            &EnergyDistribution::pure(EnergyType::Choice),
            &SemanticFlags::new(false, false, true),
        );
        assert!(!report.valid);
        assert!(report.errors[0].contains("investment"));

        let ok = validate_with_flags(
            &EnergyDistribution::new(0.0, 0.6, 0.4, 0.0),
            &SemanticFlags::new(false, false, true),
        );
        assert!(ok.valid);
    }

    #[test]
    fn test_essential_requires_survival() {
        let report = validate_with_flags(
            &EnergyDistribution::pure(EnergyType::Choice),
            &SemanticFlags::new(false, true, false),
        );
        assert!(!report.valid);
        assert!(report.errors[0].contains("Essential"));
    }

    #[test]
    fn test_fixed_without_survival_is_only_a_warning() {
        // A streaming subscription is fixed but carries no survival weight
        let report = validate_with_flags(
            &EnergyDistribution::pure(EnergyType::Choice),
            &SemanticFlags::new(true, false, false),
        );
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_errors_accumulate() {
        let report = validate_with_flags(
            &EnergyDistribution::new(0.0, 0.0, 0.6, 0.6),
            &SemanticFlags::new(true, true, false),
        );
        assert!(!report.valid);
        // sum + future/loss + essential
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_into_result() {
        let ok = validate_with_flags(
            &EnergyDistribution::pure(EnergyType::Survival),
            &SemanticFlags::NONE,
        );
        assert!(ok.into_result().is_ok());

        let bad = validate_with_flags(
            &EnergyDistribution::new(0.0, 0.0, 0.5, 0.5),
            &SemanticFlags::NONE,
        );
        match bad.into_result() {
            Err(Error::ContractViolation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected contract violation, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_weight_is_invalid() {
        let distribution = EnergyDistribution::new(f64::NAN, 0.0, 0.0, 0.0);
        let report = validate_with_flags(&distribution, &SemanticFlags::NONE);
        assert!(!report.valid);
        assert!(!distribution.is_valid());
        // non-finite weight + sum
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("survival"));
        assert!(report.errors[1].contains("NaN"));
    }

    #[test]
    fn test_infinite_weight_is_invalid() {
        let report = validate_with_flags(
            &EnergyDistribution::new(0.0, f64::INFINITY, 0.0, 0.0),
            &SemanticFlags::NONE,
        );
        assert!(!report.valid);
        assert!(report.errors[0].contains("choice"));
        assert!(report.errors[1].contains("inf"));
    }

    #[test]
    fn test_negative_weight_is_invalid() {
        // Sums to 1.0 but one weight is negative
        let report = validate_with_flags(
            &EnergyDistribution::new(1.5, -0.5, 0.0, 0.0),
            &SemanticFlags::NONE,
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("non-negative"));
        assert!(report.errors[0].contains("choice"));
    }
}
