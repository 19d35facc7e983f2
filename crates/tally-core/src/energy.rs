//! Energy distribution model
//!
//! Every expense is described by how much of its money goes to each of four
//! energy types:
//! - Survival: sustains basic life (rent, utilities, basic food, health)
//! - Choice: optional comfort and lifestyle (restaurants, streaming, travel)
//! - Future: builds assets or capacity (investments, courses, pension)
//! - Loss: pure waste (card interest, fines, avoidable bank fees)
//!
//! A distribution is four non-negative weights that sum to 1.0. The all-zero
//! distribution is the "no opinion yet" sentinel and fails the
//! sum check.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Floating-point slack allowed when checking that weights sum to 1.0
pub const SUM_TOLERANCE: f64 = 0.001;

/// One of the four energy types for spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Survival,
    Choice,
    Future,
    Loss,
}

impl EnergyType {
    /// All energy types in canonical priority order
    pub fn all() -> &'static [EnergyType] {
        &[Self::Survival, Self::Choice, Self::Future, Self::Loss]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Choice => "choice",
            Self::Future => "future",
            Self::Loss => "loss",
        }
    }

    /// Human-readable label used in formatted distributions
    pub fn label(&self) -> &'static str {
        match self {
            Self::Survival => "Survival",
            Self::Choice => "Choice",
            Self::Future => "Future",
            Self::Loss => "Loss",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Survival => "Essential spending that keeps life running",
            Self::Choice => "Optional spending on comfort and pleasure",
            Self::Future => "Investment in future freedom",
            Self::Loss => "Money lost with no return",
        }
    }

    /// Display color (hex) shared with report consumers
    pub fn color(&self) -> &'static str {
        match self {
            Self::Survival => "#3B82F6",
            Self::Choice => "#8B5CF6",
            Self::Future => "#10B981",
            Self::Loss => "#EF4444",
        }
    }
}

impl std::str::FromStr for EnergyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "survival" => Ok(Self::Survival),
            "choice" => Ok(Self::Choice),
            "future" => Ok(Self::Future),
            "loss" => Ok(Self::Loss),
            _ => Err(format!("Unknown energy type: {}", s)),
        }
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted split of a category's (or transaction's) money across energy types
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyDistribution {
    pub survival: f64,
    pub choice: f64,
    pub future: f64,
    pub loss: f64,
}

impl EnergyDistribution {
    /// All weights zero: not classified yet. Fails `is_valid`.
    pub const UNCLASSIFIED: EnergyDistribution = EnergyDistribution {
        survival: 0.0,
        choice: 0.0,
        future: 0.0,
        loss: 0.0,
    };

    pub const fn new(survival: f64, choice: f64, future: f64, loss: f64) -> Self {
        Self {
            survival,
            choice,
            future,
            loss,
        }
    }

    /// 100% of a single energy type
    pub fn pure(energy: EnergyType) -> Self {
        Self::UNCLASSIFIED.with_weight(energy, 1.0)
    }

    /// Two-type split where `primary` carries `primary_weight` (0.5 to 1.0)
    /// and `secondary` carries the remainder.
    pub fn hybrid(
        primary: EnergyType,
        primary_weight: f64,
        secondary: EnergyType,
    ) -> Result<Self> {
        if !(0.5..=1.0).contains(&primary_weight) {
            return Err(Error::InvalidDistribution(format!(
                "primary weight must be between 0.5 and 1.0, got {}",
                primary_weight
            )));
        }
        if primary == secondary {
            return Err(Error::InvalidDistribution(format!(
                "primary and secondary energy must differ (both {})",
                primary
            )));
        }

        Ok(Self::UNCLASSIFIED
            .with_weight(primary, primary_weight)
            .with_weight(secondary, 1.0 - primary_weight))
    }

    pub fn weight(&self, energy: EnergyType) -> f64 {
        match energy {
            EnergyType::Survival => self.survival,
            EnergyType::Choice => self.choice,
            EnergyType::Future => self.future,
            EnergyType::Loss => self.loss,
        }
    }

    /// Copy of this distribution with one weight replaced
    pub fn with_weight(mut self, energy: EnergyType, weight: f64) -> Self {
        match energy {
            EnergyType::Survival => self.survival = weight,
            EnergyType::Choice => self.choice = weight,
            EnergyType::Future => self.future = weight,
            EnergyType::Loss => self.loss = weight,
        }
        self
    }

    pub fn sum(&self) -> f64 {
        self.survival + self.choice + self.future + self.loss
    }

    /// True when the weights sum to 1.0 within `SUM_TOLERANCE`
    pub fn is_valid(&self) -> bool {
        (self.sum() - 1.0).abs() < SUM_TOLERANCE
    }

    pub fn is_unclassified(&self) -> bool {
        self.sum() == 0.0
    }

    /// Rescale weights so they sum to 1.0.
    ///
    /// An all-zero distribution has nothing to rescale and is rejected rather
    /// than turned into an arbitrary split.
    pub fn normalize(&self) -> Result<Self> {
        let sum = self.sum();
        if sum == 0.0 {
            return Err(Error::InvalidDistribution(
                "cannot normalize a distribution with all weights at zero".to_string(),
            ));
        }

        Ok(Self {
            survival: self.survival / sum,
            choice: self.choice / sum,
            future: self.future / sum,
            loss: self.loss / sum,
        })
    }

    /// Energy type with the highest weight; ties go to the earlier type in
    /// canonical order (survival, choice, future, loss).
    pub fn predominant(&self) -> EnergyType {
        let mut best = EnergyType::Survival;
        for &energy in &EnergyType::all()[1..] {
            if self.weight(energy) > self.weight(best) {
                best = energy;
            }
        }
        best
    }

    /// More than one weight strictly above zero
    pub fn is_hybrid(&self) -> bool {
        EnergyType::all()
            .iter()
            .filter(|&&energy| self.weight(energy) > 0.0)
            .count()
            > 1
    }

    /// Summary like "70% Survival / 30% Choice".
    ///
    /// Each component is rounded on its own, so the displayed percentages may
    /// not add up to exactly 100.
    pub fn format(&self) -> String {
        let parts: Vec<String> = EnergyType::all()
            .iter()
            .filter(|&&energy| self.weight(energy) > 0.0)
            .map(|&energy| {
                format!(
                    "{}% {}",
                    (self.weight(energy) * 100.0).round() as i64,
                    energy.label()
                )
            })
            .collect();

        if parts.is_empty() {
            "Unclassified".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

impl std::fmt::Display for EnergyDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
