//! Automatic energy classification of spending categories
//!
//! Classification runs in tiers, first hit wins:
//! 1. Income categories short-circuit (income is generated energy, not spend)
//! 2. Substring match of a template pattern against the category name
//! 3. Partial match on a single long word (4+ characters) of a pattern
//! 4. Fallback 50/50 survival/choice placeholder flagged for review
//!
//! Names and patterns are compared after lower-casing and stripping accents,
//! so "Água" and "agua" are the same name. Classification is a pure function
//! of its inputs and never fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::energy::EnergyDistribution;
use crate::models::ValidationStatus;
use crate::templates::{CategoryEnergyTemplate, TEMPLATES};
use crate::validation::SemanticFlags;

/// Template name reported for income categories
pub const INCOME_TEMPLATE: &str = "INCOME";

/// Shortest pattern word usable as a partial-match anchor
pub const MIN_PARTIAL_WORD_LEN: usize = 4;

const INCOME_JUSTIFICATION: &str =
    "Income is generated energy - it is not part of spending classification";

const FALLBACK_JUSTIFICATION: &str =
    "Unrecognized category - 50/50 Survival/Choice placeholder pending review";

/// Coarse kind of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown category kind: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative trust in a classification, from the tier that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown confidence: {}", s)),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the classifier. Not persisted as-is: callers copy its fields
/// into a `CategorySemantics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoClassificationResult {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    pub distribution: EnergyDistribution,
    pub flags: SemanticFlags,
    pub justification: String,
    pub validation_status: ValidationStatus,
    pub confidence: Confidence,
}

impl AutoClassificationResult {
    fn income() -> Self {
        Self {
            matched: true,
            template_name: Some(INCOME_TEMPLATE.to_string()),
            distribution: EnergyDistribution::UNCLASSIFIED,
            flags: SemanticFlags::NONE,
            justification: INCOME_JUSTIFICATION.to_string(),
            validation_status: ValidationStatus::Validated,
            confidence: Confidence::High,
        }
    }

    fn fallback() -> Self {
        Self {
            matched: false,
            template_name: None,
            distribution: EnergyDistribution::new(0.5, 0.5, 0.0, 0.0),
            flags: SemanticFlags::NONE,
            justification: FALLBACK_JUSTIFICATION.to_string(),
            validation_status: ValidationStatus::NotValidated,
            confidence: Confidence::Low,
        }
    }

    fn from_template(
        template: &CategoryEnergyTemplate,
        justification: String,
        confidence: Confidence,
    ) -> Self {
        Self {
            matched: true,
            template_name: Some(template.name.to_string()),
            distribution: template.distribution,
            flags: template.flags,
            justification,
            validation_status: ValidationStatus::Inferred,
            confidence,
        }
    }
}

/// A category to classify in bulk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
}

/// Lower-case and strip combining diacritical marks (U+0300..U+036F)
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Classify a category by its display name
pub fn classify(category_name: &str, kind: CategoryKind) -> AutoClassificationResult {
    if kind == CategoryKind::Income {
        return AutoClassificationResult::income();
    }

    let normalized = normalize_name(category_name);

    // Every pattern contains the empty string; treat blank names as unknown
    if normalized.trim().is_empty() {
        debug!("Blank category name, using fallback classification");
        return AutoClassificationResult::fallback();
    }

    if let Some(result) = match_substring(&normalized) {
        return result;
    }

    if let Some(result) = match_partial_word(&normalized) {
        return result;
    }

    debug!("No template matched '{}', using fallback", category_name);
    AutoClassificationResult::fallback()
}

/// Pass 1: pattern contained in the name, or name contained in the pattern
fn match_substring(normalized: &str) -> Option<AutoClassificationResult> {
    for template in TEMPLATES {
        for pattern in template.patterns {
            let pattern = normalize_name(pattern);
            if normalized.contains(&pattern) || pattern.contains(normalized) {
                debug!(
                    "Template {} matched '{}' on pattern '{}'",
                    template.name, normalized, pattern
                );
                return Some(AutoClassificationResult::from_template(
                    template,
                    template.justification.to_string(),
                    Confidence::High,
                ));
            }
        }
    }
    None
}

/// Pass 2: any long word of a pattern contained in the name.
///
/// Pattern words are lower-cased but keep their accents, so accented words
/// only anchor names that were typed the same way before normalization.
fn match_partial_word(normalized: &str) -> Option<AutoClassificationResult> {
    for template in TEMPLATES {
        for pattern in template.patterns {
            let pattern = pattern.to_lowercase();
            for word in pattern.split_whitespace() {
                if word.chars().count() >= MIN_PARTIAL_WORD_LEN && normalized.contains(word) {
                    debug!(
                        "Template {} partially matched '{}' on word '{}'",
                        template.name, normalized, word
                    );
                    return Some(AutoClassificationResult::from_template(
                        template,
                        format!("{} (partial match: \"{}\")", template.justification, word),
                        Confidence::Medium,
                    ));
                }
            }
        }
    }
    None
}

/// Classify many categories; each result depends only on its own input
pub fn classify_many(categories: &[CategoryInput]) -> HashMap<String, AutoClassificationResult> {
    let results: HashMap<String, AutoClassificationResult> = categories
        .iter()
        .map(|c| (c.id.clone(), classify(&c.name, c.kind)))
        .collect();

    info!(
        "Classified {} categories ({} matched)",
        results.len(),
        results.values().filter(|r| r.matched).count()
    );

    results
}
