//! Review helpers for classifier output
//!
//! Fallback results and anything the classifier flagged as unsure go to a
//! human reviewer.

use std::collections::HashMap;

use serde::Serialize;

use crate::classify::{AutoClassificationResult, Confidence};
use crate::models::ValidationStatus;

/// Whether a classification should be shown to a reviewer
pub fn needs_review(result: &AutoClassificationResult) -> bool {
    result.confidence == Confidence::Low
        || result.validation_status == ValidationStatus::NotValidated
        || !result.matched
}

/// Counts over a batch of classification results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub matched: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub validated: usize,
    pub inferred: usize,
    pub not_validated: usize,
    pub needs_review: usize,
}

impl ReviewStats {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a AutoClassificationResult>,
    {
        let mut stats = Self::default();
        for result in results {
            stats.total += 1;
            if result.matched {
                stats.matched += 1;
            }
            match result.confidence {
                Confidence::High => stats.high_confidence += 1,
                Confidence::Medium => stats.medium_confidence += 1,
                Confidence::Low => stats.low_confidence += 1,
            }
            match result.validation_status {
                ValidationStatus::Validated => stats.validated += 1,
                ValidationStatus::Inferred => stats.inferred += 1,
                ValidationStatus::NotValidated => stats.not_validated += 1,
                ValidationStatus::Default => {}
            }
            if needs_review(result) {
                stats.needs_review += 1;
            }
        }
        stats
    }
}

/// Results needing review, ordered by category id
pub fn review_queue(
    results: &HashMap<String, AutoClassificationResult>,
) -> Vec<(&str, &AutoClassificationResult)> {
    let mut queue: Vec<_> = results
        .iter()
        .filter(|(_, r)| needs_review(r))
        .map(|(id, r)| (id.as_str(), r))
        .collect();
    queue.sort_by(|a, b| a.0.cmp(b.0));
    queue
}
