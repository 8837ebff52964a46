//! Composite Scorer
//!
//! Combines normalized sub-scores into one overall score and picks the
//! rating band and message shown to the user.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::metrics::{MetricKind, RawProviderMetrics};
use super::normalizer::{NormalizedMetric, NormalizerSet};
use super::weights::ScoringWeights;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("No normalizer registered for metric: {0}")]
    MissingNormalizer(MetricKind),
}

/// Rating band of an overall score, worst first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Caution,
    Fair,
    Good,
    Strong,
    Exceptional,
}

impl Rating {
    /// Band lookup; total over 0..=100
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => Rating::Exceptional,
            s if s >= 80 => Rating::Strong,
            s if s >= 70 => Rating::Good,
            s if s >= 60 => Rating::Fair,
            _ => Rating::Caution,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::Exceptional => "Exceptional: strong fundamentals across all metrics",
            Rating::Strong => "Strong: healthy market activity with solid fundamentals",
            Rating::Good => "Good: reasonable metrics with minor concerns",
            Rating::Fair => "Fair: mixed signals, do your own research",
            Rating::Caution => "Caution: weak or missing metrics, high risk",
        }
    }
}

/// Result of scoring one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeAnalysis {
    pub overall_score: u8,
    pub rating: Rating,
    pub message: String,
    pub metrics: BTreeMap<MetricKind, NormalizedMetric>,
    pub token_data: RawProviderMetrics,
}

/// Weighted combination of sub-scores
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    normalizers: NormalizerSet,
    weights: ScoringWeights,
}

impl CompositeScorer {
    pub fn new(normalizers: NormalizerSet, weights: ScoringWeights) -> Self {
        Self { normalizers, weights }
    }

    /// Scorer with every built-in normalizer
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self::new(NormalizerSet::standard(), weights)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Normalize every weighted metric, then combine
    pub fn score(&self, raw: RawProviderMetrics) -> Result<CompositeAnalysis, ScoringError> {
        let mut metrics = BTreeMap::new();
        for kind in self.weights.kinds() {
            let normalizer = self
                .normalizers
                .get(kind)
                .ok_or(ScoringError::MissingNormalizer(kind))?;
            metrics.insert(kind, normalizer.normalize(&raw));
        }

        let overall_score = combine(&metrics, &self.weights);
        let rating = Rating::from_score(overall_score);

        Ok(CompositeAnalysis {
            overall_score,
            rating,
            message: rating.message().to_string(),
            metrics,
            token_data: raw,
        })
    }
}

/// `round(sum(weight * score))`, clamped to 0-100
///
/// Metrics missing from `metrics` contribute nothing.
pub fn combine(metrics: &BTreeMap<MetricKind, NormalizedMetric>, weights: &ScoringWeights) -> u8 {
    let total: f64 = weights
        .iter()
        .filter_map(|(kind, weight)| metrics.get(&kind).map(|m| weight * m.score as f64))
        .sum();
    total.round().clamp(0.0, 100.0) as u8
}
