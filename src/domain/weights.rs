//! Scoring Weights
//!
//! Validated weight table for the composite score. Construction is the only
//! place weights are checked, so invalid tables fail at startup rather than
//! on a request.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::metrics::MetricKind;

/// Allowed drift of the weight sum from 1.0
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    #[error("Weight table is empty")]
    Empty,

    #[error("Weight for {kind} must be finite and >= 0, got {weight}")]
    InvalidWeight { kind: MetricKind, weight: f64 },

    #[error("Weights must sum to 1.0, got {sum:.6}")]
    BadSum { sum: f64 },
}

/// Non-empty table of non-negative weights summing to 1.0
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoringWeights {
    weights: BTreeMap<MetricKind, f64>,
}

impl ScoringWeights {
    /// Validate and build a weight table
    pub fn new(weights: BTreeMap<MetricKind, f64>) -> Result<Self, WeightError> {
        if weights.is_empty() {
            return Err(WeightError::Empty);
        }

        for (kind, weight) in &weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(WeightError::InvalidWeight {
                    kind: *kind,
                    weight: *weight,
                });
            }
        }

        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(WeightError::BadSum { sum });
        }

        Ok(Self { weights })
    }

    /// Build from `(metric, weight)` pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (MetricKind, f64)>,
    {
        Self::new(pairs.into_iter().collect())
    }

    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        self.weights.get(&kind).copied()
    }

    /// Active metrics with their weights, in metric order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        self.weights.iter().map(|(k, w)| (*k, *w))
    }

    pub fn kinds(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.weights.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for ScoringWeights {
    /// liquidity 0.30, volume 0.25, holders 0.20, market cap 0.10,
    /// pool count 0.05, security 0.10
    fn default() -> Self {
        Self {
            weights: default_weight_table(),
        }
    }
}

pub fn default_weight_table() -> BTreeMap<MetricKind, f64> {
    BTreeMap::from([
        (MetricKind::Liquidity, 0.30),
        (MetricKind::Volume, 0.25),
        (MetricKind::Holders, 0.20),
        (MetricKind::MarketCap, 0.10),
        (MetricKind::PoolCount, 0.05),
        (MetricKind::Security, 0.10),
    ])
}
