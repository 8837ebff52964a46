//! Domain Layer - Scoring core for SniffTools
//!
//! Pure types and logic with no I/O. All provider interaction happens through
//! the ports layer.
//!
//! - `metrics`: raw provider signals and metric names
//! - `normalizer`: threshold ladders mapping raw signals to 0-100 sub-scores
//! - `weights`: validated weight table
//! - `composite`: weighted combination, rating band and message

pub mod metrics;
pub mod normalizer;
pub mod weights;
pub mod composite;

pub use metrics::{MetricKind, RawProviderMetrics};
pub use normalizer::{
    LadderNormalizer, MetricNormalizer, NormalizedMetric, NormalizerSet, SecurityNormalizer,
    ThresholdLadder, UnimplementedNormalizer, NEUTRAL_SCORE,
};
pub use weights::{ScoringWeights, WeightError};
pub use composite::{combine, CompositeAnalysis, CompositeScorer, Rating, ScoringError};
