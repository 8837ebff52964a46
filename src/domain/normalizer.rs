//! Metric Normalizers
//!
//! Maps raw provider signals onto a 0-100 scale.
//!
//! Market metrics use a five-bucket descending threshold ladder with strict `>`
//! comparisons; each metric has its own table and unit. Missing, non-finite or
//! negative inputs fall through to the floor bucket (50).
//!
//! | metric     | 90 if >     | 80 if >    | 70 if >   | 60 if >  | else |
//! |------------|-------------|------------|-----------|----------|------|
//! | liquidity  | 1,000,000   | 100,000    | 10,000    | 1,000    | 50   |
//! | volume 24h | 1,000,000   | 500,000    | 100,000   | 10,000   | 50   |
//! | holders    | 10,000      | 1,000      | 100       | 10       | 50   |
//! | market cap | 100,000,000 | 10,000,000 | 1,000,000 | 100,000  | 50   |
//! | pool count | 10          | 5          | 2         | 0        | 50   |

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::metrics::{MetricKind, RawProviderMetrics};

/// Score assigned when a signal is absent
pub const NEUTRAL_SCORE: u8 = 50;

/// Lower bound of the "strong" description band
pub const STRONG_BAND: u8 = 80;

/// Lower bound of the "moderate" description band
pub const MODERATE_BAND: u8 = 60;

/// A sub-score with its display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetric {
    pub score: u8,
    pub description: String,
}

impl NormalizedMetric {
    /// Build a metric, clamping the score to 0-100
    pub fn new(score: u8, description: impl Into<String>) -> Self {
        Self {
            score: score.min(100),
            description: description.into(),
        }
    }
}

/// Display copy for the three description bands
#[derive(Debug, Clone, Copy)]
pub struct BandCopy {
    pub strong: &'static str,
    pub moderate: &'static str,
    pub caution: &'static str,
}

impl BandCopy {
    /// Pick the text for a score
    pub fn describe(&self, score: u8) -> &'static str {
        if score >= STRONG_BAND {
            self.strong
        } else if score >= MODERATE_BAND {
            self.moderate
        } else {
            self.caution
        }
    }
}

/// Ordered descending threshold table
#[derive(Debug, Clone, Copy)]
pub struct ThresholdLadder {
    /// `(threshold, score)` pairs, highest threshold first
    steps: &'static [(f64, u8)],
    floor: u8,
}

impl ThresholdLadder {
    pub const fn new(steps: &'static [(f64, u8)], floor: u8) -> Self {
        Self { steps, floor }
    }

    /// Score a raw value; absent or unusable values score the floor
    pub fn score(&self, value: Option<f64>) -> u8 {
        let value = sanitize(value);
        self.steps
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map(|(_, score)| *score)
            .unwrap_or(self.floor)
            .min(100)
    }
}

/// Missing, NaN, infinite and negative values all count as zero
fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

pub const LIQUIDITY_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[(1_000_000.0, 90), (100_000.0, 80), (10_000.0, 70), (1_000.0, 60)],
    NEUTRAL_SCORE,
);

pub const VOLUME_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[(1_000_000.0, 90), (500_000.0, 80), (100_000.0, 70), (10_000.0, 60)],
    NEUTRAL_SCORE,
);

pub const HOLDERS_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[(10_000.0, 90), (1_000.0, 80), (100.0, 70), (10.0, 60)],
    NEUTRAL_SCORE,
);

pub const MARKET_CAP_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[(100_000_000.0, 90), (10_000_000.0, 80), (1_000_000.0, 70), (100_000.0, 60)],
    NEUTRAL_SCORE,
);

pub const POOL_COUNT_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[(10.0, 90), (5.0, 80), (2.0, 70), (0.0, 60)],
    NEUTRAL_SCORE,
);

/// Maps the raw signals of one token to a single sub-score
pub trait MetricNormalizer: Send + Sync {
    /// Metric this normalizer produces
    fn kind(&self) -> MetricKind;

    /// Produce the sub-score; must not fail
    fn normalize(&self, raw: &RawProviderMetrics) -> NormalizedMetric;
}

/// Threshold-ladder normalizer for a numeric market metric
#[derive(Debug, Clone, Copy)]
pub struct LadderNormalizer {
    kind: MetricKind,
    ladder: ThresholdLadder,
    copy: BandCopy,
}

impl LadderNormalizer {
    pub const fn new(kind: MetricKind, ladder: ThresholdLadder, copy: BandCopy) -> Self {
        Self { kind, ladder, copy }
    }

    pub fn liquidity() -> Self {
        Self::new(
            MetricKind::Liquidity,
            LIQUIDITY_LADDER,
            BandCopy {
                strong: "Deep liquidity supports large trades",
                moderate: "Moderate liquidity",
                caution: "Thin liquidity - exercise caution",
            },
        )
    }

    pub fn volume() -> Self {
        Self::new(
            MetricKind::Volume,
            VOLUME_LADDER,
            BandCopy {
                strong: "Strong 24h trading activity",
                moderate: "Moderate 24h trading activity",
                caution: "Low 24h trading activity",
            },
        )
    }

    pub fn holders() -> Self {
        Self::new(
            MetricKind::Holders,
            HOLDERS_LADDER,
            BandCopy {
                strong: "Widely held token",
                moderate: "Growing holder base",
                caution: "Few holders - concentration risk",
            },
        )
    }

    pub fn market_cap() -> Self {
        Self::new(
            MetricKind::MarketCap,
            MARKET_CAP_LADDER,
            BandCopy {
                strong: "Large market capitalization",
                moderate: "Mid-sized market capitalization",
                caution: "Small market cap - higher volatility",
            },
        )
    }

    pub fn pool_count() -> Self {
        Self::new(
            MetricKind::PoolCount,
            POOL_COUNT_LADDER,
            BandCopy {
                strong: "Listed across many pools",
                moderate: "Listed on a few pools",
                caution: "No known pool listings",
            },
        )
    }

    /// Score a bare value without a metrics bag
    pub fn normalize_value(&self, value: Option<f64>) -> NormalizedMetric {
        let score = self.ladder.score(value);
        NormalizedMetric::new(score, self.copy.describe(score))
    }
}

impl MetricNormalizer for LadderNormalizer {
    fn kind(&self) -> MetricKind {
        self.kind
    }

    fn normalize(&self, raw: &RawProviderMetrics) -> NormalizedMetric {
        self.normalize_value(raw.numeric(self.kind))
    }
}

/// Scores mint and freeze authority status
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityNormalizer;

impl SecurityNormalizer {
    const COPY: BandCopy = BandCopy {
        strong: "Mint and freeze authorities revoked",
        moderate: "Authorities partially revoked",
        caution: "Active or unknown token authorities - exercise caution",
    };

    /// Both flags must be known; a half-known pair is neutral
    pub fn score(mint_revoked: Option<bool>, freeze_revoked: Option<bool>) -> u8 {
        match (mint_revoked, freeze_revoked) {
            (Some(true), Some(true)) => 90,
            (Some(true), Some(false)) => 70,
            (Some(false), Some(true)) => 60,
            (Some(false), Some(false)) => 40,
            _ => NEUTRAL_SCORE,
        }
    }
}

impl MetricNormalizer for SecurityNormalizer {
    fn kind(&self) -> MetricKind {
        MetricKind::Security
    }

    fn normalize(&self, raw: &RawProviderMetrics) -> NormalizedMetric {
        let score = Self::score(raw.mint_authority_revoked, raw.freeze_authority_revoked);
        NormalizedMetric::new(score, Self::COPY.describe(score))
    }
}

/// Placeholder for a metric with no data source yet; always neutral
#[derive(Debug, Clone, Copy)]
pub struct UnimplementedNormalizer {
    kind: MetricKind,
    description: &'static str,
}

impl UnimplementedNormalizer {
    pub const fn new(kind: MetricKind, description: &'static str) -> Self {
        Self { kind, description }
    }

    pub fn social() -> Self {
        Self::new(MetricKind::Social, "Social signals not implemented")
    }
}

impl MetricNormalizer for UnimplementedNormalizer {
    fn kind(&self) -> MetricKind {
        self.kind
    }

    fn normalize(&self, _raw: &RawProviderMetrics) -> NormalizedMetric {
        NormalizedMetric::new(NEUTRAL_SCORE, self.description)
    }
}

/// Registry of normalizers keyed by metric
#[derive(Clone, Default)]
pub struct NormalizerSet {
    normalizers: BTreeMap<MetricKind, Arc<dyn MetricNormalizer>>,
}

impl NormalizerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in normalizer
    pub fn standard() -> Self {
        Self::new()
            .with(LadderNormalizer::liquidity())
            .with(LadderNormalizer::volume())
            .with(LadderNormalizer::holders())
            .with(LadderNormalizer::market_cap())
            .with(LadderNormalizer::pool_count())
            .with(SecurityNormalizer)
            .with(UnimplementedNormalizer::social())
    }

    /// Register a normalizer, replacing any existing one for the same metric
    pub fn with<N: MetricNormalizer + 'static>(mut self, normalizer: N) -> Self {
        self.normalizers.insert(normalizer.kind(), Arc::new(normalizer));
        self
    }

    pub fn get(&self, kind: MetricKind) -> Option<&dyn MetricNormalizer> {
        self.normalizers.get(&kind).map(|n| n.as_ref())
    }

    pub fn contains(&self, kind: MetricKind) -> bool {
        self.normalizers.contains_key(&kind)
    }
}

impl std::fmt::Debug for NormalizerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.normalizers.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKETS: [u8; 5] = [50, 60, 70, 80, 90];

    #[test]
    fn test_liquidity_ladder_buckets() {
        let n = LadderNormalizer::liquidity();
        assert_eq!(n.normalize_value(Some(1_500_000.0)).score, 90);
        assert_eq!(n.normalize_value(Some(1_000_000.0)).score, 80); // strict >
        assert_eq!(n.normalize_value(Some(150_000.0)).score, 80);
        assert_eq!(n.normalize_value(Some(50_000.0)).score, 70);
        assert_eq!(n.normalize_value(Some(5_000.0)).score, 60);
        assert_eq!(n.normalize_value(Some(1_000.0)).score, 50);
        assert_eq!(n.normalize_value(Some(0.0)).score, 50);
    }

    #[test]
    fn test_liquidity_monotonic_and_bucketed() {
        let n = LadderNormalizer::liquidity();
        let mut previous = 0;
        let mut v = 0.0;
        while v < 5_000_000.0 {
            let score = n.normalize_value(Some(v)).score;
            assert!(BUCKETS.contains(&score), "score {} for {}", score, v);
            assert!(score >= previous, "score dropped at {}", v);
            previous = score;
            v += 997.0;
        }
    }

    #[test]
    fn test_reference_scenario_values() {
        assert_eq!(LadderNormalizer::liquidity().normalize_value(Some(1_500_000.0)).score, 90);
        assert_eq!(LadderNormalizer::volume().normalize_value(Some(50_000.0)).score, 60);
        assert_eq!(LadderNormalizer::holders().normalize_value(Some(200.0)).score, 70);
    }

    #[test]
    fn test_unusable_inputs_score_neutral() {
        let normalizers = [
            LadderNormalizer::liquidity(),
            LadderNormalizer::volume(),
            LadderNormalizer::holders(),
            LadderNormalizer::market_cap(),
            LadderNormalizer::pool_count(),
        ];
        for n in normalizers {
            for value in [None, Some(f64::NAN), Some(f64::INFINITY), Some(f64::NEG_INFINITY), Some(-42.0)] {
                assert_eq!(n.normalize_value(value).score, NEUTRAL_SCORE);
            }
            assert_eq!(n.normalize(&RawProviderMetrics::default()).score, NEUTRAL_SCORE);
        }
    }

    #[test]
    fn test_pool_count_single_pool() {
        let n = LadderNormalizer::pool_count();
        assert_eq!(n.normalize_value(Some(0.0)).score, 50);
        assert_eq!(n.normalize_value(Some(1.0)).score, 60);
        assert_eq!(n.normalize_value(Some(3.0)).score, 70);
        assert_eq!(n.normalize_value(Some(6.0)).score, 80);
        assert_eq!(n.normalize_value(Some(11.0)).score, 90);
    }

    #[test]
    fn test_market_cap_ladder() {
        let n = LadderNormalizer::market_cap();
        assert_eq!(n.normalize_value(Some(250_000_000.0)).score, 90);
        assert_eq!(n.normalize_value(Some(20_000_000.0)).score, 80);
        assert_eq!(n.normalize_value(Some(2_000_000.0)).score, 70);
        assert_eq!(n.normalize_value(Some(200_000.0)).score, 60);
        assert_eq!(n.normalize_value(Some(20_000.0)).score, 50);
    }

    #[test]
    fn test_descriptions_follow_bands() {
        let n = LadderNormalizer::liquidity();
        assert_eq!(n.normalize_value(Some(2_000_000.0)).description, "Deep liquidity supports large trades");
        assert_eq!(n.normalize_value(Some(5_000.0)).description, "Moderate liquidity");
        assert_eq!(n.normalize_value(None).description, "Thin liquidity - exercise caution");
    }

    #[test]
    fn test_security_scores() {
        assert_eq!(SecurityNormalizer::score(Some(true), Some(true)), 90);
        assert_eq!(SecurityNormalizer::score(Some(true), Some(false)), 70);
        assert_eq!(SecurityNormalizer::score(Some(false), Some(true)), 60);
        assert_eq!(SecurityNormalizer::score(Some(false), Some(false)), 40);
        assert_eq!(SecurityNormalizer::score(None, None), NEUTRAL_SCORE);
        assert_eq!(SecurityNormalizer::score(Some(false), None), NEUTRAL_SCORE);
        assert_eq!(SecurityNormalizer::score(Some(true), None), NEUTRAL_SCORE);
        assert_eq!(SecurityNormalizer::score(None, Some(true)), NEUTRAL_SCORE);
        assert_eq!(SecurityNormalizer::score(None, Some(false)), NEUTRAL_SCORE);

        let raw = RawProviderMetrics {
            mint_authority_revoked: Some(true),
            freeze_authority_revoked: Some(true),
            ..Default::default()
        };
        let metric = SecurityNormalizer.normalize(&raw);
        assert_eq!(metric.score, 90);
        assert!(metric.description.contains("revoked"));
    }

    #[test]
    fn test_social_placeholder_is_neutral() {
        let metric = UnimplementedNormalizer::social().normalize(&RawProviderMetrics::default());
        assert_eq!(metric.score, NEUTRAL_SCORE);
        assert!(metric.description.contains("not implemented"));
    }

    #[test]
    fn test_normalizer_idempotent() {
        let raw = RawProviderMetrics {
            liquidity_usd: Some(77_777.0),
            ..Default::default()
        };
        let n = LadderNormalizer::liquidity();
        assert_eq!(n.normalize(&raw), n.normalize(&raw));
    }

    #[test]
    fn test_standard_set_covers_every_kind() {
        let set = NormalizerSet::standard();
        for kind in MetricKind::ALL {
            let normalizer = set.get(kind).expect("normalizer registered");
            assert_eq!(normalizer.kind(), kind);
        }
    }

    #[test]
    fn test_set_with_replaces_existing() {
        let set = NormalizerSet::standard()
            .with(UnimplementedNormalizer::new(MetricKind::Security, "Security checks disabled"));
        let metric = set
            .get(MetricKind::Security)
            .unwrap()
            .normalize(&RawProviderMetrics::default());
        assert_eq!(metric.description, "Security checks disabled");
    }

    #[test]
    fn test_normalized_metric_clamps() {
        assert_eq!(NormalizedMetric::new(250, "x").score, 100);
    }
}
