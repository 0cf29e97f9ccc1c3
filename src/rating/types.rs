use serde::{Deserialize, Serialize};

pub type RatingValue = f64;

/// Rounds to a fixed number of decimal places.
///
/// Ties round half away from zero (`f64::round`), not half to even. The two only
/// disagree on exact binary ties such as 0.125.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    Robust,
    Classical,
}

impl EstimatorKind {
    pub fn as_str(&self) -> &str {
        match self {
            EstimatorKind::Robust => "robust",
            EstimatorKind::Classical => "classical",
        }
    }
}

/// Central tendency and dispersion of one comparison sample.
///
/// For robust estimates `mean` holds the median and `std` the scaled MAD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub mad: Option<f64>,
    pub kind: EstimatorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleAffinity {
    Loves,
    Enjoys,
    Neutral,
    LessFond,
    NotPreferred,
}

impl StyleAffinity {
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation > 1.5 {
            StyleAffinity::Loves
        } else if deviation > 0.5 {
            StyleAffinity::Enjoys
        } else if deviation < -1.5 {
            StyleAffinity::NotPreferred
        } else if deviation < -0.5 {
            StyleAffinity::LessFond
        } else {
            StyleAffinity::Neutral
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StyleAffinity::Loves => "loves this style",
            StyleAffinity::Enjoys => "enjoys this style",
            StyleAffinity::Neutral => "neutral",
            StyleAffinity::LessFond => "less fond of this style",
            StyleAffinity::NotPreferred => "not preferred style",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalContext {
    pub global_mean: f64,
    pub category_deviation: f64,
    pub interpretation: StyleAffinity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedStats {
    #[serde(flatten)]
    pub stats: DistributionStats,
    pub shrinkage_applied: bool,
    pub shrinkage_factor: Option<f64>,
}

impl AdjustedStats {
    pub fn unchanged(stats: DistributionStats) -> Self {
        Self {
            stats,
            shrinkage_applied: false,
            shrinkage_factor: None,
        }
    }

    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    pub fn std(&self) -> f64 {
        self.stats.std
    }

    pub fn variance(&self) -> f64 {
        self.stats.variance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub width: f64,
}

impl ConfidenceInterval {
    pub fn degenerate(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
            width: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentModifiers {
    pub variance_influence: f64,
    pub extreme_modifier: f64,
    pub outlier_dampening: f64,
    pub smoothing_constant: f64,
}

/// Everything one `scale` call produces. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingResult {
    pub raw_rating: RatingValue,
    pub scaled_rating: RatingValue,
    pub z_score: f64,
    pub confidence_interval: ConfidenceInterval,
    pub percentile: f64,
    pub components: Option<ComponentModifiers>,
    pub global_context: Option<GlobalContext>,
    pub stats: Option<AdjustedStats>,
}

impl ScalingResult {
    /// Neutral result handed back for input the pipeline cannot scale.
    pub fn passthrough(raw_rating: RatingValue) -> Self {
        Self {
            raw_rating,
            scaled_rating: raw_rating,
            z_score: 0.0,
            confidence_interval: ConfidenceInterval::degenerate(raw_rating),
            percentile: 0.0,
            components: None,
            global_context: None,
            stats: None,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.components.is_none()
    }
}
