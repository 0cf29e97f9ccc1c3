use super::types::{round_to, AdjustedStats, ComponentModifiers};
use crate::config::ScalerSettings;

/// Unrounded output of one composition; rounding happens when it is reported
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub z_score: f64,
    pub confidence: f64,
    pub variance_influence: f64,
    pub extreme_modifier: f64,
    pub outlier_dampening: f64,
    pub smoothing_constant: f64,
    pub base_adjustment: f64,
    pub final_adjustment: f64,
}

impl Adjustment {
    pub fn modifiers(&self) -> ComponentModifiers {
        ComponentModifiers {
            variance_influence: round_to(self.variance_influence, 3),
            extreme_modifier: round_to(self.extreme_modifier, 3),
            outlier_dampening: round_to(self.outlier_dampening, 3),
            smoothing_constant: round_to(self.smoothing_constant, 2),
        }
    }
}

/// Combines the independent modifiers into a single bounded adjustment
pub struct AdjustmentComposer<'a> {
    settings: &'a ScalerSettings,
}

impl<'a> AdjustmentComposer<'a> {
    pub fn new(settings: &'a ScalerSettings) -> Self {
        Self { settings }
    }

    pub fn compose(&self, raw_rating: f64, stats: &AdjustedStats, sample_size: usize) -> Adjustment {
        let z_score = z_score(raw_rating, stats);
        let confidence = self.confidence(stats, sample_size);
        let variance_influence = self.variance_influence(stats.variance());
        let extreme_modifier = self.extreme_modifier(raw_rating);
        let outlier_dampening = self.outlier_dampening(z_score);
        let smoothing_constant = self.smoothing_constant(sample_size);

        // tanh keeps the swing within +/- bounding_factor of the raw rating
        let max_adjustment = raw_rating * self.settings.bounding_factor;
        let base_adjustment = (z_score / smoothing_constant).tanh() * max_adjustment;

        let final_adjustment = base_adjustment
            * self.settings.adjustment_strength
            * variance_influence
            * confidence
            * extreme_modifier
            * outlier_dampening;

        Adjustment {
            z_score,
            confidence,
            variance_influence,
            extreme_modifier,
            outlier_dampening,
            smoothing_constant,
            base_adjustment,
            final_adjustment,
        }
    }

    /// Sample-size adequacy times inverse coefficient of variation
    pub fn confidence(&self, stats: &AdjustedStats, sample_size: usize) -> f64 {
        let sample_component = (sample_size as f64 / self.settings.min_sample_size as f64).min(1.0);

        let mean_in_use = if stats.mean() != 0.0 { stats.mean() } else { 1.0 };
        let cv = stats.std() / mean_in_use;
        let precision_component = 1.0 / (1.0 + cv);

        (sample_component * precision_component).clamp(0.0, 1.0)
    }

    /// Logistic curve centered on unit variance
    pub fn variance_influence(&self, variance: f64) -> f64 {
        let exponent = -self.settings.variance_sigmoid_steepness
            * (variance - self.settings.variance_sigmoid_center);
        1.0 / (1.0 + exponent.exp())
    }

    /// 1 away from the scale ends, falling to 0 at exactly min or max rating
    pub fn extreme_modifier(&self, raw_rating: f64) -> f64 {
        let distance = (raw_rating - self.settings.min_rating)
            .min(self.settings.max_rating - raw_rating)
            .max(0.0);

        if distance >= self.settings.extreme_distance {
            return 1.0;
        }

        (distance / self.settings.extreme_distance).powf(self.settings.extreme_compression_factor)
    }

    pub fn outlier_dampening(&self, z_score: f64) -> f64 {
        let abs_z = z_score.abs();
        if abs_z <= self.settings.outlier_z_threshold {
            return 1.0;
        }

        1.0 / (1.0 + self.settings.outlier_dampening_rate * (abs_z - self.settings.outlier_z_threshold))
    }

    /// Larger samples get a sharper (smaller) constant
    pub fn smoothing_constant(&self, sample_size: usize) -> f64 {
        if !self.settings.use_adaptive_smoothing {
            return self.settings.fixed_smoothing_constant;
        }

        let factor = (1.0 - sample_size as f64 / self.settings.smoothing_sample_horizon).max(0.0);
        self.settings.smoothing_min + factor * (self.settings.smoothing_base - self.settings.smoothing_min)
    }
}

fn z_score(raw_rating: f64, stats: &AdjustedStats) -> f64 {
    if stats.std() > 0.0 {
        (raw_rating - stats.mean()) / stats.std()
    } else {
        0.0
    }
}
