use log::{debug, warn};

use super::adjustment::AdjustmentComposer;
use super::global_context::GlobalContextAnalyzer;
use super::shrinkage::ShrinkageAdjuster;
use super::statistics::StatisticsEstimator;
use super::types::{round_to, AdjustedStats, ConfidenceInterval, RatingValue, ScalingResult};
use crate::config::ScalerSettings;

/// Normalizes a raw rating against the ratings of its style.
///
/// The scaler only reads its settings, so one instance can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct RatingScaler {
    settings: ScalerSettings,
}

impl RatingScaler {
    pub fn new(settings: ScalerSettings) -> Self {
        Self { settings }
    }

    /// Scales `raw_rating` relative to `style_ratings`.
    ///
    /// Input the pipeline cannot handle (rating outside the scale, empty or non-finite
    /// sample) comes back unchanged with neutral diagnostics instead of an error.
    pub fn scale(
        &self,
        raw_rating: RatingValue,
        style_ratings: &[RatingValue],
        all_user_ratings: Option<&[RatingValue]>,
    ) -> ScalingResult {
        if !self.validate_inputs(raw_rating, style_ratings, all_user_ratings) {
            return ScalingResult::passthrough(raw_rating);
        }

        let sample_size = style_ratings.len();

        let stats = StatisticsEstimator::new(&self.settings).estimate(style_ratings);
        let global_context = GlobalContextAnalyzer::analyze(all_user_ratings, stats.mean);
        let adjusted = ShrinkageAdjuster::new(&self.settings).adjust(stats, global_context.as_ref(), sample_size);
        let adjustment = AdjustmentComposer::new(&self.settings).compose(raw_rating, &adjusted, sample_size);

        let scaled_rating = self.settings.clamp_rating(raw_rating + adjustment.final_adjustment);
        debug!(
            "Scaled {:.2} -> {:.2} (z={:.2}, n={}, {})",
            raw_rating,
            scaled_rating,
            adjustment.z_score,
            sample_size,
            adjusted.stats.kind.as_str()
        );

        ScalingResult {
            raw_rating,
            scaled_rating: round_to(scaled_rating, 2),
            z_score: round_to(adjustment.z_score, 2),
            confidence_interval: self.confidence_interval(scaled_rating, &adjusted, sample_size),
            percentile: percentile(raw_rating, style_ratings),
            components: Some(adjustment.modifiers()),
            global_context,
            stats: Some(adjusted),
        }
    }

    fn validate_inputs(
        &self,
        raw_rating: RatingValue,
        style_ratings: &[RatingValue],
        all_user_ratings: Option<&[RatingValue]>,
    ) -> bool {
        if !self.settings.is_valid_rating(raw_rating) {
            warn!("Invalid raw rating: {}", raw_rating);
            return false;
        }

        if style_ratings.is_empty() {
            warn!("Invalid style ratings: empty sample");
            return false;
        }

        if style_ratings.iter().any(|r| !r.is_finite()) {
            warn!("Invalid style ratings: non-finite value in {:?}", style_ratings);
            return false;
        }

        if all_user_ratings.is_some_and(|pool| pool.iter().any(|r| !r.is_finite())) {
            warn!("Invalid user ratings: non-finite value in global pool");
            return false;
        }

        true
    }

    /// 95% interval around the scaled rating; narrows as the sample grows
    fn confidence_interval(
        &self,
        scaled_rating: f64,
        stats: &AdjustedStats,
        sample_size: usize,
    ) -> ConfidenceInterval {
        let standard_error = stats.std() / (sample_size as f64).sqrt();
        let margin = self.settings.confidence_z * standard_error;

        let lower = self.settings.clamp_rating(scaled_rating - margin);
        let upper = self.settings.clamp_rating(scaled_rating + margin);

        ConfidenceInterval {
            lower: round_to(lower, 2),
            upper: round_to(upper, 2),
            width: round_to(upper - lower, 2),
        }
    }
}

/// Average-rank percentile: tied values share the mean of their ranks
pub fn percentile(rating: f64, sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }

    let count_below = sample.iter().filter(|&&r| r < rating).count() as f64;
    let count_equal = sample.iter().filter(|&&r| r == rating).count() as f64;

    let average_rank = count_below + (count_equal + 1.0) / 2.0;
    round_to(average_rank / sample.len() as f64 * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::types::{EstimatorKind, StyleAffinity};

    #[test]
    fn test_top_of_scale_is_preserved() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(10.0, &[5.0, 6.0, 7.0, 8.0], None);

        assert_eq!(result.scaled_rating, 10.0);
        assert_eq!(result.components.unwrap().extreme_modifier, 0.0);
    }

    #[test]
    fn test_bottom_of_scale_is_preserved() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(1.0, &[5.0, 6.0, 7.0, 8.0], Some(&[4.0, 6.0, 8.0]));

        assert_eq!(result.scaled_rating, 1.0);
    }

    #[test]
    fn test_single_matching_value_is_unchanged() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(7.0, &[7.0], None);

        assert_eq!(result.scaled_rating, 7.0);
        assert_eq!(result.z_score, 0.0);
        assert_eq!(result.confidence_interval.width, 0.0);
        assert_eq!(result.percentile, 100.0);
    }

    #[test]
    fn test_out_of_range_rating_is_absorbed() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(11.0, &[5.0, 6.0, 7.0], None);

        assert_eq!(result.scaled_rating, 11.0);
        assert_eq!(result.percentile, 0.0);
        assert_eq!(result.z_score, 0.0);
        assert_eq!(result.confidence_interval, ConfidenceInterval::degenerate(11.0));
        assert!(result.components.is_none());
        assert!(result.global_context.is_none());
    }

    #[test]
    fn test_empty_sample_is_absorbed() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(7.0, &[], Some(&[6.0, 7.0]));

        assert_eq!(result.scaled_rating, 7.0);
        assert_eq!(result.percentile, 0.0);
        assert_eq!(result.confidence_interval.width, 0.0);
        assert!(result.is_passthrough());
    }

    #[test]
    fn test_nan_inputs_are_absorbed() {
        let scaler = RatingScaler::default();

        assert!(scaler.scale(f64::NAN, &[5.0, 6.0], None).is_passthrough());
        assert!(scaler.scale(6.0, &[5.0, f64::NAN], None).is_passthrough());
    }

    #[test]
    fn test_non_finite_global_pool_is_absorbed() {
        let scaler = RatingScaler::default();

        for pool in [[6.0, f64::NAN], [6.0, f64::INFINITY]] {
            let result = scaler.scale(7.0, &[5.0, 6.0], Some(&pool));
            assert!(result.is_passthrough());
            assert_eq!(result.scaled_rating, 7.0);
            assert_eq!(result.confidence_interval, ConfidenceInterval::degenerate(7.0));
        }
    }

    #[test]
    fn test_known_values_robust_sample() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(8.0, &[4.0, 5.0, 6.0, 7.0, 8.0, 5.5, 6.5], None);

        assert_eq!(result.scaled_rating, 8.68);
        assert_eq!(result.z_score, 1.35);
        assert_eq!(
            result.confidence_interval,
            ConfidenceInterval { lower: 7.58, upper: 9.78, width: 2.2 }
        );
        assert_eq!(result.components.unwrap().smoothing_constant, 2.15);
    }

    #[test]
    fn test_known_values_near_top_outlier() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(9.2, &[3.0, 4.0, 9.5], None);

        assert_eq!(result.scaled_rating, 9.47);
        assert_eq!(result.z_score, 3.51);
        assert_eq!(
            result.confidence_interval,
            ConfidenceInterval { lower: 7.8, upper: 10.0, width: 2.2 }
        );

        let components = result.components.unwrap();
        assert_eq!(components.extreme_modifier, 0.577);
        assert_eq!(components.outlier_dampening, 0.689);
    }

    #[test]
    fn test_known_values_with_shrinkage() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(7.0, &[5.0, 6.0], Some(&[5.0, 6.0, 7.0, 8.0, 9.0]));

        assert_eq!(result.scaled_rating, 7.02);
        assert_eq!(
            result.confidence_interval,
            ConfidenceInterval { lower: 6.33, upper: 7.72, width: 1.39 }
        );
        assert_eq!(result.percentile, 125.0);
    }

    #[test]
    fn test_high_rating_in_spread_style_moves_up() {
        let scaler = RatingScaler::default();
        let sample = [4.0, 5.0, 6.0, 7.0, 8.0, 5.5, 6.5];
        let result = scaler.scale(8.0, &sample, None);

        assert!(result.scaled_rating > 8.0);
        assert!(result.scaled_rating <= 10.0);
        assert!(result.z_score > 0.0);

        let low = scaler.scale(4.0, &sample, None);
        assert!(low.scaled_rating < 4.0);
        assert!(low.scaled_rating >= 1.0);
    }

    #[test]
    fn test_result_carries_diagnostics() {
        let scaler = RatingScaler::default();
        let result = scaler.scale(7.0, &[5.0, 6.0], Some(&[5.0, 6.0, 7.0, 8.0, 9.0]));

        let context = result.global_context.expect("global context");
        assert_eq!(context.global_mean, 7.0);
        assert_eq!(context.category_deviation, -1.5);
        assert_eq!(context.interpretation, StyleAffinity::LessFond);

        let stats = result.stats.expect("stats");
        assert_eq!(stats.stats.kind, EstimatorKind::Classical);
        assert!(stats.shrinkage_applied);
        assert_eq!(stats.shrinkage_factor, Some(0.4));

        let interval = result.confidence_interval;
        assert!(interval.lower <= result.scaled_rating);
        assert!(interval.upper >= result.scaled_rating);
        assert!(interval.width > 0.0);
    }

    #[test]
    fn test_percentile_handles_ties() {
        assert_eq!(percentile(5.0, &[5.0, 5.0, 7.0]), 50.0);
        assert_eq!(percentile(7.0, &[5.0, 5.0, 7.0]), 100.0);
        assert_eq!(percentile(6.0, &[5.0, 5.0, 7.0]), 83.3);
        assert_eq!(percentile(4.0, &[5.0, 5.0, 7.0]), 16.7);
    }

    #[test]
    fn test_percentile_is_monotone_in_rating() {
        let sample = [3.0, 5.0, 5.0, 6.5, 7.0, 7.0, 7.0, 9.0];
        let mut previous = 0.0;
        for step in 0..=90 {
            let rating = 1.0 + step as f64 * 0.1;
            let current = percentile(rating, &sample);
            assert!(current >= previous, "{} dropped below {}", current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_scaled_rating_stays_on_scale() {
        let scaler = RatingScaler::default();
        let samples: [&[f64]; 4] = [
            &[1.0, 1.0, 1.5],
            &[9.0, 9.5, 10.0, 10.0],
            &[1.0, 10.0],
            &[2.0, 4.0, 6.0, 8.0, 10.0, 3.0, 7.0],
        ];

        for sample in samples {
            for step in 0..=18 {
                let raw = 1.0 + step as f64 * 0.5;
                let result = scaler.scale(raw, sample, Some(&[5.0, 6.0, 7.0]));
                assert!((1.0..=10.0).contains(&result.scaled_rating));
                assert!(result.confidence_interval.lower >= 1.0);
                assert!(result.confidence_interval.upper <= 10.0);

                let rescaled = scaler.scale(result.scaled_rating, sample, None);
                assert!((1.0..=10.0).contains(&rescaled.scaled_rating));
            }
        }
    }
}
