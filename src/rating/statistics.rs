use ndarray::Array1;

use super::types::{DistributionStats, EstimatorKind};
use crate::config::ScalerSettings;

/// Chooses between median/MAD and mean/std estimates for a comparison sample
pub struct StatisticsEstimator<'a> {
    settings: &'a ScalerSettings,
}

impl<'a> StatisticsEstimator<'a> {
    pub fn new(settings: &'a ScalerSettings) -> Self {
        Self { settings }
    }

    /// Callers guarantee a non-empty sample
    pub fn estimate(&self, sample: &[f64]) -> DistributionStats {
        let ratings = Array1::from(sample.to_vec());

        if self.settings.use_robust_stats && sample.len() >= self.settings.robust_stats_threshold {
            self.robust_stats(&ratings)
        } else {
            self.classical_stats(&ratings)
        }
    }

    fn robust_stats(&self, ratings: &Array1<f64>) -> DistributionStats {
        let center = median(ratings);
        let deviations = ratings.mapv(|r| (r - center).abs());
        let mad = median(&deviations);

        let std = mad * self.settings.mad_scale;

        DistributionStats {
            mean: center,
            median: center,
            std,
            variance: std.powi(2),
            mad: Some(mad),
            kind: EstimatorKind::Robust,
        }
    }

    fn classical_stats(&self, ratings: &Array1<f64>) -> DistributionStats {
        DistributionStats {
            mean: ratings.mean().unwrap_or(0.0),
            median: median(ratings),
            std: ratings.std(0.0),
            variance: ratings.var(0.0),
            mad: None,
            kind: EstimatorKind::Classical,
        }
    }
}

/// Midpoint of the sorted values; the two middle values are averaged for even lengths
pub fn median(values: &Array1<f64>) -> f64 {
    let mut sorted = values.to_vec();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_sample_uses_classical_estimates() {
        let settings = ScalerSettings::default();
        let stats = StatisticsEstimator::new(&settings).estimate(&[6.0, 8.0]);

        assert_eq!(stats.kind, EstimatorKind::Classical);
        assert_relative_eq!(stats.mean, 7.0);
        assert_relative_eq!(stats.std, 1.0);
        assert_relative_eq!(stats.variance, 1.0);
        assert!(stats.mad.is_none());
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let settings = ScalerSettings::default();
        let stats = StatisticsEstimator::new(&settings).estimate(&[7.0]);

        assert_relative_eq!(stats.mean, 7.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_robust_estimates_ignore_outlier() {
        let settings = ScalerSettings::default();
        let stats = StatisticsEstimator::new(&settings).estimate(&[5.0, 6.0, 7.0, 8.0, 1.0]);

        assert_eq!(stats.kind, EstimatorKind::Robust);
        assert_relative_eq!(stats.mean, 6.0);
        assert_relative_eq!(stats.median, 6.0);
        // deviations 1,0,1,2,5 -> MAD 1
        assert_relative_eq!(stats.mad.unwrap(), 1.0);
        assert_relative_eq!(stats.std, 1.4826);
        assert_relative_eq!(stats.variance, 1.4826 * 1.4826);
    }

    #[test]
    fn test_robust_can_be_disabled() {
        let settings = ScalerSettings {
            use_robust_stats: false,
            ..ScalerSettings::default()
        };
        let stats = StatisticsEstimator::new(&settings).estimate(&[4.0, 6.0, 8.0]);

        assert_eq!(stats.kind, EstimatorKind::Classical);
        assert_relative_eq!(stats.mean, 6.0);
    }

    #[test]
    fn test_median_even_length() {
        assert_relative_eq!(median(&Array1::from(vec![8.0, 5.0, 6.0, 7.0])), 6.5);
    }
}
