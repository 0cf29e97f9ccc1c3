use log::debug;

use super::types::{round_to, AdjustedStats, DistributionStats, GlobalContext};
use crate::config::ScalerSettings;

/// Bayesian-style shrinkage of small-sample estimates toward the global mean
pub struct ShrinkageAdjuster<'a> {
    settings: &'a ScalerSettings,
}

impl<'a> ShrinkageAdjuster<'a> {
    pub fn new(settings: &'a ScalerSettings) -> Self {
        Self { settings }
    }

    pub fn adjust(
        &self,
        stats: DistributionStats,
        global_context: Option<&GlobalContext>,
        sample_size: usize,
    ) -> AdjustedStats {
        let context = match global_context {
            Some(context) if self.applies(sample_size) => context,
            _ => return AdjustedStats::unchanged(stats),
        };

        // Fewer samples -> stronger pull toward the global mean
        let factor = sample_size as f64 / self.settings.min_sample_size as f64;
        let shrunk_mean = factor * stats.mean + (1.0 - factor) * context.global_mean;
        debug!(
            "Shrinking mean {:.3} -> {:.3} (factor {:.2}, n={})",
            stats.mean, shrunk_mean, factor, sample_size
        );

        AdjustedStats {
            stats: DistributionStats {
                mean: shrunk_mean,
                ..stats
            },
            shrinkage_applied: true,
            shrinkage_factor: Some(round_to(factor, 2)),
        }
    }

    fn applies(&self, sample_size: usize) -> bool {
        self.settings.use_bayesian_shrinkage && sample_size < self.settings.min_sample_size
    }
}
