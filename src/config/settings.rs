/// Tunable constants of the rating-normalization pipeline.
///
/// Values are hand-tuned; their defaults reproduce the reference scaling behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerSettings {
    pub adjustment_strength: f64,
    pub bounding_factor: f64,
    pub min_sample_size: usize,
    pub robust_stats_threshold: usize,
    pub use_robust_stats: bool,
    pub use_bayesian_shrinkage: bool,
    pub use_adaptive_smoothing: bool,
    pub fixed_smoothing_constant: f64,
    /// Converts a MAD into a standard-deviation equivalent for normal data
    pub mad_scale: f64,
    pub extreme_compression_factor: f64,
    pub extreme_distance: f64,
    pub outlier_z_threshold: f64,
    pub outlier_dampening_rate: f64,
    pub variance_sigmoid_steepness: f64,
    pub variance_sigmoid_center: f64,
    pub smoothing_base: f64,
    pub smoothing_min: f64,
    pub smoothing_sample_horizon: f64,
    /// z value of the reported confidence interval (95%)
    pub confidence_z: f64,
    pub min_rating: f64,
    pub max_rating: f64,
}

impl Default for ScalerSettings {
    fn default() -> Self {
        Self {
            adjustment_strength: 0.65,
            bounding_factor: 0.3,
            min_sample_size: 5,
            robust_stats_threshold: 3,
            use_robust_stats: true,
            use_bayesian_shrinkage: true,
            use_adaptive_smoothing: true,
            fixed_smoothing_constant: 2.0,
            mad_scale: 1.4826,
            extreme_compression_factor: 0.6,
            extreme_distance: 2.0,
            outlier_z_threshold: 2.0,
            outlier_dampening_rate: 0.3,
            variance_sigmoid_steepness: 3.0,
            variance_sigmoid_center: 1.0,
            smoothing_base: 2.5,
            smoothing_min: 1.5,
            smoothing_sample_horizon: 20.0,
            confidence_z: 1.96,
            min_rating: 1.0,
            max_rating: 10.0,
        }
    }
}

impl ScalerSettings {
    pub fn is_valid_rating(&self, rating: f64) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }

    pub fn clamp_rating(&self, rating: f64) -> f64 {
        rating.clamp(self.min_rating, self.max_rating)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingSettings {
    pub min_brewery_beers: usize,
    pub high_cardinality_threshold: usize,
    /// Feed the user's whole catalog to the scaler as the global pool.
    ///
    /// Goes beyond scaling against the style pool alone: styles with fewer than
    /// `min_sample_size` beers get shrunk toward the catalog mean. Disable for
    /// style-pool-only brewery scores.
    pub use_global_context: bool,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            min_brewery_beers: 2,
            high_cardinality_threshold: 3,
            use_global_context: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    pub data_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let data_path = std::env::var("BEER_DATA_PATH")
            .unwrap_or_else(|_| "data/beer_data.json".to_string());
        Self { data_path }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scaler: ScalerSettings,
    pub ranking: RankingSettings,
    pub store: StoreSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scaler: ScalerSettings::default(),
            ranking: RankingSettings::default(),
            store: StoreSettings::default(),
        }
    }
}
