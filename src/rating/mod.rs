pub mod adjustment;
pub mod aggregate;
pub mod global_context;
pub mod scaler;
pub mod shrinkage;
pub mod statistics;
pub mod types;

pub use adjustment::{Adjustment, AdjustmentComposer};
pub use aggregate::AggregateScorer;
pub use global_context::GlobalContextAnalyzer;
pub use scaler::{percentile, RatingScaler};
pub use shrinkage::ShrinkageAdjuster;
pub use statistics::StatisticsEstimator;
pub use types::{
    AdjustedStats, ComponentModifiers, ConfidenceInterval, DistributionStats, EstimatorKind,
    GlobalContext, RatingValue, ScalingResult, StyleAffinity,
};
