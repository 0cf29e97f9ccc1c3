use ndarray::Array1;

use super::types::{round_to, GlobalContext, StyleAffinity};

/// Places a style's central rating against the user's whole rating pool
pub struct GlobalContextAnalyzer;

impl GlobalContextAnalyzer {
    /// Returns `None` when there is no global pool to compare against
    pub fn analyze(all_user_ratings: Option<&[f64]>, style_mean: f64) -> Option<GlobalContext> {
        let pool = all_user_ratings.filter(|ratings| !ratings.is_empty())?;
        let global_mean = Array1::from(pool.to_vec()).mean().unwrap_or(style_mean);
        let deviation = style_mean - global_mean;

        Some(GlobalContext {
            global_mean: round_to(global_mean, 2),
            category_deviation: round_to(deviation, 2),
            interpretation: StyleAffinity::from_deviation(deviation),
        })
    }
}
