use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{BreweryStanding, StyleRankings, UserCatalog};
use crate::rating::{AggregateScorer, RatingScaler, RatingValue, ScalingResult};

/// Read-only scoring over a user's catalog
pub struct RankingService {
    scaler: RatingScaler,
    scorer: AggregateScorer,
}

impl RankingService {
    pub fn new(config: &AppConfig) -> Self {
        let scaler = RatingScaler::new(config.scaler.clone());
        let scorer = AggregateScorer::new(scaler.clone(), config.ranking.clone());
        Self { scaler, scorer }
    }

    pub fn scale(
        &self,
        raw_rating: RatingValue,
        style_ratings: &[RatingValue],
        all_user_ratings: Option<&[RatingValue]>,
    ) -> ScalingResult {
        self.scaler.scale(raw_rating, style_ratings, all_user_ratings)
    }

    pub fn brewery_rankings(&self, catalog: &UserCatalog) -> Vec<BreweryStanding> {
        info!("Ranking breweries over {} ratings", catalog.rating_count());
        let rankings = self.scorer.rank_breweries(catalog);

        let rated = rankings.iter().filter(|r| r.is_rated()).count();
        info!("  → {} rated, {} unrated breweries", rated, rankings.len() - rated);
        rankings
    }

    pub fn style_rankings(&self, catalog: &UserCatalog) -> StyleRankings {
        let pools = catalog.style_pools();
        info!("Ranking {} styles", pools.len());
        self.scorer.rank_styles(&pools)
    }
}
