use log::{debug, warn};
use ndarray::Array1;
use std::collections::BTreeMap;

use super::scaler::RatingScaler;
use super::types::round_to;
use crate::config::RankingSettings;
use crate::domain::{BeerRecord, BeerScore, BreweryStanding, StylePools, StyleRankings, StyleStanding, UserCatalog};

/// Folds per-beer scaled ratings into brewery scores and ranks styles
#[derive(Debug, Clone, Default)]
pub struct AggregateScorer {
    scaler: RatingScaler,
    settings: RankingSettings,
}

impl AggregateScorer {
    pub fn new(scaler: RatingScaler, settings: RankingSettings) -> Self {
        Self { scaler, settings }
    }

    /// Weighted brewery score, or `None` when the brewery is unrated
    pub fn score_brewery(&self, beers: &[BeerRecord], pools: &StylePools) -> Option<f64> {
        let scores = self.score_beers(beers, pools)?;
        weighted_score(&scores)
    }

    /// Scales each distinct beer of a brewery; `None` below the minimum beer count
    pub fn score_beers(&self, beers: &[BeerRecord], pools: &StylePools) -> Option<Vec<BeerScore>> {
        let distinct = group_by_beer(beers);
        if distinct.len() < self.settings.min_brewery_beers {
            return None;
        }

        let global_pool = self.settings.use_global_context.then(|| pools.all_ratings());

        let scores = distinct
            .into_iter()
            .filter_map(|(name, (style, ratings))| {
                let (Some(pool), Some(weight)) = (pools.get(style), pools.mean(style)) else {
                    warn!("No comparison pool for style {}, skipping {}", style, name);
                    return None;
                };

                let mean_rating = Array1::from(ratings).mean().unwrap_or(0.0);
                let result = self.scaler.scale(mean_rating, pool, global_pool.as_deref());

                Some(BeerScore {
                    name: name.to_string(),
                    style: style.to_string(),
                    mean_rating,
                    scaled_rating: result.scaled_rating,
                    weight,
                })
            })
            .collect();

        Some(scores)
    }

    /// Rated breweries by score descending, then unrated ones in catalog order
    pub fn rank_breweries(&self, catalog: &UserCatalog) -> Vec<BreweryStanding> {
        let pools = catalog.style_pools();
        let mut rated = Vec::new();
        let mut unrated = Vec::new();

        for (brewery, records) in catalog.breweries() {
            let beers = self.score_beers(records, &pools).unwrap_or_default();
            let standing = BreweryStanding {
                brewery: brewery.to_string(),
                score: weighted_score(&beers),
                beers,
            };
            debug!("Brewery {} scored {:?}", standing.brewery, standing.score);

            if standing.is_rated() {
                rated.push(standing);
            } else {
                unrated.push(standing);
            }
        }

        rated.sort_by(|a, b| {
            let (a, b) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
            b.total_cmp(&a)
        });
        rated.extend(unrated);
        rated
    }

    /// Style means over their beers, split by how many distinct beers back them
    pub fn rank_styles(&self, pools: &StylePools) -> StyleRankings {
        let mut standings: Vec<StyleStanding> = pools
            .iter()
            .map(|(style, beer_means)| StyleStanding {
                style: style.clone(),
                mean_rating: round_to(pools.mean(style).unwrap_or(0.0), 2),
                beer_count: beer_means.len(),
            })
            .collect();

        standings.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));

        let (high_cardinality, low_cardinality): (Vec<_>, Vec<_>) = standings
            .into_iter()
            .partition(|s| s.beer_count >= self.settings.high_cardinality_threshold);

        StyleRankings {
            high_cardinality,
            low_cardinality,
        }
    }
}

/// Distinct beers by name with their style and every raw rating they received
fn group_by_beer(beers: &[BeerRecord]) -> BTreeMap<&str, (&str, Vec<f64>)> {
    let mut grouped: BTreeMap<&str, (&str, Vec<f64>)> = BTreeMap::new();
    for beer in beers {
        grouped
            .entry(beer.name.as_str())
            .or_insert_with(|| (beer.style.as_str(), Vec::new()))
            .1
            .push(beer.rating);
    }
    grouped
}

fn weighted_score(scores: &[BeerScore]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }

    let numerator: f64 = scores.iter().map(|s| s.scaled_rating * s.weight).sum();
    let denominator: f64 = scores.iter().map(|s| s.weight).sum();

    if denominator <= 0.0 {
        return None;
    }
    Some(round_to(numerator / denominator, 2))
}
