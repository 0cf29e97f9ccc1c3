use serde::{Deserialize, Serialize};

use crate::rating::RatingValue;

/// One rating of one beer, as stored in the user's data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeerRecord {
    pub name: String,
    pub brewery: String,
    pub style: String,
    pub rating: RatingValue,
}

impl BeerRecord {
    pub fn new(name: &str, brewery: &str, style: &str, rating: RatingValue) -> Self {
        Self {
            name: name.trim().to_string(),
            brewery: brewery.trim().to_string(),
            style: style.trim().to_string(),
            rating,
        }
    }
}

/// Per-beer scoring detail behind a brewery score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeerScore {
    pub name: String,
    pub style: String,
    pub mean_rating: RatingValue,
    pub scaled_rating: RatingValue,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreweryStanding {
    pub brewery: String,
    /// `None` while the brewery has too few distinct beers to be rated
    pub score: Option<f64>,
    pub beers: Vec<BeerScore>,
}

impl BreweryStanding {
    pub fn is_rated(&self) -> bool {
        self.score.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleStanding {
    pub style: String,
    pub mean_rating: f64,
    pub beer_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleRankings {
    pub high_cardinality: Vec<StyleStanding>,
    pub low_cardinality: Vec<StyleStanding>,
}
