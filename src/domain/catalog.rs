use anyhow::{bail, Result};
use log::info;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::BeerRecord;
use super::pools::StylePools;
use crate::config::ScalerSettings;
use crate::errors::not_found_context;
use crate::rating::RatingValue;

/// One user's styles and brewery ratings, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCatalog {
    #[serde(default)]
    styles: Vec<String>,
    #[serde(default)]
    breweries: BTreeMap<String, Vec<BeerRecord>>,
}

impl UserCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a style; adding a known style is a no-op
    pub fn add_style(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Style name must not be empty");
        }
        if self.has_style(name) {
            return Ok(false);
        }

        self.styles.push(name.to_string());
        info!("Added style: {}", name);
        Ok(true)
    }

    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s == name)
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Records a rating; the brewery is created on its first rating
    pub fn add_rating(&mut self, record: BeerRecord, settings: &ScalerSettings) -> Result<()> {
        validate_rating(record.rating, settings)?;

        if record.name.is_empty() || record.brewery.is_empty() {
            bail!("Beer and brewery names must not be empty");
        }
        if !self.has_style(&record.style) {
            bail!(not_found_context("style", &record.style));
        }

        info!(
            "Rated {} ({}, {}): {}",
            record.name, record.brewery, record.style, record.rating
        );
        self.breweries
            .entry(record.brewery.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Adds another rating to a beer already in the catalog, keeping its style
    pub fn rerate(
        &mut self,
        brewery: &str,
        beer: &str,
        rating: RatingValue,
        settings: &ScalerSettings,
    ) -> Result<()> {
        validate_rating(rating, settings)?;

        let Some(records) = self.breweries.get_mut(brewery) else {
            bail!(not_found_context("brewery", brewery));
        };
        let Some(existing) = records.iter().find(|r| r.name == beer) else {
            bail!(not_found_context("beer", &format!("{} / {}", brewery, beer)));
        };

        let record = BeerRecord::new(beer, brewery, &existing.style, rating);
        info!("Re-rated {} ({}): {}", beer, brewery, rating);
        records.push(record);
        Ok(())
    }

    pub fn brewery(&self, name: &str) -> Option<&[BeerRecord]> {
        self.breweries.get(name).map(Vec::as_slice)
    }

    pub fn brewery_names(&self) -> Vec<&str> {
        self.breweries.keys().map(String::as_str).collect()
    }

    pub fn breweries(&self) -> impl Iterator<Item = (&str, &[BeerRecord])> {
        self.breweries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Distinct beer names of a brewery, sorted
    pub fn beer_names(&self, brewery: &str) -> Option<Vec<&str>> {
        let records = self.brewery(brewery)?;
        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        Some(names)
    }

    pub fn rating_count(&self) -> usize {
        self.breweries.values().map(Vec::len).sum()
    }

    /// Per style, the mean rating of every distinct (brewery, beer) tagged with it
    pub fn style_pools(&self) -> StylePools {
        let mut by_style: BTreeMap<&str, BTreeMap<(&str, &str), Vec<f64>>> = BTreeMap::new();

        for record in self.breweries.values().flatten() {
            by_style
                .entry(record.style.as_str())
                .or_default()
                .entry((record.brewery.as_str(), record.name.as_str()))
                .or_default()
                .push(record.rating);
        }

        by_style
            .into_iter()
            .map(|(style, beers)| {
                let beer_means = beers
                    .into_values()
                    .map(|ratings| Array1::from(ratings).mean().unwrap_or(0.0))
                    .collect();
                (style.to_string(), beer_means)
            })
            .collect()
    }
}

fn validate_rating(rating: RatingValue, settings: &ScalerSettings) -> Result<()> {
    if !settings.is_valid_rating(rating) {
        bail!(
            "Rating {} is outside the {}-{} scale",
            rating,
            settings.min_rating,
            settings.max_rating
        );
    }
    Ok(())
}
