use std::collections::btree_map;
use std::collections::BTreeMap;

use ndarray::Array1;

/// Comparison pools keyed by style name.
///
/// Each entry holds one value per distinct beer: the mean of that beer's ratings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePools {
    pools: BTreeMap<String, Vec<f64>>,
}

impl StylePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, style: &str, beer_means: Vec<f64>) {
        if beer_means.is_empty() {
            return;
        }
        self.pools.insert(style.to_string(), beer_means);
    }

    pub fn get(&self, style: &str) -> Option<&[f64]> {
        self.pools.get(style).map(Vec::as_slice)
    }

    /// Mean rating of the style's beers, used as the style's weight
    pub fn mean(&self, style: &str) -> Option<f64> {
        self.get(style)
            .and_then(|pool| Array1::from(pool.to_vec()).mean())
    }

    /// Every per-beer mean across all styles
    pub fn all_ratings(&self) -> Vec<f64> {
        self.pools.values().flatten().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<f64>> {
        self.pools.iter()
    }
}

impl FromIterator<(String, Vec<f64>)> for StylePools {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        let mut pools = StylePools::new();
        for (style, beer_means) in iter {
            pools.insert(&style, beer_means);
        }
        pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_absence() {
        let pools: StylePools = vec![
            ("IPA".to_string(), vec![6.0, 8.0]),
            ("Stout".to_string(), vec![]),
        ]
        .into_iter()
        .collect();

        assert_eq!(pools.get("IPA"), Some(&[6.0, 8.0][..]));
        assert_eq!(pools.mean("IPA"), Some(7.0));
        assert!(pools.get("Stout").is_none());
        assert!(pools.mean("Lager").is_none());
        assert_eq!(pools.len(), 1);
    }

    #[test]
    fn test_all_ratings_spans_styles() {
        let pools: StylePools = vec![
            ("IPA".to_string(), vec![6.0, 8.0]),
            ("Lager".to_string(), vec![5.0]),
        ]
        .into_iter()
        .collect();

        let mut all = pools.all_ratings();
        all.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(all, vec![5.0, 6.0, 8.0]);
    }
}
