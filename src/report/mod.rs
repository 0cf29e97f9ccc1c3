use anyhow::{Context, Result};
use colored::Colorize;

use crate::domain::{BreweryStanding, StyleRankings, StyleStanding};
use crate::rating::ScalingResult;

pub fn format_scaling(result: &ScalingResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize scaling result")
}

pub fn format_brewery_rankings(rankings: &[BreweryStanding]) -> String {
    if rankings.is_empty() {
        return "No breweries rated yet".dimmed().to_string();
    }

    rankings
        .iter()
        .enumerate()
        .map(|(idx, standing)| {
            let score = match standing.score {
                Some(score) => format!("{:.2}", score).as_str().green().bold(),
                None => "unrated".dimmed(),
            };
            format!("{}. {} - {}\n", idx + 1, standing.brewery, score)
        })
        .collect()
}

pub fn format_style_rankings(rankings: &StyleRankings) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        "Rankings:".bold(),
        style_lines(&rankings.high_cardinality),
        "Rankings for styles with too few ratings:".bold(),
        style_lines(&rankings.low_cardinality)
    )
}

pub fn format_names(names: &[&str]) -> String {
    names.iter().map(|name| format!("- {}\n", name)).collect()
}

fn style_lines(styles: &[StyleStanding]) -> String {
    styles
        .iter()
        .enumerate()
        .map(|(idx, style)| {
            format!(
                "{}. {} - {} ({})\n",
                idx + 1,
                style.style,
                format!("{:.2}", style.mean_rating).as_str().green(),
                style.beer_count
            )
        })
        .collect()
}
