pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::config::settings::AppConfig;
use crate::domain::BeerRecord;
use crate::services::catalog::CatalogService;
use crate::services::ranking::RankingService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(data_path: Option<&str>) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(path) = data_path {
        config.store.data_path = path.to_string();
    }
    config
}

pub fn handle_scale(
    config: AppConfig,
    rating: f64,
    style_ratings: &[f64],
    global_ratings: Option<&[f64]>,
) -> Result<()> {
    let service = RankingService::new(&config);
    let result = service.scale(rating, style_ratings, global_ratings);
    println!("{}", report::format_scaling(&result)?);
    Ok(())
}

pub fn handle_add_style(config: AppConfig, user: &str, style: &str) -> Result<()> {
    let mut service = CatalogService::new(config)?;
    let catalog = service.add_style(user, style)?;

    println!("Your style list is now:");
    for style in catalog.styles() {
        println!("- {}", style);
    }
    Ok(())
}

pub fn handle_rate(config: AppConfig, user: &str, record: BeerRecord) -> Result<()> {
    let mut service = CatalogService::new(config)?;
    service.rate(user, record)?;
    Ok(())
}

pub fn handle_rerate(config: AppConfig, user: &str, brewery: &str, beer: &str, rating: f64) -> Result<()> {
    let mut service = CatalogService::new(config)?;
    service.rerate(user, brewery, beer, rating)?;
    Ok(())
}

pub fn handle_breweries(config: AppConfig, user: &str) -> Result<()> {
    let ranking = RankingService::new(&config);
    let catalog = CatalogService::new(config)?.catalog(user)?;

    print!("{}", report::format_brewery_rankings(&ranking.brewery_rankings(&catalog)));
    Ok(())
}

pub fn handle_styles(config: AppConfig, user: &str) -> Result<()> {
    let ranking = RankingService::new(&config);
    let catalog = CatalogService::new(config)?.catalog(user)?;

    print!("{}", report::format_style_rankings(&ranking.style_rankings(&catalog)));
    Ok(())
}

pub fn handle_beers(config: AppConfig, user: &str, brewery: Option<&str>) -> Result<()> {
    let catalog = CatalogService::new(config)?.catalog(user)?;

    let names = match brewery {
        Some(brewery) => catalog
            .beer_names(brewery)
            .ok_or_else(|| anyhow::anyhow!(errors::not_found_context("brewery", brewery)))?,
        None => catalog.brewery_names(),
    };
    print!("{}", report::format_names(&names));
    Ok(())
}

pub fn handle_users(config: AppConfig) -> Result<()> {
    let service = CatalogService::new(config)?;
    for user in service.users() {
        println!("{}", user);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
