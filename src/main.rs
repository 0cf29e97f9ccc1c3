use anyhow::Result;

use brew_ranking::cli::{Cli, Command};
use brew_ranking::domain::BeerRecord;
use brew_ranking::{
    build_config, handle_add_style, handle_beers, handle_breweries, handle_completions, handle_rate,
    handle_rerate, handle_scale, handle_styles, handle_users, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = build_config(cli.data.as_deref());

    match &cli.command {
        Command::Scale {
            rating,
            style_ratings,
            global_ratings,
        } => handle_scale(config, *rating, style_ratings, global_ratings.as_deref()),
        Command::AddStyle { user, name } => handle_add_style(config, user, name),
        Command::Rate {
            user,
            beer,
            brewery,
            style,
            rating,
        } => handle_rate(config, user, BeerRecord::new(beer, brewery, style, *rating)),
        Command::Rerate {
            user,
            brewery,
            beer,
            rating,
        } => handle_rerate(config, user, brewery, beer, *rating),
        Command::Breweries { user } => handle_breweries(config, user),
        Command::Styles { user } => handle_styles(config, user),
        Command::Beers { user, brewery } => handle_beers(config, user, brewery.as_deref()),
        Command::Users => handle_users(config),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
