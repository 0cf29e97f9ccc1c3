use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Style-normalized beer and brewery rankings")]
pub struct Cli {
    /// Path to the user data file (defaults to $BEER_DATA_PATH or data/beer_data.json)
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Scale a single rating against a comparison sample
    Scale {
        /// Raw rating (1-10)
        #[arg(short, long, allow_negative_numbers = true)]
        rating: f64,
        /// Ratings of the same style, comma separated
        #[arg(short, long, value_delimiter = ',')]
        style_ratings: Vec<f64>,
        /// All of the user's ratings, comma separated
        #[arg(short, long, value_delimiter = ',')]
        global_ratings: Option<Vec<f64>>,
    },
    /// Register a new beer style for a user (creates the user if needed)
    AddStyle {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        name: String,
    },
    /// Rate a beer
    Rate {
        #[arg(short, long)]
        user: String,
        #[arg(long)]
        beer: String,
        #[arg(long)]
        brewery: String,
        #[arg(short, long)]
        style: String,
        #[arg(short, long)]
        rating: f64,
    },
    /// Add another rating to a beer that was already rated
    Rerate {
        #[arg(short, long)]
        user: String,
        #[arg(long)]
        brewery: String,
        #[arg(long)]
        beer: String,
        #[arg(short, long)]
        rating: f64,
    },
    /// Show breweries ranked by style-normalized score
    Breweries {
        #[arg(short, long)]
        user: String,
    },
    /// Show styles ranked by mean rating
    Styles {
        #[arg(short, long)]
        user: String,
    },
    /// List a user's breweries, or the beers of one brewery
    Beers {
        #[arg(short, long)]
        user: String,
        #[arg(long)]
        brewery: Option<String>,
    },
    /// List users in the data file
    Users,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
