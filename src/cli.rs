//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Look up beers, breweries and reviews on RateBeer.com.
#[derive(Parser, Debug)]
#[command(name = "ratebeer")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the site base URL (mirrors, test servers)
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search beers and breweries by free text
    Search {
        /// The search text
        query: String,
    },
    /// Show a beer's fields by its site path
    Beer {
        /// Beer path, e.g. /beer/deschutes-inversion-ipa/55610/
        url: String,
        /// Also print the first N reviews
        #[arg(short, long, default_value_t = 0)]
        reviews: usize,
    },
    /// Show a brewery's fields by its site path
    Brewery {
        /// Brewery path, e.g. /brewers/deschutes-brewery/233/
        url: String,
        /// Also list the first N beers
        #[arg(short, long, default_value_t = 0)]
        beers: usize,
    },
    /// List the beer style directory
    Styles,
}
