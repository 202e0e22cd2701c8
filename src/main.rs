//! CLI entry point for the ratebeer lookup tool.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use ratebeer_core::{Beer, Brewery, HttpFetcher, RateBeer, ReviewOrder};
use tracing::debug;

mod cli;

use cli::{Args, Command};

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let client = build_client(args.base_url.as_deref())?;

    match args.command {
        Command::Search { query } => search(&client, &query),
        Command::Beer { url, reviews } => beer(&client, &url, reviews),
        Command::Brewery { url, beers } => brewery(&client, &url, beers),
        Command::Styles => styles(&client),
    }
}

fn build_client(base_url: Option<&str>) -> Result<RateBeer> {
    let fetcher = match base_url {
        Some(base) => {
            let base = base.trim_end_matches('/');
            HttpFetcher::with_base_urls(base, &format!("{base}/v1/api/graphql/"))?
        }
        None => HttpFetcher::new()?,
    };
    Ok(RateBeer::with_fetcher(Arc::new(fetcher)))
}

fn search(client: &RateBeer, query: &str) -> Result<()> {
    let mut results = client.search(query)?;

    println!("breweries ({}):", results.breweries.len());
    for brewery in &mut results.breweries {
        println!("  {}  {}", brewery.name()?, brewery.url());
    }

    println!("beers ({}):", results.beers.len());
    for beer in &mut results.beers {
        let rating = beer
            .overall_rating()?
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        println!("  {}  [{}]  {}", beer.name()?, rating, beer.url());
    }
    Ok(())
}

fn beer(client: &RateBeer, url: &str, review_count: usize) -> Result<()> {
    let mut beer: Beer = client.get_beer(url);
    println!("name:           {}", beer.name()?);
    println!("url:            {}", beer.url());
    if let Some(mut brewery) = beer.brewery()? {
        println!("brewery:        {}  {}", brewery.name()?, brewery.url());
    }
    if let Some(mut brewed_at) = beer.brewed_at()? {
        println!("brewed at:      {}  {}", brewed_at.name()?, brewed_at.url());
    }
    print_optional("style", beer.style()?);
    print_optional("overall rating", beer.overall_rating()?);
    print_optional("style rating", beer.style_rating()?);
    print_optional("mean rating", beer.mean_rating()?);
    print_optional("weighted avg", beer.weighted_avg()?);
    print_optional("ratings", beer.num_ratings()?);
    print_optional("abv", beer.abv()?);
    print_optional("ibu", beer.ibu()?);
    print_optional("calories", beer.calories()?);
    print_optional("seasonal", beer.seasonal()?);
    println!("retired:        {}", beer.retired()?);
    if let Some(description) = beer.description()? {
        println!("description:    {description}");
    }

    for review in beer.reviews(ReviewOrder::MostRecent).take(review_count) {
        let review = review?;
        let rating = review
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!("---");
        println!(
            "{} ({}) rated {rating}",
            review.user_name, review.user_location
        );
        println!("{}", review.text);
    }
    Ok(())
}

fn brewery(client: &RateBeer, url: &str, beer_count: usize) -> Result<()> {
    let mut brewery: Brewery = client.get_brewery(url);
    println!("name:           {}", brewery.name()?);
    println!("url:            {}", brewery.url());
    print_optional("type", brewery.brewery_type()?);
    print_optional("street", brewery.street()?);
    print_optional("city", brewery.city()?);
    print_optional("state", brewery.state()?);
    print_optional("country", brewery.country()?);
    print_optional("postal code", brewery.postal_code()?);
    print_optional("telephone", brewery.telephone()?);
    print_optional("website", brewery.website()?);

    for beer in brewery.beers().take(beer_count) {
        let mut beer = beer?;
        println!("  {}  {}", beer.name()?, beer.url());
    }
    Ok(())
}

fn styles(client: &RateBeer) -> Result<()> {
    for style in client.beer_style_list()? {
        println!("{}  {}", style.name, style.url);
    }
    Ok(())
}

fn print_optional<T: std::fmt::Display>(label: &str, value: Option<T>) {
    if let Some(value) = value {
        let pad = " ".repeat(15_usize.saturating_sub(label.len()));
        println!("{label}:{pad}{value}");
    }
}
