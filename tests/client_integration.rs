//! Integration tests for the style directory, style listings, and the
//! brewers index.

use std::sync::Arc;

use ratebeer_core::{RateBeer, RateBeerError, SortOrder, StyleSort};

mod support;
use support::FakeFetcher;
use support::fixtures;

const STYLE_LISTING_PATH: &str =
    "/ajax/top-beer-by-style.asp?style=72&sort=0&order=0&min=10&max=9999&retired=0&new=0&mine=0&";

fn client_with(fetcher: FakeFetcher) -> (RateBeer, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    (RateBeer::with_fetcher(fetcher.clone()), fetcher)
}

#[test]
fn test_beer_style_list_maps_names_to_urls() {
    let (client, _) = client_with(FakeFetcher::new().page("/beerstyles/", &fixtures::styles_page()));

    let styles = client.beer_style_list().unwrap();
    assert_eq!(styles.len(), 3);
    assert_eq!(styles[0].name, "Abbey Dubbel");
    assert_eq!(styles[0].url, "/beerstyles/abbey-dubbel/71/");
    assert_eq!(styles[2].url, "/beerstyles/low-alcohol/42/");
}

#[test]
fn test_beer_style_list_on_block_page_is_not_found() {
    let (client, _) =
        client_with(FakeFetcher::new().page("/beerstyles/", &fixtures::robot_block_page()));
    assert!(matches!(
        client.beer_style_list().unwrap_err(),
        RateBeerError::NotFound { .. }
    ));
}

#[test]
fn test_beer_style_listing_yields_ranked_unpopulated_beers() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page(STYLE_LISTING_PATH, &fixtures::style_listing_page()),
    );

    let walker = client
        .beer_style("/beerstyles/abt-quadrupel/72/", StyleSort::Overall, SortOrder::Descending)
        .unwrap();
    assert_eq!(fetcher.fetch_count(), 0, "building the sequence must not fetch");

    let mut beers: Vec<_> = walker.collect::<Result<_, _>>().unwrap();
    assert_eq!(beers.len(), 2);
    assert_eq!(beers[0].name().unwrap(), "Westvleteren 12 (XII)");
    assert_eq!(beers[0].url(), "/beer/westvleteren-12-xii/4934/");
    assert_eq!(beers[0].overall_rating().unwrap(), Some(100));
    assert!(!beers[0].is_populated());
    assert_eq!(fetcher.fetch_count(), 1, "one listing fetch covers the sequence");
}

#[test]
fn test_beer_style_sort_parameters_shape_the_listing_path() {
    let trending_path =
        "/ajax/top-beer-by-style.asp?style=72&sort=1&order=1&min=10&max=9999&retired=0&new=0&mine=0&";
    let (client, fetcher) =
        client_with(FakeFetcher::new().page(trending_path, &fixtures::style_listing_page()));

    let walker = client
        .beer_style("/beerstyles/abt-quadrupel/72/", StyleSort::Trending, SortOrder::Ascending)
        .unwrap();
    let beers: Vec<_> = walker.collect::<Result<_, _>>().unwrap();
    assert_eq!(beers.len(), 2);

    let (path, _) = fetcher.last_form().unwrap();
    assert_eq!(path, trending_path);
}

#[test]
fn test_beer_style_without_numeric_id_is_rejected_before_io() {
    let (client, fetcher) = client_with(FakeFetcher::new());

    let err = client
        .beer_style("/beerstyles/no-id/", StyleSort::Overall, SortOrder::Descending)
        .unwrap_err();
    assert!(
        matches!(err, RateBeerError::InvalidArgument { parameter: "style_url", .. }),
        "expected InvalidArgument, got {err:?}"
    );
    assert_eq!(fetcher.fetch_count(), 0, "validation must precede I/O");
}

#[test]
fn test_brewers_by_alpha_yields_unpopulated_breweries() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page("/browsebrewers-A.htm", &fixtures::brewers_index_page()),
    );

    let mut brewers = client.brewers_by_alpha('a').unwrap();
    assert_eq!(brewers.len(), 2);
    assert_eq!(brewers[0].url(), "/brewers/a-duus-and-co/1668/");
    assert_eq!(brewers[0].name().unwrap(), "A. Duus & Co.");
    assert_eq!(brewers[0].id(), Some(1668));
    assert!(!brewers[0].is_populated());
    assert_eq!(fetcher.fetch_count(), 1);
}

#[test]
fn test_brewers_by_alpha_rejects_non_letters_before_io() {
    let (client, fetcher) = client_with(FakeFetcher::new());

    let err = client.brewers_by_alpha('7').unwrap_err();
    assert!(
        matches!(err, RateBeerError::InvalidArgument { parameter: "letter", .. }),
        "expected InvalidArgument, got {err:?}"
    );
    assert_eq!(fetcher.fetch_count(), 0);
}
