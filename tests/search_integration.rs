//! Integration tests for search: encoding, eager fields, empty sections.

use std::sync::Arc;

use ratebeer_core::{RateBeer, RateBeerError};

mod support;
use support::FakeFetcher;
use support::fixtures;

fn client_with(fetcher: FakeFetcher) -> (RateBeer, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    (RateBeer::with_fetcher(fetcher.clone()), fetcher)
}

#[test]
fn test_search_deschutes_inversion_scenario() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page("/findbeer.asp", &fixtures::search_page_inversion()),
    );

    let mut results = client.search("deschutes inversion").unwrap();

    assert!(results.breweries.is_empty());
    assert!(!results.beers.is_empty());
    let beer = &mut results.beers[0];
    assert_eq!(beer.url(), "/beer/deschutes-inversion-ipa/55610/");
    assert_eq!(beer.id(), Some(55_610));
    assert_eq!(beer.name().unwrap(), "Deschutes Inversion IPA");
    assert_eq!(fetcher.fetch_count(), 1, "listing-level fields must not refetch");

    let (path, body) = fetcher.last_form().unwrap();
    assert_eq!(path, "/findbeer.asp");
    assert_eq!(body, "BeerName=deschutes%20inversion");
}

#[test]
fn test_search_hits_carry_inline_rating_fields() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page("/findbeer.asp", &fixtures::search_page_inversion()),
    );

    let mut results = client.search("inversion").unwrap();
    let first = &mut results.beers[0];
    assert_eq!(first.overall_rating().unwrap(), Some(93));
    assert_eq!(first.num_ratings().unwrap(), Some(1157));
    assert_eq!(fetcher.fetch_count(), 1);

    // The second hit showed blank cells; reading the rating now needs the
    // beer page, which the double does not seed - so the populate error
    // surfaces instead of a silent wrong answer.
    let second = &mut results.beers[1];
    assert!(second.overall_rating().is_err());
    assert_eq!(fetcher.fetch_count(), 2);
}

#[test]
fn test_search_round_trips_latin1_queries() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page("/findbeer.asp", &fixtures::search_page_no_beers()),
    );

    let results = client.search("to øl jule mælk").unwrap();
    assert!(results.beers.is_empty(), "the 0-beers sentinel empties the section");
    assert_eq!(results.breweries.len(), 1);

    let (_, body) = fetcher.last_form().unwrap();
    assert_eq!(
        body, "BeerName=to%20%F8l%20jule%20m%E6lk",
        "query must be posted as Latin-1 bytes"
    );
}

#[test]
fn test_search_rejects_unencodable_query_before_any_io() {
    let (client, fetcher) = client_with(FakeFetcher::new());

    let err = client.search("10€ lager").unwrap_err();
    assert!(
        matches!(err, RateBeerError::InvalidArgument { parameter: "query", .. }),
        "expected InvalidArgument, got {err:?}"
    );
    assert_eq!(fetcher.fetch_count(), 0, "validation must precede I/O");
}

#[test]
fn test_search_brewery_hits_are_unpopulated_with_eager_names() {
    let (client, fetcher) = client_with(
        FakeFetcher::new().page("/findbeer.asp", &fixtures::search_page_no_beers()),
    );

    let mut results = client.search("deschutes").unwrap();
    let brewery = &mut results.breweries[0];
    assert_eq!(brewery.url(), "/brewers/deschutes-brewery/233/");
    assert_eq!(brewery.name().unwrap(), "Deschutes Brewery");
    assert!(!brewery.is_populated());
    assert_eq!(fetcher.fetch_count(), 1, "names come from the results page");
}
