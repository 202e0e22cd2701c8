//! Canned page bodies mirroring the site's markup shapes.

/// A fully rated beer page: Tour de Fall shape (brewery, style, info blob,
/// ratings, description).
pub fn beer_page_tour_de_fall() -> String {
    beer_page(
        "New Belgium Tour de Fall",
        "/beer/new-belgium-tour-de-fall/279122/",
        "Brewed by <a href=\"/brewers/new-belgium-brewing-company/77/\">New Belgium Brewing Company</a> \
         Style: <a href=\"/beerstyles/american-pale-ale/18/\">American Pale Ale</a>",
        "RATINGS: 1157\u{a0}\u{a0}WEIGHTED AVG: 3.61/5\u{a0}\u{a0}IBU: 38\u{a0}\u{a0}EST. CALORIES: 186\u{a0}\u{a0}ABV: 6.2%",
        "93",
        "88",
        "New Belgium's love for beer, bikes and benefits. <small>ad</small> Hop on and find Tour de Fall Pale Ale in fall 2014.",
        "",
    )
}

/// A contract-brewed beer: Benediktiner shape ("brewed at" second link).
pub fn beer_page_contract_brewed() -> String {
    beer_page(
        "Benediktiner Weissbier",
        "/beer/benediktiner-weissbier/157144/",
        "Brewed by <a href=\"/brewers/klosterbrauerei-ettal/1943/\">Klosterbrauerei Ettal</a> \
         brewed at <a href=\"/brewers/licher-privatbrauerei-bitburger/1677/\">Licher Privatbrauerei</a> \
         Style: <a href=\"/beerstyles/german-hefeweizen/45/\">German Hefeweizen</a>",
        "RATINGS: 321\u{a0}\u{a0}MEAN: 3.2/5.0\u{a0}\u{a0}ABV: 5.4%",
        "71",
        "64",
        "A Bavarian classic.",
        "",
    )
}

/// An unrated beer page: no scores, zero ratings, placeholder description.
pub fn beer_page_unrated() -> String {
    beer_page(
        "Deschutes Abyssident",
        "/beer/deschutes-abyssident/194792/",
        "Brewed by <a href=\"/brewers/deschutes-brewery/233/\">Deschutes Brewery</a> \
         Style: <a href=\"/beerstyles/sour-wild-ale/22/\">Sour/Wild Ale</a>",
        "RATINGS: 0\u{a0}\u{a0}ABV: 11%",
        "n/a",
        "n/a",
        "No commercial description.",
        "",
    )
}

/// A retired beer with tags.
pub fn beer_page_retired() -> String {
    beer_page(
        "Shorts Funkin Punkin",
        "/beer/shorts-funkin-punkin/79468/",
        "Brewed by <a href=\"/brewers/shorts-brewing-company/4043/\">Shorts Brewing Company</a> \
         Style: <a href=\"/beerstyles/spice-herb-vegetable/27/\">Spice/Herb/Vegetable</a>",
        "RATINGS: 402\u{a0}\u{a0}ABV: 5.0%",
        "47",
        "62",
        "Pumpkin ale with spices.",
        "<span class=\"beer-retired\">RETIRED</span> \
         <a href=\"/tag/pumpkin/\">pumpkin</a> <a href=\"/tag/spiced/\">spiced</a>",
    )
}

#[allow(clippy::too_many_arguments)]
fn beer_page(
    name: &str,
    canonical: &str,
    brewery_line: &str,
    blob: &str,
    overall: &str,
    style_rating: &str,
    description: &str,
    extra: &str,
) -> String {
    format!(
        "<html><head><link rel=\"canonical\" href=\"https://www.ratebeer.com{canonical}\"></head>\
         <body><div id=\"container\"><table>\
         <tr><td><img id=\"beerImg\" src=\"/images/beer.jpg\"></td><td><h1>{name}</h1> {extra}</td></tr>\
         <tr>\
         <td><div>ratings</div><div><span>overall</span><span>{overall}</span></div>\
         <div>style</div><div><span>{style_rating}</span></div></td>\
         <td><div>\
         <div>{brewery_line}</div>\
         <small>{blob}</small>\
         <div style=\"border: 1px solid #e0e0e0; background: #fff; padding: 14px; color: #777;\">{description}</div>\
         </div></td>\
         </tr></table></div></body></html>"
    )
}

/// The placeholder page the site serves instead of a 404.
pub fn beer_reference_page() -> String {
    "<html><body><div id=\"container\"><table>\
     <tr><td></td><td><h1>beer reference</h1></td></tr>\
     <tr><td></td><td><div><div>nothing to see</div></div></td></tr>\
     </table></div></body></html>"
        .to_string()
}

/// An aliased beer page pointing at `target`.
pub fn beer_aliased_page(target: &str) -> String {
    format!(
        "<html><body><div id=\"container\"><table>\
         <tr><td></td><td><h1>Old Name</h1></td></tr>\
         <tr><td></td><td><div><div>Also known as <a href=\"{target}\">New Name</a></div></div></td></tr>\
         </table></div></body></html>"
    )
}

/// The site-wide automated-traffic block page.
pub fn robot_block_page() -> String {
    "<html><body><h2>RateBeer Robot Oops!</h2>\
     <p>We caught you drinking too fast. Slow down.</p></body></html>"
        .to_string()
}

/// A reviews page with the given review fragments.
pub fn reviews_page(reviews: &[(f64, &str, &str, &str)]) -> String {
    let body: String = reviews
        .iter()
        .map(|(rating, author, location_date, text)| {
            format!(
                "<div style=\"padding: 0px 0px 0px 0px;\">\
                 <div><strong><big>AROMA</big> <small>6/10</small> <big>APPEARANCE</big> <small>4/5</small> \
                 <big>TASTE</big> <small>7/10</small> <big>PALATE</big> <small>3/5</small> \
                 <big>OVERALL</big> <small>14/20</small></strong></div>\
                 <div>{rating}</div>\
                 </div>\
                 <small><a href=\"/user/1/\">{author}</a>{location_date}</small>\
                 <div>{text}</div>"
            )
        })
        .collect();
    format!(
        "<html><body><div id=\"container\"><table>\
         <tr><td></td><td><h1>Some Beer</h1></td></tr>\
         </table></div>\
         <table style=\"padding: 10px;\"><tr><td>{body}</td></tr></table>\
         </body></html>"
    )
}

/// A reviews page with no review containers (the termination sentinel).
pub fn reviews_empty_page() -> String {
    reviews_page(&[])
}

/// Search results with the Deschutes Inversion IPA beer section.
pub fn search_page_inversion() -> String {
    "<html><body>\
     <h1>ratebeer search</h1>\
     <h1>brewers</h1>\
     <table class=\"results\"></table>\
     <h1>beers</h1>\
     <table class=\"results\">\
     <tr><th>Name</th><th>Brewery</th><th>Style</th><th>Score</th><th>Ratings</th></tr>\
     <tr><td class=\"results\"><a href=\"/beer/deschutes-inversion-ipa/55610/\">Deschutes Inversion IPA</a></td>\
     <td>Deschutes Brewery</td><td>IPA</td><td>93</td><td>1157</td></tr>\
     <tr><td class=\"results\"><a href=\"/beer/other-inversion/999/\">Other Inversion</a></td>\
     <td>Other</td><td>IPA</td><td></td><td></td></tr>\
     </table></body></html>"
        .to_string()
}

/// Search results where the beer section matched nothing.
pub fn search_page_no_beers() -> String {
    "<html><body>\
     <h1>ratebeer search</h1>\
     <h1>brewers</h1>\
     <table class=\"results\">\
     <tr><td><a href=\"/brewers/deschutes-brewery/233/\">Deschutes Brewery</a></td>\
     <td align=\"right\">Bend, Oregon</td></tr>\
     </table>\
     <h1>beers</h1>\
     <span>0 beers</span>\
     <table class=\"results\"></table>\
     </body></html>"
        .to_string()
}

/// A brewery page: Deschutes shape.
pub fn brewery_page_deschutes() -> String {
    "<html><body><div id=\"container\"><table><tr><td>\
     <h1>Deschutes Brewery</h1>\
     Type: Microbrewery<br/>\
     <span itemprop=\"streetAddress\">901 SW Simpson Ave</span>\
     <span itemprop=\"addressLocality\">Bend</span>\
     <span itemprop=\"addressRegion\">Oregon</span>\
     <span itemprop=\"addressCountry\">USA</span>\
     <span itemprop=\"postalCode\">97702</span>\
     <span itemprop=\"telephone\">541-385-8606</span>\
     <a itemprop=\"url\" href=\"http://www.deschutesbrewery.com\">website</a>\
     </td></tr></table></div></body></html>"
        .to_string()
}

/// One page of a brewery's beer listing (header + given rows).
pub fn brewery_beers_page(rows: &[(&str, &str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(url, name, score, count)| {
            if url.is_empty() {
                // Unrateable placeholder row: listed, but no beer page.
                format!("<tr><td>{name}</td><td></td><td></td><td></td><td></td></tr>")
            } else {
                format!(
                    "<tr><td><a href=\"{url}\">{name}</a></td><td>5.0</td><td>2010</td>\
                     <td>{score}</td><td>{count}</td></tr>"
                )
            }
        })
        .collect();
    format!(
        "<html><body><div id=\"container\"><table>\
         <tr><td></td><td><h1>Some Brewery</h1></td></tr>\
         </table></div>\
         <table class=\"maintable nohover\">\
         <tr><th>Name</th><th>ABV</th><th>Added</th><th>Score</th><th>Ratings</th></tr>\
         {body}</table></body></html>"
    )
}

/// A listing page with only the header row (the termination sentinel).
pub fn brewery_beers_last_page() -> String {
    brewery_beers_page(&[])
}

/// The beer styles directory page (two filler tables precede the styles).
pub fn styles_page() -> String {
    "<html><body>\
     <table><tr><td>nav</td></tr></table>\
     <table><tr><td>promo</td></tr></table>\
     <table><tr>\
     <td><ul><li><a href=\"/beerstyles/abbey-dubbel/71/\">Abbey Dubbel</a></li>\
     <li><a href=\"/beerstyles/abt-quadrupel/72/\">Abt/Quadrupel</a></li></ul></td>\
     <td><ul><li><a href=\"/beerstyles/low-alcohol/42/\">Low Alcohol</a></li></ul></td>\
     </tr></table></body></html>"
        .to_string()
}

/// A style listing table (rank, beer, brewery, score, ratings).
pub fn style_listing_page() -> String {
    "<html><body><table>\
     <tr><th>#</th><th>Name</th><th>Brewery</th><th>Score</th><th>Ratings</th></tr>\
     <tr><td>1</td><td><a href=\"/beer/westvleteren-12-xii/4934/\">Westvleteren 12 (XII)</a></td>\
     <td>Westvleteren</td><td>100</td><td>3212</td></tr>\
     <tr><td>2</td><td><a href=\"/beer/rochefort-10/2360/\">Rochefort 10</a></td>\
     <td>Rochefort</td><td>99</td><td>2871</td></tr>\
     </table></body></html>"
        .to_string()
}

/// The alphabetical brewers index page.
pub fn brewers_index_page() -> String {
    "<html><body><table>\
     <tr><td><a href=\"/brewers/a-duus-and-co/1668/\">A. Duus &amp; Co.</a></td></tr>\
     <tr><td><a href=\"/brewers/aass-brewery/2/\">Aass Brewery</a></td></tr>\
     </table></body></html>"
        .to_string()
}

/// A JSON API response with a usable info payload.
pub fn graph_beer_info() -> String {
    r#"{"data":{"info":{
        "name":"Deschutes Inversion IPA",
        "description":"Boldly hopped IPA.",
        "abv":6.8,
        "ibu":80,
        "calories":210,
        "overallScore":93,
        "styleScore":88,
        "averageRating":3.65,
        "ratingsWeightedAverage":3.61,
        "ratingCount":1157,
        "seasonal":null,
        "isRetired":false,
        "imageUrl":"https://res.cloudinary.com/ratebeer/55610.jpg",
        "tags":["ipa","hoppy"],
        "style":{"id":17,"name":"India Pale Ale (IPA)"},
        "brewer":{"id":233,"name":"Deschutes Brewery"},
        "contractBrewer":null
    },"aliasLookup":null}}"#
        .to_string()
}

/// A JSON API response for a missing beer.
pub fn graph_not_found() -> String {
    r#"{"data":{"info":null,"aliasLookup":null}}"#.to_string()
}

/// A JSON API response for an aliased beer.
pub fn graph_aliased() -> String {
    r#"{"data":{"info":null,"aliasLookup":{"toBeer":{"id":"113241","name":"Biere de Mars 2015"}}}}"#
        .to_string()
}
