//! Beer info retrieval over the JSON query API site revision.
//!
//! One posted query document asks for both the entity info and the alias
//! lookup, so a single round trip carries every failure signal the
//! classifier needs. Field mapping runs through the same canonical table
//! machinery as the HTML revision.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::classify::{GraphOutcome, classify_graph_body, slugify};
use crate::error::RateBeerError;
use crate::extract::beer::LinkRef;
use crate::extract::search::path_id;
use crate::extract::{BEER_GRAPH_FIELDS, FieldMap, extract_json_fields};
use crate::fetch::Fetcher;

/// Operation name for the beer info query.
pub const BEER_OPERATION: &str = "beer";

/// Query document requesting the info payload and the alias lookup.
pub const BEER_QUERY: &str = "\
query beer($beerId: ID!) {
  info: beer(id: $beerId) {
    name
    description
    abv
    ibu
    calories
    overallScore
    styleScore
    averageRating
    ratingsWeightedAverage
    ratingCount
    seasonal
    isRetired
    imageUrl
    tags
    style { id name }
    brewer { id name }
    contractBrewer { id name }
  }
  aliasLookup: beerAlias(beerId: $beerId) {
    toBeer { id name }
  }
}";

/// Mapped beer info from the JSON revision.
#[derive(Debug, Clone, Default)]
pub struct GraphBeerData {
    /// Scalar fields mapped through the canonical table.
    pub fields: FieldMap,
    /// Tag labels.
    pub tags: BTreeSet<String>,
    /// Owning brewery reference.
    pub brewery: Option<LinkRef>,
    /// Contract brewery reference.
    pub brewed_at: Option<LinkRef>,
    /// Path of the style's listing page.
    pub style_url: Option<String>,
}

/// Fetches and maps a beer's info payload by the numeric id in `url`.
///
/// # Errors
///
/// Returns [`RateBeerError::InvalidArgument`] when the identity carries no
/// numeric id (raised before any I/O), [`RateBeerError::NotFound`] /
/// [`RateBeerError::Aliased`] / [`RateBeerError::MalformedResponse`] as
/// classified from the response, and [`RateBeerError::Transport`] when the
/// post itself fails.
pub fn fetch_beer_info(fetcher: &dyn Fetcher, url: &str) -> Result<GraphBeerData, RateBeerError> {
    let Some(id) = path_id(url) else {
        return Err(RateBeerError::invalid_argument(
            "url",
            url,
            "a beer path with a numeric id segment",
        ));
    };

    let variables = json!({ "beerId": id.to_string() });
    let body = fetcher.post_graph_query(BEER_OPERATION, &variables, BEER_QUERY)?;

    match classify_graph_body(&body) {
        GraphOutcome::NotFound => Err(RateBeerError::not_found(url)),
        GraphOutcome::Aliased { target } => Err(RateBeerError::aliased(url, &target)),
        GraphOutcome::Malformed { reason } => Err(RateBeerError::malformed(url, &reason)),
        GraphOutcome::Usable(info) => Ok(map_info(&info)),
    }
}

fn map_info(info: &Value) -> GraphBeerData {
    let fields = extract_json_fields(info, BEER_GRAPH_FIELDS);
    GraphBeerData {
        tags: info
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        brewery: entity_path(&fields, "brewery_name", "brewery_id", "/brewers"),
        brewed_at: entity_path(&fields, "brewed_at_name", "brewed_at_id", "/brewers"),
        style_url: fields
            .int("style_id")
            .map(|id| style_path(fields.text("style"), id)),
        fields,
    }
}

fn entity_path(
    fields: &FieldMap,
    name_field: &str,
    id_field: &str,
    prefix: &str,
) -> Option<LinkRef> {
    let name = fields.text(name_field)?;
    let id = fields.int(id_field)?;
    Some(LinkRef {
        name: name.to_string(),
        url: format!("{prefix}/{}/{id}/", slugify(name)),
    })
}

fn style_path(name: Option<&str>, id: i64) -> String {
    match name {
        Some(name) => format!("/beerstyles/{}/{id}/", slugify(name)),
        None => format!("/beerstyles/{id}/"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_map_info_builds_reference_paths() {
        let info = json!({
            "name": "Benediktiner Weissbier",
            "abv": 5.4,
            "ratingCount": 321,
            "isRetired": false,
            "tags": ["weissbier", "wheat"],
            "style": {"id": 45, "name": "German Hefeweizen"},
            "brewer": {"id": 1943, "name": "Klosterbrauerei Ettal"},
            "contractBrewer": {"id": 1677, "name": "Licher Privatbrauerei"}
        });
        let data = map_info(&info);
        assert_eq!(data.fields.text("name"), Some("Benediktiner Weissbier"));
        let brewery = data.brewery.unwrap();
        assert_eq!(brewery.url, "/brewers/klosterbrauerei-ettal/1943/");
        let brewed_at = data.brewed_at.unwrap();
        assert_eq!(brewed_at.url, "/brewers/licher-privatbrauerei/1677/");
        assert_ne!(brewery.url, brewed_at.url);
        assert_eq!(data.style_url.as_deref(), Some("/beerstyles/german-hefeweizen/45/"));
        assert_eq!(data.tags.len(), 2);
    }

    #[test]
    fn test_map_info_without_contract_brewer() {
        let info = json!({
            "name": "Inversion IPA",
            "brewer": {"id": 233, "name": "Deschutes Brewery"},
            "contractBrewer": null
        });
        let data = map_info(&info);
        assert!(data.brewery.is_some());
        assert!(data.brewed_at.is_none());
    }
}
