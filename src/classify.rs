//! Classification of the site's non-standard failure signals.
//!
//! The site never 404s for missing entities. Instead it serves, with a 200
//! status, one of three things: a generic "reference" placeholder page, an
//! "also known as" pointer at a different identity, or a site-wide block
//! page. This module inspects fetched documents (and, for the JSON site
//! revision, response bodies) and reports which case applies. It never
//! performs a fetch of its own — following an alias is the caller's call.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::extract::dom::{collapsed_text, document_text_lower, static_selector};

/// Heading text the site substitutes when a beer does not exist.
const REFERENCE_PLACEHOLDER: &str = "beer reference";

/// Marker preceding the link to an aliased entity's current identity.
const ALIAS_MARKER: &str = "also known as";

/// Marker present anywhere in the site's automated-traffic block page.
const BLOCK_PAGE_MARKER: &str = "ratebeer robot oops";

static CONTAINER_ROWS: LazyLock<Selector> =
    LazyLock::new(|| static_selector("div#container table tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| static_selector("h1"));
static INNER_DIV: LazyLock<Selector> = LazyLock::new(|| static_selector("div div"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));

/// What a fetched page turned out to be.
///
/// A tagged result rather than an exception-style control flow: every
/// caller is forced to handle the alias and not-found cases explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page carries the expected entity markup.
    Usable,
    /// The page is the reference placeholder, the block page, or is
    /// missing the entity container entirely.
    NotFound,
    /// The entity moved; `target` is the identity the site points at.
    Aliased {
        /// Site-relative path of the current identity.
        target: String,
    },
}

/// Outcome of classifying a JSON API response body.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOutcome {
    /// The `info` payload is present; field mapping may proceed.
    Usable(Value),
    /// The `info` payload is null: the entity does not exist.
    NotFound,
    /// The alias-lookup payload is non-null; the entity moved.
    Aliased {
        /// Site-relative path of the current identity.
        target: String,
    },
    /// The body is not interpretable under the API schema. Kept distinct
    /// from `NotFound`: a schema problem is not an absence.
    Malformed {
        /// Why interpretation failed.
        reason: String,
    },
}

/// Classifies a fetched beer page.
#[must_use]
pub fn classify_beer_page(doc: &Html) -> PageOutcome {
    classify_entity_page(doc, true)
}

/// Classifies a fetched brewery page.
///
/// Brewery pages share the block-page and missing-container signals but
/// have no alias mechanism on the site.
#[must_use]
pub fn classify_brewery_page(doc: &Html) -> PageOutcome {
    classify_entity_page(doc, false)
}

/// True when the body carries the site-wide block-page marker.
///
/// Pages without entity markup (search results, style directory, brewers
/// index) have only this signal to check.
#[must_use]
pub fn page_is_blocked(doc: &Html) -> bool {
    document_text_lower(doc).contains(BLOCK_PAGE_MARKER)
}

fn classify_entity_page(doc: &Html, check_alias: bool) -> PageOutcome {
    if page_is_blocked(doc) {
        // Conservative: indistinguishable from a deliberate removal
        // without further signals.
        debug!("block-page marker present; classifying as not found");
        return PageOutcome::NotFound;
    }

    let rows: Vec<ElementRef<'_>> = doc.select(&CONTAINER_ROWS).collect();
    let Some(heading) = heading_text(&rows) else {
        return PageOutcome::NotFound;
    };
    if heading.to_lowercase().contains(REFERENCE_PLACEHOLDER) {
        return PageOutcome::NotFound;
    }

    if check_alias && let Some(target) = alias_target(&rows) {
        return PageOutcome::Aliased { target };
    }

    PageOutcome::Usable
}

/// Heading text from the first container row's second cell, where the
/// entity name is expected.
fn heading_text(rows: &[ElementRef<'_>]) -> Option<String> {
    let cell = rows.first()?.select(&CELLS).nth(1)?;
    let h1 = cell.select(&HEADING).next()?;
    Some(collapsed_text(h1))
}

/// Looks for the "also known as" marker in the second container row and
/// returns the link target alongside it.
fn alias_target(rows: &[ElementRef<'_>]) -> Option<String> {
    let cell = rows.get(1)?.select(&CELLS).nth(1)?;
    let marker_div = cell.select(&INNER_DIV).next()?;
    if !collapsed_text(marker_div).to_lowercase().contains(ALIAS_MARKER) {
        return None;
    }
    let anchor = marker_div.select(&ANCHOR).next()?;
    anchor.value().attr("href").map(str::to_string)
}

/// Classifies a JSON API response body for a beer info query.
#[must_use]
pub fn classify_graph_body(body: &str) -> GraphOutcome {
    let root: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return GraphOutcome::Malformed {
                reason: format!("body is not JSON: {e}"),
            };
        }
    };

    let Some(data) = root.get("data") else {
        return GraphOutcome::Malformed {
            reason: "response has no `data` payload".to_string(),
        };
    };

    if let Some(alias) = data.get("aliasLookup")
        && !alias.is_null()
    {
        let Some(target) = alias_identity(alias) else {
            return GraphOutcome::Malformed {
                reason: "alias payload has no target id".to_string(),
            };
        };
        return GraphOutcome::Aliased { target };
    }

    match data.get("info") {
        None => GraphOutcome::Malformed {
            reason: "response has no `info` payload".to_string(),
        },
        Some(Value::Null) => GraphOutcome::NotFound,
        Some(info) => GraphOutcome::Usable(info.clone()),
    }
}

/// Renders the alias payload's target as a site-relative beer path.
fn alias_identity(alias: &Value) -> Option<String> {
    let target = alias.get("toBeer")?;
    let id = target.get("id")?;
    let id = match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    match target.get("name").and_then(Value::as_str) {
        Some(name) => Some(format!("/beer/{}/{id}/", slugify(name))),
        None => Some(format!("/beer/{id}/")),
    }
}

/// Lowercases and dash-joins an entity name the way the site builds its paths.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
