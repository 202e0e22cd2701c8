//! Beer page mapper: container rows to typed beer fields.
//!
//! Position- and label-dependent by necessity: the beer page is two table
//! rows inside `div#container`, with the name heading in the first row's
//! second cell and everything else packed into the second row. Every
//! selector and positional rule for that layout lives here.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::dom::{collapsed_text, normalize_ws, static_selector};
use super::{BEER_INFO_LABELS, FieldMap, extract_labeled_blob};

/// Placeholder paragraph shown when a beer has no description.
const NO_DESCRIPTION_MARKER: &str = "no commercial description";

/// Marker in the brewery line that introduces the contract brewery link.
const BREWED_AT_MARKER: &str = "brewed at";

static CONTAINER_ROWS: LazyLock<Selector> =
    LazyLock::new(|| static_selector("div#container table tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| static_selector("h1"));
static RETIRED_FLAG: LazyLock<Selector> = LazyLock::new(|| static_selector("span.beer-retired"));
static BEER_IMAGE: LazyLock<Selector> = LazyLock::new(|| static_selector("img#beerImg"));
static CANONICAL_LINK: LazyLock<Selector> =
    LazyLock::new(|| static_selector("link[rel=\"canonical\"]"));
static DIVS: LazyLock<Selector> = LazyLock::new(|| static_selector("div"));
static SPANS: LazyLock<Selector> = LazyLock::new(|| static_selector("span"));
static INFO_BLOB: LazyLock<Selector> = LazyLock::new(|| static_selector("small"));
static BREWER_LINKS: LazyLock<Selector> =
    LazyLock::new(|| static_selector("a[href^=\"/brewers/\"]"));
static STYLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| static_selector("a[href^=\"/beerstyles/\"]"));
static TAG_LINKS: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href^=\"/tag/\"]"));
// The description sits in an inline-styled box; the style attribute is the
// only stable hook the markup offers.
static DESCRIPTION_BOX: LazyLock<Selector> = LazyLock::new(|| {
    static_selector(
        "div[style=\"border: 1px solid #e0e0e0; background: #fff; padding: 14px; color: #777;\"]",
    )
});

/// A named link to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Display name.
    pub name: String,
    /// Site-relative path.
    pub url: String,
}

impl LinkRef {
    fn from_anchor(anchor: ElementRef<'_>) -> Option<Self> {
        let url = anchor.value().attr("href")?.trim().to_string();
        Some(Self {
            name: collapsed_text(anchor),
            url,
        })
    }
}

/// Everything the beer page yields, before it lands on the entity.
#[derive(Debug, Clone, Default)]
pub struct BeerPageData {
    /// Beer name from the page heading.
    pub name: String,
    /// Canonical identity from the page's `link rel=canonical`, site-relative.
    pub canonical_url: Option<String>,
    /// Owning brewery reference.
    pub brewery: Option<LinkRef>,
    /// Contract brewery reference; present only when the brewery line
    /// carries the "brewed at" marker text.
    pub brewed_at: Option<LinkRef>,
    /// Style name and listing path.
    pub style: Option<String>,
    /// Path of the style's listing page.
    pub style_url: Option<String>,
    /// Overall rating out of 100, absent when shown as "n/a".
    pub overall_rating: Option<u32>,
    /// Within-style rating out of 100, absent when shown as "n/a".
    pub style_rating: Option<u32>,
    /// Commercial description, absent when the placeholder text is shown.
    pub description: Option<String>,
    /// Whether the retired flag is present.
    pub retired: bool,
    /// Beer image URL.
    pub image_url: Option<String>,
    /// Tag labels.
    pub tags: BTreeSet<String>,
    /// Fields mapped out of the info blob.
    pub fields: FieldMap,
}

/// Maps a usable beer page (already past the classifier) to its fields.
///
/// Missing fragments degrade to absent fields; this function does not
/// re-check the failure signals.
#[must_use]
pub fn extract_beer_page(doc: &Html) -> BeerPageData {
    let rows: Vec<ElementRef<'_>> = doc.select(&CONTAINER_ROWS).collect();
    let mut data = BeerPageData {
        retired: doc.select(&RETIRED_FLAG).next().is_some(),
        image_url: doc
            .select(&BEER_IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        canonical_url: canonical_path(doc),
        tags: doc
            .select(&TAG_LINKS)
            .map(collapsed_text)
            .filter(|t| !t.is_empty())
            .collect(),
        ..BeerPageData::default()
    };

    if let Some(cell) = nth_cell(&rows, 0, 1)
        && let Some(h1) = cell.select(&HEADING).next()
    {
        data.name = collapsed_text(h1);
    }

    if let Some(cell) = nth_cell(&rows, 1, 0) {
        let (overall, style) = extract_rating_spans(cell);
        data.overall_rating = overall;
        data.style_rating = style;
    }

    if let Some(cell) = nth_cell(&rows, 1, 1)
        && let Some(info_div) = cell.select(&DIVS).next()
    {
        if let Some(line) = info_div.select(&DIVS).next() {
            extract_brewery_line(line, &mut data);
        }
        if let Some(blob) = info_div.select(&INFO_BLOB).next() {
            let raw: String = blob.text().collect();
            data.fields = extract_labeled_blob(&raw, BEER_INFO_LABELS);
        }
        data.description = extract_description(info_div);
    }

    data
}

fn nth_cell<'a>(
    rows: &[ElementRef<'a>],
    row: usize,
    cell: usize,
) -> Option<ElementRef<'a>> {
    rows.get(row)?.select(&CELLS).nth(cell)
}

/// The brewery line holds the owning brewery link first; a second
/// `/brewers/` link counts as the contract brewery only when the marker
/// text is present, not merely because the node exists.
fn extract_brewery_line(line: ElementRef<'_>, data: &mut BeerPageData) {
    let mut brewers = line.select(&BREWER_LINKS);
    data.brewery = brewers.next().and_then(LinkRef::from_anchor);
    if collapsed_text(line).to_lowercase().contains(BREWED_AT_MARKER) {
        data.brewed_at = brewers.next().and_then(LinkRef::from_anchor);
    }

    if let Some(style) = line.select(&STYLE_LINK).next() {
        data.style_url = style.value().attr("href").map(str::to_string);
        let name = collapsed_text(style);
        if !name.is_empty() {
            data.style = Some(name);
        }
    }
}

/// Ratings live in the second row's first cell as a run of divs: the
/// overall score is the second span of the second div, the style score the
/// first span of the fourth. Unrated beers show "n/a".
fn extract_rating_spans(cell: ElementRef<'_>) -> (Option<u32>, Option<u32>) {
    let divs: Vec<ElementRef<'_>> = cell.select(&DIVS).collect();
    if divs.len() < 4 {
        return (None, None);
    }
    let overall = divs[1]
        .select(&SPANS)
        .nth(1)
        .and_then(|span| parse_rating(&collapsed_text(span)));
    let style = divs[3]
        .select(&SPANS)
        .next()
        .and_then(|span| parse_rating(&collapsed_text(span)));
    (overall, style)
}

fn parse_rating(text: &str) -> Option<u32> {
    if text.eq_ignore_ascii_case("n/a") {
        return None;
    }
    text.parse().ok()
}

/// Description text with embedded `<small>` ad nodes dropped; the
/// placeholder paragraph maps to absent.
fn extract_description(info_div: ElementRef<'_>) -> Option<String> {
    let boxed = info_div.select(&DESCRIPTION_BOX).next()?;
    if collapsed_text(boxed)
        .to_lowercase()
        .contains(NO_DESCRIPTION_MARKER)
    {
        return None;
    }
    let text = text_excluding(boxed, "small");
    let text = normalize_ws(&text);
    (!text.is_empty()).then_some(text)
}

/// Concatenated descendant text, skipping subtrees under `excluded` tags.
fn text_excluding(element: ElementRef<'_>, excluded: &str) -> String {
    let mut out = String::new();
    collect_text(element, excluded, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, excluded: &str, out: &mut String) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() != excluded {
                collect_text(el, excluded, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// The canonical link is absolute on the live site; identities are kept
/// site-relative, so only the path survives.
fn canonical_path(doc: &Html) -> Option<String> {
    let href = doc
        .select(&CANONICAL_LINK)
        .next()
        .and_then(|link| link.value().attr("href"))?;
    match url::Url::parse(href) {
        Ok(url) => Some(url.path().to_string()),
        Err(_) => Some(href.to_string()),
    }
}
