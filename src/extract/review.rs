//! Review page mapper: review containers plus their trailing author blocks.
//!
//! A review on the page is three consecutive fragments, not one element:
//! the rating container (sub-ratings and the aggregate), a sibling author
//! block, and a sibling body block. The mapper walks siblings rather than
//! assuming a wrapper element exists.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::dom::{collapsed_text, normalize_ws, static_selector};

fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static CONTENT_CELL: LazyLock<Selector> =
    LazyLock::new(|| static_selector("table[style=\"padding: 10px;\"] tr td"));
static REVIEW_BOX: LazyLock<Selector> =
    LazyLock::new(|| static_selector("div[style=\"padding: 0px 0px 0px 0px;\"]"));
static RATING_PAIRS: LazyLock<Selector> = LazyLock::new(|| static_selector("strong big, strong small"));
static DIVS: LazyLock<Selector> = LazyLock::new(|| static_selector("div"));
static AUTHOR_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("a"));

/// Author display: "name (rating count)".
static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"^(.*?)[\s\u{a0}]*\(\d+\)"));
/// Location between the first two dashes of the author line's tail.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"-\s(.*?)\s-"));
/// Date after the second dash.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"-\s.*?\s-\s(.*)"));

/// Calendar-date layout used in the author line ("Aug 2, 2014").
const DATE_FORMAT: &str = "%b %d, %Y";

/// One extracted review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewData {
    /// Appearance sub-rating, out of 5.
    pub appearance: Option<u32>,
    /// Aroma sub-rating, out of 10.
    pub aroma: Option<u32>,
    /// Palate sub-rating, out of 5.
    pub palate: Option<u32>,
    /// Taste sub-rating, out of 10.
    pub taste: Option<u32>,
    /// Overall sub-rating, out of 20.
    pub overall: Option<u32>,
    /// Aggregate rating out of 5.
    pub rating: Option<f64>,
    /// Review body text.
    pub text: String,
    /// Reviewer's display name.
    pub user_name: String,
    /// Reviewer's stated location.
    pub user_location: String,
    /// Review date; the site shows no time-of-day.
    pub date: Option<NaiveDate>,
}

/// Extracts one page of reviews.
///
/// Returns the raw review-container count (the walker terminates on a page
/// with zero containers) alongside the mapped reviews.
#[must_use]
pub fn extract_review_page(doc: &Html) -> (usize, Vec<ReviewData>) {
    let Some(content) = doc.select(&CONTENT_CELL).next() else {
        return (0, Vec::new());
    };
    let boxes: Vec<ElementRef<'_>> = content.select(&REVIEW_BOX).collect();
    let raw_count = boxes.len();
    let reviews = boxes.into_iter().filter_map(extract_review).collect();
    (raw_count, reviews)
}

fn extract_review(review_box: ElementRef<'_>) -> Option<ReviewData> {
    let mut review = ReviewData {
        appearance: None,
        aroma: None,
        palate: None,
        taste: None,
        overall: None,
        rating: None,
        text: String::new(),
        user_name: String::new(),
        user_location: String::new(),
        date: None,
    };

    // Sub-ratings come as alternating label/value elements inside <strong>.
    let pairs: Vec<ElementRef<'_>> = review_box.select(&RATING_PAIRS).collect();
    for pair in pairs.chunks(2) {
        let [label, value] = pair else { continue };
        let numerator = sub_rating_numerator(&collapsed_text(*value));
        match collapsed_text(*label).to_lowercase().as_str() {
            "appearance" => review.appearance = numerator,
            "aroma" => review.aroma = numerator,
            "palate" => review.palate = numerator,
            "taste" => review.taste = numerator,
            "overall" => review.overall = numerator,
            _ => {}
        }
    }

    // Aggregate rating is the second div inside the container.
    review.rating = review_box
        .select(&DIVS)
        .nth(1)
        .and_then(|div| collapsed_text(div).parse().ok());

    // Author block, then body block, follow as element siblings.
    let mut siblings = review_box
        .next_siblings()
        .filter_map(ElementRef::wrap);
    let author_block = siblings.next()?;
    if let Some(body_block) = siblings.next() {
        review.text = collapsed_text(body_block);
    }

    let author = author_block.select(&AUTHOR_LINK).next()?;
    let author_text = collapsed_text(author);
    review.user_name = AUTHOR_RE
        .captures(&author_text)
        .and_then(|caps| caps.get(1))
        .map_or(author_text.clone(), |m| m.as_str().to_string());

    // The location/date tail is the text node right after the author link.
    if let Some(tail) = author.next_sibling().and_then(|n| n.value().as_text().map(|t| t.to_string())) {
        let tail = normalize_ws(&tail);
        if let Some(caps) = LOCATION_RE.captures(&tail) {
            review.user_location = caps[1].to_string();
        }
        if let Some(caps) = DATE_RE.captures(&tail) {
            review.date = NaiveDate::parse_from_str(caps[1].trim(), DATE_FORMAT).ok();
        }
    }

    Some(review)
}

/// "6/10" -> 6; the denominator is fixed per sub-rating and discarded.
fn sub_rating_numerator(text: &str) -> Option<u32> {
    text.split('/').next()?.trim().parse().ok()
}
