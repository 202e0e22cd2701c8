//! Field extraction: table-driven translation of page fragments into typed fields.
//!
//! The site embeds entity data in a labeled, delimiter-joined text blob
//! ("RATINGS: 123&nbsp;&nbsp;ABV: 5.1%") on its HTML pages and in a nested
//! object on the JSON API revision. Both shapes funnel through one engine:
//! a static table mapping recognized labels (or JSON paths) to canonical
//! field names plus a per-field [`Transform`]. Site-markup drift is isolated
//! to table edits and to the per-page submodules below, which own every CSS
//! selector string in the crate.
//!
//! - [`extract_labeled_blob`] - the "label: value" blob variant
//! - [`extract_json_fields`] - the nested-object variant (dotted paths)
//! - [`beer`], [`brewery`], [`review`], [`search`], [`style`] - page mappers

pub mod dom;

pub mod beer;
pub mod brewery;
pub mod review;
pub mod search;
pub mod style;

use std::collections::BTreeMap;

use serde_json::Value;

use self::dom::normalize_ws;

/// Separator joining the info-blob entries on entity pages: a double
/// non-breaking space.
pub const INFO_SEPARATOR: &str = "\u{a0}\u{a0}";

/// Placeholder the site shows for a rating that does not exist.
const NOT_APPLICABLE: &str = "n/a";

/// A typed value produced by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, whitespace-normalized.
    Text(String),
    /// Parsed floating-point value.
    Float(f64),
    /// Parsed integer value.
    Int(i64),
    /// Boolean flag (JSON variant only).
    Bool(bool),
}

/// Per-field parsing rule applied to a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Keep as text.
    Text,
    /// Parse as an integer. `"0"` stays `0`, never absent.
    Int,
    /// Parse as a float.
    Float,
    /// Strip a trailing unit suffix, then parse as a float ("5.1%" -> 5.1).
    UnitSuffixFloat,
    /// Keep the numerator of an "x/y" fraction, parsed as a float
    /// ("3.2/5.0" -> 3.2, denominator discarded).
    NumeratorFloat,
}

/// One vocabulary entry: a recognized label mapped to a canonical field.
///
/// Distinct labels may map to the same canonical field across site
/// revisions ("CALORIES" / "EST. CALORIES"); labels absent from the table
/// are silently dropped.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    /// The label as it appears on the page, uppercase, trimmed.
    pub label: &'static str,
    /// Canonical field name.
    pub field: &'static str,
    /// Parse rule for the value.
    pub transform: Transform,
    /// When true, a failed numeric parse drops the field; when false it
    /// falls back to the raw text.
    pub strict: bool,
    /// When true, a blank value or a bare zero maps to absent instead of
    /// a parsed zero.
    pub blank_is_absent: bool,
}

/// One JSON-variant entry: a dotted path mapped to a canonical field.
#[derive(Debug, Clone, Copy)]
pub struct JsonRule {
    /// Dotted path into the info payload (e.g. `"brewer.name"`).
    pub path: &'static str,
    /// Canonical field name.
    pub field: &'static str,
    /// Parse rule for string-typed values; native numbers pass through.
    pub transform: Transform,
    /// See [`LabelRule::blank_is_absent`].
    pub blank_is_absent: bool,
}

/// Vocabulary for the info blob on beer pages.
pub static BEER_INFO_LABELS: &[LabelRule] = &[
    LabelRule {
        label: "RATINGS",
        field: "num_ratings",
        transform: Transform::Int,
        strict: true,
        blank_is_absent: false,
    },
    LabelRule {
        label: "MEAN",
        field: "mean_rating",
        transform: Transform::NumeratorFloat,
        strict: false,
        blank_is_absent: false,
    },
    LabelRule {
        label: "WEIGHTED AVG",
        field: "weighted_avg",
        transform: Transform::NumeratorFloat,
        strict: false,
        blank_is_absent: false,
    },
    // Catch-all bucket: the site parks miscellaneous brew notes here.
    LabelRule {
        label: "SEASONAL",
        field: "seasonal",
        transform: Transform::Text,
        strict: false,
        blank_is_absent: true,
    },
    LabelRule {
        label: "CALORIES",
        field: "calories",
        transform: Transform::Float,
        strict: false,
        blank_is_absent: false,
    },
    LabelRule {
        label: "EST. CALORIES",
        field: "calories",
        transform: Transform::Float,
        strict: false,
        blank_is_absent: false,
    },
    LabelRule {
        label: "ABV",
        field: "abv",
        transform: Transform::UnitSuffixFloat,
        strict: false,
        blank_is_absent: false,
    },
    LabelRule {
        label: "IBU",
        field: "ibu",
        transform: Transform::Int,
        strict: true,
        blank_is_absent: false,
    },
];

/// Vocabulary for the JSON API revision's info payload.
///
/// Zero-valued scores mean "unrated" on this revision, hence
/// `blank_is_absent` on the rating fields.
pub static BEER_GRAPH_FIELDS: &[JsonRule] = &[
    JsonRule {
        path: "name",
        field: "name",
        transform: Transform::Text,
        blank_is_absent: false,
    },
    JsonRule {
        path: "description",
        field: "description",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "abv",
        field: "abv",
        transform: Transform::UnitSuffixFloat,
        blank_is_absent: true,
    },
    JsonRule {
        path: "ibu",
        field: "ibu",
        transform: Transform::Int,
        blank_is_absent: true,
    },
    JsonRule {
        path: "calories",
        field: "calories",
        transform: Transform::Float,
        blank_is_absent: true,
    },
    JsonRule {
        path: "overallScore",
        field: "overall_rating",
        transform: Transform::Float,
        blank_is_absent: true,
    },
    JsonRule {
        path: "styleScore",
        field: "style_rating",
        transform: Transform::Float,
        blank_is_absent: true,
    },
    JsonRule {
        path: "averageRating",
        field: "mean_rating",
        transform: Transform::NumeratorFloat,
        blank_is_absent: true,
    },
    JsonRule {
        path: "ratingsWeightedAverage",
        field: "weighted_avg",
        transform: Transform::NumeratorFloat,
        blank_is_absent: true,
    },
    JsonRule {
        path: "ratingCount",
        field: "num_ratings",
        transform: Transform::Int,
        blank_is_absent: false,
    },
    JsonRule {
        path: "seasonal",
        field: "seasonal",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "isRetired",
        field: "retired",
        transform: Transform::Text,
        blank_is_absent: false,
    },
    JsonRule {
        path: "imageUrl",
        field: "image_url",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "style.name",
        field: "style",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "style.id",
        field: "style_id",
        transform: Transform::Int,
        blank_is_absent: false,
    },
    JsonRule {
        path: "brewer.name",
        field: "brewery_name",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "brewer.id",
        field: "brewery_id",
        transform: Transform::Int,
        blank_is_absent: false,
    },
    JsonRule {
        path: "contractBrewer.name",
        field: "brewed_at_name",
        transform: Transform::Text,
        blank_is_absent: true,
    },
    JsonRule {
        path: "contractBrewer.id",
        field: "brewed_at_id",
        transform: Transform::Int,
        blank_is_absent: false,
    },
];

/// Canonical-field-name to typed-value mapping produced by the extractors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(BTreeMap<&'static str, FieldValue>);

impl FieldMap {
    /// Inserts a field value.
    pub fn insert(&mut self, field: &'static str, value: FieldValue) {
        self.0.insert(field, value);
    }

    /// Raw lookup.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// The field as a float, accepting parsed ints.
    #[must_use]
    pub fn float(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            FieldValue::Float(v) => Some(*v),
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The field as an integer.
    #[must_use]
    pub fn int(&self, field: &str) -> Option<i64> {
        match self.0.get(field)? {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The field as text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.0.get(field)? {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The field as a boolean.
    #[must_use]
    pub fn bool(&self, field: &str) -> Option<bool> {
        match self.0.get(field)? {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of extracted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Maps a labeled, delimiter-joined blob onto canonical fields.
///
/// Entries split on [`INFO_SEPARATOR`], then on the first `:`. Labels
/// absent from `table` are dropped; each field parses independently, so a
/// failure in one never aborts the rest.
#[must_use]
pub fn extract_labeled_blob(blob: &str, table: &[LabelRule]) -> FieldMap {
    let mut out = FieldMap::default();
    for entry in blob.split(INFO_SEPARATOR) {
        let Some((label, raw)) = entry.split_once(':') else {
            continue;
        };
        let label = normalize_ws(label).to_uppercase();
        let Some(rule) = table.iter().find(|r| r.label == label) else {
            continue;
        };
        if let Some(value) = apply_transform(raw, rule.transform, rule.strict, rule.blank_is_absent)
        {
            out.insert(rule.field, value);
        }
    }
    out
}

/// Maps a nested JSON object onto canonical fields via dotted paths.
#[must_use]
pub fn extract_json_fields(info: &Value, table: &[JsonRule]) -> FieldMap {
    let mut out = FieldMap::default();
    for rule in table {
        let Some(value) = lookup_path(info, rule.path) else {
            continue;
        };
        let mapped = match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => {
                if rule.blank_is_absent && n.as_f64() == Some(0.0) {
                    None
                } else if rule.transform == Transform::Int {
                    n.as_i64().map(FieldValue::Int)
                } else {
                    n.as_f64().map(FieldValue::Float)
                }
            }
            Value::String(s) => apply_transform(s, rule.transform, false, rule.blank_is_absent),
            // Arrays and objects are handled structurally by the callers.
            _ => None,
        };
        if let Some(mapped) = mapped {
            out.insert(rule.field, mapped);
        }
    }
    out
}

fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Applies a transform to one raw value.
///
/// Blank values and the site's "n/a" placeholder map to absent rather than
/// a parse error. A failed numeric parse on a non-strict field falls back
/// to the raw text.
fn apply_transform(
    raw: &str,
    transform: Transform,
    strict: bool,
    blank_is_absent: bool,
) -> Option<FieldValue> {
    let value = raw.trim_matches(|c: char| c.is_whitespace());
    if value.is_empty() || value.eq_ignore_ascii_case(NOT_APPLICABLE) {
        return None;
    }
    if blank_is_absent && value.trim_matches('0').trim_matches('.').is_empty() {
        return None;
    }

    let parsed = match transform {
        Transform::Text => return Some(FieldValue::Text(normalize_ws(value))),
        Transform::Int => value.parse::<i64>().ok().map(FieldValue::Int),
        Transform::Float => value.parse::<f64>().ok().map(FieldValue::Float),
        Transform::UnitSuffixFloat => value
            .trim_end_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .parse::<f64>()
            .ok()
            .map(FieldValue::Float),
        Transform::NumeratorFloat => value
            .split('/')
            .next()
            .and_then(|n| n.trim().parse::<f64>().ok())
            .map(FieldValue::Float),
    };

    match parsed {
        Some(v) => Some(v),
        None if strict => None,
        None => Some(FieldValue::Text(normalize_ws(value))),
    }
}
