//! The Review record.

use chrono::NaiveDate;

use crate::extract::review::ReviewData;

/// One review of a beer.
///
/// Reviews are not independently addressable on the site; they exist only
/// as items of a beer's paginated review sequence, and arrive fully
/// materialized — there is nothing lazy to fetch per review.
///
/// Sub-ratings use rating-specific maxima: appearance and palate out of 5,
/// aroma and taste out of 10, overall out of 20.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
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

impl From<ReviewData> for Review {
    fn from(data: ReviewData) -> Self {
        Self {
            appearance: data.appearance,
            aroma: data.aroma,
            palate: data.palate,
            taste: data.taste,
            overall: data.overall,
            rating: data.rating,
            text: data.text,
            user_name: data.user_name,
            user_location: data.user_location,
            date: data.date,
        }
    }
}
