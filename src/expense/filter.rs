//! Parsing of the optional filters on the expenses page.
//!
//! Query parameters are untrusted free text, so they are parsed leniently:
//! anything that is not a valid date or a non-blank category is treated as
//! "no filter". The one hard error is a date range that ends before it starts.

use serde::{Deserialize, Deserializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The date format used by HTML date inputs, e.g. "2025-01-31".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Why a date string could not be turned into a [Date].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    /// No date was given.
    #[error("no date given")]
    Empty,
    /// The text was not a valid `YYYY-MM-DD` date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    Invalid(String),
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Errors
/// Returns [DateParseError::Empty] for blank text and [DateParseError::Invalid]
/// for anything else that is not a real calendar date.
pub fn parse_date(text: &str) -> Result<Date, DateParseError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    Date::parse(text, DATE_FORMAT).map_err(|_| DateParseError::Invalid(text.to_owned()))
}

/// Deserialize a query or form field that may be repeated, keeping its first value.
///
/// Only works with `serde_html_form`, which is what `axum_extra`'s `Query` and
/// `Form` extractors use.
pub(crate) fn first_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<String>::deserialize(deserializer)?;

    Ok(values.into_iter().next().unwrap_or_default())
}

/// The raw filter parameters from the query string.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterQuery {
    /// The first day to include, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "first_value")]
    pub start: String,
    /// The last day to include, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "first_value")]
    pub end: String,
    /// The category to match exactly.
    #[serde(default, deserialize_with = "first_value")]
    pub category: String,
}

/// A filter that could not be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Both dates were given but the end date comes first.
    #[error("End date must be on or after the start date.")]
    EndBeforeStart,
}

/// The filter applied to the expenses page.
///
/// Every field is optional, a `None` field does not restrict the results.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseFilter {
    /// Only include expenses on or after this date.
    pub start: Option<Date>,
    /// Only include expenses on or before this date.
    pub end: Option<Date>,
    /// Only include expenses with exactly this category.
    pub category: Option<String>,
}

impl ExpenseFilter {
    /// Build a filter from the page's query parameters.
    ///
    /// If the end date is before the start date, both dates are dropped and the
    /// error is returned alongside the filter so the caller can report it.
    pub fn from_query(query: &FilterQuery) -> (Self, Option<FilterError>) {
        let start = parse_date(&query.start).ok();
        let end = parse_date(&query.end).ok();
        let category = Some(query.category.trim())
            .filter(|category| !category.is_empty())
            .map(str::to_owned);

        match (start, end) {
            (Some(start), Some(end)) if end < start => (
                Self {
                    start: None,
                    end: None,
                    category,
                },
                Some(FilterError::EndBeforeStart),
            ),
            (start, end) => (
                Self {
                    start,
                    end,
                    category,
                },
                None,
            ),
        }
    }
}
