//! Validation of user-entered book fields.
//!
//! Everything here is pure: a form either becomes a [`NewBook`] ready to be
//! written, or a [`ValidationError`] naming the offending field.
use super::error::ValidationError;
use crate::db::models::binding::Binding;
use crate::db::models::book::NewBook;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

/// Book fields as typed into an editor, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    /// Title.
    pub name: String,
    /// Selected publisher id.
    pub publisher: Option<i64>,
    /// Publication date, `YYYY-MM-DD` or empty.
    pub publishment_date: String,
    /// Rating, a number in `[0, 5]` or empty.
    pub rating: String,
    /// One of `hardcover`, `paperback`, `ebook`.
    pub binding: String,
}

impl BookForm {
    /// Validate every field.
    ///
    /// # Errors
    /// Returns the first invalid field, checked in editor order.
    pub fn validate(&self) -> Result<NewBook, ValidationError> {
        let name = validate_required(&self.name, "Book name")?;
        let publisher = self.publisher.ok_or(ValidationError::MissingPublisher)?;
        let rating = validate_rating(&self.rating)?;
        let binding = validate_binding(&self.binding)?;
        let publishment_date = validate_date(&self.publishment_date)?;
        Ok(NewBook {
            name,
            publisher,
            publishment_date,
            rating,
            binding,
        })
    }
}

/// Trim a required text field.
///
/// # Errors
/// Errors if nothing is left after trimming.
pub fn validate_required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional text field, turning blank input into `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Check the binding against the allowed set. The comparison is exact.
///
/// # Errors
/// Errors if the binding is not `hardcover`, `paperback` or `ebook`.
pub fn validate_binding(binding: &str) -> Result<Binding, ValidationError> {
    Binding::from_string(binding).map_err(|_| ValidationError::Binding(binding.to_owned()))
}

/// Parse a rating. Blank input means "no rating".
///
/// # Errors
/// Errors if the input is not a number or lies outside `[0, 5]`.
pub fn validate_rating(value: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let rating: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::RatingNotNumber(trimmed.to_owned()))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(Some(rating))
}

/// Parse a `YYYY-MM-DD` date. Blank input means "unknown date".
///
/// Month and day may omit the leading zero; the stored form always has it.
///
/// # Errors
/// Errors if the input is not shaped like a date or names a day that does not exist.
#[allow(clippy::expect_used)]
pub fn validate_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    lazy_static! {
        static ref DATE: Regex =
            Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("Failed to compile date regex");
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let format_error = || ValidationError::DateFormat(trimmed.to_owned());
    let captures = DATE.captures(trimmed).ok_or_else(format_error)?;
    let year: i32 = captures[1].parse().map_err(|_| format_error())?;
    let month: u32 = captures[2].parse().map_err(|_| format_error())?;
    let day: u32 = captures[3].parse().map_err(|_| format_error())?;
    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidDate(trimmed.to_owned()))
}
