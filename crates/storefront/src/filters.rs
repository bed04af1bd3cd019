//! Custom Askama template filters and Indonesian date formatting.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{Datelike, NaiveDate};

/// Abbreviated Indonesian month names.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

fn month_abbrev(date: NaiveDate) -> &'static str {
    MONTHS.get(date.month0() as usize).copied().unwrap_or("")
}

/// Format a date the way the shop prints it, e.g. `15 Okt 2025`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_abbrev(date), date.year())
}

/// Format a month and year, e.g. `Okt 2026`.
#[must_use]
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{} {}", month_abbrev(date), date.year())
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Content hash of `app.js`, same scheme as [`css_hash`].
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn js_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("JS_HASH"))
}

/// Five-star rating as text, e.g. `★★★★☆` for 4.
#[must_use]
pub fn star_string(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Renders a star count as five stars.
///
/// Usage in templates: `{{ review.stars|stars }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stars(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let filled = value.to_string().parse::<u8>().unwrap_or(0);
    Ok(star_string(filled))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_uses_indonesian_months() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        assert_eq!(format_date(date), "8 Okt 2025");

        let may = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        assert_eq!(format_date(may), "21 Mei 2024");
        assert_eq!(format_month_year(may), "Mei 2024");
    }

    #[test]
    fn test_format_month_year_december() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_month_year(date), "Des 2025");
    }

    #[test]
    fn test_star_string() {
        assert_eq!(star_string(4), "★★★★☆");
        assert_eq!(star_string(0), "☆☆☆☆☆");
        assert_eq!(star_string(9), "★★★★★");
    }
}
