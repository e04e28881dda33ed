//! Date parameter rules.
//!
//! Date filters must be equality filters on a whole year (`eq2023`).
//! Ranges, partial dates and full dates would let a query narrow results
//! below year granularity and are rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{DATE_EQUALITY_PREFIX, is_date_param};
use crate::error::{ValidationResult, Violation};
use crate::query::ParsedRequest;
use crate::rules::collect_offenders;

// ASCII digits only; `\d` would admit other Unicode decimal digits.
static YEAR_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^20[0-9]{2}$").expect("year pattern is a valid regex")
});

/// Returns true if `value` is exactly a year between 2000 and 2099.
pub fn is_year_only(value: &str) -> bool {
    YEAR_ONLY.is_match(value)
}

/// Checks every date parameter value.
///
/// All values lacking the `eq` prefix are reported together first. Only when
/// every value is an equality filter are the remainders checked for year
/// format.
pub fn check(request: &ParsedRequest) -> ValidationResult {
    let not_equality = collect_offenders(request, is_date_param, |_, value| {
        value.starts_with(DATE_EQUALITY_PREFIX)
    });
    if !not_equality.is_empty() {
        return Err(Violation::DateFilterNotEquality {
            offenders: not_equality,
        });
    }

    let not_year = collect_offenders(request, is_date_param, |_, value| {
        value
            .strip_prefix(DATE_EQUALITY_PREFIX)
            .is_some_and(is_year_only)
    });
    if !not_year.is_empty() {
        return Err(Violation::DateValueNotYearOnly { offenders: not_year });
    }

    Ok(())
}
