//! `_summary=count` requirement.

use crate::catalog::{SUMMARY_COUNT, SUMMARY_PARAM};
use crate::error::{ValidationResult, Violation};
use crate::query::ParsedRequest;

/// Checks that the request carries exactly one `_summary` parameter with
/// the value `count`.
pub fn check(request: &ParsedRequest) -> ValidationResult {
    match request.params.get(SUMMARY_PARAM).unwrap_or_default() {
        [] => Err(Violation::MissingSummaryParam),
        [value] if value == SUMMARY_COUNT => Ok(()),
        [value] => Err(Violation::UnexpectedSummaryValue {
            actual: value.clone(),
        }),
        _ => Err(Violation::DuplicateSummaryParam),
    }
}
