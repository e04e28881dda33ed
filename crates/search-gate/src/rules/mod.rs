//! Validation rules applied to a search Bundle.
//!
//! Each rule is an independent function returning a [`ValidationResult`].
//! [`structural`] inspects the Bundle itself; [`path`] classifies every
//! request path; the remaining rules are [`RequestRule`]s applied to each
//! non-metadata request in [`REQUEST_RULES`] order.

pub mod date;
pub mod path;
pub mod structural;
pub mod summary;
pub mod token;
pub mod whitelist;

use crate::error::{Offender, ValidationResult};
use crate::query::{ParsedRequest, base_name};

/// A rule checked against a single resource search request.
pub type RequestRule = fn(&ParsedRequest) -> ValidationResult;

/// Request rules in evaluation order, with a name for tracing.
pub const REQUEST_RULES: &[(&str, RequestRule)] = &[
    ("summary", summary::check),
    ("whitelist", whitelist::check),
    ("date", date::check),
    ("token", token::check),
];

/// Collects one offender per value of every parameter whose base name
/// satisfies `is_typed` and whose `(name, value)` fails `is_valid`.
pub(crate) fn collect_offenders<T, V>(
    request: &ParsedRequest,
    is_typed: T,
    mut is_valid: V,
) -> Vec<Offender>
where
    T: Fn(&str) -> bool,
    V: FnMut(&str, &str) -> bool,
{
    request
        .params
        .pairs()
        .filter(|&(name, _)| is_typed(base_name(name)))
        .filter(|&(name, value)| !is_valid(name, value))
        .map(|(name, value)| Offender::new(name, value))
        .collect()
}
