//! Search parameter whitelist.

use crate::catalog::{is_valid_search_param, valid_search_params};
use crate::error::{ValidationResult, Violation};
use crate::query::{ParsedRequest, base_name};

/// Checks that every parameter base name is whitelisted.
pub fn check(request: &ParsedRequest) -> ValidationResult {
    if request
        .params
        .names()
        .all(|name| is_valid_search_param(base_name(name)))
    {
        return Ok(());
    }

    Err(Violation::InvalidSearchParam {
        whitelist: valid_search_params()
            .iter()
            .map(|p| p.to_string())
            .collect(),
    })
}
