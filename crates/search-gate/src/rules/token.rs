//! Token parameter rules.
//!
//! Token filters may only name a code system (`http://loinc.org|`), never a
//! specific code, unless the parameter is exempted for the searched resource
//! type in [`TOKEN_EXEMPTIONS`](crate::catalog::TOKEN_EXEMPTIONS).

use crate::catalog::{TOKEN_SYSTEM_SEPARATOR, is_token_exempt, is_token_param};
use crate::error::{ValidationResult, Violation};
use crate::query::{ParsedRequest, base_name};
use crate::rules::collect_offenders;

/// Returns true if a token value names a system without a code.
pub fn is_system_only(value: &str) -> bool {
    value.ends_with(TOKEN_SYSTEM_SEPARATOR)
}

/// Checks every token parameter value.
pub fn check(request: &ParsedRequest) -> ValidationResult {
    let offenders = collect_offenders(request, is_token_param, |name, value| {
        is_system_only(value) || is_token_exempt(base_name(name), &request.path)
    });

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(Violation::TokenValueNotSystemOnly { offenders })
    }
}
