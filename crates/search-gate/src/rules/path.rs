//! Request path classification.

use crate::catalog::is_resource_type;
use crate::error::{ValidationResult, Violation};
use crate::query::ParsedRequest;

/// Checks that every path is either the metadata probe or exactly a
/// resource type name.
pub fn check(requests: &[ParsedRequest]) -> ValidationResult {
    match requests
        .iter()
        .filter(|r| !r.is_metadata())
        .find(|r| !is_resource_type(&r.path))
    {
        Some(request) => Err(Violation::ForbiddenPath {
            path: request.path.clone(),
        }),
        None => Ok(()),
    }
}
